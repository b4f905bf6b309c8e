//! The popover state machine.
//!
//! A [`Popover`] is driven entirely by its host. Interactions come in as
//! [`PopoverEvent`]s and go out as [`Effect`]s; the controller never touches
//! an element itself. The one exception to that flow is measurement: when the
//! host sees [`Effect::Reposition`] it calls [`Popover::reposition`] with the
//! live trigger and box so the placement engine can read their geometry.
//!
//! ```text
//!   event ──► Popover::handle ──► [Effect] ──► host applies
//!                                     │
//!                          Reposition └──► Popover::reposition(trigger, box)
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use perch_common::warning::warn_once;
use perch_placement::{
    ContainPolicy, Measurable, PlacementResult, PlacementState, RequestedPlacement,
    StyleRect, Viewport, WindowMetrics, resolve_placement,
};

use crate::error::PopoverError;
use crate::options::{PopoverOptions, Portal, Reposition};
use crate::style::StyleMap;
use crate::throttle::Throttle;
use crate::trigger::TriggerOn;

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

/// Something that happened to the trigger, the box or the window.
#[derive(Debug, Clone, PartialEq)]
pub enum PopoverEvent {
    /// The trigger was clicked.
    TriggerClick,
    /// The trigger received focus.
    TriggerFocus,
    /// The pointer entered the trigger.
    TriggerMouseEnter,
    /// The pointer left the trigger.
    TriggerMouseLeave,
    /// A close button inside the box was clicked.
    CloseClick,
    /// A key was pressed inside the box.
    KeyDown(String),
    /// The window was resized.
    Resize {
        /// New window size.
        size: Viewport,
        /// When the event fired.
        at: Instant,
    },
    /// The window was scrolled.
    Scroll {
        /// New vertical scroll offset.
        y: f64,
        /// When the event fired.
        at: Instant,
    },
}

/// Work the host must do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Measure and call [`Popover::reposition`].
    Reposition,
    /// Move focus into the box.
    FocusTarget,
    /// Give focus back to the trigger.
    RestoreTriggerFocus,
    /// The internal open state changed; report it to any change listener.
    Changed(bool),
}

/// Where the placement of the box stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Nothing has been measured yet.
    #[default]
    Idle,
    /// A reposition was requested and not yet performed.
    Measuring,
    /// The placement reflects the last measurement.
    Resolved,
}

/// Headless popover controller.
#[derive(Debug)]
pub struct Popover {
    id: String,
    options: PopoverOptions,
    internal_open: bool,
    trigger_on: TriggerOn,
    requested: RequestedPlacement,
    state: PlacementState,
    phase: Phase,
    resolved_once: bool,
    window_size: Viewport,
    scroll_y: f64,
    resize: Option<(Throttle, Option<Viewport>)>,
    scroll: Option<(Throttle, Option<f64>)>,
}

fn window_throttle<T>(reposition: Reposition) -> Option<(Throttle, Option<T>)> {
    if !reposition.is_enabled() {
        return None;
    }
    let throttle = match reposition {
        Reposition::Fps(fps) => Throttle::per_second(fps),
        Reposition::Off | Reposition::Always => Throttle::unthrottled(),
    };
    Some((throttle, None))
}

impl Popover {
    /// Build a controller from its options.
    #[must_use]
    pub fn new(options: PopoverOptions) -> Self {
        let id = options.id.clone().unwrap_or_else(|| {
            let n = NEXT_ID.fetch_add(1, Ordering::Relaxed);
            format!("perch-popover-{n}")
        });
        Self {
            id,
            internal_open: options.default_open,
            trigger_on: TriggerOn::CLICK,
            requested: RequestedPlacement::from(options.placement),
            state: PlacementState::initial(),
            phase: Phase::Idle,
            resolved_once: false,
            window_size: options.initial_window_size,
            scroll_y: 0.0,
            resize: window_throttle(options.reposition_on_resize),
            scroll: window_throttle(options.reposition_on_scroll),
            options,
        }
    }

    /// Element id shared by the trigger and the box.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Whether the box is visible: the controlled value if there is one,
    /// otherwise the internal state.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.options.open.unwrap_or(self.internal_open)
    }

    /// Whether the host owns the open state.
    #[must_use]
    pub const fn is_controlled(&self) -> bool {
        self.options.open.is_some()
    }

    /// The resolved placement of the box.
    #[must_use]
    pub const fn placement(&self) -> PlacementResult {
        self.state.result
    }

    /// The current placement state, including what was requested.
    #[must_use]
    pub const fn state(&self) -> &PlacementState {
        &self.state
    }

    /// Where the placement stands.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Trigger modes currently registered.
    #[must_use]
    pub const fn trigger_on(&self) -> TriggerOn {
        self.trigger_on
    }

    /// Mount point for the box.
    #[must_use]
    pub const fn portal(&self) -> &Portal {
        &self.options.portal
    }

    /// The configured overflow policy.
    #[must_use]
    pub const fn contain_policy(&self) -> &ContainPolicy {
        &self.options.contain_policy
    }

    /// Register the trigger's modes, e.g. `"hover focus"`.
    ///
    /// # Errors
    ///
    /// Returns [`PopoverError::UnknownTrigger`] if no mode is recognized; the
    /// previous modes stay in effect.
    pub fn set_trigger(&mut self, on: &str) -> Result<(), PopoverError> {
        self.trigger_on = on.parse()?;
        Ok(())
    }

    /// Change the requested placement. Asks for a reposition whenever the
    /// request changes, even while closed.
    pub fn set_placement(&mut self, requested: impl Into<RequestedPlacement>) -> Vec<Effect> {
        let requested = requested.into();
        if requested.same_as(&self.requested) {
            return Vec::new();
        }
        self.requested = requested;
        self.request_reposition()
    }

    /// Change the controlled open state; `None` hands control back to the
    /// internal state.
    pub fn set_open(&mut self, open: Option<bool>) -> Vec<Effect> {
        let was_open = self.is_open();
        self.options.open = open;
        let mut effects = Vec::new();
        self.visibility_effects(was_open, &mut effects);
        effects
    }

    /// Open the box.
    pub fn open(&mut self) -> Vec<Effect> {
        self.set_internal(true)
    }

    /// Close the box.
    pub fn close(&mut self) -> Vec<Effect> {
        self.set_internal(false)
    }

    /// Open if closed, close if open.
    pub fn toggle(&mut self) -> Vec<Effect> {
        self.set_internal(!self.internal_open)
    }

    /// React to an interaction.
    pub fn handle(&mut self, event: PopoverEvent) -> Vec<Effect> {
        match event {
            PopoverEvent::TriggerClick if self.trigger_on.click => self.toggle(),
            PopoverEvent::TriggerFocus if self.trigger_on.focus => self.open(),
            PopoverEvent::TriggerMouseEnter if self.trigger_on.hover => self.open(),
            PopoverEvent::TriggerMouseLeave if self.trigger_on.hover => self.close(),
            PopoverEvent::CloseClick => self.close(),
            PopoverEvent::KeyDown(key) if key == "Escape" && self.options.close_on_escape => {
                self.close()
            }
            PopoverEvent::Resize { size, at } => self.on_resize(size, at),
            PopoverEvent::Scroll { y, at } => self.on_scroll(y, at),
            _ => Vec::new(),
        }
    }

    /// Apply resize and scroll events that were held back by throttling and
    /// whose interval has now passed.
    pub fn poll(&mut self, now: Instant) -> Vec<Effect> {
        let mut effects = Vec::new();
        if let Some((throttle, pending)) = &mut self.resize
            && throttle.flush(now)
            && let Some(size) = pending.take()
        {
            effects.extend(self.apply_resize(size));
        }
        if let Some((throttle, pending)) = &mut self.scroll
            && throttle.flush(now)
            && let Some(y) = pending.take()
        {
            effects.extend(self.apply_scroll(y));
        }
        effects
    }

    /// Measure the trigger and the box and recompute the placement.
    ///
    /// If either element cannot be measured the previous placement is kept.
    ///
    /// # Errors
    ///
    /// Returns [`PopoverError::Placement`] if a placement callback returns a
    /// malformed style. The previous placement is kept.
    pub fn reposition(
        &mut self,
        trigger: Option<&dyn Measurable>,
        target: Option<&dyn Measurable>,
        window: &dyn WindowMetrics,
    ) -> Result<PlacementResult, PopoverError> {
        let resolved = resolve_placement(
            &self.requested,
            trigger,
            target,
            &self.options.contain_policy,
            window,
        );
        match resolved {
            Ok(Some(state)) => {
                placement_trace!(
                    "{} placement {} -> {}",
                    self.id,
                    self.state.result.placement,
                    state.result.placement
                );
                self.state = state;
                self.resolved_once = true;
                self.phase = Phase::Resolved;
            }
            Ok(None) => self.settle(),
            Err(error) => {
                self.settle();
                return Err(error.into());
            }
        }
        Ok(self.state.result)
    }

    /// Inline style for the box, layered over its own `style`.
    #[must_use]
    pub fn target_style(&self, own: &StyleMap) -> StyleMap {
        self.options
            .styles
            .popover_style(own, &self.state.result.style, self.is_open())
    }

    /// Class list for the box, given its own class.
    #[must_use]
    pub fn target_class(&self, own: Option<&str>) -> Option<String> {
        self.options.styles.class(own, self.is_open())
    }

    /// Inline style for the trigger, layered over its own `style`.
    #[must_use]
    pub fn trigger_style(&self, own: &StyleMap) -> StyleMap {
        self.options.trigger_styles.style(own, self.is_open())
    }

    /// Class list for the trigger, given its own class.
    #[must_use]
    pub fn trigger_class(&self, own: Option<&str>) -> Option<String> {
        self.options.trigger_styles.class(own, self.is_open())
    }

    /// The resolved offsets of the box.
    #[must_use]
    pub const fn offsets(&self) -> StyleRect {
        self.state.result.style
    }

    fn settle(&mut self) {
        self.phase = if self.resolved_once {
            Phase::Resolved
        } else {
            Phase::Idle
        };
    }

    fn request_reposition(&mut self) -> Vec<Effect> {
        self.phase = Phase::Measuring;
        vec![Effect::Reposition]
    }

    fn set_internal(&mut self, open: bool) -> Vec<Effect> {
        let mut effects = Vec::new();
        if open == self.internal_open {
            return effects;
        }
        let was_open = self.is_open();
        self.internal_open = open;
        effects.push(Effect::Changed(open));
        if self.is_controlled() && was_open != open {
            let _ = warn_once(
                "Popover",
                "open state is controlled; update it through set_open to apply changes",
            );
        }
        self.visibility_effects(was_open, &mut effects);
        effects
    }

    fn visibility_effects(&mut self, was_open: bool, effects: &mut Vec<Effect>) {
        match (was_open, self.is_open()) {
            (false, true) => {
                effects.extend(self.request_reposition());
                effects.push(Effect::FocusTarget);
            }
            (true, false) if self.trigger_on.click => effects.push(Effect::RestoreTriggerFocus),
            _ => {}
        }
    }

    fn on_resize(&mut self, size: Viewport, at: Instant) -> Vec<Effect> {
        let Some((throttle, pending)) = &mut self.resize else {
            return Vec::new();
        };
        if throttle.hit(at) {
            *pending = None;
            self.apply_resize(size)
        } else {
            *pending = Some(size);
            Vec::new()
        }
    }

    fn on_scroll(&mut self, y: f64, at: Instant) -> Vec<Effect> {
        let Some((throttle, pending)) = &mut self.scroll else {
            return Vec::new();
        };
        if throttle.hit(at) {
            *pending = None;
            self.apply_scroll(y)
        } else {
            *pending = Some(y);
            Vec::new()
        }
    }

    fn apply_resize(&mut self, size: Viewport) -> Vec<Effect> {
        if size == self.window_size {
            return Vec::new();
        }
        self.window_size = size;
        self.reposition_if_open()
    }

    fn apply_scroll(&mut self, y: f64) -> Vec<Effect> {
        if y == self.scroll_y {
            return Vec::new();
        }
        self.scroll_y = y;
        self.reposition_if_open()
    }

    fn reposition_if_open(&mut self) -> Vec<Effect> {
        if self.is_open() {
            self.request_reposition()
        } else {
            Vec::new()
        }
    }
}
