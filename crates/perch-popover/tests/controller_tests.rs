//! Integration tests for the popover controller.

use std::time::{Duration, Instant};

use perch_placement::{
    AutoOr, ClientRect, Measurable, Placement, PlacementChoice, PlacementResult,
    RequestedPlacement, StyleRect, Viewport,
};
use perch_popover::{
    Effect, Phase, Popover, PopoverError, PopoverEvent, PopoverOptions, Reposition, StateStyles,
    StyleMap,
};

const VIEWPORT: Viewport = Viewport {
    width: 1000.0,
    height: 800.0,
};

/// 40x40 trigger in the middle of the viewport.
fn trigger() -> ClientRect {
    ClientRect::from_edges(400.0, 520.0, 440.0, 480.0)
}

fn target() -> ClientRect {
    ClientRect::from_origin_size(0.0, 0.0, 200.0, 100.0)
}

fn measure(popover: &mut Popover) -> Result<PlacementResult, PopoverError> {
    let trigger = trigger();
    let target = target();
    popover.reposition(
        Some(&trigger as &dyn Measurable),
        Some(&target as &dyn Measurable),
        &VIEWPORT,
    )
}

#[test]
fn test_click_toggles_and_manages_focus() {
    let mut popover = Popover::new(PopoverOptions::default());
    assert!(!popover.is_open());
    assert_eq!(popover.phase(), Phase::Idle);

    assert_eq!(
        popover.handle(PopoverEvent::TriggerClick),
        vec![Effect::Changed(true), Effect::Reposition, Effect::FocusTarget]
    );
    assert!(popover.is_open());
    assert_eq!(popover.phase(), Phase::Measuring);

    let result = measure(&mut popover).unwrap();
    assert_eq!(popover.phase(), Phase::Resolved);
    assert_eq!(result.placement, Placement::Bottom);
    assert_eq!(result.style.top, AutoOr::Length(440.0));
    assert_eq!(result.style.right, AutoOr::Length(400.0));

    assert_eq!(
        popover.handle(PopoverEvent::TriggerClick),
        vec![Effect::Changed(false), Effect::RestoreTriggerFocus]
    );
    assert!(!popover.is_open());
}

#[test]
fn test_default_open_reports_no_initial_change() {
    let mut popover = Popover::new(PopoverOptions {
        default_open: true,
        ..PopoverOptions::default()
    });
    assert!(popover.is_open());
    assert!(popover.open().is_empty());
    assert_eq!(
        popover.close(),
        vec![Effect::Changed(false), Effect::RestoreTriggerFocus]
    );
}

#[test]
fn test_hover_trigger() {
    let mut popover = Popover::new(PopoverOptions::default());
    popover.set_trigger("hover").unwrap();

    assert!(popover.handle(PopoverEvent::TriggerClick).is_empty());
    assert!(popover.handle(PopoverEvent::TriggerFocus).is_empty());
    assert_eq!(
        popover.handle(PopoverEvent::TriggerMouseEnter),
        vec![Effect::Changed(true), Effect::Reposition, Effect::FocusTarget]
    );
    // No click mode, so focus stays where it is.
    assert_eq!(
        popover.handle(PopoverEvent::TriggerMouseLeave),
        vec![Effect::Changed(false)]
    );
}

#[test]
fn test_focus_trigger_and_unknown_modes() {
    let mut popover = Popover::new(PopoverOptions::default());
    assert_eq!(
        popover.set_trigger("press"),
        Err(PopoverError::UnknownTrigger("press".to_owned()))
    );
    assert!(popover.trigger_on().click);

    popover.set_trigger("click focus").unwrap();
    assert!(popover.handle(PopoverEvent::TriggerMouseEnter).is_empty());
    assert!(popover.handle(PopoverEvent::TriggerFocus).contains(&Effect::Changed(true)));
    assert!(popover.handle(PopoverEvent::TriggerFocus).is_empty());
}

#[test]
fn test_escape_and_close_button() {
    let mut popover = Popover::new(PopoverOptions::default());
    let _ = popover.open();

    assert!(popover.handle(PopoverEvent::KeyDown("Enter".to_owned())).is_empty());
    assert!(
        popover
            .handle(PopoverEvent::KeyDown("Escape".to_owned()))
            .contains(&Effect::Changed(false))
    );

    let _ = popover.open();
    assert!(
        popover
            .handle(PopoverEvent::CloseClick)
            .contains(&Effect::Changed(false))
    );

    let mut sticky = Popover::new(PopoverOptions {
        close_on_escape: false,
        ..PopoverOptions::default()
    });
    let _ = sticky.open();
    assert!(sticky.handle(PopoverEvent::KeyDown("Escape".to_owned())).is_empty());
    assert!(sticky.is_open());
}

#[test]
fn test_controlled_state_is_owned_by_host() {
    let mut popover = Popover::new(PopoverOptions {
        open: Some(false),
        ..PopoverOptions::default()
    });
    assert!(popover.is_controlled());

    assert_eq!(
        popover.handle(PopoverEvent::TriggerClick),
        vec![Effect::Changed(true)]
    );
    assert!(!popover.is_open());

    assert_eq!(
        popover.set_open(Some(true)),
        vec![Effect::Reposition, Effect::FocusTarget]
    );
    assert!(popover.is_open());
    assert_eq!(
        popover.set_open(Some(false)),
        vec![Effect::RestoreTriggerFocus]
    );
}

#[test]
fn test_placement_change_repositions_even_when_closed() {
    let mut popover = Popover::new(PopoverOptions::default());
    assert!(popover.set_placement(Placement::Bottom).is_empty());
    assert_eq!(popover.set_placement("rightTop"), vec![Effect::Reposition]);
    assert!(!popover.is_open());

    let result = measure(&mut popover).unwrap();
    assert_eq!(result.placement, Placement::RightTop);
    assert_eq!(result.style.left, AutoOr::Length(520.0));
    assert_eq!(result.style.top, AutoOr::Length(400.0));
}

#[test]
fn test_resize_is_throttled_and_flushed() {
    let mut popover = Popover::new(PopoverOptions {
        reposition_on_resize: Reposition::Fps(10),
        ..PopoverOptions::default()
    });
    let start = Instant::now();
    let resize = |width: f64, at: Instant| PopoverEvent::Resize {
        size: Viewport {
            width,
            height: 800.0,
        },
        at,
    };

    // Closed: the size is tracked but nothing is repositioned.
    assert!(popover.handle(resize(900.0, start)).is_empty());

    let _ = popover.open();
    let later = start + Duration::from_millis(200);
    assert_eq!(popover.handle(resize(1000.0, later)), vec![Effect::Reposition]);
    assert!(
        popover
            .handle(resize(1100.0, later + Duration::from_millis(50)))
            .is_empty()
    );
    assert!(popover.poll(later + Duration::from_millis(60)).is_empty());
    assert_eq!(
        popover.poll(later + Duration::from_millis(100)),
        vec![Effect::Reposition]
    );
    assert!(popover.poll(later + Duration::from_millis(500)).is_empty());

    // Same size again: nothing to do.
    assert!(
        popover
            .handle(resize(1100.0, later + Duration::from_millis(900)))
            .is_empty()
    );
}

#[test]
fn test_scroll_can_be_disabled() {
    let mut popover = Popover::new(PopoverOptions {
        reposition_on_scroll: Reposition::Off,
        ..PopoverOptions::default()
    });
    let _ = popover.open();
    let now = Instant::now();
    assert!(popover.handle(PopoverEvent::Scroll { y: 120.0, at: now }).is_empty());

    let mut tracking = Popover::new(PopoverOptions {
        reposition_on_scroll: Reposition::Always,
        ..PopoverOptions::default()
    });
    let _ = tracking.open();
    assert_eq!(
        tracking.handle(PopoverEvent::Scroll { y: 120.0, at: now }),
        vec![Effect::Reposition]
    );
    assert!(tracking.handle(PopoverEvent::Scroll { y: 120.0, at: now }).is_empty());
}

#[test]
fn test_window_events_are_ignored_by_default() {
    let mut popover = Popover::new(PopoverOptions::default());
    let _ = popover.open();
    let now = Instant::now();

    let resize = PopoverEvent::Resize {
        size: Viewport {
            width: 800.0,
            height: 600.0,
        },
        at: now,
    };
    assert!(popover.handle(resize).is_empty());
    assert!(popover.handle(PopoverEvent::Scroll { y: 40.0, at: now }).is_empty());
    assert!(popover.poll(now + Duration::from_secs(1)).is_empty());
}

#[test]
fn test_unmeasurable_elements_keep_previous_state() {
    let mut popover = Popover::new(PopoverOptions::default());
    let _ = popover.open();

    let target = target();
    let result = popover
        .reposition(None, Some(&target as &dyn Measurable), &VIEWPORT)
        .unwrap();
    assert_eq!(result.style, StyleRect::uniform(0.0));
    assert_eq!(popover.phase(), Phase::Idle);

    let placed = measure(&mut popover).unwrap();
    let _ = popover.set_placement("top");
    let kept = popover
        .reposition(None, Some(&target as &dyn Measurable), &VIEWPORT)
        .unwrap();
    assert_eq!(kept, placed);
    assert_eq!(popover.phase(), Phase::Resolved);
}

#[test]
fn test_malformed_callback_is_reported_and_state_kept() {
    let mut popover = Popover::new(PopoverOptions::default());
    let placed = measure(&mut popover).unwrap();

    let _ = popover.set_placement(RequestedPlacement::callback(|_, _, _| {
        PlacementChoice::Resolved(PlacementResult {
            placement: Placement::Left,
            style: StyleRect::uniform(1.0),
        })
    }));
    let error = measure(&mut popover).unwrap_err();
    assert!(matches!(error, PopoverError::Placement(_)));
    assert_eq!(popover.placement(), placed);
    assert_eq!(popover.phase(), Phase::Resolved);
}

#[test]
fn test_target_style_and_class() {
    let mut popover = Popover::new(PopoverOptions::default());
    let own = StyleMap::from([("zIndex".to_owned(), "10".to_owned())]);

    let closed = popover.target_style(&own);
    assert_eq!(closed["position"], "fixed");
    assert_eq!(closed["visibility"], "hidden");
    assert_eq!(closed["top"], "0px");
    assert_eq!(popover.target_class(Some("menu")), Some("menu".to_owned()));

    let _ = popover.open();
    let _ = measure(&mut popover).unwrap();
    let open = popover.target_style(&own);
    assert_eq!(open["visibility"], "visible");
    assert_eq!(open["top"], "440px");
    assert_eq!(open["bottom"], "auto");
    assert_eq!(open["zIndex"], "10");
    assert_eq!(
        popover.target_class(Some("menu")),
        Some("menu popover--open".to_owned())
    );
}

#[test]
fn test_trigger_style_and_class() {
    let mut popover = Popover::new(PopoverOptions {
        trigger_styles: StateStyles {
            open_class: Some("button--active".to_owned()),
            closed_class: Some("button--idle".to_owned()),
            open_style: StyleMap::from([("color".to_owned(), "red".to_owned())]),
            closed_style: StyleMap::new(),
        },
        ..PopoverOptions::default()
    });
    let own = StyleMap::from([("color".to_owned(), "black".to_owned())]);

    assert_eq!(
        popover.trigger_class(Some("button")),
        Some("button button--idle".to_owned())
    );
    assert_eq!(popover.trigger_style(&own)["color"], "black");
    assert!(!popover.trigger_style(&own).contains_key("position"));

    let _ = popover.open();
    assert_eq!(
        popover.trigger_class(Some("button")),
        Some("button button--active".to_owned())
    );
    assert_eq!(popover.trigger_style(&own)["color"], "red");
}

#[test]
fn test_ids() {
    let a = Popover::new(PopoverOptions::default());
    let b = Popover::new(PopoverOptions::default());
    assert_ne!(a.id(), b.id());

    let named = Popover::new(PopoverOptions {
        id: Some("account-menu".to_owned()),
        ..PopoverOptions::default()
    });
    assert_eq!(named.id(), "account-menu");
}
