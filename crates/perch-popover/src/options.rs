//! Popover configuration, loadable from JSON.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use perch_placement::{ContainPolicy, Placement, Viewport};

use crate::style::StateStyles;

/// When to recompute the placement in response to window events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reposition {
    /// Ignore the event.
    #[default]
    Off,
    /// Reposition on every event.
    Always,
    /// Reposition at most this many times per second. `0` behaves as `Off`.
    Fps(u32),
}

impl Reposition {
    /// Whether window events should be observed at all.
    #[must_use]
    pub const fn is_enabled(self) -> bool {
        !matches!(self, Self::Off | Self::Fps(0))
    }
}

/// `false`, `true`, or a frame rate.
impl Serialize for Reposition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Off => serializer.serialize_bool(false),
            Self::Always => serializer.serialize_bool(true),
            Self::Fps(fps) => serializer.serialize_u32(*fps),
        }
    }
}

impl<'de> Deserialize<'de> for Reposition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Flag(bool),
            Fps(u32),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Flag(false) => Self::Off,
            Raw::Flag(true) => Self::Always,
            Raw::Fps(fps) => Self::Fps(fps),
        })
    }
}

/// Where the popover box is mounted.
///
/// Deserializes from `false`/`null`, `true`, a selector string, or an object
/// `{ "container": "<selector>" }`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Portal {
    /// Next to the trigger.
    #[default]
    Inline,
    /// In the host's default portal container.
    Default,
    /// In the container matching this selector.
    Container(String),
}

/// `false`, `true`, or a selector string.
impl Serialize for Portal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Inline => serializer.serialize_bool(false),
            Self::Default => serializer.serialize_bool(true),
            Self::Container(selector) => serializer.serialize_str(selector),
        }
    }
}

impl<'de> Deserialize<'de> for Portal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Flag(Option<bool>),
            Selector(String),
            Props { container: Option<String> },
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Flag(None | Some(false)) => Self::Inline,
            Raw::Flag(Some(true)) | Raw::Props { container: None } => Self::Default,
            Raw::Selector(selector)
            | Raw::Props {
                container: Some(selector),
            } => Self::Container(selector),
        })
    }
}

/// Everything a [`Popover`](crate::Popover) is configured with.
///
/// Every field has a default, so `{}` is a valid configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PopoverOptions {
    /// Element id shared by the trigger and the box; generated if absent.
    pub id: Option<String>,
    /// Initial state when uncontrolled.
    pub default_open: bool,
    /// Controlled open state. When set, the host owns visibility and
    /// the controller only reports requested changes.
    pub open: Option<bool>,
    /// How overflow is corrected.
    pub contain_policy: ContainPolicy,
    /// Reposition on window resize.
    pub reposition_on_resize: Reposition,
    /// Reposition on window scroll.
    pub reposition_on_scroll: Reposition,
    /// Window size assumed before the first resize event.
    pub initial_window_size: Viewport,
    /// Requested placement.
    pub placement: Placement,
    /// Close when Escape is pressed inside the box.
    pub close_on_escape: bool,
    /// Class and style overrides for the box.
    pub styles: StateStyles,
    /// Class and style overrides for the trigger.
    pub trigger_styles: StateStyles,
    /// Mount point for the box.
    pub portal: Portal,
}

impl Default for PopoverOptions {
    fn default() -> Self {
        Self {
            id: None,
            default_open: false,
            open: None,
            contain_policy: ContainPolicy::Flip,
            reposition_on_resize: Reposition::Off,
            reposition_on_scroll: Reposition::Off,
            initial_window_size: Viewport {
                width: 1280.0,
                height: 720.0,
            },
            placement: Placement::Bottom,
            close_on_escape: true,
            styles: StateStyles::popover(),
            trigger_styles: StateStyles::default(),
            portal: Portal::Inline,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_gives_defaults() {
        let options: PopoverOptions = serde_json::from_str("{}").unwrap();
        assert!(!options.default_open);
        assert_eq!(options.open, None);
        assert!(matches!(options.contain_policy, ContainPolicy::Flip));
        assert_eq!(options.placement, Placement::Bottom);
        assert_eq!(options.initial_window_size.width, 1280.0);
        assert!(options.close_on_escape);
        assert_eq!(options.reposition_on_resize, Reposition::Off);
        assert_eq!(options.reposition_on_scroll, Reposition::Off);
        assert_eq!(options.trigger_styles, StateStyles::default());
        assert_eq!(options.styles.open_class.as_deref(), Some("popover--open"));
        assert_eq!(options.portal, Portal::Inline);
    }

    #[test]
    fn test_json_forms() {
        let options: PopoverOptions = serde_json::from_str(
            r##"{
                "open": true,
                "containPolicy": null,
                "repositionOnResize": 30,
                "repositionOnScroll": false,
                "placement": "innerTopLeft",
                "portal": "#overlays"
            }"##,
        )
        .unwrap();
        assert_eq!(options.open, Some(true));
        assert!(matches!(options.contain_policy, ContainPolicy::None));
        assert_eq!(options.reposition_on_resize, Reposition::Fps(30));
        assert_eq!(options.reposition_on_scroll, Reposition::Off);
        assert_eq!(options.placement, Placement::InnerTopLeft);
        assert_eq!(options.portal, Portal::Container("#overlays".to_owned()));
    }

    #[test]
    fn test_portal_forms() {
        let parse = |json: &str| serde_json::from_str::<Portal>(json).unwrap();
        assert_eq!(parse("null"), Portal::Inline);
        assert_eq!(parse("false"), Portal::Inline);
        assert_eq!(parse("true"), Portal::Default);
        assert_eq!(parse("{}"), Portal::Default);
        assert_eq!(
            parse(r##"{ "container": "#overlays" }"##),
            Portal::Container("#overlays".to_owned())
        );
    }

    #[test]
    fn test_reposition_enabled() {
        assert!(Reposition::Always.is_enabled());
        assert!(Reposition::Fps(60).is_enabled());
        assert!(!Reposition::Fps(0).is_enabled());
        assert!(!Reposition::Off.is_enabled());
    }
}
