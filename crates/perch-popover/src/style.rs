//! Inline style and class composition for the trigger and the popover box.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use perch_placement::StyleRect;

/// CSS declarations keyed by property name, in a stable order.
pub type StyleMap = BTreeMap<String, String>;

/// Class and inline style overrides that depend on the open state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StateStyles {
    /// Class added while open.
    pub open_class: Option<String>,
    /// Class added while closed.
    pub closed_class: Option<String>,
    /// Declarations applied last while open.
    pub open_style: StyleMap,
    /// Declarations applied last while closed.
    pub closed_style: StyleMap,
}

impl StateStyles {
    /// Defaults for the popover box: `popover--open` while open.
    #[must_use]
    pub fn popover() -> Self {
        Self {
            open_class: Some("popover--open".to_owned()),
            ..Self::default()
        }
    }

    /// The class list for an element whose own class is `base`.
    #[must_use]
    pub fn class(&self, base: Option<&str>, is_open: bool) -> Option<String> {
        let state = if is_open {
            self.open_class.as_deref()
        } else {
            self.closed_class.as_deref()
        };
        class_list(&[base, state])
    }

    /// `base` with the open or closed overrides layered on top.
    #[must_use]
    pub fn style(&self, base: &StyleMap, is_open: bool) -> StyleMap {
        let mut style = base.clone();
        style.extend(self.state_style(is_open).clone());
        style
    }

    const fn state_style(&self, is_open: bool) -> &StyleMap {
        if is_open {
            &self.open_style
        } else {
            &self.closed_style
        }
    }

    /// The full inline style of the popover box.
    ///
    /// Layers, later winning: `position: fixed` and visibility, the
    /// element's own style, the resolved offsets, then the open or closed
    /// overrides.
    #[must_use]
    pub fn popover_style(&self, own: &StyleMap, offsets: &StyleRect, is_open: bool) -> StyleMap {
        let visibility = if is_open { "visible" } else { "hidden" };
        let mut style = StyleMap::from([
            ("position".to_owned(), "fixed".to_owned()),
            ("visibility".to_owned(), visibility.to_owned()),
        ]);
        style.extend(own.clone());
        style.extend([
            ("top".to_owned(), offsets.top.to_string()),
            ("right".to_owned(), offsets.right.to_string()),
            ("bottom".to_owned(), offsets.bottom.to_string()),
            ("left".to_owned(), offsets.left.to_string()),
        ]);
        style.extend(self.state_style(is_open).clone());
        style
    }
}

/// Join the non-empty class names, or `None` if there are none.
#[must_use]
pub fn class_list(classes: &[Option<&str>]) -> Option<String> {
    let joined = classes
        .iter()
        .flatten()
        .filter(|class| !class.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ");
    (!joined.is_empty()).then_some(joined)
}
