//! Breadcrumb segment: one directory component, the file name, or one
//! context node.
//!
//! Width invariant: `width() == width(icon.glyph) + 1 + width(text)` when an
//! icon is present, `width(text)` otherwise. Style markers are zero-width.
//! All widths are display cells from `core_text`, never bytes or code points.

use core_model::{ActionId, StyleTag, StyledSpan};
use core_text::str_width;

/// Leading decorative glyph with its own style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Icon {
    pub glyph: String,
    pub style: StyleTag,
}

impl Icon {
    pub fn new(glyph: impl Into<String>, style: StyleTag) -> Self {
        Self {
            glyph: glyph.into(),
            style,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    text: String,
    style: StyleTag,
    icon: Option<Icon>,
    action: Option<ActionId>,
}

impl Segment {
    pub fn new(text: impl Into<String>, style: StyleTag) -> Self {
        Self {
            text: text.into(),
            style,
            icon: None,
            action: None,
        }
    }

    /// The synthetic marker standing in for collapsed segments.
    pub fn ellipsis(glyph: &str) -> Self {
        Self::new(glyph, StyleTag::Ellipsis)
    }

    pub fn with_icon(mut self, icon: Option<Icon>) -> Self {
        self.icon = icon;
        self
    }

    pub fn with_action(mut self, action: Option<ActionId>) -> Self {
        self.action = action;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn style(&self) -> &StyleTag {
        &self.style
    }

    pub fn icon(&self) -> Option<&Icon> {
        self.icon.as_ref()
    }

    pub fn action(&self) -> Option<ActionId> {
        self.action
    }

    pub fn is_ellipsis(&self) -> bool {
        self.style == StyleTag::Ellipsis
    }

    pub fn width(&self) -> usize {
        let icon = self
            .icon
            .as_ref()
            .map_or(0, |icon| str_width(&icon.glyph) + 1);
        icon + str_width(&self.text)
    }

    /// Icon (space separated) then text, each in its own style. Every span
    /// carries the segment's action so the whole segment is clickable.
    pub fn render(&self) -> Vec<StyledSpan> {
        let mut spans = Vec::with_capacity(3);
        if let Some(icon) = &self.icon {
            spans.push(StyledSpan::new(icon.style.clone(), icon.glyph.as_str()).with_action(self.action));
            spans.push(StyledSpan::new(icon.style.clone(), " ").with_action(self.action));
        }
        spans.push(StyledSpan::new(self.style.clone(), self.text.as_str()).with_action(self.action));
        spans
    }
}
