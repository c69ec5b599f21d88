//! Rendered breadcrumb line.
//!
//! A `StyledLine` is an ordered run of `(style, text)` spans laid out from the
//! left edge, followed by a flexible gap and a custom section that is right
//! aligned inside whatever width the surface has, plus one trailing padding
//! cell. Spans carrying an action id are addressable by column for click
//! dispatch.
//!
//! Layout rules:
//! * Left spans start at column 0 and are never reordered.
//! * The right section starts at `max(left_width, width - right_width)`, so it
//!   never overlaps the left part; anything past `width` is clipped by painters.

use crate::{ActionId, StyleTag};
use core_text::str_width;
use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSpan {
    pub style: StyleTag,
    pub text: String,
    pub action: Option<ActionId>,
}

impl StyledSpan {
    pub fn new(style: StyleTag, text: impl Into<String>) -> Self {
        Self {
            style,
            text: text.into(),
            action: None,
        }
    }

    pub fn with_action(mut self, action: Option<ActionId>) -> Self {
        self.action = action;
        self
    }

    pub fn width(&self) -> usize {
        str_width(&self.text)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyledLine {
    pub spans: Vec<StyledSpan>,
    /// Free-form custom section, right aligned.
    pub right: String,
}

impl StyledLine {
    /// Cells of trailing padding after the right section.
    pub const TRAILING_PAD: usize = 1;

    pub fn left_width(&self) -> usize {
        self.spans.iter().map(StyledSpan::width).sum()
    }

    /// Width of the right section including trailing padding.
    pub fn right_width(&self) -> usize {
        str_width(&self.right) + Self::TRAILING_PAD
    }

    /// Column where the right section begins for a surface `width` cells wide.
    pub fn right_start(&self, width: usize) -> usize {
        self.left_width()
            .max(width.saturating_sub(self.right_width()))
    }

    /// Column range occupied by every left span, in order.
    pub fn layout(&self) -> Vec<(Range<usize>, &StyledSpan)> {
        let mut col = 0usize;
        self.spans
            .iter()
            .map(|span| {
                let start = col;
                col += span.width();
                (start..col, span)
            })
            .collect()
    }

    /// Action bound to the cell at `column`, if any.
    pub fn action_at(&self, column: usize) -> Option<ActionId> {
        self.layout()
            .into_iter()
            .find(|(range, _)| range.contains(&column))
            .and_then(|(_, span)| span.action)
    }

    /// Distinct action ids in left-to-right order.
    pub fn actions(&self) -> Vec<ActionId> {
        let mut out: Vec<ActionId> = Vec::new();
        for id in self.spans.iter().filter_map(|s| s.action) {
            if !out.contains(&id) {
                out.push(id);
            }
        }
        out
    }

    /// Unstyled text exactly `width` cells wide (gap filled with spaces, overflow clipped).
    pub fn to_plain(&self, width: usize) -> String {
        let mut text: String = self.spans.iter().map(|s| s.text.as_str()).collect();
        let left = str_width(&text);
        let gap = width.saturating_sub(left + self.right_width());
        text.extend(std::iter::repeat_n(' ', gap));
        text.push_str(&self.right);
        text.extend(std::iter::repeat_n(' ', Self::TRAILING_PAD));
        let (clipped, used) = core_text::clip_to_width(&text, width);
        let mut out = clipped.to_string();
        out.extend(std::iter::repeat_n(' ', width.saturating_sub(used)));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> StyledLine {
        StyledLine {
            spans: vec![
                StyledSpan::new(StyleTag::Normal, " "),
                StyledSpan::new(StyleTag::Dirname, "src"),
                StyledSpan::new(StyleTag::Separator, " > "),
                StyledSpan::new(StyleTag::Basename, "界.rs").with_action(Some(ActionId(7))),
            ],
            right: "R".to_string(),
        }
    }

    #[test]
    fn widths_use_display_cells() {
        let line = sample();
        assert_eq!(line.left_width(), 1 + 3 + 3 + 5);
        assert_eq!(line.right_width(), 2);
        assert_eq!(line.right_start(20), 18);
        assert_eq!(line.right_start(10), 12);
    }

    #[test]
    fn action_lookup_by_column() {
        let line = sample();
        assert_eq!(line.action_at(0), None);
        assert_eq!(line.action_at(6), None);
        assert_eq!(line.action_at(7), Some(ActionId(7)));
        assert_eq!(line.action_at(11), Some(ActionId(7)));
        assert_eq!(line.action_at(12), None);
        assert_eq!(line.actions(), vec![ActionId(7)]);
    }

    #[test]
    fn plain_rendering_right_aligns_custom_section() {
        let line = sample();
        assert_eq!(line.to_plain(16), " src > 界.rs  R ");
    }

    #[test]
    fn plain_rendering_clips_to_width() {
        let line = sample();
        // wide glyph does not fit in the last cell; padded with a space instead
        assert_eq!(line.to_plain(8), " src >  ");
        assert_eq!(line.to_plain(9), " src > 界");
    }
}
