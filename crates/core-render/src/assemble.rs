//! Line assembly: joins truncated segments into a `StyledLine`.
//!
//! Layout, left to right: one padding cell, the lead custom section, each
//! segment's rendered spans with ` <separator> ` between neighbours, then the
//! flexible gap, the custom section and one trailing padding cell. The gap and
//! right-hand part are carried by `StyledLine::right`; painters place them.

use crate::segment::Segment;
use crate::truncate::SEPARATOR_PADDING;
use core_model::{StyleTag, StyledLine, StyledSpan};
use core_text::str_width;

/// Leading padding cells before the lead section.
pub const LEAD_PAD: usize = 1;

/// Decorations surrounding the segment run.
#[derive(Debug, Clone, Copy)]
pub struct Chrome<'a> {
    pub separator: &'a str,
    pub lead: &'a str,
    pub custom: &'a str,
}

/// Width the assembled line would occupy (flexible gap excluded).
pub fn occupied_width(segments: &[Segment], chrome: &Chrome<'_>) -> usize {
    let separators = segments.len().saturating_sub(1) * (str_width(chrome.separator) + SEPARATOR_PADDING);
    let body: usize = segments.iter().map(Segment::width).sum();
    LEAD_PAD + str_width(chrome.lead) + body + separators + str_width(chrome.custom) + StyledLine::TRAILING_PAD
}

/// `None` when there is nothing to show.
pub fn assemble(segments: &[Segment], chrome: &Chrome<'_>) -> Option<StyledLine> {
    if segments.is_empty() {
        return None;
    }
    let mut spans = Vec::with_capacity(segments.len() * 4 + 2);
    spans.push(StyledSpan::new(StyleTag::Normal, " "));
    if !chrome.lead.is_empty() {
        spans.push(StyledSpan::new(StyleTag::Normal, chrome.lead));
    }
    for (idx, segment) in segments.iter().enumerate() {
        if idx > 0 {
            spans.push(StyledSpan::new(StyleTag::Normal, " "));
            spans.push(StyledSpan::new(StyleTag::Separator, chrome.separator));
            spans.push(StyledSpan::new(StyleTag::Normal, " "));
        }
        spans.extend(segment.render());
    }
    Some(StyledLine {
        spans,
        right: chrome.custom.to_string(),
    })
}
