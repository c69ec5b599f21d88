//! Terminal painting of a `StyledLine`.
//!
//! Emits exactly `width` cells starting at the current cursor position: the
//! left spans in their resolved styles, the gap, the right-aligned custom
//! section and the trailing pad, all clipped at `width` without splitting a
//! grapheme cluster. Commands are queued; the caller flushes.

use crate::theme::StyleMap;
use anyhow::Result;
use core_model::{StyleTag, StyledLine};
use core_text::clip_to_width;
use crossterm::{
    queue,
    style::{PrintStyledContent, StyledContent},
};
use std::io::Write;

pub fn paint<W: Write>(out: &mut W, line: &StyledLine, width: usize, theme: &StyleMap) -> Result<()> {
    let mut remaining = width;
    for span in &line.spans {
        if remaining == 0 {
            break;
        }
        let (text, used) = clip_to_width(&span.text, remaining);
        if used == 0 {
            continue;
        }
        let style = theme.resolve(&span.style).to_content_style();
        queue!(out, PrintStyledContent(StyledContent::new(style, text)))?;
        remaining -= used;
    }

    let gap = remaining.saturating_sub(line.right_width());
    let mut tail = " ".repeat(gap);
    tail.push_str(&line.right);
    tail.extend(std::iter::repeat_n(' ', StyledLine::TRAILING_PAD));
    let (text, used) = clip_to_width(&tail, remaining);
    let mut text = text.to_string();
    text.extend(std::iter::repeat_n(' ', remaining - used));
    if !text.is_empty() {
        let style = theme.resolve(&StyleTag::Normal).to_content_style();
        queue!(out, PrintStyledContent(StyledContent::new(style, text)))?;
    }
    Ok(())
}
