//! Display width engine for breadcrumb text.
//!
//! Every width decision in the workspace flows through [`egc_width`] (one
//! grapheme cluster) or [`str_width`] (a whole label). Widths are terminal
//! cells: wide East Asian glyphs and emoji count 2, combining and other
//! zero-width code points count 0, everything else counts 1. Byte length and
//! code point count are never used for layout.
//!
//! A cluster is measured in two steps:
//! 1. a short table of glyphs terminals draw narrower than their Unicode
//!    properties suggest,
//! 2. a single code point takes its `unicode-width` value (a lone regional
//!    indicator counts 2); longer clusters are scanned into [`Traits`] and
//!    mapped to cells.
//!
//! Dingbats and symbols such as `❯` or `✓` stay narrow unless the cluster
//! asks for emoji presentation (VS16, ZWJ sequence, skin tone, keycap).
//! Emoji composites round up. A spare blank cell in the line is harmless; an
//! underestimate lets the line overflow the window.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;

/// Glyphs measured narrower than the scan would, sorted for binary search.
static NARROW_GLYPHS: &[(&str, u16)] = &[
    // GEAR, bare and with VS16.
    ("\u{2699}", 1),
    ("\u{2699}\u{FE0F}", 1),
];

const ZERO_WIDTH_JOINER: char = '\u{200D}';
const EMOJI_PRESENTATION: char = '\u{FE0F}';
const ENCLOSING_KEYCAP: char = '\u{20E3}';

fn pictographic(c: char) -> bool {
    matches!(c, '\u{1F300}'..='\u{1FAFF}' | '\u{2600}'..='\u{27BF}')
}

fn regional_indicator(c: char) -> bool {
    matches!(c, '\u{1F1E6}'..='\u{1F1FF}')
}

fn skin_tone(c: char) -> bool {
    matches!(c, '\u{1F3FB}'..='\u{1F3FF}')
}

fn combining(c: char) -> bool {
    matches!(
        c,
        '\u{0300}'..='\u{036F}'
            | '\u{1AB0}'..='\u{1AFF}'
            | '\u{1DC0}'..='\u{1DFF}'
            | '\u{20D0}'..='\u{20FF}'
            | '\u{FE20}'..='\u{FE2F}'
    )
}

/// Cells of one code point; controls count 0.
fn code_point_cells(c: char) -> u16 {
    c.width().unwrap_or(0) as u16
}

/// What one pass over a multi-code-point cluster learned.
#[derive(Debug, Default, Clone, Copy)]
struct Traits {
    code_points: usize,
    pictographs: usize,
    indicators: usize,
    joined: bool,
    presented: bool,
    toned: bool,
    marked: bool,
    keycap_base: bool,
    keycap_end: bool,
    /// Cells of the first non-mark code point; `None` for a marks-only cluster.
    base: Option<u16>,
    widest: u16,
}

impl Traits {
    fn scan(egc: &str) -> Self {
        let mut t = Traits::default();
        let mut last = None;
        for c in egc.chars() {
            t.code_points += 1;
            t.pictographs += usize::from(pictographic(c));
            t.indicators += usize::from(regional_indicator(c));
            t.joined |= c == ZERO_WIDTH_JOINER;
            t.presented |= c == EMOJI_PRESENTATION;
            t.toned |= skin_tone(c);
            t.marked |= combining(c);
            t.keycap_base |= c.is_ascii_digit() || matches!(c, '#' | '*');
            let cells = code_point_cells(c);
            t.widest = t.widest.max(cells);
            if t.base.is_none() && !combining(c) {
                t.base = Some(cells);
            }
            last = Some(c);
        }
        t.keycap_end = last == Some(ENCLOSING_KEYCAP);
        t
    }

    fn cells(&self) -> u16 {
        let keycap = self.keycap_end && self.keycap_base;
        let flag = self.indicators == 2 && self.code_points == 2;
        let zwj_sequence = self.joined && self.pictographs >= 2;
        let toned_emoji = self.toned && self.pictographs >= 1;
        let presented_emoji = self.presented && self.pictographs >= 1;
        if keycap || flag || zwj_sequence || toned_emoji || presented_emoji {
            return 2;
        }
        if self.marked {
            return match self.base {
                None => 0,
                Some(cells) => cells.clamp(1, 2),
            };
        }
        if self.widest == 2 {
            return 2;
        }
        1
    }
}

fn single_code_point_cells(c: char) -> u16 {
    if c.is_ascii() {
        return u16::from(!c.is_ascii_control());
    }
    if regional_indicator(c) {
        return 2;
    }
    code_point_cells(c).min(2)
}

/// Cells occupied by one grapheme cluster. Empty input is 0 cells.
#[inline]
pub fn egc_width(egc: &str) -> u16 {
    if let Ok(idx) = NARROW_GLYPHS.binary_search_by(|(glyph, _)| glyph.cmp(&egc)) {
        return NARROW_GLYPHS[idx].1;
    }
    let mut chars = egc.chars();
    match (chars.next(), chars.next()) {
        (None, _) => 0,
        (Some(c), None) => single_code_point_cells(c),
        _ => Traits::scan(egc).cells(),
    }
}

/// Display width of an arbitrary string: the sum of its grapheme cluster widths.
pub fn str_width(s: &str) -> usize {
    if s.is_ascii() {
        return s.bytes().filter(|b| !b.is_ascii_control()).count();
    }
    s.graphemes(true).map(|g| usize::from(egc_width(g))).sum()
}

/// Longest prefix of `s` that fits in `max` cells, together with its width.
/// Never splits a grapheme cluster.
pub fn clip_to_width(s: &str, max: usize) -> (&str, usize) {
    let mut used = 0usize;
    for (idx, g) in s.grapheme_indices(true) {
        let w = usize::from(egc_width(g));
        if used + w > max {
            return (&s[..idx], used);
        }
        used += w;
    }
    (s, used)
}
