//! Width-budget truncation of the segment sequence.
//!
//! Input is the full sequence (directory segments, basename, context
//! segments), the width the assembled line would occupy, the available width,
//! the separator width and the index of the protected basename segment.
//!
//! Single left-to-right pass:
//! * The protected segment is skipped: never removed, never turned into the
//!   ellipsis. Its index is checked against the *original* indexing by adding
//!   the number of segments removed so far.
//! * The first unprotected segment visited becomes the ellipsis. The tracked
//!   width loses that segment's width and gains the ellipsis width.
//! * Every later unprotected segment is deleted. The tracked width loses its
//!   width plus one separator (glyph + 2 padding cells) unless the deleted
//!   segment was the last one.
//! * The pass stops as soon as the tracked width fits the budget.
//!
//! Guarantees: at most one ellipsis, the protected segment survives in place
//! relative to the other survivors, a sequence that already fits is left
//! untouched, and re-running on the output is a no-op. When the budget cannot
//! be met the shortest reachable sequence is returned; there is no error.

use crate::segment::Segment;
use core_text::str_width;
use tracing::debug;

/// Padding cells flanking every separator glyph.
pub const SEPARATOR_PADDING: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Budget {
    /// Width the assembled line currently occupies.
    pub occupied: usize,
    /// Width available on the surface.
    pub available: usize,
    /// Display width of the separator glyph (padding excluded).
    pub separator_width: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TruncateOutcome {
    /// Tracked width after truncation.
    pub occupied: usize,
    pub removed: usize,
    pub ellipsis_inserted: bool,
}

impl TruncateOutcome {
    pub fn fits(&self, available: usize) -> bool {
        self.occupied <= available
    }
}

/// Truncate `segments` in place. `protected` is the basename's index in the
/// sequence as passed in (`None` when no basename is shown).
pub fn truncate(
    segments: &mut Vec<Segment>,
    budget: Budget,
    protected: Option<usize>,
    ellipsis_glyph: &str,
) -> TruncateOutcome {
    let mut occupied = budget.occupied;
    let mut outcome = TruncateOutcome {
        occupied,
        removed: 0,
        ellipsis_inserted: false,
    };
    if occupied <= budget.available {
        return outcome;
    }

    let separator_cost = budget.separator_width + SEPARATOR_PADDING;
    let ellipsis = Segment::ellipsis(ellipsis_glyph);
    let ellipsis_width = str_width(ellipsis_glyph);
    let mut cursor = 0usize;

    while cursor < segments.len() && occupied > budget.available {
        if Some(cursor + outcome.removed) == protected {
            cursor += 1;
            continue;
        }
        occupied = occupied.saturating_sub(segments[cursor].width());
        if outcome.ellipsis_inserted {
            if cursor + 1 < segments.len() {
                occupied = occupied.saturating_sub(separator_cost);
            }
            segments.remove(cursor);
            outcome.removed += 1;
        } else {
            occupied += ellipsis_width;
            segments[cursor] = ellipsis.clone();
            outcome.ellipsis_inserted = true;
            cursor += 1;
        }
    }

    outcome.occupied = occupied;
    debug!(
        target: "render.truncate",
        from = budget.occupied,
        to = occupied,
        available = budget.available,
        removed = outcome.removed,
        ellipsis = outcome.ellipsis_inserted,
        fits = outcome.fits(budget.available),
        "segments_truncated"
    );
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_model::StyleTag;
    use pretty_assertions::assert_eq;

    fn seqs(dirs: &[&str], base: &str, ctx: &[&str]) -> (Vec<Segment>, usize) {
        let mut v: Vec<Segment> = dirs.iter().map(|d| Segment::new(*d, StyleTag::Dirname)).collect();
        let idx = v.len();
        v.push(Segment::new(base, StyleTag::Basename));
        v.extend(ctx.iter().map(|c| Segment::new(*c, StyleTag::Context)));
        (v, idx)
    }

    /// Segment widths + separators (glyph width 1 + padding 2).
    fn occupied(v: &[Segment]) -> usize {
        let sum: usize = v.iter().map(Segment::width).sum();
        sum + v.len().saturating_sub(1) * 3
    }

    fn texts(v: &[Segment]) -> Vec<&str> {
        v.iter().map(Segment::text).collect()
    }

    fn budget(v: &[Segment], available: usize) -> Budget {
        Budget {
            occupied: occupied(v),
            available,
            separator_width: 1,
        }
    }

    #[test]
    fn fitting_sequence_is_untouched() {
        let (mut v, idx) = seqs(&["/", "home"], "main.rs", &["f"]);
        let before = v.clone();
        let b = budget(&v, 100);
        let out = truncate(&mut v, b, Some(idx), "…");
        assert_eq!(v, before);
        assert!(!out.ellipsis_inserted);
        assert_eq!(out.occupied, b.occupied);
    }

    #[test]
    fn collapses_leftmost_directories_into_one_ellipsis() {
        // "/ > home > user > proj > main.rs" = 1+4+4+4+7 + 4*3 = 32
        let (mut v, idx) = seqs(&["/", "home", "user", "proj"], "main.rs", &[]);
        let b = budget(&v, 15);
        let out = truncate(&mut v, b, Some(idx), "…");
        assert_eq!(texts(&v), vec!["…", "main.rs"]);
        assert!(out.fits(15));
        assert_eq!(out.removed, 3);
    }

    #[test]
    fn stops_once_budget_is_met() {
        let (mut v, idx) = seqs(&["/", "home", "user", "proj"], "main.rs", &[]);
        // replacing "/" with "…" changes nothing, removing "home" saves 7 -> 25
        let b = budget(&v, 25);
        truncate(&mut v, b, Some(idx), "…");
        assert_eq!(texts(&v), vec!["…", "user", "proj", "main.rs"]);
    }

    #[test]
    fn basename_first_is_skipped_and_context_collapses() {
        let (mut v, idx) = seqs(&[], "main.rs", &["alpha", "beta", "gamma"]);
        let b = budget(&v, 16);
        truncate(&mut v, b, Some(idx), "…");
        assert_eq!(texts(&v)[0], "main.rs");
        assert_eq!(texts(&v)[1], "…");
        assert_eq!(v.iter().filter(|s| s.is_ellipsis()).count(), 1);
    }

    #[test]
    fn removal_resumes_after_skipped_basename() {
        let (mut v, idx) = seqs(&["dir"], "b.rs", &["one", "two"]);
        // everything must go: dir -> …, skip b.rs, remove one, remove two
        let b = budget(&v, 1);
        let out = truncate(&mut v, b, Some(idx), "…");
        assert_eq!(texts(&v), vec!["…", "b.rs"]);
        assert_eq!(out.removed, 2);
        assert!(!out.fits(1));
    }

    #[test]
    fn impossible_budget_degrades_to_basename_only() {
        let (mut v, idx) = seqs(&[], "very_long_name.rs", &[]);
        let b = budget(&v, 3);
        let out = truncate(&mut v, b, Some(idx), "…");
        assert_eq!(texts(&v), vec!["very_long_name.rs"]);
        assert!(!out.ellipsis_inserted);
    }

    #[test]
    fn without_protection_everything_may_collapse() {
        let (mut v, _) = seqs(&["a", "b"], "c", &[]);
        let b = budget(&v, 0);
        truncate(&mut v, b, None, "…");
        assert_eq!(texts(&v), vec!["…"]);
    }

    #[test]
    fn wide_ellipsis_is_accounted() {
        let (mut v, idx) = seqs(&["x"], "m.rs", &[]);
        // "x > m.rs" = 1 + 3 + 4 = 8; swapping x for a 2-cell marker grows it to 9
        let b = budget(&v, 7);
        let out = truncate(&mut v, b, Some(idx), "⋯⋯");
        assert_eq!(texts(&v), vec!["⋯⋯", "m.rs"]);
        assert_eq!(out.occupied, 9);
    }
}
