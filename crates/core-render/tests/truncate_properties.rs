//! Property tests for the truncation engine.

use core_model::StyleTag;
use core_render::{Budget, Chrome, Segment, assemble, occupied_width, truncate};
use proptest::prelude::*;

const ELLIPSIS: &str = "…";

fn chrome(custom: &str) -> Chrome<'_> {
    Chrome {
        separator: ">",
        lead: "",
        custom,
    }
}

fn build(dirs: &[String], basename: &Option<String>, ctx: &[String]) -> (Vec<Segment>, Option<usize>) {
    let mut segments: Vec<Segment> = dirs.iter().map(|d| Segment::new(d.as_str(), StyleTag::Dirname)).collect();
    let protected = basename.as_ref().map(|b| {
        segments.push(Segment::new(b.as_str(), StyleTag::Basename));
        segments.len() - 1
    });
    segments.extend(ctx.iter().map(|c| Segment::new(c.as_str(), StyleTag::Context)));
    (segments, protected)
}

fn run(segments: &mut Vec<Segment>, protected: Option<usize>, available: usize, custom: &str) -> usize {
    let budget = Budget {
        occupied: occupied_width(segments, &chrome(custom)),
        available,
        separator_width: 1,
    };
    truncate(segments, budget, protected, ELLIPSIS).occupied
}

fn label() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z_]{1,10}",
        "[日本語界]{1,3}",
        Just("/".to_string()),
    ]
}

proptest! {
    #[test]
    fn fitting_sequences_are_untouched(
        dirs in prop::collection::vec(label(), 0..6),
        basename in prop::option::of("[a-z]{1,8}\\.rs"),
        ctx in prop::collection::vec(label(), 0..6),
    ) {
        let (mut segments, protected) = build(&dirs, &basename, &ctx);
        let before = segments.clone();
        let available = occupied_width(&segments, &chrome(""));
        run(&mut segments, protected, available, "");
        prop_assert_eq!(segments, before);
    }

    #[test]
    fn basename_survives_and_one_ellipsis_at_most(
        dirs in prop::collection::vec(label(), 0..8),
        basename in "[a-z]{1,8}\\.rs",
        ctx in prop::collection::vec(label(), 0..8),
        available in 0usize..60,
    ) {
        let (mut segments, protected) = build(&dirs, &Some(basename.clone()), &ctx);
        run(&mut segments, protected, available, "");

        let ellipses = segments.iter().filter(|s| s.is_ellipsis()).count();
        prop_assert!(ellipses <= 1);
        let bases: Vec<&Segment> = segments.iter().filter(|s| *s.style() == StyleTag::Basename).collect();
        prop_assert_eq!(bases.len(), 1);
        prop_assert_eq!(bases[0].text(), basename.as_str());

        // Survivors keep their original relative order.
        let original: Vec<String> = dirs.iter().chain(std::iter::once(&basename)).chain(ctx.iter()).cloned().collect();
        let mut cursor = 0usize;
        for seg in segments.iter().filter(|s| !s.is_ellipsis()) {
            let found = original[cursor..].iter().position(|t| t == seg.text());
            prop_assert!(found.is_some());
            cursor += found.unwrap_or(0) + 1;
        }
    }

    #[test]
    fn tracked_width_never_underestimates(
        dirs in prop::collection::vec(label(), 0..8),
        basename in prop::option::of("[a-z]{1,8}"),
        ctx in prop::collection::vec(label(), 0..8),
        available in 0usize..60,
        custom in "[A-Z]{0,4}",
    ) {
        let (mut segments, protected) = build(&dirs, &basename, &ctx);
        let tracked = run(&mut segments, protected, available, &custom);
        let real = occupied_width(&segments, &chrome(&custom));
        prop_assert!(real <= tracked);
        if let Some(line) = assemble(&segments, &chrome(&custom)) {
            prop_assert_eq!(real, line.left_width() + line.right_width());
        }
    }

    #[test]
    fn truncation_is_idempotent(
        dirs in prop::collection::vec(label(), 0..8),
        basename in prop::option::of("[a-z]{1,8}"),
        ctx in prop::collection::vec(label(), 0..8),
        available in 0usize..60,
    ) {
        let (mut once, protected) = build(&dirs, &basename, &ctx);
        run(&mut once, protected, available, "");

        let protected_again = once.iter().position(|s| *s.style() == StyleTag::Basename);
        let mut twice = once.clone();
        run(&mut twice, protected_again, available, "");
        prop_assert_eq!(twice, once);
    }
}
