//! Property tests for tag normalization and rule resolution

use autotag_core::rules::{Rule, RuleResolver};
use autotag_core::tags::normalize;
use proptest::prelude::*;

fn raw_tag() -> impl Strategy<Value = String> {
    "[ #]{0,3}[a-z]{0,4}[ ]{0,2}"
}

proptest! {
    #[test]
    fn normalize_is_idempotent(raw in prop::collection::vec(raw_tag(), 0..12)) {
        let once = normalize(&raw);
        let twice = normalize(once.as_slice());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn normalized_tags_are_unique_and_prefixed(raw in prop::collection::vec(raw_tag(), 0..12)) {
        let tags = normalize(&raw);
        for (i, tag) in tags.iter().enumerate() {
            prop_assert!(tag.starts_with('#'));
            prop_assert!(!tag[1..].starts_with('#'));
            prop_assert!(tag.len() > 1);
            prop_assert!(!tags.as_slice()[..i].contains(tag));
        }
    }

    #[test]
    fn resolution_is_union_of_matching_rules(
        depth in 1usize..4,
        extra in prop::collection::vec("[a-z]{1,3}", 0..3),
    ) {
        let segments = ["A", "B", "C"];
        let rules: Vec<Rule> = (1..=depth)
            .map(|n| Rule::new(segments[..n].join("/"), [format!("t{}", n)]))
            .collect();
        let mut path = segments[..depth].join("/");
        for segment in &extra {
            path.push('/');
            path.push_str(segment);
        }
        path.push_str("/note.md");

        let resolution = RuleResolver::new(&rules).resolve(&path);

        prop_assert_eq!(resolution.matched, depth);
        let expected: Vec<String> = (1..=depth).map(|n| format!("t{}", n)).collect();
        prop_assert_eq!(resolution.tags, expected);
    }
}
