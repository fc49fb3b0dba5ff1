//! Property-based tests for bracket-tag splitting
//!
//! Glosses are generated with known leading and trailing groups and the splitter has to give
//! back exactly the pieces they were built from.

use proptest::prelude::*;
use wikt_extract::extract::brackets::{split_gloss, GlossSplit, TagSplitter};
use wikt_extract::extract::load_defaults;

fn splitter() -> TagSplitter {
    let config = load_defaults().unwrap();
    TagSplitter::new(&config.gloss.separators).unwrap()
}

fn label_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Zéè書面語口比喻]{1,8}"
}

fn gloss_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z身體 .]{1,24}"
}

fn separator_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![",", "，", "、", "或", ";", ", "])
}

fn brackets(full_width: bool) -> (&'static str, &'static str) {
    if full_width {
        ("（", "）")
    } else {
        ("(", ")")
    }
}

proptest! {
    #[test]
    fn test_front_and_rear_groups(
        front in label_strategy(),
        gloss in gloss_strategy(),
        rear in label_strategy(),
        full_width in any::<bool>(),
    ) {
        let (open, close) = brackets(full_width);
        let source = format!("{open}{front}{close} {gloss} {open}{rear}{close}");
        let split = split_gloss(&source, &splitter());

        prop_assert_eq!(split.gloss, gloss.trim());
        prop_assert_eq!(split.labels, vec![front, rear]);
        prop_assert_eq!(split.raw_gloss.as_deref(), Some(source.trim()));
    }

    #[test]
    fn test_front_group_only(front in label_strategy(), gloss in gloss_strategy()) {
        let source = format!("({front}) {gloss}");
        let split = split_gloss(&source, &splitter());

        prop_assert_eq!(split.gloss, gloss.trim());
        prop_assert_eq!(split.labels, vec![front]);
    }

    #[test]
    fn test_text_without_groups_is_untouched(gloss in gloss_strategy()) {
        let split = split_gloss(&gloss, &splitter());
        prop_assert_eq!(
            split,
            GlossSplit {
                gloss: gloss.trim().to_string(),
                raw_gloss: None,
                labels: Vec::new(),
            }
        );
    }

    #[test]
    fn test_separated_labels_come_back_in_order(
        labels in prop::collection::vec(label_strategy(), 1..5),
        separator in separator_strategy(),
    ) {
        let content = labels.join(separator);
        prop_assert_eq!(splitter().split(&content), labels);
    }

    #[test]
    fn test_arbitrary_text_never_panics(source in "\\PC{0,40}") {
        let split = split_gloss(&source, &splitter());
        prop_assert!(source.contains(split.gloss.as_str()));
    }
}
