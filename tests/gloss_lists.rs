//! Gloss list walking: sense order, example ownership, sub-gloss merging

use rstest::rstest;
use wikt_extract::extract::node::build::*;
use wikt_extract::extract::{
    extract_gloss, extract_gloss_tree, load_defaults, ExtractContext, MemoryHost, Node, WordEntry,
};

fn glosses(entry: &WordEntry) -> Vec<Vec<String>> {
    entry.senses.iter().map(|sense| sense.glosses.clone()).collect()
}

fn example_texts(entry: &WordEntry, sense: usize) -> Vec<&str> {
    entry.senses[sense]
        .examples
        .iter()
        .map(|example| example.text.as_str())
        .collect()
}

fn two_senses_with_examples() -> Node {
    list(
        "#",
        vec![
            item(
                "#",
                vec![
                    text("Envoyer au loin."),
                    list(
                        "#*",
                        vec![
                            item("#*", vec![italic(vec![text("Lancer une pierre.")])]),
                            item("#*", vec![italic(vec![text("Lancer un javelot.")])]),
                        ],
                    ),
                ],
            ),
            item(
                "#",
                vec![
                    text("Mettre en circulation."),
                    list("#*", vec![item("#*", vec![italic(vec![text("Lancer un produit.")])])]),
                ],
            ),
        ],
    )
}

#[rstest]
#[case::flat(false)]
#[case::tree(true)]
fn test_sibling_senses_own_their_examples(#[case] tree: bool) {
    let config = load_defaults().unwrap();
    let host = MemoryHost::new();
    let ctx = ExtractContext::new(&host, &config, "fr").unwrap();

    let mut entry = WordEntry::new("lancer", "fr");
    if tree {
        extract_gloss_tree(&ctx, &mut entry, &two_senses_with_examples());
    } else {
        extract_gloss(&ctx, &mut entry, &two_senses_with_examples());
    }

    assert_eq!(
        glosses(&entry),
        vec![vec!["Envoyer au loin."], vec!["Mettre en circulation."]]
    );
    assert_eq!(example_texts(&entry, 0), vec!["Lancer une pierre.", "Lancer un javelot."]);
    assert_eq!(example_texts(&entry, 1), vec!["Lancer un produit."]);
}

#[test]
fn test_sub_gloss_list_replaces_parent_sense() {
    let config = load_defaults().unwrap();
    let host = MemoryHost::new();
    let ctx = ExtractContext::new(&host, &config, "zh").unwrap();

    let list = list(
        "#",
        vec![
            item(
                "#",
                vec![
                    text("(口語) 打"),
                    list(
                        "##",
                        vec![
                            item("##", vec![text("(比喻) 攻擊")]),
                            item("##", vec![text("敲")]),
                        ],
                    ),
                ],
            ),
            item("#", vec![text("量詞")]),
        ],
    );
    let mut entry = WordEntry::new("打", "zh");
    extract_gloss_tree(&ctx, &mut entry, &list);

    assert_eq!(
        glosses(&entry),
        vec![vec!["打", "攻擊"], vec!["打", "敲"], vec!["量詞"]]
    );
    assert_eq!(entry.senses[0].tags, vec!["colloquial", "figuratively"]);
    assert_eq!(entry.senses[1].tags, vec!["colloquial"]);
    assert!(entry.senses[2].tags.is_empty());
}

#[test]
fn test_unmapped_labels_stay_raw() {
    let config = load_defaults().unwrap();
    let host = MemoryHost::new();
    let ctx = ExtractContext::new(&host, &config, "zh").unwrap();

    let list = list("#", vec![item("#", vec![text("（方言，書面語）身體")])]);
    let mut entry = WordEntry::new("體", "zh");
    extract_gloss_tree(&ctx, &mut entry, &list);

    let sense = &entry.senses[0];
    assert_eq!(sense.glosses, vec!["身體"]);
    assert_eq!(sense.tags, vec!["literary"]);
    assert_eq!(sense.raw_tags, vec!["方言"]);
    assert_eq!(sense.raw_glosses, vec!["（方言，書面語）身體"]);
}

#[test]
fn test_tags_never_leak_into_gloss_text() {
    let config = load_defaults().unwrap();
    let mut host = MemoryHost::new();
    host.add_template("familier", root(vec![text("("), italic(vec![text("Familier")]), text(")")]));
    host.add_template("sport", root(vec![text("(Sport)")]));
    let ctx = ExtractContext::new(&host, &config, "fr").unwrap();

    let list = list(
        "#",
        vec![item(
            "#",
            vec![
                template("familier").build(),
                text(" "),
                template("sport").build(),
                text(" Envoyer "),
                text("("),
                italic(vec![text("vieilli")]),
                text(")"),
                text(" quelqu’un."),
            ],
        )],
    );
    let mut entry = WordEntry::new("lancer", "fr");
    extract_gloss(&ctx, &mut entry, &list);

    let sense = &entry.senses[0];
    assert_eq!(sense.glosses, vec!["Envoyer quelqu’un."]);
    assert_eq!(sense.tags, vec!["familiar", "dated"]);
    assert_eq!(sense.raw_tags, vec!["Sport"]);
    for label in sense.tags.iter().chain(&sense.raw_tags) {
        assert!(!sense.glosses[0].contains(label.as_str()));
    }
}

#[test]
fn test_annotation_templates_only_count_at_the_start() {
    let config = load_defaults().unwrap();
    let mut host = MemoryHost::new();
    host.add_template("sport", root(vec![text("(Sport)")]));
    let ctx = ExtractContext::new(&host, &config, "fr").unwrap();

    let list = list(
        "#",
        vec![item("#", vec![text("Envoyer "), template("sport").build()])],
    );
    let mut entry = WordEntry::new("lancer", "fr");
    extract_gloss(&ctx, &mut entry, &list);

    assert_eq!(entry.senses[0].glosses, vec!["Envoyer (Sport)"]);
    assert!(entry.senses[0].raw_tags.is_empty());
}
