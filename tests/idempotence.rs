//! Re-extracting from a tree that went through JSON gives the same records

use wikt_extract::extract::node::build::*;
use wikt_extract::extract::{
    extract_conjugation, extract_gloss, extract_gloss_tree, load_defaults, ExtractContext,
    MemoryHost, Node, WordEntry,
};

fn through_json(node: &Node) -> Node {
    let json = serde_json::to_string(node).unwrap();
    serde_json::from_str(&json).unwrap()
}

fn gloss_list() -> Node {
    list(
        "#",
        vec![
            item(
                "#",
                vec![
                    template("figuré").arg("fr").build(),
                    text(" Envoyer "),
                    text("("),
                    italic(vec![text("Sport")]),
                    text(")"),
                    text(" au loin."),
                    list(
                        "#*",
                        vec![item(
                            "#*",
                            vec![template("exemple")
                                .arg("Lancer une balle.")
                                .named("source", "Anonyme")
                                .build()],
                        )],
                    ),
                ],
            ),
            item(
                "#",
                vec![
                    text("(vieilli) Commencer"),
                    list("##", vec![item("##", vec![text("Lancer une affaire.")])]),
                ],
            ),
        ],
    )
}

fn conjugation_table() -> Node {
    root(vec![
        heading(3, vec![text("Indicatif")]),
        table(vec![
            row(vec![header_cell(vec![text("Présent")]).with_attr("colspan", "2")]),
            row(vec![
                cell(vec![text("je&nbsp;"), link("lance")]),
                cell(vec![text("\\ʒə lɑ̃s\\")]),
            ]),
        ]),
        link("Catégorie:Conjugaison en français"),
    ])
}

fn host() -> MemoryHost {
    let mut host = MemoryHost::new();
    host.add_template("figuré", root(vec![text("("), italic(vec![text("Figuré")]), text(")")]));
    host.add_template("fr-conj-1", conjugation_table());
    host.add_page(
        "Conjugaison:français/lancer",
        root(vec![template("fr-conj-1").arg("lan").build()]),
    );
    host
}

fn extract_all(host: &MemoryHost, gloss: &Node) -> Vec<WordEntry> {
    let config = load_defaults().unwrap();
    let ctx = ExtractContext::new(host, &config, "fr").unwrap();

    let mut flat = WordEntry::new("lancer", "fr");
    extract_gloss(&ctx, &mut flat, gloss);
    let mut tree = WordEntry::new("lancer", "fr");
    extract_gloss_tree(&ctx, &mut tree, gloss);
    extract_conjugation(&ctx, &mut tree, "Conjugaison:français/lancer");
    vec![flat, tree]
}

#[test]
fn test_json_round_trip_preserves_extraction() {
    let gloss = gloss_list();
    let first = extract_all(&host(), &gloss);

    let mut reparsed_host = MemoryHost::new();
    reparsed_host.add_template(
        "figuré",
        through_json(&root(vec![text("("), italic(vec![text("Figuré")]), text(")")])),
    );
    reparsed_host.add_template("fr-conj-1", through_json(&conjugation_table()));
    reparsed_host.add_page(
        "Conjugaison:français/lancer",
        through_json(&root(vec![template("fr-conj-1").arg("lan").build()])),
    );
    let second = extract_all(&reparsed_host, &through_json(&gloss));

    assert_eq!(first, second);
    assert!(!first[0].senses.is_empty());
    assert!(!first[1].forms.is_empty());
}

#[test]
fn test_extraction_is_repeatable() {
    let host = host();
    let gloss = gloss_list();
    assert_eq!(extract_all(&host, &gloss), extract_all(&host, &gloss));
}
