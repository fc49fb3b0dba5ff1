//! Example and quotation records under gloss items

use wikt_extract::extract::node::build::*;
use wikt_extract::extract::params::{ParamKey, TemplateParams};
use wikt_extract::extract::{
    extract_examples, extract_gloss, load_defaults, Example, ExampleKind, ExtractContext,
    MemoryHost, Sense, WordEntry,
};

fn french_host() -> MemoryHost {
    let mut host = MemoryHost::new();
    host.add_template_fn("source", |template| {
        let title = TemplateParams::resolve(template)
            .get(ParamKey::Positional(1))
            .map(<[_]>::to_vec)
            .unwrap_or_default();
        let mut children = vec![text("— (")];
        children.extend(title);
        children.push(text(")"));
        root(children)
    });
    host
}

#[test]
fn test_example_template_with_source_is_a_quotation() {
    let config = load_defaults().unwrap();
    let host = french_host();
    let ctx = ExtractContext::new(&host, &config, "fr").unwrap();

    let list = list(
        "#*",
        vec![item("#*", vec![template("exemple").arg("foo").named("source", "bar").build()])],
    );
    let mut sense = Sense::default();
    extract_examples(&ctx, &mut sense, &list);

    assert_eq!(
        sense.examples,
        vec![Example {
            text: "foo".to_string(),
            reference: Some("bar".to_string()),
            kind: ExampleKind::Quotation,
            ..Default::default()
        }]
    );
}

#[test]
fn test_positional_translation_and_transliteration() {
    let config = load_defaults().unwrap();
    let host = MemoryHost::new();
    let ctx = ExtractContext::new(&host, &config, "zh").unwrap();

    let list = list(
        "#*",
        vec![item(
            "#*",
            vec![template("zh-exemple")
                .arg("我打他。")
                .arg("Je le frappe.")
                .arg("Wǒ dǎ tā.")
                .build()],
        )],
    );
    let mut sense = Sense::default();
    extract_examples(&ctx, &mut sense, &list);

    let example = &sense.examples[0];
    assert_eq!(example.text, "我打他。");
    assert_eq!(example.translation.as_deref(), Some("Je le frappe."));
    assert_eq!(example.roman.as_deref(), Some("Wǒ dǎ tā."));
    assert_eq!(example.kind, ExampleKind::Example);
}

#[test]
fn test_free_text_with_source_template() {
    let config = load_defaults().unwrap();
    let host = french_host();
    let ctx = ExtractContext::new(&host, &config, "fr").unwrap();

    let list = list(
        "#*",
        vec![item(
            "#*",
            vec![
                italic(vec![text("Il "), bold(vec![text("lança")]), text(" la pierre.")]),
                text(" "),
                template("source").arg("Victor Hugo, Les Misérables").build(),
            ],
        )],
    );
    let mut sense = Sense::default();
    extract_examples(&ctx, &mut sense, &list);

    let example = &sense.examples[0];
    assert_eq!(example.text, "Il lança la pierre.");
    assert_eq!(example.kind, ExampleKind::Quotation);
    assert_eq!(example.reference.as_deref(), Some("Victor Hugo, Les Misérables"));
}

#[test]
fn test_examples_at_any_depth_in_document_order() {
    let config = load_defaults().unwrap();
    let host = MemoryHost::new();
    let ctx = ExtractContext::new(&host, &config, "fr").unwrap();

    let list = list(
        "#",
        vec![item(
            "#",
            vec![
                text("Envoyer au loin."),
                list(
                    "#*",
                    vec![item(
                        "#*",
                        vec![
                            italic(vec![text("Premier.")]),
                            list("#*:", vec![item("#*:", vec![text("Deuxième.")])]),
                        ],
                    )],
                ),
                list("#*", vec![item("#*", vec![italic(vec![text("Troisième.")])])]),
            ],
        )],
    );
    let mut entry = WordEntry::new("lancer", "fr");
    extract_gloss(&ctx, &mut entry, &list);

    let texts: Vec<&str> = entry.senses[0].examples.iter().map(|e| e.text.as_str()).collect();
    assert_eq!(texts, vec!["Premier.", "Deuxième.", "Troisième."]);
}

#[test]
fn test_serialized_field_names() {
    let example = Example {
        text: "foo".to_string(),
        reference: Some("bar".to_string()),
        kind: ExampleKind::Quotation,
        ..Default::default()
    };
    let json = serde_json::to_string(&example).unwrap();
    insta::assert_snapshot!(json, @r#"{"text":"foo","ref":"bar","type":"quotation"}"#);
}
