//! Example/Quotation Extractor
//!
//!     Every list item found at any depth below the given node is an example candidate. An
//!     item is read in one of two ways:
//!
//!         - Worked-example template as first child: positional 1 is the text, positional 2
//!           (or a translation key) the translation, positional 3 (or a transliteration key)
//!           the transliteration and a reference key the reference. No text, no example.
//!         - Free text: the last source template among the item's children is the reference
//!           and is left out of the body. The reference loses dashes, spaces and parentheses
//!           at both ends.
//!
//!     A non-empty reference makes the record a quotation. Nested lists of an item are not
//!     part of its text; they are visited as items of their own.

use super::context::ExtractContext;
use super::model::{Example, Sense};
use super::node::Node;
use super::params::{ParamKey, TemplateParams};
use tracing::debug;

/// Append every example found below `node` to `sense`, in document order.
pub fn extract_examples(ctx: &ExtractContext<'_>, sense: &mut Sense, node: &Node) {
    for item in node.find_descendants(&Node::is_list_item) {
        let children: Vec<&Node> = item
            .non_blank_children()
            .into_iter()
            .filter(|child| !child.is_list())
            .collect();
        let Some(first) = children.first() else {
            continue;
        };

        let example = match first.as_template() {
            Some(template) if ctx.config().example.is_example_template(&template.name) => {
                from_template(ctx, &TemplateParams::resolve(template))
            }
            _ => from_free_text(ctx, item),
        };
        match example {
            Some(example) => sense.examples.push(example),
            None => debug!(first = %first, "example item without text skipped"),
        }
    }
}

fn from_template(ctx: &ExtractContext<'_>, params: &TemplateParams) -> Option<Example> {
    let keys = &ctx.config().example;
    let clean_first = |position: usize, names: &[String]| -> Option<String> {
        let mut lookup = vec![ParamKey::Positional(position)];
        lookup.extend(names.iter().map(|name| ParamKey::Named(name)));
        params
            .first(&lookup)
            .map(|value| ctx.clean(value))
            .filter(|text| !text.is_empty())
    };

    let text = clean_first(1, &[])?;
    let mut example = Example {
        text,
        translation: clean_first(2, &keys.translation_keys),
        roman: clean_first(3, &keys.transliteration_keys),
        ..Default::default()
    };
    let reference = keys
        .reference_keys
        .iter()
        .find_map(|key| params.get(ParamKey::Named(key)))
        .map(|value| ctx.clean(value))
        .unwrap_or_default();
    example.set_reference(reference);
    Some(example)
}

fn from_free_text(ctx: &ExtractContext<'_>, item: &Node) -> Option<Example> {
    let config = &ctx.config().example;
    let children = item.children();
    let source = children.iter().rposition(|child| {
        child
            .as_template()
            .is_some_and(|template| config.is_source_template(&template.name))
    });

    let body = children
        .iter()
        .enumerate()
        .filter(|(index, child)| Some(*index) != source && !child.is_list())
        .map(|(_, child)| child);
    let text = ctx.clean(body);
    if text.is_empty() {
        return None;
    }

    let mut example = Example {
        text,
        ..Default::default()
    };
    if let Some(index) = source {
        let reference = ctx.clean([&children[index]]);
        let reference = reference.trim_matches(|c: char| matches!(c, '—' | ' ' | '(' | ')'));
        example.set_reference(reference.to_string());
    }
    Some(example)
}
