//! Gloss List Walker
//!
//!     Turns a gloss list into senses appended to the entry under construction. Two layouts
//!     are supported.
//!
//!     Flat ([extract_gloss]): one sense per top-level item. Annotation templates at the start
//!     of the item and parenthesized italic spans become labels; the rest is the gloss. Every
//!     list item nested below the item is read as an example of that sense.
//!
//!     Recursive ([extract_gloss_tree]): an item's own text is split with the whole-string
//!     bracket rule and merged onto the sense inherited from its parent item. A nested list
//!     whose marker ends with the sub-gloss marker holds sub-senses: they inherit the merged
//!     sense and the item itself produces nothing. Any other nested list holds examples: the
//!     merged sense is appended once and receives them. An item with no nested list is
//!     appended as is. At the depth cap a sub-gloss list is not entered and the item is
//!     appended as a leaf instead.
//!
//!     Labels are routed through the language's tag table: mapped labels land in `tags`,
//!     the others verbatim in `raw_tags`.

use super::brackets::{split_gloss, split_nodes};
use super::context::ExtractContext;
use super::example::extract_examples;
use super::model::{Sense, WordEntry};
use super::node::Node;
use super::ruby::extract_ruby;
use tracing::warn;

/// Flat variant: one sense per top-level item of `list`.
pub fn extract_gloss(ctx: &ExtractContext<'_>, entry: &mut WordEntry, list: &Node) {
    for item in list.find_child(Node::is_list_item) {
        let nodes = item.non_list_children();
        let split = split_nodes(ctx, &nodes);

        let labels = ctx.tags().classify(split.labels.iter().map(String::as_str));
        let mut sense = Sense {
            tags: labels.tags,
            raw_tags: labels.raw_tags,
            categories: split.categories,
            ..Default::default()
        };
        let gloss = ctx.clean_into(split.gloss_nodes, &mut sense.categories);
        if !gloss.is_empty() {
            sense.glosses.push(gloss);
        }

        extract_examples(ctx, &mut sense, item);
        entry.senses.push(sense);
    }
}

/// Recursive variant: nested sub-gloss lists inherit their parent's sense.
pub fn extract_gloss_tree(ctx: &ExtractContext<'_>, entry: &mut WordEntry, list: &Node) {
    walk_tree(ctx, entry, list, &Sense::default(), 0);
}

fn walk_tree(
    ctx: &ExtractContext<'_>,
    entry: &mut WordEntry,
    list: &Node,
    seed: &Sense,
    depth: usize,
) {
    let marker = ctx.config().gloss.sub_gloss_marker.as_str();
    for item in list.find_child(Node::is_list_item) {
        let merged = merge(seed, own_sense(ctx, item));

        let nested: Vec<&Node> = item.find_child(Node::is_list).collect();
        if nested.is_empty() {
            entry.senses.push(merged);
            continue;
        }

        let mut example_sense = None;
        for sub_list in nested {
            let is_sub_gloss = sub_list
                .list_marker()
                .is_some_and(|list_marker| !marker.is_empty() && list_marker.ends_with(marker));
            if is_sub_gloss && depth + 1 < ctx.config().limits.max_depth {
                walk_tree(ctx, entry, sub_list, &merged, depth + 1);
                continue;
            }

            let index = match example_sense {
                Some(index) => index,
                None => {
                    entry.senses.push(merged.clone());
                    example_sense = Some(entry.senses.len() - 1);
                    entry.senses.len() - 1
                }
            };
            if is_sub_gloss {
                warn!(depth, "sub-gloss nesting depth cap reached");
                continue;
            }
            extract_examples(ctx, &mut entry.senses[index], sub_list);
        }
    }
}

/// The sense an item contributes by itself, before merging with its parent.
fn own_sense(ctx: &ExtractContext<'_>, item: &Node) -> Sense {
    let mut sense = Sense::default();
    let nodes = item.non_list_children();

    let text = if ctx.uses_ruby() {
        let owned: Vec<Node> = nodes.into_iter().cloned().collect();
        let (ruby, rest) = extract_ruby(ctx, &ctx.expand(&owned));
        sense.ruby = ruby;
        ctx.clean_into(&rest, &mut sense.categories)
    } else {
        ctx.clean_into(nodes, &mut sense.categories)
    };

    let split = split_gloss(&text, ctx.splitter());
    if !split.gloss.is_empty() {
        sense.glosses.push(split.gloss);
    }
    sense.raw_glosses.extend(split.raw_gloss);
    let labels = ctx.tags().classify(split.labels.iter().map(String::as_str));
    sense.tags = labels.tags;
    sense.raw_tags = labels.raw_tags;
    sense
}

/// Field-wise concatenation of the inherited sense and an item's own sense.
fn merge(seed: &Sense, own: Sense) -> Sense {
    let mut merged = seed.clone();
    merged.glosses.extend(own.glosses);
    merged.raw_glosses.extend(own.raw_glosses);
    merged.tags.extend(own.tags);
    merged.raw_tags.extend(own.raw_tags);
    merged.categories.extend(own.categories);
    merged.examples.extend(own.examples);
    merged.ruby.extend(own.ruby);
    merged
}
