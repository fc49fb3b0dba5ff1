//! Node to text cleaning
//!
//!     Turns a node or node sequence into plain text, collecting category links on the side.
//!     Templates are expanded through the host and their expansion is cleaned in place, so the
//!     result is what a reader of the rendered page would see:
//!
//!         - styled spans, headings, cells and generic HTML contribute their children
//!         - links contribute their display text, or their target without the fragment
//!         - category links contribute nothing to the text and their name to the categories
//!         - file links and `<ref>` contribute nothing
//!         - `<br>`, list items and table rows end a line
//!
//!     The rendered text is then normalized: entities are decoded, runs of blanks collapse to
//!     one space, every line is trimmed and empty lines are dropped. Lines survive, because
//!     table cells use them to carry alternative forms.

use super::context::ExtractContext;
use super::node::{Node, NodeKind};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

static ENTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|[a-zA-Z]+);").unwrap());

static BLANKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t\u{00a0}\u{2009}\u{202f}]+").unwrap());

/// Clean nodes into text; discovered categories are appended to `categories` when given.
pub fn clean_nodes<'n>(
    ctx: &ExtractContext<'_>,
    nodes: impl IntoIterator<Item = &'n Node>,
    categories: Option<&mut Vec<String>>,
) -> String {
    let mut raw = String::new();
    let mut found = Vec::new();
    for node in nodes {
        render(ctx, node, 0, &mut raw, &mut found);
    }
    if let Some(categories) = categories {
        for category in found {
            if !categories.contains(&category) {
                categories.push(category);
            }
        }
    }
    normalize_text(&raw)
}

fn render(
    ctx: &ExtractContext<'_>,
    node: &Node,
    depth: usize,
    out: &mut String,
    categories: &mut Vec<String>,
) {
    let element = match node {
        Node::Text(text) => {
            out.push_str(text);
            return;
        }
        Node::Element(element) => element,
    };

    let render_children = |out: &mut String, categories: &mut Vec<String>| {
        for child in &element.children {
            render(ctx, child, depth, out, categories);
        }
    };

    match &element.kind {
        NodeKind::Template(template) => {
            if depth >= ctx.config().limits.max_depth {
                warn!(template = %template.name, depth, "template expansion depth cap reached");
                return;
            }
            match ctx.host().expand_template(node) {
                Some(expanded) => render(ctx, &expanded, depth + 1, out, categories),
                None => debug!(template = %template.name, "template not expandable"),
            }
        }
        NodeKind::Link { target } => {
            let links = &ctx.config().links;
            if let Some(category) = strip_any_prefix(target, &links.category_prefixes) {
                let category = category.split('|').next().unwrap_or_default().trim();
                if !category.is_empty() {
                    categories.push(category.to_string());
                }
            } else if strip_any_prefix(target, &links.file_prefixes).is_some() {
                // Images and media carry no text
            } else if element.children.is_empty() {
                out.push_str(link_text(target));
            } else {
                render_children(out, categories);
            }
        }
        NodeKind::Html { tag } if tag.eq_ignore_ascii_case("br") => out.push('\n'),
        NodeKind::Html { tag } if tag.eq_ignore_ascii_case("ref") => {}
        NodeKind::List { .. } | NodeKind::ListItem { .. } | NodeKind::TableRow => {
            out.push('\n');
            render_children(out, categories);
            out.push('\n');
        }
        NodeKind::Table | NodeKind::Heading { .. } => {
            render_children(out, categories);
            out.push('\n');
        }
        NodeKind::TableCell | NodeKind::TableHeaderCell => {
            out.push(' ');
            render_children(out, categories);
            out.push(' ');
        }
        NodeKind::Root | NodeKind::Italic | NodeKind::Bold | NodeKind::Html { .. } => {
            render_children(out, categories)
        }
    }
}

/// Whether a link target points to a page rather than a category or a file.
pub fn is_content_link(ctx: &ExtractContext<'_>, target: &str) -> bool {
    let links = &ctx.config().links;
    strip_any_prefix(target, &links.category_prefixes).is_none()
        && strip_any_prefix(target, &links.file_prefixes).is_none()
}

fn strip_any_prefix<'t>(target: &'t str, prefixes: &[String]) -> Option<&'t str> {
    let target = target.trim().trim_start_matches(':');
    prefixes.iter().find_map(|prefix| {
        target
            .get(..prefix.len())
            .filter(|head| head.eq_ignore_ascii_case(prefix))
            .map(|_| &target[prefix.len()..])
    })
}

/// Text shown for a link without display text: the target minus a leading colon and fragment.
fn link_text(target: &str) -> &str {
    let target = target.trim().trim_start_matches(':');
    match target.split_once('#') {
        Some((page, _)) if !page.is_empty() => page,
        _ => target,
    }
}

/// Decode entities, collapse blanks, trim lines and drop empty ones.
pub fn normalize_text(raw: &str) -> String {
    let decoded = ENTITY.replace_all(raw, |caps: &regex::Captures<'_>| {
        decode_entity(&caps[1]).unwrap_or_else(|| caps[0].to_string())
    });

    decoded
        .lines()
        .map(|line| BLANKS.replace_all(line, " ").trim().to_string())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn decode_entity(name: &str) -> Option<String> {
    if let Some(number) = name.strip_prefix('#') {
        let code = match number.strip_prefix(|c: char| c == 'x' || c == 'X') {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => number.parse::<u32>().ok()?,
        };
        return char::from_u32(code).map(String::from);
    }
    let decoded = match name {
        "nbsp" | "ensp" | "emsp" | "thinsp" => " ",
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        "ndash" => "–",
        "mdash" => "—",
        "hellip" => "…",
        "rsquo" => "’",
        "lsquo" => "‘",
        "laquo" => "«",
        "raquo" => "»",
        _ => return None,
    };
    Some(decoded.to_string())
}

/// Replace template invocations with their expansions, recursively, up to the depth cap.
/// Templates the host cannot expand are dropped.
pub fn expand_nodes(ctx: &ExtractContext<'_>, nodes: &[Node]) -> Vec<Node> {
    let mut expanded = Vec::with_capacity(nodes.len());
    for node in nodes {
        expand_into(ctx, node, 0, &mut expanded);
    }
    expanded
}

fn expand_into(ctx: &ExtractContext<'_>, node: &Node, depth: usize, out: &mut Vec<Node>) {
    let Node::Element(element) = node else {
        out.push(node.clone());
        return;
    };

    if let NodeKind::Template(template) = &element.kind {
        if depth >= ctx.config().limits.max_depth {
            warn!(template = %template.name, depth, "template expansion depth cap reached");
            return;
        }
        match ctx.host().expand_template(node) {
            Some(Node::Element(root)) if root.kind == NodeKind::Root => {
                for child in &root.children {
                    expand_into(ctx, child, depth + 1, out);
                }
            }
            Some(tree) => expand_into(ctx, &tree, depth + 1, out),
            None => debug!(template = %template.name, "template not expandable"),
        }
        return;
    }

    let mut children = Vec::with_capacity(element.children.len());
    for child in &element.children {
        expand_into(ctx, child, depth, &mut children);
    }
    out.push(Node::Element(element.with_children(children)));
}
