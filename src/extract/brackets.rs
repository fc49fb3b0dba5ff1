//! Bracket-Tag Splitter
//!
//!     Dictionary pages mark usage annotations ("familier", "figuré", "書面語") with brackets
//!     around the gloss. This module finds those groups and separates their labels from the
//!     gloss content. Two inputs are handled:
//!
//!     Node sequences (the children of a gloss list item):
//!
//!         (a) A leading run of templates whose cleaned text is wholly wrapped in "(...)".
//!             Each contributes the labels found by splitting its content, plus the
//!             categories met while cleaning it. The gloss starts after the run.
//!         (b) An italic span with a literal "(" text token right before it and a literal ")"
//!             text token right after it. The span becomes one label; the three positions
//!             are left out of the gloss.
//!
//!     Cleaned strings:
//!
//!         A leading group and a trailing group, in ASCII or full-width parentheses, are
//!         detected independently. A trailing group that would overlap the leading one is
//!         ignored. What remains in between, trimmed, is the gloss.
//!
//!     Label lists inside a group are split on the configured separators.

use super::context::ExtractContext;
use super::error::ExtractResult;
use super::node::Node;
use regex::Regex;
use std::collections::BTreeSet;

const BRACKET_PAIRS: [(char, char); 2] = [('(', ')'), ('（', '）')];

/// Splits a bracket group's content into labels.
#[derive(Debug, Clone)]
pub struct TagSplitter {
    pattern: Option<Regex>,
}

impl TagSplitter {
    /// Build from literal separators. Longer separators are tried first.
    pub fn new(separators: &[String]) -> ExtractResult<Self> {
        let mut separators: Vec<&str> = separators
            .iter()
            .map(String::as_str)
            .filter(|separator| !separator.is_empty())
            .collect();
        if separators.is_empty() {
            return Ok(Self { pattern: None });
        }
        separators.sort_by_key(|separator| std::cmp::Reverse(separator.len()));
        let alternation = separators
            .iter()
            .map(|separator| regex::escape(separator))
            .collect::<Vec<_>>()
            .join("|");
        Ok(Self {
            pattern: Some(Regex::new(&alternation)?),
        })
    }

    /// Trimmed, non-empty labels of a group's content.
    pub fn split(&self, content: &str) -> Vec<String> {
        let pieces: Vec<&str> = match &self.pattern {
            Some(pattern) => pattern.split(content).collect(),
            None => vec![content],
        };
        pieces
            .into_iter()
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Result of rule (a) over a node sequence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationPrefix {
    /// Index of the first node after the consumed run
    pub end: usize,
    pub labels: Vec<String>,
    pub categories: Vec<String>,
}

/// Rule (a): consume the leading run of bracketed annotation templates.
pub fn scan_annotation_prefix(ctx: &ExtractContext<'_>, nodes: &[&Node]) -> AnnotationPrefix {
    let mut prefix = AnnotationPrefix::default();
    for (index, node) in nodes.iter().enumerate() {
        if node.is_blank_text() {
            continue;
        }
        if node.as_template().is_none() {
            break;
        }
        let mut categories = Vec::new();
        let expanded = ctx.clean_into([*node], &mut categories);
        if !(expanded.starts_with('(') && expanded.ends_with(')')) {
            break;
        }
        let content = expanded.trim_matches(|c: char| matches!(c, '(' | ')' | ' ' | '\n'));
        prefix.labels.extend(ctx.splitter().split(content));
        prefix.categories.extend(categories);
        prefix.end = index + 1;
    }
    prefix
}

/// Result of rule (b) over a node sequence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItalicLabels {
    pub labels: Vec<String>,
    /// Positions to leave out of the gloss: each "(", italic span, ")"
    pub consumed: BTreeSet<usize>,
}

/// Rule (b): italic spans wrapped in literal parenthesis tokens, from `start` on.
pub fn scan_parenthesized_italics(
    ctx: &ExtractContext<'_>,
    nodes: &[&Node],
    start: usize,
) -> ItalicLabels {
    let is_token = |index: usize, token: &str| {
        nodes
            .get(index)
            .and_then(|node| node.as_text())
            .is_some_and(|text| text.trim() == token)
    };

    let mut found = ItalicLabels::default();
    for index in start..nodes.len() {
        if index > start
            && nodes[index].is_italic()
            && is_token(index - 1, "(")
            && is_token(index + 1, ")")
        {
            let label = ctx.clean([nodes[index]]);
            if !label.is_empty() {
                found.labels.push(label);
            }
            found.consumed.extend([index - 1, index, index + 1]);
        }
    }
    found
}

/// Both node rules applied to the children of a gloss item.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeSplit<'n> {
    pub labels: Vec<String>,
    pub categories: Vec<String>,
    /// Nodes left for the gloss text, in order
    pub gloss_nodes: Vec<&'n Node>,
}

pub fn split_nodes<'n>(ctx: &ExtractContext<'_>, nodes: &[&'n Node]) -> NodeSplit<'n> {
    let prefix = scan_annotation_prefix(ctx, nodes);
    let italics = scan_parenthesized_italics(ctx, nodes, prefix.end);

    let gloss_nodes = nodes
        .iter()
        .enumerate()
        .skip(prefix.end)
        .filter(|(index, _)| !italics.consumed.contains(index))
        .map(|(_, node)| *node)
        .collect();

    let mut labels = prefix.labels;
    labels.extend(italics.labels);
    NodeSplit {
        labels,
        categories: prefix.categories,
        gloss_nodes,
    }
}

/// A cleaned gloss string with its bracket groups separated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlossSplit {
    pub gloss: String,
    /// The verbatim input, kept only when a group was removed
    pub raw_gloss: Option<String>,
    pub labels: Vec<String>,
}

/// Whole-string rule: leading and trailing bracket groups.
pub fn split_gloss(text: &str, splitter: &TagSplitter) -> GlossSplit {
    let text = text.trim();
    let mut labels = Vec::new();
    let mut fired = false;

    let mut middle_start = 0;
    if let Some((open, close)) = BRACKET_PAIRS.iter().find(|(open, _)| text.starts_with(*open)) {
        if let Some(close_at) = text.find(*close) {
            labels.extend(splitter.split(&text[open.len_utf8()..close_at]));
            middle_start = close_at + close.len_utf8();
            fired = true;
        }
    }

    let mut middle_end = text.len();
    if let Some((open, close)) = BRACKET_PAIRS.iter().find(|(_, close)| text.ends_with(*close)) {
        if let Some(open_at) = text.rfind(*open).filter(|at| *at >= middle_start) {
            let inner = &text[open_at + open.len_utf8()..text.len() - close.len_utf8()];
            labels.extend(splitter.split(inner));
            middle_end = open_at;
            fired = true;
        }
    }

    if !fired {
        return GlossSplit {
            gloss: text.to_string(),
            raw_gloss: None,
            labels,
        };
    }
    GlossSplit {
        gloss: text[middle_start..middle_end].trim().to_string(),
        raw_gloss: Some(text.to_string()),
        labels,
    }
}
