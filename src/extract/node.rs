//! Markup node tree
//!
//!     The extraction core reads a tree produced by an external markup parser. The tree is a
//!     closed tagged union: a node is either a text run or an element with a kind, attributes
//!     and ordered children. The kind set is small and fixed, so it is an enum rather than a
//!     trait hierarchy, and every walker in this crate matches on it exhaustively.
//!
//!     Extraction code never mutates a tree. Template expansion goes through the
//!     [MarkupHost](super::host::MarkupHost) and yields a freshly built tree.
//!
//! Node Kinds
//!
//!         - Root: container for a parsed page or an expanded fragment
//!         - List / ListItem: carry the raw list marker ("#", "#*", "##", ":")
//!         - Italic / Bold: styled spans
//!         - Link: internal link, children are the display text
//!         - Template: a template invocation with its raw argument list
//!         - Table / TableRow / TableHeaderCell / TableCell
//!         - Heading: section heading with its level
//!         - Html: any other HTML-like tag (span, br, ruby, div, ...)
//!
//!     Use the [build] helpers to assemble trees by hand.

pub mod build;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A node of the parsed markup tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Node {
    Text(String),
    Element(Element),
}

/// An element node: kind, attributes and ordered children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

/// Discriminator for element nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    Root,
    List { marker: String },
    ListItem { marker: String },
    Italic,
    Bold,
    Link { target: String },
    Template(Template),
    Table,
    TableRow,
    TableHeaderCell,
    TableCell,
    Heading { level: u8 },
    Html { tag: String },
}

/// A template invocation as the parser delivers it: the name and the raw,
/// unsplit argument list. Use [TemplateParams](super::params::TemplateParams)
/// to resolve positional and named arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<Vec<Node>>,
}

impl Template {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// `{{:Some page|...}}` transcludes a page instead of calling a template.
    pub fn transcluded_page(&self) -> Option<&str> {
        self.name
            .trim()
            .strip_prefix(':')
            .map(str::trim)
            .filter(|page| !page.is_empty())
    }
}

/// Compare two titles ignoring outer whitespace and the case of the first letter.
pub fn title_eq(a: &str, b: &str) -> bool {
    let (a, b) = (a.trim(), b.trim());
    let mut a_chars = a.chars();
    let mut b_chars = b.chars();
    match (a_chars.next(), b_chars.next()) {
        (Some(x), Some(y)) => {
            x.to_lowercase().eq(y.to_lowercase()) && a_chars.as_str() == b_chars.as_str()
        }
        (None, None) => true,
        _ => false,
    }
}

impl Element {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            attrs: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Integer attribute such as `colspan`, clamped to at least 1.
    pub fn span_attr(&self, name: &str) -> usize {
        self.attr(name)
            .and_then(|value| value.trim().trim_matches('"').parse::<usize>().ok())
            .filter(|span| *span > 0)
            .unwrap_or(1)
    }

    /// A copy of this element holding different children.
    pub fn with_children(&self, children: Vec<Node>) -> Element {
        Element {
            kind: self.kind.clone(),
            attrs: self.attrs.clone(),
            children,
        }
    }

    fn html_tag(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Html { tag } => Some(tag.as_str()),
            _ => None,
        }
    }
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    pub fn element(kind: NodeKind, children: Vec<Node>) -> Self {
        Node::Element(Element {
            kind,
            attrs: BTreeMap::new(),
            children,
        })
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(text),
            Node::Element(_) => None,
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    pub fn kind(&self) -> Option<&NodeKind> {
        self.as_element().map(|element| &element.kind)
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element(element) => &element.children,
            Node::Text(_) => &[],
        }
    }

    pub fn as_template(&self) -> Option<&Template> {
        match self.kind() {
            Some(NodeKind::Template(template)) => Some(template),
            _ => None,
        }
    }

    /// Marker of a list or list item node.
    pub fn list_marker(&self) -> Option<&str> {
        match self.kind() {
            Some(NodeKind::List { marker }) | Some(NodeKind::ListItem { marker }) => {
                Some(marker.as_str())
            }
            _ => None,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self.kind(), Some(NodeKind::List { .. }))
    }

    pub fn is_list_item(&self) -> bool {
        matches!(self.kind(), Some(NodeKind::ListItem { .. }))
    }

    pub fn is_italic(&self) -> bool {
        matches!(self.kind(), Some(NodeKind::Italic))
    }

    pub fn is_bold(&self) -> bool {
        matches!(self.kind(), Some(NodeKind::Bold))
    }

    pub fn is_link(&self) -> bool {
        matches!(self.kind(), Some(NodeKind::Link { .. }))
    }

    pub fn is_html(&self, tag: &str) -> bool {
        self.as_element()
            .and_then(Element::html_tag)
            .is_some_and(|t| t.eq_ignore_ascii_case(tag))
    }

    /// Text run that is empty or whitespace only (`&nbsp;` included).
    pub fn is_blank_text(&self) -> bool {
        match self {
            Node::Text(text) => text.replace("&nbsp;", " ").trim().is_empty(),
            Node::Element(_) => false,
        }
    }

    /// `<br>` or its HTML spellings.
    pub fn is_line_break(&self) -> bool {
        self.is_html("br")
    }

    pub fn is_table(&self) -> bool {
        matches!(self.kind(), Some(NodeKind::Table)) || self.is_html("table")
    }

    pub fn is_table_row(&self) -> bool {
        matches!(self.kind(), Some(NodeKind::TableRow)) || self.is_html("tr")
    }

    pub fn is_header_cell(&self) -> bool {
        matches!(self.kind(), Some(NodeKind::TableHeaderCell)) || self.is_html("th")
    }

    pub fn is_table_cell(&self) -> bool {
        self.is_header_cell()
            || matches!(self.kind(), Some(NodeKind::TableCell))
            || self.is_html("td")
    }

    /// Level of a wiki heading or an HTML `<hN>` element.
    pub fn heading_level(&self) -> Option<u8> {
        match self.kind() {
            Some(NodeKind::Heading { level }) => Some(*level),
            Some(NodeKind::Html { tag }) => {
                let digits = tag.strip_prefix('h').or_else(|| tag.strip_prefix('H'))?;
                digits.parse::<u8>().ok().filter(|level| (1..=6).contains(level))
            }
            _ => None,
        }
    }

    /// Direct children matching the predicate.
    pub fn find_child<'a>(
        &'a self,
        predicate: impl Fn(&Node) -> bool + 'a,
    ) -> impl Iterator<Item = &'a Node> + 'a {
        self.children().iter().filter(move |child| predicate(child))
    }

    /// Direct children that are not lists.
    pub fn non_list_children(&self) -> Vec<&Node> {
        self.children().iter().filter(|child| !child.is_list()).collect()
    }

    /// Direct children without blank text runs.
    pub fn non_blank_children(&self) -> Vec<&Node> {
        self.children()
            .iter()
            .filter(|child| !child.is_blank_text())
            .collect()
    }

    /// Descendants matching the predicate, in document order, excluding `self`.
    pub fn find_descendants<'a>(&'a self, predicate: &dyn Fn(&Node) -> bool) -> Vec<&'a Node> {
        let mut found = Vec::new();
        collect_descendants(self, predicate, &mut found);
        found
    }

    /// First template invocation in document order, `self` included.
    pub fn first_template(&self) -> Option<&Node> {
        if self.as_template().is_some() {
            return Some(self);
        }
        first_template_in(self.children())
    }

    /// Whether any descendant (or `self`) matches the predicate.
    pub fn contains(&self, predicate: &dyn Fn(&Node) -> bool) -> bool {
        predicate(self) || self.children().iter().any(|child| child.contains(predicate))
    }
}

/// First template invocation within a sequence of nodes.
pub fn first_template_in(nodes: &[Node]) -> Option<&Node> {
    nodes.iter().find_map(Node::first_template)
}

fn collect_descendants<'a>(
    node: &'a Node,
    predicate: &dyn Fn(&Node) -> bool,
    found: &mut Vec<&'a Node>,
) {
    for child in node.children() {
        if predicate(child) {
            found.push(child);
        }
        collect_descendants(child, predicate, found);
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Text(text) => write!(f, "Text({:?})", text),
            Node::Element(element) => {
                write!(f, "{:?}({} children)", element.kind, element.children.len())
            }
        }
    }
}
