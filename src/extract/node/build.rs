//! Builders for node trees
//!
//! Short constructors used by hosts that assemble trees programmatically and by tests.
//! They mirror the markup they stand for:
//!
//! ```rust,ignore
//! // # {{term|informal}} a (''dated'') greeting
//! let gloss = list("#", vec![item("#", vec![
//!     template("term").arg("informal").into(),
//!     text(" a "),
//!     text("("), italic(vec![text("dated")]), text(")"),
//!     text(" greeting"),
//! ])]);
//! ```

use super::{Node, NodeKind, Template};

pub fn text(text: impl Into<String>) -> Node {
    Node::Text(text.into())
}

pub fn root(children: Vec<Node>) -> Node {
    Node::element(NodeKind::Root, children)
}

pub fn list(marker: &str, items: Vec<Node>) -> Node {
    Node::element(
        NodeKind::List {
            marker: marker.to_string(),
        },
        items,
    )
}

pub fn item(marker: &str, children: Vec<Node>) -> Node {
    Node::element(
        NodeKind::ListItem {
            marker: marker.to_string(),
        },
        children,
    )
}

pub fn italic(children: Vec<Node>) -> Node {
    Node::element(NodeKind::Italic, children)
}

pub fn bold(children: Vec<Node>) -> Node {
    Node::element(NodeKind::Bold, children)
}

/// `[[target]]`
pub fn link(target: &str) -> Node {
    Node::element(
        NodeKind::Link {
            target: target.to_string(),
        },
        Vec::new(),
    )
}

/// `[[target|display]]`
pub fn link_as(target: &str, display: Vec<Node>) -> Node {
    Node::element(
        NodeKind::Link {
            target: target.to_string(),
        },
        display,
    )
}

pub fn heading(level: u8, children: Vec<Node>) -> Node {
    Node::element(NodeKind::Heading { level }, children)
}

pub fn html(tag: &str, children: Vec<Node>) -> Node {
    Node::element(
        NodeKind::Html {
            tag: tag.to_string(),
        },
        children,
    )
}

pub fn br() -> Node {
    html("br", Vec::new())
}

pub fn span(children: Vec<Node>) -> Node {
    html("span", children)
}

pub fn table(rows: Vec<Node>) -> Node {
    Node::element(NodeKind::Table, rows)
}

pub fn row(cells: Vec<Node>) -> Node {
    Node::element(NodeKind::TableRow, cells)
}

pub fn cell(children: Vec<Node>) -> Node {
    Node::element(NodeKind::TableCell, children)
}

pub fn header_cell(children: Vec<Node>) -> Node {
    Node::element(NodeKind::TableHeaderCell, children)
}

/// Start a template invocation; finish with `.into()` or [TemplateBuilder::build].
pub fn template(name: &str) -> TemplateBuilder {
    TemplateBuilder {
        template: Template::new(name),
    }
}

/// Accumulates raw template arguments in source order.
#[derive(Debug, Clone)]
pub struct TemplateBuilder {
    template: Template,
}

impl TemplateBuilder {
    /// Positional argument holding plain text.
    pub fn arg(self, value: &str) -> Self {
        self.arg_nodes(vec![text(value)])
    }

    /// Positional argument holding arbitrary nodes.
    pub fn arg_nodes(mut self, value: Vec<Node>) -> Self {
        self.template.args.push(value);
        self
    }

    /// `key=value` argument holding plain text.
    pub fn named(self, key: &str, value: &str) -> Self {
        self.named_nodes(key, vec![text(value)])
    }

    /// `key=value` argument; the key travels in the leading text run, as the parser emits it.
    pub fn named_nodes(mut self, key: &str, value: Vec<Node>) -> Self {
        let mut raw = Vec::with_capacity(value.len() + 1);
        match value.first() {
            Some(Node::Text(first)) => {
                raw.push(text(format!("{}={}", key, first)));
                raw.extend(value.into_iter().skip(1));
            }
            _ => {
                raw.push(text(format!("{}=", key)));
                raw.extend(value);
            }
        }
        self.template.args.push(raw);
        self
    }

    pub fn build(self) -> Node {
        Node::element(NodeKind::Template(self.template), Vec::new())
    }
}

impl From<TemplateBuilder> for Node {
    fn from(builder: TemplateBuilder) -> Self {
        builder.build()
    }
}

impl Node {
    /// Builder-style attribute setter; a no-op on text nodes.
    pub fn with_attr(mut self, name: &str, value: &str) -> Node {
        if let Node::Element(element) = &mut self {
            element.attrs.insert(name.to_string(), value.to_string());
        }
        self
    }
}
