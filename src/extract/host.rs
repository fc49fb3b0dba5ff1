//! Markup host
//!
//! The extraction core does not parse markup or expand templates itself. Both belong to the
//! markup-parser collaborator, which this crate reaches through [MarkupHost]:
//!
//!     - `page` returns the parsed, unexpanded tree of a page (conjugation pages, transcluded
//!       tab pages)
//!     - `expand_template` expands one invocation and returns a freshly parsed tree
//!
//! Expansion may re-enter the extraction machinery on the host side; the core only ever reads
//! what comes back. [MemoryHost] keeps pages and template bodies in memory and is what the
//! tests and small drivers use.

use super::node::{title_eq, Node, Template};
use std::collections::HashMap;
use std::fmt;

/// Access to the markup-parser collaborator.
pub trait MarkupHost {
    /// Parsed tree of a page, templates left unexpanded.
    fn page(&self, title: &str) -> Option<Node>;

    /// Expand a template invocation node into a freshly built tree.
    fn expand_template(&self, node: &Node) -> Option<Node>;
}

type Expansion = Box<dyn Fn(&Template) -> Node>;

/// In-memory host: pages and template expansions registered up front.
#[derive(Default)]
pub struct MemoryHost {
    pages: HashMap<String, Node>,
    templates: Vec<(String, Expansion)>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_page(&mut self, title: &str, tree: Node) -> &mut Self {
        self.pages.insert(title.trim().to_string(), tree);
        self
    }

    /// Register a template whose expansion does not depend on its arguments.
    pub fn add_template(&mut self, name: &str, expansion: Node) -> &mut Self {
        self.add_template_fn(name, move |_| expansion.clone())
    }

    /// Register a template expanded by a function of the invocation.
    pub fn add_template_fn(
        &mut self,
        name: &str,
        expand: impl Fn(&Template) -> Node + 'static,
    ) -> &mut Self {
        self.templates.push((name.to_string(), Box::new(expand)));
        self
    }
}

impl MarkupHost for MemoryHost {
    fn page(&self, title: &str) -> Option<Node> {
        self.pages.get(title.trim()).cloned()
    }

    fn expand_template(&self, node: &Node) -> Option<Node> {
        let template = node.as_template()?;
        self.templates
            .iter()
            .rev()
            .find(|(name, _)| title_eq(name, &template.name))
            .map(|(_, expand)| expand(template))
    }
}

impl fmt::Debug for MemoryHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let templates: Vec<&str> = self.templates.iter().map(|(name, _)| name.as_str()).collect();
        f.debug_struct("MemoryHost")
            .field("pages", &self.pages.keys().collect::<Vec<_>>())
            .field("templates", &templates)
            .finish()
    }
}
