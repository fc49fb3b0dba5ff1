//! Extraction context
//!
//! Bundles what every extractor needs for one page: the host, the settings, the tag table of
//! the page's language and the compiled tag splitter. A context is cheap to build and is not
//! shared between pages.

use super::brackets::TagSplitter;
use super::clean::{clean_nodes, expand_nodes};
use super::config::ExtractConfig;
use super::error::ExtractResult;
use super::host::MarkupHost;
use super::node::Node;
use super::tags::TagTable;

pub struct ExtractContext<'a> {
    host: &'a dyn MarkupHost,
    config: &'a ExtractConfig,
    lang_code: String,
    tags: TagTable,
    splitter: TagSplitter,
}

impl<'a> ExtractContext<'a> {
    /// Context for pages of `lang_code`, with that language's tag table from the settings.
    pub fn new(
        host: &'a dyn MarkupHost,
        config: &'a ExtractConfig,
        lang_code: &str,
    ) -> ExtractResult<Self> {
        Ok(Self {
            host,
            config,
            lang_code: lang_code.to_string(),
            tags: TagTable::for_language(config, lang_code),
            splitter: TagSplitter::new(&config.gloss.separators)?,
        })
    }

    /// Replace the tag table, e.g. with one read from a YAML file.
    pub fn with_tags(mut self, tags: TagTable) -> Self {
        self.tags = tags;
        self
    }

    pub fn host(&self) -> &dyn MarkupHost {
        self.host
    }

    pub fn config(&self) -> &ExtractConfig {
        self.config
    }

    pub fn tags(&self) -> &TagTable {
        &self.tags
    }

    pub fn splitter(&self) -> &TagSplitter {
        &self.splitter
    }

    pub fn uses_ruby(&self) -> bool {
        self.config
            .gloss
            .ruby_languages
            .iter()
            .any(|lang| lang == &self.lang_code)
    }

    pub fn uses_alt_script(&self) -> bool {
        self.config
            .conjugation
            .alt_script_languages
            .iter()
            .any(|lang| lang == &self.lang_code)
    }

    /// Clean nodes into text, dropping any categories.
    pub fn clean<'n>(&self, nodes: impl IntoIterator<Item = &'n Node>) -> String {
        clean_nodes(self, nodes, None)
    }

    /// Clean nodes into text, appending categories found on the way.
    pub fn clean_into<'n>(
        &self,
        nodes: impl IntoIterator<Item = &'n Node>,
        categories: &mut Vec<String>,
    ) -> String {
        clean_nodes(self, nodes, Some(categories))
    }

    /// Nodes with every template replaced by its expansion.
    pub fn expand(&self, nodes: &[Node]) -> Vec<Node> {
        expand_nodes(self, nodes)
    }
}

impl std::fmt::Debug for ExtractContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractContext")
            .field("lang_code", &self.lang_code)
            .field("tags", &self.tags.len())
            .finish()
    }
}
