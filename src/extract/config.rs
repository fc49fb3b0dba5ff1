//! Extraction settings
//!
//! `defaults/extract.default.toml` is embedded into the crate so that the documented defaults
//! and runtime behavior stay in sync. Drivers layer per-edition files on top of those defaults
//! via [`Loader`] before deserializing into [`ExtractConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/extract.default.toml");

/// Top-level configuration consumed by the extractors.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractConfig {
    pub limits: LimitsConfig,
    pub links: LinksConfig,
    pub gloss: GlossConfig,
    pub example: ExampleConfig,
    pub conjugation: ConjugationConfig,
    /// Label mappings per source language, see [TagTable](super::tags::TagTable).
    #[serde(default)]
    pub tags: HashMap<String, HashMap<String, Vec<String>>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    pub max_depth: usize,
}

/// Link namespaces that never produce text.
#[derive(Debug, Clone, Deserialize)]
pub struct LinksConfig {
    pub category_prefixes: Vec<String>,
    pub file_prefixes: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GlossConfig {
    pub separators: Vec<String>,
    pub sub_gloss_marker: String,
    pub ruby_languages: Vec<String>,
}

/// Names and argument keys of the example templates.
#[derive(Debug, Clone, Deserialize)]
pub struct ExampleConfig {
    pub example_templates: Vec<String>,
    pub source_templates: Vec<String>,
    pub translation_keys: Vec<String>,
    pub transliteration_keys: Vec<String>,
    pub reference_keys: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConjugationConfig {
    pub tab_templates: Vec<String>,
    pub selection_key: String,
    pub content_prefix: String,
    pub unused_markers: Vec<String>,
    pub ipa_classes: Vec<String>,
    pub alt_script_languages: Vec<String>,
    /// Column headers that name a field of the form rather than a grammatical label.
    #[serde(default)]
    pub column_roles: HashMap<String, ColumnRole>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColumnRole {
    Form,
    AltScript,
    Romanization,
    Phonetic,
}

impl ConjugationConfig {
    pub fn column_role(&self, label: &str) -> Option<ColumnRole> {
        let label = label.trim().to_lowercase();
        self.column_roles
            .iter()
            .find(|(key, _)| key.trim().to_lowercase() == label)
            .map(|(_, role)| *role)
    }

    pub fn is_unused_marker(&self, text: &str) -> bool {
        let text = text
            .trim()
            .trim_start_matches('(')
            .trim_end_matches(')')
            .trim()
            .to_lowercase();
        !text.is_empty()
            && self
                .unused_markers
                .iter()
                .any(|marker| marker.to_lowercase() == text)
    }

    pub fn is_tab_template(&self, name: &str) -> bool {
        self.tab_templates
            .iter()
            .any(|tab| super::node::title_eq(tab, name))
    }
}

impl ExampleConfig {
    pub fn is_example_template(&self, name: &str) -> bool {
        self.example_templates
            .iter()
            .any(|known| super::node::title_eq(known, name))
    }

    pub fn is_source_template(&self, name: &str) -> bool {
        self.source_templates
            .iter()
            .any(|known| super::node::title_eq(known, name))
    }
}

/// Builds an [ExtractConfig] from the embedded defaults plus per-edition layers.
///
/// Layers apply in call order; a later layer replaces the keys it sets. A French edition
/// driver typically adds its template names and `tags.fr` table from one file, then
/// tightens `limits.max_depth` for a dump known to nest deeply.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let defaults = File::from_str(DEFAULT_TOML, FileFormat::Toml);
        Self {
            builder: Config::builder().add_source(defaults),
        }
    }

    /// Edition settings that must exist; [build](Loader::build) fails without them.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.layer_file(path.as_ref(), true)
    }

    /// Local tweaks, skipped when the file is absent.
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.layer_file(path.as_ref(), false)
    }

    /// Settings held in memory, e.g. shipped alongside a dump.
    pub fn with_toml(mut self, toml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(toml, FileFormat::Toml));
        self
    }

    /// Override one dotted key such as `limits.max_depth` or `gloss.sub_gloss_marker`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<ExtractConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }

    fn layer_file(mut self, path: &Path, required: bool) -> Self {
        let source = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(source);
        self
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The built-in settings, with no edition layers.
pub fn load_defaults() -> Result<ExtractConfig, ConfigError> {
    Loader::new().build()
}
