//! Canonical tag lookup
//!
//! Header and annotation labels are free text in the source language. A [TagTable] maps the
//! ones it knows to canonical tag identifiers; everything else is kept verbatim as a raw tag.
//! Lookup ignores case and surrounding whitespace. Labels are never merged or deduplicated:
//! two spellings that map to the same tag produce that tag twice.

use super::config::ExtractConfig;
use super::error::ExtractResult;
use std::collections::HashMap;

/// Label to canonical tags mapping for one source language.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagTable {
    entries: HashMap<String, Vec<String>>,
}

/// Where a label ended up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Labels {
    pub tags: Vec<String>,
    pub raw_tags: Vec<String>,
}

impl TagTable {
    pub fn new<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Vec<String>)>,
        K: AsRef<str>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(label, tags)| (normalize(label.as_ref()), tags))
                .collect(),
        }
    }

    /// Table for `lang_code` from the `tags.<lang>` section; empty when absent.
    pub fn for_language(config: &ExtractConfig, lang_code: &str) -> Self {
        config
            .tags
            .get(lang_code)
            .map(|entries| Self::new(entries.iter().map(|(k, v)| (k, v.clone()))))
            .unwrap_or_default()
    }

    /// Parse a YAML mapping of label to a tag or list of tags.
    ///
    /// ```yaml
    /// Présent: present
    /// Passé composé: [past, multiword-construction]
    /// ```
    pub fn from_yaml(source: &str) -> ExtractResult<Self> {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum OneOrMany {
            One(String),
            Many(Vec<String>),
        }

        let raw: HashMap<String, OneOrMany> = serde_yaml::from_str(source)?;
        Ok(Self::new(raw.into_iter().map(|(label, tags)| {
            let tags = match tags {
                OneOrMany::One(tag) => vec![tag],
                OneOrMany::Many(tags) => tags,
            };
            (label, tags)
        })))
    }

    pub fn lookup(&self, label: &str) -> Option<&[String]> {
        self.entries.get(&normalize(label)).map(Vec::as_slice)
    }

    /// Route one label: canonical tags when known, verbatim raw tag otherwise.
    pub fn apply(&self, label: &str, labels: &mut Labels) {
        let label = label.trim();
        if label.is_empty() {
            return;
        }
        match self.lookup(label) {
            Some(tags) => labels.tags.extend(tags.iter().cloned()),
            None => labels.raw_tags.push(label.to_string()),
        }
    }

    pub fn classify<'a>(&self, labels: impl IntoIterator<Item = &'a str>) -> Labels {
        let mut out = Labels::default();
        for label in labels {
            self.apply(label, &mut out);
        }
        out
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn normalize(label: &str) -> String {
    label.trim().to_lowercase()
}
