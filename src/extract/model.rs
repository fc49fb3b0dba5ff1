//! Record model
//!
//! Plain values handed to the record-model collaborator. Empty fields are left out when
//! serialized, so a record only carries what the page actually provided.

use serde::{Deserialize, Serialize};

/// (base text, reading) pair from a ruby annotation.
pub type Ruby = (String, String);

/// One word of one language on a page, under construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WordEntry {
    pub word: String,
    pub lang_code: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub senses: Vec<Sense>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub forms: Vec<WordForm>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
}

impl WordEntry {
    pub fn new(word: &str, lang_code: &str) -> Self {
        Self {
            word: word.to_string(),
            lang_code: lang_code.to_string(),
            ..Default::default()
        }
    }
}

/// One meaning of a word.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sense {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub glosses: Vec<String>,
    /// Gloss text before bracket groups were split off
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub raw_glosses: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub raw_tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<Example>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ruby: Vec<Ruby>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExampleKind {
    #[default]
    Example,
    Quotation,
}

/// Usage example or quotation attached to a sense.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Example {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
    /// Transliteration of `text`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roman: Option<String>,
    #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(rename = "type")]
    pub kind: ExampleKind,
}

impl Example {
    /// Set the reference; a non-empty one turns the example into a quotation.
    pub fn set_reference(&mut self, reference: String) {
        if reference.is_empty() {
            return;
        }
        self.reference = Some(reference);
        self.kind = ExampleKind::Quotation;
    }
}

/// One inflected form read from a table cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WordForm {
    pub form: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub raw_tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipa: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roman: Option<String>,
    /// The same form in a secondary script (e.g. kana for a kanji form)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_script: Option<String>,
    /// Page the form was read from
    pub source: String,
}
