//! Main module for extraction functionality
//!
//! Leaf utilities first: [params] resolves template arguments, [brackets] separates
//! annotation labels from gloss text, [clean] turns nodes into text. The walkers build on
//! them: [gloss] for sense lists, [example] for examples below a sense, [conjugation] for
//! inflection tables. Every walker takes an [ExtractContext] and appends into a
//! caller-owned [WordEntry].

pub mod brackets;
pub mod clean;
pub mod config;
pub mod conjugation;
pub mod context;
pub mod error;
pub mod example;
pub mod gloss;
pub mod host;
pub mod model;
pub mod node;
pub mod params;
pub mod ruby;
pub mod tags;

pub use self::config::{load_defaults, ExtractConfig, Loader};
pub use conjugation::extract_conjugation;
pub use context::ExtractContext;
pub use error::{ExtractError, ExtractResult};
pub use example::extract_examples;
pub use gloss::{extract_gloss, extract_gloss_tree};
pub use host::{MarkupHost, MemoryHost};
pub use model::{Example, ExampleKind, Sense, WordEntry, WordForm};
pub use node::{Node, NodeKind, Template};
pub use tags::TagTable;
