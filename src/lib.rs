//! # wikt-extract
//!
//! Extraction core for collaborative dictionary pages: turns a parsed markup tree into
//! senses, tags, examples and inflected forms.
//!
//! The markup parser is not part of this crate. Pages and template expansions come from a
//! [MarkupHost](extract::MarkupHost) implementation; [MemoryHost](extract::MemoryHost) serves
//! them from memory.
//!
//! ## Usage
//!
//!     let config = load_defaults()?;
//!     let ctx = ExtractContext::new(&host, &config, "fr")?;
//!     let mut entry = WordEntry::new("lancer", "fr");
//!     extract_gloss(&ctx, &mut entry, &gloss_list);
//!     extract_conjugation(&ctx, &mut entry, "Conjugaison:français/lancer");

pub mod extract;
