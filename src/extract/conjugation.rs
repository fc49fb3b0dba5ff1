//! Conjugation Table Parser
//!
//!     Reads inflected forms out of a conjugation page. The page is first resolved to a single
//!     template call (following a page transclusion and a tab template, see [resolve]) which
//!     the host expands into headings and tables. Tables are then walked row by row with an
//!     explicit header context (see [header] and [table]); every data cell holding a term
//!     yields one [WordForm](super::model::WordForm) per line, labelled with the headers in
//!     scope.
//!
//!     Forms are appended to the entry in reading order and never deduplicated. Categories met
//!     while cleaning cells go to the entry. A page that cannot be resolved yields no forms.

pub mod cells;
pub mod header;
pub mod resolve;
pub mod table;

use super::context::ExtractContext;
use super::model::WordEntry;
use resolve::resolve_tables;
use table::TableWalker;

/// Append the forms found on the conjugation page `locator` to `entry`.
pub fn extract_conjugation(ctx: &ExtractContext<'_>, entry: &mut WordEntry, locator: &str) {
    let Some(resolved) = resolve_tables(ctx, locator) else {
        return;
    };
    let walker = TableWalker::new(ctx, &resolved.source);
    let mut section = None;
    walker.walk_blocks(std::slice::from_ref(&resolved.tree), &mut section, entry);
}
