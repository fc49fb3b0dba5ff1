//! Data cell reading
//!
//!     A body row is read left to right. Each data cell is classified once, in this order:
//!
//!         spacer         cleans to nothing
//!         unused         an "unused" marker, optionally in parentheses
//!         term           contains a link to a page: one form per linked line
//!         phonetic       `\…\`, `/…/` or an IPA-classed span; may spread over adjacent cells
//!         romanization   italic text only
//!         plain          anything else
//!
//!     A column header with a configured role overrides the content-based class. A term cell
//!     may also carry the transcription (IPA-classed span) and romanization (italic run) of
//!     its terms; those are split out of the term text and attached to the cell's forms. Lines
//!     of a term cell without a link are notes and are dropped.
//!
//!     Plain text waits for the next term and is prefixed to it; plain text starting with a
//!     hyphen is a suffix of the forms just read ("abats" + "-toi"). A phonetic cell with
//!     plain text still waiting turns that text into a form of its own.

use super::super::clean::is_content_link;
use super::super::config::ColumnRole;
use super::super::context::ExtractContext;
use super::super::model::WordForm;
use super::super::node::{Node, NodeKind};
use std::ops::Range;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellClass {
    Spacer,
    Unused,
    Phonetic,
    Romanization,
    Term,
    AltScript,
    Plain,
}

/// A data cell's cleaned text and class. Term cells also carry the transcriptions and
/// romanizations found next to their terms, one per term line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellRead {
    pub text: String,
    pub class: CellClass,
    pub ipa: Vec<String>,
    pub roman: Vec<String>,
}

impl CellRead {
    pub fn new(text: impl Into<String>, class: CellClass) -> Self {
        Self {
            text: text.into(),
            class,
            ipa: Vec::new(),
            roman: Vec::new(),
        }
    }

    pub fn read(
        ctx: &ExtractContext<'_>,
        cell: &Node,
        role: Option<ColumnRole>,
        categories: &mut Vec<String>,
    ) -> Self {
        let text = ctx.clean_into(cell.children(), categories);
        let class = classify(ctx, cell, &text, role);
        if class == CellClass::Term {
            return read_terms(ctx, cell, role != Some(ColumnRole::Form));
        }
        Self::new(text, class)
    }

    fn lines(&self) -> Vec<&str> {
        self.text.lines().map(str::trim).filter(|line| !line.is_empty()).collect()
    }
}

fn classify(
    ctx: &ExtractContext<'_>,
    cell: &Node,
    text: &str,
    role: Option<ColumnRole>,
) -> CellClass {
    let config = &ctx.config().conjugation;
    if text.is_empty() {
        return CellClass::Spacer;
    }
    if config.is_unused_marker(text) {
        return CellClass::Unused;
    }
    match role {
        Some(ColumnRole::Phonetic) => return CellClass::Phonetic,
        Some(ColumnRole::Romanization) => return CellClass::Romanization,
        Some(ColumnRole::Form) => return CellClass::Term,
        Some(ColumnRole::AltScript) => return CellClass::AltScript,
        None => {}
    }
    if count_page_links(ctx, cell) > 0 {
        CellClass::Term
    } else if text.starts_with('\\')
        || text.starts_with('/')
        || cell.contains(&|node: &Node| is_ipa_span(node, &config.ipa_classes))
    {
        CellClass::Phonetic
    } else if is_italic_only(cell) {
        CellClass::Romanization
    } else {
        CellClass::Plain
    }
}

fn is_ipa_span(node: &Node, classes: &[String]) -> bool {
    node.is_html("span")
        && node
            .as_element()
            .and_then(|element| element.attr("class"))
            .is_some_and(|class| {
                class
                    .split_whitespace()
                    .any(|name| classes.iter().any(|ipa| ipa == name))
            })
}

/// Wrappers looked through when splitting a term cell into lines.
const WRAPPERS: [&str; 5] = ["span", "bdi", "div", "p", "small"];

enum Piece<'n> {
    Break,
    Ipa(&'n Node),
    Inline(&'n Node),
}

fn flatten<'n>(nodes: &'n [Node], ipa_classes: &[String], pieces: &mut Vec<Piece<'n>>) {
    for node in nodes {
        if node.is_line_break() {
            pieces.push(Piece::Break);
        } else if is_ipa_span(node, ipa_classes) {
            pieces.push(Piece::Ipa(node));
        } else if WRAPPERS.iter().any(|tag| node.is_html(tag)) {
            flatten(node.children(), ipa_classes, pieces);
        } else {
            pieces.push(Piece::Inline(node));
        }
    }
}

/// Read a term cell line by line. With `require_link`, a line is a term line only when it
/// holds a page link; otherwise every non-empty line is.
fn read_terms(ctx: &ExtractContext<'_>, cell: &Node, require_link: bool) -> CellRead {
    let mut pieces = Vec::new();
    flatten(cell.children(), &ctx.config().conjugation.ipa_classes, &mut pieces);

    let mut read = CellRead::new(String::new(), CellClass::Term);
    let mut terms: Vec<String> = Vec::new();
    for line in pieces.split(|piece| matches!(piece, Piece::Break)) {
        let mut rest: Vec<&Node> = Vec::new();
        for piece in line {
            match piece {
                Piece::Break => {}
                Piece::Ipa(node) => read.ipa.extend(non_empty(ctx.clean([*node]))),
                Piece::Inline(node) if node.is_italic() && count_page_links(ctx, node) == 0 => {
                    read.roman.extend(non_empty(ctx.clean([*node])))
                }
                Piece::Inline(node) => rest.push(*node),
            }
        }

        let links: usize = rest.iter().map(|node| count_page_links(ctx, node)).sum();
        let text = ctx.clean(rest.iter().copied());
        if links == 0 && require_link {
            if !text.is_empty() {
                debug!(note = %text, "line without a term dropped from term cell");
            }
            continue;
        }
        terms.extend(split_listed_terms(&text, links));
    }

    read.text = terms.join("\n");
    read
}

fn non_empty(text: String) -> Option<String> {
    Some(text).filter(|text| !text.is_empty())
}

/// Only italic content, possibly wrapped in `<span>`/`<bdi>`.
fn is_italic_only(node: &Node) -> bool {
    let children: Vec<&Node> = node
        .children()
        .iter()
        .filter(|child| !child.is_blank_text() && !child.is_line_break())
        .collect();
    !children.is_empty()
        && children.iter().all(|child| {
            child.is_italic()
                || ((child.is_html("span") || child.is_html("bdi")) && is_italic_only(child))
        })
}

/// Page links in a node, the node itself included.
fn count_page_links(ctx: &ExtractContext<'_>, node: &Node) -> usize {
    let is_page_link = |node: &Node| match node.kind() {
        Some(NodeKind::Link { target }) => is_content_link(ctx, target),
        _ => false,
    };
    usize::from(is_page_link(node)) + node.find_descendants(&is_page_link).len()
}

/// Terms of one cell line; several links listed on it ("[[a]], [[b]]") become one term each.
fn split_listed_terms(text: &str, links: usize) -> Vec<String> {
    text.lines()
        .flat_map(|line| {
            if links < 2 {
                vec![line]
            } else {
                line.split(',').collect()
            }
        })
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_string)
        .collect()
}

struct OpenPhonetic {
    close: char,
    text: String,
}

/// Builds the forms of one body row. Forms go straight into the caller's list so that
/// forms from nested tables keep reading order; `group` indexes the forms read last.
pub struct RowForms {
    alt_script_language: bool,
    pending: Vec<(usize, String)>,
    group: Range<usize>,
    last_was_term: bool,
    phonetic: Option<OpenPhonetic>,
}

impl RowForms {
    pub fn new(alt_script_language: bool) -> Self {
        Self {
            alt_script_language,
            pending: Vec::new(),
            group: 0..0,
            last_was_term: false,
            phonetic: None,
        }
    }

    /// Feed one data cell starting at grid column `col`. `make` builds a form carrying the
    /// header labels of a column.
    pub fn feed(
        &mut self,
        cell: &CellRead,
        col: usize,
        forms: &mut Vec<WordForm>,
        make: &dyn Fn(usize, String) -> WordForm,
    ) {
        if cell.class == CellClass::Spacer {
            return;
        }
        if self.phonetic.is_some() {
            self.phonetic(&cell.text, forms, make);
            return;
        }

        match cell.class {
            CellClass::Spacer => {}
            CellClass::Unused => {
                self.pending.clear();
                self.last_was_term = false;
            }
            CellClass::Phonetic => self.phonetic(&cell.text, forms, make),
            CellClass::Romanization => {
                let lines = cell.lines();
                self.zip_into_group(forms, &lines, |form, line| form.roman = Some(line));
                self.last_was_term = false;
            }
            CellClass::AltScript => self.alt_script(cell, forms),
            CellClass::Term if self.alt_script_language && self.last_was_term => {
                self.alt_script(cell, forms);
                self.attach_readings(cell, forms);
            }
            CellClass::Term => {
                let prefix: Vec<String> = self.pending.drain(..).map(|(_, text)| text).collect();
                let start = forms.len();
                for line in cell.lines() {
                    let words = prefix.iter().map(String::as_str).chain(std::iter::once(line));
                    forms.push(make(col, join_words(words)));
                }
                self.group = start..forms.len();
                self.attach_readings(cell, forms);
                self.last_was_term = true;
            }
            CellClass::Plain => {
                let text = cell.text.replace('\n', " ");
                if text.starts_with('-') && !self.group.is_empty() {
                    for index in self.group.clone() {
                        forms[index].form.push_str(&text);
                    }
                } else {
                    self.pending.push((col, text));
                }
                self.last_was_term = false;
            }
        }
    }

    /// Transcriptions and romanizations read inside a term cell, zipped onto its forms.
    fn attach_readings(&self, cell: &CellRead, forms: &mut [WordForm]) {
        for (offset, index) in self.group.clone().enumerate() {
            if let Some(roman) = cell.roman.get(offset) {
                forms[index].roman = Some(roman.clone());
            }
            if let Some(ipa) = cell.ipa.get(offset).or(cell.ipa.last()) {
                forms[index].ipa = Some(ipa.clone());
            }
        }
    }

    fn alt_script(&mut self, cell: &CellRead, forms: &mut [WordForm]) {
        let lines = cell.lines();
        self.zip_into_group(forms, &lines, |form, line| form.alt_script = Some(line));
        self.last_was_term = false;
    }

    fn phonetic(
        &mut self,
        text: &str,
        forms: &mut Vec<WordForm>,
        make: &dyn Fn(usize, String) -> WordForm,
    ) {
        let text = text.trim();
        let complete = match self.phonetic.take() {
            Some(mut open) => {
                open.text.push(' ');
                open.text.push_str(text);
                if text.ends_with(open.close) {
                    Some(open.text)
                } else {
                    self.phonetic = Some(open);
                    None
                }
            }
            None => {
                let close = text.chars().next().filter(|c| matches!(*c, '\\' | '/'));
                match close {
                    Some(close) if text.chars().count() < 2 || !text.ends_with(close) => {
                        self.phonetic = Some(OpenPhonetic {
                            close,
                            text: text.to_string(),
                        });
                        None
                    }
                    _ => Some(text.to_string()),
                }
            }
        };

        if let Some(ipa) = complete {
            if !self.pending.is_empty() {
                let col = self.pending[0].0;
                let words: Vec<String> = self.pending.drain(..).map(|(_, text)| text).collect();
                forms.push(make(col, join_words(words.iter().map(String::as_str))));
                self.group = forms.len() - 1..forms.len();
            }
            let lines: Vec<&str> = ipa.lines().collect();
            for (offset, index) in self.group.clone().enumerate() {
                if forms[index].ipa.is_none() {
                    let line = lines.get(offset).or(lines.last()).copied().unwrap_or_default();
                    forms[index].ipa = Some(line.to_string());
                }
            }
            self.last_was_term = false;
        }
    }

    fn zip_into_group(
        &self,
        forms: &mut [WordForm],
        lines: &[&str],
        set: impl Fn(&mut WordForm, String),
    ) {
        if self.group.is_empty() {
            debug!("cell text without a form to attach to");
            return;
        }
        for (index, line) in self.group.clone().zip(lines) {
            set(&mut forms[index], line.to_string());
        }
    }

    /// End of row: leftover plain text had no term to attach to.
    pub fn finish(self) {
        if self.pending.is_empty() && self.phonetic.is_none() {
            return;
        }
        debug!(
            pending = self.pending.len(),
            open_phonetic = self.phonetic.is_some(),
            "row ended with unattached text"
        );
    }
}

/// Join words with spaces, except after an apostrophe (`s’` + `abattre`).
fn join_words<'w>(words: impl IntoIterator<Item = &'w str>) -> String {
    let mut joined = String::new();
    for word in words {
        let word = word.trim();
        if word.is_empty() {
            continue;
        }
        if !joined.is_empty() && !joined.ends_with(|c: char| c == '’' || c == '\'') {
            joined.push(' ');
        }
        joined.push_str(word);
    }
    joined
}
