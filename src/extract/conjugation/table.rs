//! Table walker
//!
//!     Rows are read top to bottom and each one is classified before its cells are touched:
//!
//!         Placeholder     every cell cleans to nothing; skipped, context untouched
//!         Section         one header cell spanning the table; replaces the section
//!         ColumnHeaders   header cells only, besides spacers
//!         Body            anything else
//!
//!     In a body row, header cells and a leading bold cell are row headers. Cells holding
//!     tables are walked as nested tables whose base labels are the cell's header path. All
//!     other cells are data cells handed to [RowForms].

use super::super::context::ExtractContext;
use super::super::model::{WordEntry, WordForm};
use super::super::node::Node;
use super::cells::{CellRead, RowForms};
use super::header::{HeaderContext, HeaderSpan, Layout};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Placeholder,
    Section,
    ColumnHeaders,
    Body,
}

/// Walks tables of one resolved conjugation page.
pub struct TableWalker<'c, 'a> {
    ctx: &'c ExtractContext<'a>,
    source: &'c str,
}

impl<'c, 'a> TableWalker<'c, 'a> {
    pub fn new(ctx: &'c ExtractContext<'a>, source: &'c str) -> Self {
        Self { ctx, source }
    }

    /// Walk block content: headings name the section of the tables after them.
    pub fn walk_blocks(&self, nodes: &[Node], section: &mut Option<String>, entry: &mut WordEntry) {
        for node in nodes {
            if node.heading_level().is_some() {
                let label = header_label(&self.ctx.clean([node]));
                *section = Some(label).filter(|label| !label.is_empty());
            } else if node.is_table() {
                self.walk_table(node, Vec::new(), section.clone(), entry);
            } else if node.is_link() {
                self.ctx.clean_into([node], &mut entry.categories);
            } else {
                self.walk_blocks(node.children(), section, entry);
            }
        }
    }

    pub fn walk_table(
        &self,
        table: &Node,
        base: Vec<String>,
        section: Option<String>,
        entry: &mut WordEntry,
    ) {
        let rows = table_rows(table);
        let width = rows
            .iter()
            .map(|row| row_cells(row).into_iter().map(colspan).sum::<usize>())
            .max()
            .unwrap_or(0);

        let mut context = HeaderContext::new(base, section);
        let mut layout = Layout::default();
        for row in rows {
            let cells = row_cells(row);
            if cells.is_empty() {
                continue;
            }
            let texts: Vec<String> = cells
                .iter()
                .map(|cell| self.ctx.clean_into(cell.children(), &mut entry.categories))
                .collect();

            let kind = row_kind(&cells, &texts, width);
            if kind == RowKind::Placeholder {
                debug!("placeholder row skipped");
                continue;
            }
            let spans: Vec<(usize, usize)> =
                cells.iter().map(|cell| (colspan(cell), rowspan(cell))).collect();
            let starts = layout.place_row(&spans);

            match kind {
                RowKind::Placeholder => {}
                RowKind::Section => {
                    if let Some(text) = texts.iter().find(|text| !text.is_empty()) {
                        context.set_section(header_label(text));
                    }
                }
                RowKind::ColumnHeaders => {
                    for (index, cell) in cells.iter().enumerate() {
                        if texts[index].is_empty() || !cell.is_header_cell() {
                            continue;
                        }
                        let label = header_label(&texts[index]);
                        let (col_span, row_span) = spans[index];
                        let span =
                            HeaderSpan::new(label.as_str(), starts[index], col_span, row_span);
                        match self.ctx.config().conjugation.column_role(&label) {
                            Some(role) => context.push_role(span, role),
                            None => context.push_column(span),
                        }
                    }
                }
                RowKind::Body => {
                    self.walk_body_row(&cells, &texts, &starts, &spans, &mut context, entry)
                }
            }
        }
    }

    fn walk_body_row(
        &self,
        cells: &[&Node],
        texts: &[String],
        starts: &[usize],
        spans: &[(usize, usize)],
        context: &mut HeaderContext,
        entry: &mut WordEntry,
    ) {
        context.begin_body_row();
        let mut forms = RowForms::new(self.ctx.uses_alt_script());

        for (index, cell) in cells.iter().enumerate() {
            let col = starts[index];
            if cell.is_header_cell() || (index == 0 && starts_with_bold(cell)) {
                if !texts[index].is_empty() {
                    let (col_span, row_span) = spans[index];
                    let label = header_label(&texts[index]);
                    context.push_row(HeaderSpan::new(label, col, col_span, row_span));
                }
                continue;
            }

            let nested = outermost_tables(cell);
            if !nested.is_empty() {
                let base = context.path(col);
                for table in nested {
                    self.walk_table(table, base.clone(), None, entry);
                }
                continue;
            }

            let read = CellRead::read(self.ctx, cell, context.role(col), &mut entry.categories);
            let make = |col: usize, form: String| self.word_form(context, col, form);
            forms.feed(&read, col, &mut entry.forms, &make);
        }
        forms.finish();
    }

    fn word_form(&self, context: &HeaderContext, col: usize, form: String) -> WordForm {
        let path = context.path(col);
        let labels = self.ctx.tags().classify(path.iter().map(String::as_str));
        WordForm {
            form,
            tags: labels.tags,
            raw_tags: labels.raw_tags,
            source: self.source.to_string(),
            ..Default::default()
        }
    }
}

pub fn row_kind(cells: &[&Node], texts: &[String], width: usize) -> RowKind {
    let filled: Vec<usize> = (0..cells.len()).filter(|index| !texts[*index].is_empty()).collect();
    if filled.is_empty() {
        return RowKind::Placeholder;
    }
    if !filled.iter().all(|index| cells[*index].is_header_cell()) {
        return RowKind::Body;
    }
    let spans_table = |index: usize| {
        let span = colspan(cells[index]);
        span >= width || (cells.len() == 1 && span > 1)
    };
    if filled.len() == 1 && spans_table(filled[0]) {
        RowKind::Section
    } else {
        RowKind::ColumnHeaders
    }
}

/// Rows of a table, looking through `<thead>`, `<tbody>` and `<tfoot>`.
fn table_rows(table: &Node) -> Vec<&Node> {
    let mut rows = Vec::new();
    for child in table.children() {
        if child.is_table_row() {
            rows.push(child);
        } else if child.is_html("thead") || child.is_html("tbody") || child.is_html("tfoot") {
            rows.extend(child.children().iter().filter(|row| row.is_table_row()));
        }
    }
    rows
}

fn row_cells(row: &Node) -> Vec<&Node> {
    row.children().iter().filter(|cell| cell.is_table_cell()).collect()
}

fn colspan(cell: &Node) -> usize {
    cell.as_element().map_or(1, |element| element.span_attr("colspan"))
}

fn rowspan(cell: &Node) -> usize {
    cell.as_element().map_or(1, |element| element.span_attr("rowspan"))
}

fn starts_with_bold(cell: &Node) -> bool {
    cell.children()
        .iter()
        .find(|child| !child.is_blank_text())
        .is_some_and(Node::is_bold)
}

/// Tables inside a node, not descending into the tables found.
fn outermost_tables(node: &Node) -> Vec<&Node> {
    let mut tables = Vec::new();
    for child in node.children() {
        if child.is_table() {
            tables.push(child);
        } else {
            tables.extend(outermost_tables(child));
        }
    }
    tables
}

/// Header text on a single line.
fn header_label(text: &str) -> String {
    text.lines().map(str::trim).collect::<Vec<_>>().join(" ")
}
