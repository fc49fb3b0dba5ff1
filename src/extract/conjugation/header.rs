//! Header context and grid layout
//!
//!     A data cell's labels come from the headers in scope when it is reached. Scope is
//!     spatial, not temporal: a column header covers the columns it spans, a row header covers
//!     the cells to its right for as many rows as it spans. The context is an explicit stack
//!     of [HeaderSpan]s:
//!
//!         base     labels inherited from an enclosing table cell
//!         section  the current full-width header (or the heading above the table)
//!         columns  the current block of column headers, stacked top to bottom
//!         rows     row headers still spanning the current row
//!
//!     A header row arriving after body rows starts a new column block. Row spans count down
//!     once per row and leave the stack at zero.

use super::super::config::ColumnRole;

/// One header label placed on the column grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderSpan {
    pub label: String,
    pub col_start: usize,
    pub col_span: usize,
    /// Rows still covered, the current one included
    pub rows_left: usize,
}

impl HeaderSpan {
    pub fn new(
        label: impl Into<String>,
        col_start: usize,
        col_span: usize,
        rows_left: usize,
    ) -> Self {
        Self {
            label: label.into(),
            col_start,
            col_span,
            rows_left,
        }
    }

    pub fn covers(&self, col: usize) -> bool {
        self.col_start <= col && col < self.col_start + self.col_span
    }

    fn overlaps(&self, other: &HeaderSpan) -> bool {
        self.col_start < other.col_start + other.col_span
            && other.col_start < self.col_start + self.col_span
    }
}

#[derive(Debug, Clone, Default)]
pub struct HeaderContext {
    base: Vec<String>,
    section: Option<String>,
    columns: Vec<HeaderSpan>,
    roles: Vec<(HeaderSpan, ColumnRole)>,
    rows: Vec<HeaderSpan>,
    columns_closed: bool,
}

impl HeaderContext {
    pub fn new(base: Vec<String>, section: Option<String>) -> Self {
        Self {
            base,
            section,
            ..Default::default()
        }
    }

    /// A full-width header: new section, no column or row headers.
    pub fn set_section(&mut self, label: String) {
        self.section = Some(label);
        self.columns.clear();
        self.roles.clear();
        self.rows.clear();
        self.columns_closed = false;
    }

    pub fn push_column(&mut self, span: HeaderSpan) {
        self.open_column_block();
        self.columns.push(span);
    }

    /// A column header that names a field of the form instead of a label.
    pub fn push_role(&mut self, span: HeaderSpan, role: ColumnRole) {
        self.open_column_block();
        self.roles.push((span, role));
    }

    fn open_column_block(&mut self) {
        if self.columns_closed {
            self.columns.clear();
            self.roles.clear();
            self.columns_closed = false;
        }
    }

    /// Start a body row: row spans count down and the column block is closed.
    pub fn begin_body_row(&mut self) {
        self.columns_closed = true;
        for span in &mut self.rows {
            span.rows_left = span.rows_left.saturating_sub(1);
        }
        self.rows.retain(|span| span.rows_left > 0);
    }

    /// Row header for this row and the next `rows_left - 1`; replaces headers in the same columns.
    pub fn push_row(&mut self, span: HeaderSpan) {
        self.rows.retain(|existing| !existing.overlaps(&span));
        self.rows.push(span);
    }

    pub fn role(&self, col: usize) -> Option<ColumnRole> {
        self.roles
            .iter()
            .rev()
            .find(|(span, _)| span.covers(col))
            .map(|(_, role)| *role)
    }

    /// Labels in scope for a cell starting at `col`.
    pub fn path(&self, col: usize) -> Vec<String> {
        let mut path = self.base.clone();
        path.extend(self.section.iter().cloned());

        let mut rows: Vec<&HeaderSpan> =
            self.rows.iter().filter(|span| span.col_start < col).collect();
        rows.sort_by_key(|span| span.col_start);
        path.extend(rows.into_iter().map(|span| span.label.clone()));

        path.extend(
            self.columns
                .iter()
                .filter(|span| span.covers(col))
                .map(|span| span.label.clone()),
        );
        path
    }
}

/// Assigns grid columns to the cells of successive rows, honouring rowspans from rows above.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    /// Per column: further rows still occupied by a cell from above
    carry: Vec<usize>,
}

impl Layout {
    /// Starting column of each `(colspan, rowspan)` cell of one row.
    pub fn place_row(&mut self, spans: &[(usize, usize)]) -> Vec<usize> {
        let occupied = std::mem::take(&mut self.carry);
        let mut next: Vec<usize> = occupied.iter().map(|rows| rows.saturating_sub(1)).collect();

        let mut starts = Vec::with_capacity(spans.len());
        let mut col = 0;
        for &(col_span, row_span) in spans {
            while occupied.get(col).is_some_and(|rows| *rows > 0) {
                col += 1;
            }
            starts.push(col);
            if row_span > 1 {
                if next.len() < col + col_span {
                    next.resize(col + col_span, 0);
                }
                for slot in &mut next[col..col + col_span] {
                    *slot = (*slot).max(row_span - 1);
                }
            }
            col += col_span;
        }

        self.carry = next;
        starts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rowspans_push_later_cells_right() {
        let mut layout = Layout::default();
        assert_eq!(layout.place_row(&[(2, 4), (1, 2), (1, 1), (1, 1)]), vec![0, 2, 3, 4]);
        assert_eq!(layout.place_row(&[(1, 1), (1, 1)]), vec![3, 4]);
        assert_eq!(layout.place_row(&[(1, 2), (1, 1)]), vec![2, 3]);
        assert_eq!(layout.place_row(&[(1, 1)]), vec![3]);
        assert_eq!(layout.place_row(&[(1, 1)]), vec![0]);
    }

    #[test]
    fn test_path_orders_base_section_rows_columns() {
        let mut context = HeaderContext::new(vec!["Indicatif".to_string()], None);
        context.set_section("Présent".to_string());
        context.push_column(HeaderSpan::new("Forme affirmative", 2, 1, 1));
        context.begin_body_row();
        context.push_row(HeaderSpan::new("poli", 1, 1, 1));
        context.push_row(HeaderSpan::new("Présent / Futur", 0, 1, 2));
        assert_eq!(
            context.path(2),
            vec!["Indicatif", "Présent", "Présent / Futur", "poli", "Forme affirmative"]
        );

        context.begin_body_row();
        assert_eq!(
            context.path(2),
            vec!["Indicatif", "Présent", "Présent / Futur", "Forme affirmative"]
        );
    }

    #[test]
    fn test_header_row_after_body_starts_new_block() {
        let mut context = HeaderContext::default();
        context.push_column(HeaderSpan::new("Présent", 0, 3, 1));
        context.push_column(HeaderSpan::new("Forme affirmative", 0, 1, 1));
        assert_eq!(context.path(0), vec!["Présent", "Forme affirmative"]);

        context.begin_body_row();
        context.push_column(HeaderSpan::new("Subjonctif", 0, 3, 1));
        assert_eq!(context.path(0), vec!["Subjonctif"]);
    }

    #[test]
    fn test_section_clears_headers() {
        let mut context = HeaderContext::new(Vec::new(), Some("Flexions".to_string()));
        context.push_column(HeaderSpan::new("Présent", 0, 2, 1));
        context.push_role(HeaderSpan::new("Kanji", 2, 1, 1), ColumnRole::Form);
        context.set_section("Formes de base".to_string());
        assert_eq!(context.path(0), vec!["Formes de base"]);
        assert_eq!(context.role(2), None);
    }
}
