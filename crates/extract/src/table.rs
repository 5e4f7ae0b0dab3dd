//! `<table>` extraction
//!
//! Turns a table subtree into a rectangular grid of strings with a header
//! row and an index column, both addressable by position or by label.
//!
//! ## Layout
//!
//! ```text
//!              headers[0]  headers[1]  headers[2]
//!   index[0]   (corner)    "A"         "B"
//!   index[1]   "r1"        data[0][0]  data[0][1]
//!   index[2]   "r2"        data[1][0]  data[1][1]
//! ```
//!
//! Positions passed to the accessors are over the full grid, corner
//! included: row 0 is the header row and column 0 is the index column.
//!
//! Only leaf `tr`/`td`/`th` elements are read, so tables nested inside a
//! cell don't leak their rows into the outer table. `rowspan`/`colspan`
//! are ignored.

use crate::error::{ExtractError, Result};
use crate::options::TableOptions;
use crate::unique::{make_unique, occurrence_label};
use dom::text::{all_text_descendants, first_text_descendant_matching, join, texts};
use dom::utils::eq_fold;
use dom::{by_tag, DomArena, NodeId};
use serde::Serialize;

/// Label placed in the corner when the header row or index column is synthesized
pub const CORNER_LABEL: &str = "Index\\Header";

/// Text content of a table, addressable by position or label
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HtmlTable {
    headers: Vec<String>,
    index: Vec<String>,
    data: Vec<Vec<String>>,
    postfix: String,
}

/// Extract `table` with identity normalization, first text fragment per cell
pub fn extract_table(
    arena: &DomArena,
    table: NodeId,
    has_header_row: bool,
    has_index_column: bool,
    postfix: &str,
) -> Result<HtmlTable> {
    let options = TableOptions::new()
        .header_row(has_header_row)
        .index_column(has_index_column)
        .postfix(postfix);
    extract_table_with(arena, table, &options)
}

/// Extract `table` into an [`HtmlTable`].
///
/// Fails with [`ExtractError::InvalidNode`] unless `table` is a `<table>`
/// element in `arena`. A table without any rows yields an empty result.
pub fn extract_table_with(
    arena: &DomArena,
    table: NodeId,
    options: &TableOptions,
) -> Result<HtmlTable> {
    let node = arena
        .get(table)
        .map_err(|_| ExtractError::InvalidNode(format!("node {table} is not in the tree")))?;
    if !node.is_element_named("table") {
        return Err(ExtractError::InvalidNode(format!(
            "expected <table>, got {} '{}'",
            node.node_type.as_str(),
            node.node_name
        )));
    }

    let rows = leaf_rows(arena, table);
    if rows.is_empty() {
        tracing::debug!("Table {} has no rows", table);
        return Ok(HtmlTable {
            postfix: options.postfix.clone(),
            ..HtmlTable::default()
        });
    }

    let grid: Vec<Vec<NodeId>> = rows.iter().map(|&row| leaf_cells(arena, row)).collect();
    let max_rows = grid.len();
    let max_columns = grid.iter().map(Vec::len).max().unwrap_or(0);

    // Offsets into the raw grid
    let has_header = usize::from(options.has_header_row);
    let has_index = usize::from(options.has_index_column);

    let reader = CellReader { arena, options };

    // Always keep the corner slot, even for rows without any cells
    let mut headers = vec![String::new(); (max_columns + 1 - has_index).max(1)];
    if options.has_header_row {
        if !options.has_index_column {
            headers[0] = CORNER_LABEL.to_string();
        }
        for (j, &cell) in grid[0].iter().enumerate() {
            headers[j + 1 - has_index] = reader.read(cell)?;
        }
    } else {
        synthesize_labels(&mut headers);
    }

    let mut index = vec![String::new(); max_rows + 1 - has_header];
    if options.has_index_column {
        if !options.has_header_row {
            index[0] = CORNER_LABEL.to_string();
        }
        for (i, row) in grid.iter().enumerate() {
            if let Some(&cell) = row.first() {
                index[i + 1 - has_header] = reader.read(cell)?;
            }
        }
    } else {
        synthesize_labels(&mut index);
    }

    let headers = make_unique(headers, &options.postfix);
    let index = make_unique(index, &options.postfix);

    let width = headers.len() - 1;
    let data = grid[has_header..]
        .iter()
        .map(|raw| -> Result<Vec<String>> {
            let mut row = vec![String::new(); width];
            // Ragged rows leave the missing slots empty
            for (slot, &cell) in row.iter_mut().zip(raw.iter().skip(has_index)) {
                *slot = reader.read(cell)?;
            }
            Ok(row)
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(
        "Extracted table {}: {} rows x {} columns",
        table,
        data.len(),
        width
    );

    Ok(HtmlTable {
        headers,
        index,
        data,
        postfix: options.postfix.clone(),
    })
}

/// `tr` elements with no `tr` anywhere beneath them
fn leaf_rows(arena: &DomArena, table: NodeId) -> Vec<NodeId> {
    arena.all_matches(table, |node| {
        node.is_element_named("tr")
            && arena
                .first_match_excluding_start(node.node_id, by_tag("tr"))
                .is_none()
    })
}

/// `td`/`th` elements under `row` with no same-tag element beneath them
fn leaf_cells(arena: &DomArena, row: NodeId) -> Vec<NodeId> {
    arena.all_matches(row, |node| match node.tag_name() {
        Some(tag @ ("td" | "th")) => arena
            .first_match_excluding_start(node.node_id, by_tag(tag))
            .is_none(),
        _ => false,
    })
}

/// Corner label followed by 1, 2, 3, ...
fn synthesize_labels(labels: &mut [String]) {
    for (i, label) in labels.iter_mut().enumerate() {
        *label = if i == 0 {
            CORNER_LABEL.to_string()
        } else {
            i.to_string()
        };
    }
}

struct CellReader<'a> {
    arena: &'a DomArena,
    options: &'a TableOptions,
}

impl CellReader<'_> {
    /// Content of one cell; empty when no fragment passes the text filter
    fn read(&self, cell: NodeId) -> Result<String> {
        let filter: &dyn Fn(&str) -> bool = &self.options.text_filter;
        let normalizer = self.options.normalizer.as_ref();

        match &self.options.composite_delimiter {
            Some(delimiter) => {
                let ids = all_text_descendants(self.arena, cell, Some(filter));
                if ids.is_empty() {
                    return Ok(String::new());
                }
                Ok(join(&texts(self.arena, &ids), delimiter, normalizer)?)
            }
            None => Ok(first_text_descendant_matching(self.arena, cell, filter)
                .and_then(|id| self.arena.get(id).ok())
                .map(|node| normalizer(&node.node_value))
                .unwrap_or_default()),
        }
    }
}

fn position_of(labels: &[String], key: &str) -> Option<usize> {
    labels.iter().position(|label| eq_fold(label, key))
}

impl HtmlTable {
    /// Column labels; slot 0 is the corner
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Row labels; slot 0 is the corner
    pub fn index(&self) -> &[String] {
        &self.index
    }

    /// Cell contents without header row and index column
    pub fn data(&self) -> &[Vec<String>] {
        &self.data
    }

    pub fn postfix(&self) -> &str {
        &self.postfix
    }

    /// Number of data rows
    pub fn row_count(&self) -> usize {
        self.data.len()
    }

    /// Number of data columns
    pub fn column_count(&self) -> usize {
        self.headers.len().saturating_sub(1)
    }

    /// True when the source table had no rows at all
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    fn row_ref(&self, i: usize) -> (&[String], &str) {
        if i == 0 {
            (&self.headers, &self.index[0])
        } else {
            (&self.data[i - 1], &self.index[i])
        }
    }

    /// Row `i` and its index label.
    ///
    /// Row 0 is the header row (corner included); row `i > 0` holds data
    /// only, without its index label.
    ///
    /// # Panics
    ///
    /// Panics if `i` is outside the table.
    pub fn row_at(&self, i: usize) -> (Vec<String>, String) {
        assert!(
            i < self.index.len(),
            "row {i} out of bounds for table with {} rows",
            self.index.len()
        );
        let (row, key) = self.row_ref(i);
        (row.to_vec(), key.to_string())
    }

    /// Column `j` and its header label.
    ///
    /// Column 0 is the whole index (corner included); column `j > 0` holds
    /// data only, without its header label.
    ///
    /// # Panics
    ///
    /// Panics if `j` is outside the table.
    pub fn column_at(&self, j: usize) -> (Vec<String>, String) {
        assert!(
            j < self.headers.len(),
            "column {j} out of bounds for table with {} columns",
            self.headers.len()
        );
        if j == 0 {
            return (self.index.clone(), self.headers[0].clone());
        }
        let column = (1..self.index.len())
            .map(|i| self.row_ref(i).0[j - 1].clone())
            .collect();
        (column, self.headers[j].clone())
    }

    /// First row whose index label matches `key` (ignoring case), with its position
    pub fn row_by_key(&self, key: &str) -> Option<(Vec<String>, usize)> {
        let i = position_of(&self.index, key)?;
        Some((self.row_ref(i).0.to_vec(), i))
    }

    /// Like [`row_by_key`](Self::row_by_key) for the `occurrence`-th repeat of `key`.
    /// Occurrence 0 is the first.
    pub fn row_by_key_occurrence(
        &self,
        key: &str,
        occurrence: usize,
    ) -> Option<(Vec<String>, usize)> {
        if occurrence == 0 {
            return self.row_by_key(key);
        }
        self.row_by_key(&occurrence_label(key, &self.postfix, occurrence))
    }

    /// First column whose header matches `key` (ignoring case), with its position
    pub fn column_by_key(&self, key: &str) -> Option<(Vec<String>, usize)> {
        let j = position_of(&self.headers, key)?;
        Some((self.column_at(j).0, j))
    }

    pub fn column_by_key_occurrence(
        &self,
        key: &str,
        occurrence: usize,
    ) -> Option<(Vec<String>, usize)> {
        if occurrence == 0 {
            return self.column_by_key(key);
        }
        self.column_by_key(&occurrence_label(key, &self.postfix, occurrence))
    }

    /// Cell at row `i`, column `j` of the full grid
    ///
    /// # Panics
    ///
    /// Panics if either position is outside the table.
    pub fn element_at(&self, i: usize, j: usize) -> String {
        assert!(
            i < self.index.len() && j < self.headers.len(),
            "cell ({i}, {j}) out of bounds for {}x{} table",
            self.index.len(),
            self.headers.len()
        );
        match (i, j) {
            (_, 0) => self.index[i].clone(),
            (0, _) => self.headers[j].clone(),
            _ => self.data[i - 1][j - 1].clone(),
        }
    }

    /// Cell under row label `row_key` and column label `column_key`, with its position
    pub fn element_by_keys(
        &self,
        row_key: &str,
        column_key: &str,
    ) -> Option<(String, usize, usize)> {
        let i = position_of(&self.index, row_key)?;
        let j = position_of(&self.headers, column_key)?;
        Some((self.element_at(i, j), i, j))
    }

    pub fn element_by_keys_occurrence(
        &self,
        row_key: &str,
        column_key: &str,
        row_occurrence: usize,
        column_occurrence: usize,
    ) -> Option<(String, usize, usize)> {
        let row_key = match row_occurrence {
            0 => row_key.to_string(),
            n => occurrence_label(row_key, &self.postfix, n),
        };
        let column_key = match column_occurrence {
            0 => column_key.to_string(),
            n => occurrence_label(column_key, &self.postfix, n),
        };
        self.element_by_keys(&row_key, &column_key)
    }
}
