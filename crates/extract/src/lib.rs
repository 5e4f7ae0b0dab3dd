//! Structured data extraction from DOM trees
//!
//! Reads `<table>` subtrees into [`HtmlTable`]s with header/index labels and
//! `<select>` subtrees into [`SelectResult`]s. Both work on a [`dom::DomArena`]
//! produced by an external parser.
//!
//! ```text
//! DomArena + NodeId → leaf rows/cells (dom::query) → text (dom::text)
//!                   → make_unique → HtmlTable
//! ```

pub mod error;
pub mod options;
pub mod rows;
pub mod select;
pub mod table;
pub mod unique;

pub use error::{ExtractError, Result};
pub use options::{Normalizer, TableOptions};
pub use rows::row_cells_where;
pub use select::{extract_select, SelectResult};
pub use table::{extract_table, extract_table_with, HtmlTable, CORNER_LABEL};
pub use unique::make_unique;
