//! Table extraction settings

use dom::text::has_printable_token;
use std::fmt;
use std::sync::Arc;

/// Applied to every text fragment pulled out of a cell
pub type Normalizer = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// How [`crate::extract_table_with`] reads a `<table>`
#[derive(Clone)]
pub struct TableOptions {
    /// First leaf row holds the column labels
    pub has_header_row: bool,
    /// First leaf cell of each row holds the row label
    pub has_index_column: bool,
    /// Inserted before `_n` when renaming repeated labels
    pub postfix: String,
    pub normalizer: Normalizer,
    /// `Some` joins every qualifying text fragment of a cell with this
    /// delimiter; `None` keeps only the first fragment
    pub composite_delimiter: Option<String>,
    /// Decides whether a text fragment counts as cell content
    pub text_filter: fn(&str) -> bool,
}

impl TableOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header_row(mut self, has_header_row: bool) -> Self {
        self.has_header_row = has_header_row;
        self
    }

    pub fn index_column(mut self, has_index_column: bool) -> Self {
        self.has_index_column = has_index_column;
        self
    }

    pub fn postfix(mut self, postfix: impl Into<String>) -> Self {
        self.postfix = postfix.into();
        self
    }

    pub fn normalizer<F>(mut self, normalizer: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.normalizer = Arc::new(normalizer);
        self
    }

    /// Enable composite text mode
    pub fn composite(mut self, delimiter: impl Into<String>) -> Self {
        self.composite_delimiter = Some(delimiter.into());
        self
    }

    pub fn text_filter(mut self, filter: fn(&str) -> bool) -> Self {
        self.text_filter = filter;
        self
    }
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            has_header_row: true,
            has_index_column: true,
            postfix: String::new(),
            normalizer: Arc::new(dom::utils::identity),
            composite_delimiter: None,
            text_filter: has_printable_token,
        }
    }
}

impl fmt::Debug for TableOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableOptions")
            .field("has_header_row", &self.has_header_row)
            .field("has_index_column", &self.has_index_column)
            .field("postfix", &self.postfix)
            .field("composite_delimiter", &self.composite_delimiter)
            .finish_non_exhaustive()
    }
}
