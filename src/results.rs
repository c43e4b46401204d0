use std::collections::HashMap;
use std::sync::Arc;

use crate::types::RowValues;

/// A single row materialized from a query result.
///
/// Values are stored positionally in column declaration order; the column-name
/// list is shared across all rows of a result set. Name-based lookup resolves
/// duplicate column names to the **first** column carrying that name; later
/// duplicates stay reachable through [`ResultRow::get_by_index`] together with
/// the column-name list, so no value is silently lost.
#[derive(Debug, Clone)]
pub struct ResultRow {
    /// The column names for this row (shared across all rows in a result set)
    pub column_names: Arc<Vec<String>>,
    /// The values for this row, in column declaration order
    pub values: Vec<RowValues>,
    // Name -> index cache shared across the result set; first occurrence wins.
    column_index_cache: Arc<HashMap<String, usize>>,
}

impl ResultRow {
    /// Create a standalone row, building its own name lookup cache.
    #[must_use]
    pub fn new(column_names: Arc<Vec<String>>, values: Vec<RowValues>) -> Self {
        let cache = Arc::new(build_column_index(&column_names));
        Self {
            column_names,
            values,
            column_index_cache: cache,
        }
    }

    pub(crate) fn with_cache(
        column_names: Arc<Vec<String>>,
        values: Vec<RowValues>,
        cache: Arc<HashMap<String, usize>>,
    ) -> Self {
        Self {
            column_names,
            values,
            column_index_cache: cache,
        }
    }

    /// Index of the first column with this name, or None if absent.
    #[must_use]
    pub fn get_column_index(&self, column_name: &str) -> Option<usize> {
        if let Some(&idx) = self.column_index_cache.get(column_name) {
            return Some(idx);
        }
        self.column_names.iter().position(|col| col == column_name)
    }

    /// Get a value by column name (first occurrence on duplicates).
    #[must_use]
    pub fn get(&self, column_name: &str) -> Option<&RowValues> {
        self.get_column_index(column_name)
            .and_then(|idx| self.values.get(idx))
    }

    /// Get a value by column index.
    #[must_use]
    pub fn get_by_index(&self, index: usize) -> Option<&RowValues> {
        self.values.get(index)
    }
}

// First occurrence wins so name lookup and positional order agree.
fn build_column_index(column_names: &[String]) -> HashMap<String, usize> {
    let mut cache = HashMap::with_capacity(column_names.len());
    for (i, name) in column_names.iter().enumerate() {
        cache.entry(name.clone()).or_insert(i);
    }
    cache
}

/// An ordered result set from a query.
///
/// Rows appear in server fetch order. The column-name list is exposed
/// separately from the rows so callers can reconstruct field order even when
/// a projection contains duplicate column names.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    /// The rows returned by the query
    pub results: Vec<ResultRow>,
    /// Rows affected (DML) or materialized (SELECT)
    pub rows_affected: usize,
    column_names: Option<Arc<Vec<String>>>,
    column_index_cache: Option<Arc<HashMap<String, usize>>>,
}

impl ResultSet {
    /// Create a new result set with a known row capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> ResultSet {
        ResultSet {
            results: Vec::with_capacity(capacity),
            rows_affected: 0,
            column_names: None,
            column_index_cache: None,
        }
    }

    /// Set the column names shared by all rows of this result set.
    pub fn set_column_names(&mut self, column_names: Arc<Vec<String>>) {
        self.column_index_cache = Some(Arc::new(build_column_index(&column_names)));
        self.column_names = Some(column_names);
    }

    /// Column names in declaration order, if known.
    #[must_use]
    pub fn column_names(&self) -> Option<&Arc<Vec<String>>> {
        self.column_names.as_ref()
    }

    /// Append a row given its values in column declaration order.
    ///
    /// Has no effect until column names have been set; the materializer always
    /// registers metadata before fetching.
    pub fn add_row_values(&mut self, row_values: Vec<RowValues>) {
        if let (Some(column_names), Some(cache)) = (&self.column_names, &self.column_index_cache) {
            self.results.push(ResultRow::with_cache(
                column_names.clone(),
                row_values,
                cache.clone(),
            ));
            self.rows_affected += 1;
        }
    }

    /// Append a pre-built row, adopting its column names if none are set yet.
    pub fn add_row(&mut self, row: ResultRow) {
        if self.column_names.is_none() {
            self.column_names = Some(row.column_names.clone());
            self.column_index_cache = Some(row.column_index_cache.clone());
        }
        self.results.push(row);
        self.rows_affected += 1;
    }
}
