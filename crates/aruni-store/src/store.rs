//! Record store contract shared by every backend
//!
//! A store holds named collections (worksheets). Each collection is a grid of
//! text cells whose first row is the header. Rows and columns are addressed
//! 1-based, so the first data row is row 2.

use crate::record::Record;
use thiserror::Error;

/// Number of header rows at the top of every collection
pub const HEADER_ROWS: usize = 1;

/// Errors raised by a record store backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("collection '{0}' not found")]
    CollectionNotFound(String),

    #[error("collection '{0}' already exists")]
    CollectionExists(String),

    #[error("'{0}' is not a valid collection name")]
    InvalidName(String),

    #[error("row {row} is outside collection '{collection}'")]
    RowOutOfRange { collection: String, row: usize },

    #[error("column {column} is outside collection '{collection}'")]
    ColumnOutOfRange { collection: String, column: usize },

    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("collection data is malformed: {0}")]
    Json(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Tabular record store
///
/// No transactional semantics are assumed: every call is an independent round
/// trip and concurrent writers to the same row resolve as last-writer-wins.
pub trait RecordStore {
    /// Names of all collections
    fn collections(&self) -> StoreResult<Vec<String>>;

    /// Create an empty collection with a header row
    fn create_collection(&mut self, name: &str, headers: &[&str]) -> StoreResult<()>;

    /// Header row of a collection
    fn headers(&self, name: &str) -> StoreResult<Vec<String>>;

    /// All rows including the header
    fn all_values(&self, name: &str) -> StoreResult<Vec<Vec<String>>>;

    /// Overwrite one cell
    fn set_field(&mut self, name: &str, row: usize, column: usize, value: &str)
        -> StoreResult<()>;

    /// Append a row and return its 1-based position
    fn append(&mut self, name: &str, values: &[String]) -> StoreResult<usize>;

    fn has_collection(&self, name: &str) -> StoreResult<bool> {
        Ok(self.collections()?.iter().any(|c| c == name))
    }

    /// Data rows as header-keyed records, in store order
    fn get_records(&self, name: &str) -> StoreResult<Vec<Record>> {
        let mut rows = self.all_values(name)?;
        if rows.len() < HEADER_ROWS {
            return Ok(Vec::new());
        }
        let data = rows.split_off(HEADER_ROWS);
        let headers = rows.pop().unwrap_or_default();
        Ok(Record::from_rows(&headers, data))
    }

    /// Raw values of one row
    fn get_row(&self, name: &str, row: usize) -> StoreResult<Vec<String>> {
        let rows = self.all_values(name)?;
        row.checked_sub(1)
            .and_then(|i| rows.get(i))
            .cloned()
            .ok_or_else(|| StoreError::RowOutOfRange {
                collection: name.to_string(),
                row,
            })
    }

    /// Row count including the header
    fn row_count(&self, name: &str) -> StoreResult<usize> {
        Ok(self.all_values(name)?.len())
    }

    /// Overwrite several cells of one row
    ///
    /// Every position is checked before the first write so an invalid column
    /// never leaves the row partially updated.
    fn set_fields(
        &mut self,
        name: &str,
        row: usize,
        fields: &[(usize, String)],
    ) -> StoreResult<()> {
        let width = self.headers(name)?.len();
        check_position(name, row, self.row_count(name)?)?;
        for &(column, _) in fields {
            check_column(name, column, width)?;
        }
        for (column, value) in fields {
            self.set_field(name, row, *column, value)?;
        }
        Ok(())
    }

    /// Append several rows
    fn append_many(&mut self, name: &str, rows: &[Vec<String>]) -> StoreResult<()> {
        for row in rows {
            self.append(name, row)?;
        }
        Ok(())
    }
}

/// Ensure `row` addresses an existing data row (never the header)
pub fn check_position(name: &str, row: usize, row_count: usize) -> StoreResult<()> {
    if row <= HEADER_ROWS || row > row_count {
        return Err(StoreError::RowOutOfRange {
            collection: name.to_string(),
            row,
        });
    }
    Ok(())
}

/// Ensure `column` is within the header width
pub fn check_column(name: &str, column: usize, width: usize) -> StoreResult<()> {
    if column == 0 || column > width {
        return Err(StoreError::ColumnOutOfRange {
            collection: name.to_string(),
            column,
        });
    }
    Ok(())
}

/// Write a cell into a row, padding short rows with empty cells
pub(crate) fn put_cell(row: &mut Vec<String>, column: usize, value: &str) {
    if row.len() < column {
        row.resize(column, String::new());
    }
    row[column - 1] = value.to_string();
}
