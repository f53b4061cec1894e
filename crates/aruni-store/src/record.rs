//! Header-keyed view over a worksheet row

use std::collections::HashMap;
use std::sync::Arc;

/// One data row read from a collection, addressable by header name
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    headers: Arc<HashMap<String, usize>>,
    values: Vec<String>,
}

impl Record {
    /// Build records for every data row, sharing one header index
    pub fn from_rows(headers: &[String], rows: Vec<Vec<String>>) -> Vec<Record> {
        let index = header_index(headers);
        rows.into_iter()
            .map(|values| Record {
                headers: Arc::clone(&index),
                values,
            })
            .collect()
    }

    /// Build a record for a single row
    pub fn new(headers: &[String], values: Vec<String>) -> Record {
        Record {
            headers: header_index(headers),
            values,
        }
    }

    /// Value of a named field; short rows yield `None` for trailing columns
    pub fn get(&self, field: &str) -> Option<&str> {
        let &i = self.headers.get(field)?;
        self.values.get(i).map(String::as_str)
    }

    /// Value of a named field, or empty text when absent
    pub fn text(&self, field: &str) -> &str {
        self.get(field).unwrap_or("")
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }
}

fn header_index(headers: &[String]) -> Arc<HashMap<String, usize>> {
    let index = headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.trim().to_string(), i))
        .collect();
    Arc::new(index)
}
