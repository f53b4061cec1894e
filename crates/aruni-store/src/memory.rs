//! In-process record store

use crate::store::{check_column, check_position, put_cell, RecordStore, StoreError, StoreResult};
use std::collections::BTreeMap;

/// Record store held entirely in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    sheets: BTreeMap<String, Vec<Vec<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn sheet(&self, name: &str) -> StoreResult<&Vec<Vec<String>>> {
        self.sheets
            .get(name)
            .ok_or_else(|| StoreError::CollectionNotFound(name.to_string()))
    }

    fn sheet_mut(&mut self, name: &str) -> StoreResult<&mut Vec<Vec<String>>> {
        self.sheets
            .get_mut(name)
            .ok_or_else(|| StoreError::CollectionNotFound(name.to_string()))
    }
}

impl RecordStore for MemoryStore {
    fn collections(&self) -> StoreResult<Vec<String>> {
        Ok(self.sheets.keys().cloned().collect())
    }

    fn create_collection(&mut self, name: &str, headers: &[&str]) -> StoreResult<()> {
        if self.sheets.contains_key(name) {
            return Err(StoreError::CollectionExists(name.to_string()));
        }
        let header = headers.iter().map(|h| h.to_string()).collect();
        self.sheets.insert(name.to_string(), vec![header]);
        Ok(())
    }

    fn headers(&self, name: &str) -> StoreResult<Vec<String>> {
        Ok(self.sheet(name)?.first().cloned().unwrap_or_default())
    }

    fn all_values(&self, name: &str) -> StoreResult<Vec<Vec<String>>> {
        self.sheet(name).cloned()
    }

    fn set_field(
        &mut self,
        name: &str,
        row: usize,
        column: usize,
        value: &str,
    ) -> StoreResult<()> {
        let rows = self.sheet_mut(name)?;
        let width = rows.first().map(Vec::len).unwrap_or(0);
        check_position(name, row, rows.len())?;
        check_column(name, column, width)?;
        put_cell(&mut rows[row - 1], column, value);
        Ok(())
    }

    fn append(&mut self, name: &str, values: &[String]) -> StoreResult<usize> {
        let rows = self.sheet_mut(name)?;
        rows.push(values.to_vec());
        Ok(rows.len())
    }
}
