//! Directory-backed workbook: one JSON grid file per collection

use crate::io::{read_json, write_json};
use crate::store::{check_column, check_position, put_cell, RecordStore, StoreError, StoreResult};
use std::path::{Path, PathBuf};
use tracing::debug;

const EXTENSION: &str = "json";

/// A shared workbook stored as `<root>/<collection>.json`
///
/// Every call reads the file again; nothing is cached between calls. Writes
/// replace the whole file atomically, so a reader never sees a torn grid, but
/// two processes updating the same workbook still race with last-writer-wins.
#[derive(Debug, Clone)]
pub struct Workbook {
    root: PathBuf,
}

impl Workbook {
    /// Open the workbook for `store_id` under `stores_dir`
    pub fn open(stores_dir: &Path, store_id: &str) -> StoreResult<Self> {
        if !is_valid_name(store_id) {
            return Err(StoreError::InvalidName(store_id.to_string()));
        }
        Ok(Self {
            root: stores_dir.join(store_id),
        })
    }

    /// Open a workbook rooted directly at `root`
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn sheet_path(&self, name: &str) -> StoreResult<PathBuf> {
        if !is_valid_name(name) {
            return Err(StoreError::InvalidName(name.to_string()));
        }
        Ok(self.root.join(format!("{name}.{EXTENSION}")))
    }

    fn load(&self, name: &str) -> StoreResult<(PathBuf, Vec<Vec<String>>)> {
        let path = self.sheet_path(name)?;
        debug!(collection = name, path = %path.display(), "reading collection");
        match read_json::<Vec<Vec<String>>>(&path)? {
            Some(rows) => Ok((path, rows)),
            None => Err(StoreError::CollectionNotFound(name.to_string())),
        }
    }

    fn save(&self, path: &Path, rows: &[Vec<String>]) -> StoreResult<()> {
        write_json(path, &rows)?;
        Ok(())
    }
}

impl RecordStore for Workbook {
    fn collections(&self) -> StoreResult<Vec<String>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn create_collection(&mut self, name: &str, headers: &[&str]) -> StoreResult<()> {
        let path = self.sheet_path(name)?;
        if path.exists() {
            return Err(StoreError::CollectionExists(name.to_string()));
        }
        let header: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
        self.save(&path, &[header])
    }

    fn headers(&self, name: &str) -> StoreResult<Vec<String>> {
        let (_, rows) = self.load(name)?;
        Ok(rows.into_iter().next().unwrap_or_default())
    }

    fn all_values(&self, name: &str) -> StoreResult<Vec<Vec<String>>> {
        Ok(self.load(name)?.1)
    }

    fn set_field(
        &mut self,
        name: &str,
        row: usize,
        column: usize,
        value: &str,
    ) -> StoreResult<()> {
        self.set_fields(name, row, &[(column, value.to_string())])
    }

    /// All cells land in a single file replace
    fn set_fields(
        &mut self,
        name: &str,
        row: usize,
        fields: &[(usize, String)],
    ) -> StoreResult<()> {
        let (path, mut rows) = self.load(name)?;
        let width = rows.first().map(Vec::len).unwrap_or(0);
        check_position(name, row, rows.len())?;
        for &(column, _) in fields {
            check_column(name, column, width)?;
        }

        let target = &mut rows[row - 1];
        for (column, value) in fields {
            put_cell(target, *column, value);
        }
        self.save(&path, &rows)
    }

    fn append(&mut self, name: &str, values: &[String]) -> StoreResult<usize> {
        let (path, mut rows) = self.load(name)?;
        rows.push(values.to_vec());
        self.save(&path, &rows)?;
        Ok(rows.len())
    }

    fn append_many(&mut self, name: &str, new_rows: &[Vec<String>]) -> StoreResult<()> {
        let (path, mut rows) = self.load(name)?;
        rows.extend(new_rows.iter().cloned());
        self.save(&path, &rows)
    }
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && !name.contains(['/', '\\'])
        && name.chars().all(|c| !c.is_control())
}
