//! Record store boundary: tabular collections addressed by row position

mod io;
mod memory;
mod paths;
mod record;
mod store;
mod workbook;

pub use io::{atomic_write, read_json, write_json};
pub use memory::MemoryStore;
pub use paths::{Paths, HOME_ENV};
pub use record::Record;
pub use store::{check_column, check_position, RecordStore, StoreError, StoreResult, HEADER_ROWS};
pub use workbook::Workbook;
