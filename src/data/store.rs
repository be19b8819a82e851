use std::path::{Path, PathBuf};
use std::sync::Arc;

use once_cell::sync::OnceCell;

use super::error::LoadError;
use super::loader;
use super::model::Table;

// ---------------------------------------------------------------------------
// DatasetStore – load once, read many
// ---------------------------------------------------------------------------

/// Owns the survey table for the lifetime of the process (or until the user
/// opens another file, which creates a new store).
///
/// The first successful [`DatasetStore::load`] reads the file; every later
/// call hands out the same `Arc<Table>` without touching storage. A failed
/// load caches nothing, so no partial table is ever observable.
#[derive(Debug)]
pub struct DatasetStore {
    path: PathBuf,
    table: OnceCell<Arc<Table>>,
}

impl DatasetStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            table: OnceCell::new(),
        }
    }

    /// A store that is already populated, for tables built in memory.
    pub fn from_table(path: impl Into<PathBuf>, table: Table) -> Self {
        Self {
            path: path.into(),
            table: OnceCell::with_value(Arc::new(table)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_loaded(&self) -> bool {
        self.table.get().is_some()
    }

    /// Return the cached table, reading it from disk on first use.
    pub fn load(&self) -> Result<Arc<Table>, LoadError> {
        if let Some(table) = self.table.get() {
            log::trace!("dataset cache hit for {}", self.path.display());
            return Ok(Arc::clone(table));
        }
        let table = self
            .table
            .get_or_try_init(|| loader::load_file(&self.path).map(Arc::new))?;
        Ok(Arc::clone(table))
    }
}
