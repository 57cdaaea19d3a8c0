//! Storage layer for the expense tracker
//!
//! Owns the canonical collection for a session and reads/writes it as CSV.
//! The record store never persists on its own; the session decides when to
//! write the collection back.

pub mod csv_io;
pub mod file_io;
pub mod source;

pub use csv_io::{read_expenses, write_expenses};
pub use file_io::{load_file, save_atomic};
pub use source::ExpenseSource;

use tracing::{debug, info};

use crate::error::ExpenseResult;
use crate::models::{ExpenseCollection, ExpenseRecord};

/// Load a collection from a source
pub fn load(source: &ExpenseSource) -> ExpenseResult<ExpenseCollection> {
    let collection = source.read()?;
    info!(source = %source, rows = collection.len(), "loaded expense source");
    Ok(collection)
}

/// Owner of the unfiltered collection for one session
#[derive(Debug, Default)]
pub struct RecordStore {
    collection: ExpenseCollection,
    source: Option<ExpenseSource>,
}

impl RecordStore {
    /// A store with no records and no source
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a store by loading a source
    pub fn open(source: ExpenseSource) -> ExpenseResult<Self> {
        let collection = load(&source)?;
        Ok(Self {
            collection,
            source: Some(source),
        })
    }

    /// Wrap an existing collection
    pub fn with_collection(collection: ExpenseCollection) -> Self {
        Self {
            collection,
            source: None,
        }
    }

    pub fn collection(&self) -> &ExpenseCollection {
        &self.collection
    }

    /// The source the current collection was loaded from, if any
    pub fn source(&self) -> Option<&ExpenseSource> {
        self.source.as_ref()
    }

    pub fn len(&self) -> usize {
        self.collection.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collection.is_empty()
    }

    /// Validate and append a record; the store is unchanged on failure
    pub fn append(&mut self, record: ExpenseRecord) -> ExpenseResult<&ExpenseRecord> {
        self.collection.append(record)?;
        debug!(rows = self.collection.len(), "appended expense");
        let last = self.collection.len() - 1;
        Ok(&self.collection.records()[last])
    }

    /// Remove the record at `index` (0-based)
    pub fn remove(&mut self, index: usize) -> ExpenseResult<ExpenseRecord> {
        let removed = self.collection.remove(index)?;
        debug!(index, rows = self.collection.len(), "removed expense");
        Ok(removed)
    }

    /// Discard the current collection and load a new source.
    ///
    /// All-or-nothing: if the new source cannot be loaded the current
    /// collection and source are kept.
    pub fn replace(&mut self, source: ExpenseSource) -> ExpenseResult<&ExpenseCollection> {
        let collection = load(&source)?;
        self.collection = collection;
        self.source = Some(source);
        Ok(&self.collection)
    }

    pub fn into_collection(self) -> ExpenseCollection {
        self.collection
    }
}
