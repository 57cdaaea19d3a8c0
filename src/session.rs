//! Session context
//!
//! Owns everything one run of the application works with: the record store,
//! the settings, and where edits are written back. Edits go through the
//! session so that the data file and the audit log stay in step with the
//! in-memory collection.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::{ExpensePaths, Settings, Theme};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{ExpenseCollection, ExpenseRecord, FilterSpec};
use crate::reports::Dashboard;
use crate::storage::{load, save_atomic, ExpenseSource, RecordStore};

/// Explicit application state for one run
#[derive(Debug)]
pub struct Session {
    paths: ExpensePaths,
    settings: Settings,
    store: RecordStore,
    audit: AuditLogger,
    /// File edits are written to; `None` while working on an upload
    data_file: Option<PathBuf>,
    /// Set when the data file exists but could not be loaded
    load_error: Option<String>,
}

impl Session {
    /// Load the configured data file, or start empty when it does not exist
    pub fn open(paths: ExpensePaths, settings: Settings) -> ExpenseResult<Self> {
        Self::open_with_data_file(paths, settings, None)
    }

    /// Like [`Session::open`], reading `data_file` instead of the configured
    /// file for this session only; the settings are left untouched.
    ///
    /// A data file that exists but cannot be loaded does not fail the
    /// session: it starts empty and the failure is kept, so that
    /// [`Session::import_file`] or [`Session::use_file`] can replace the
    /// data. Until then, edits and [`Session::require_data`] report it.
    pub fn open_with_data_file(
        paths: ExpensePaths,
        settings: Settings,
        data_file: Option<PathBuf>,
    ) -> ExpenseResult<Self> {
        let data_file = data_file.unwrap_or_else(|| settings.data_file(&paths));
        let mut load_error = None;
        let store = if data_file.exists() {
            match RecordStore::open(ExpenseSource::file(&data_file)) {
                Ok(store) => store,
                Err(e) => {
                    warn!(path = %data_file.display(), error = %e, "data file could not be loaded");
                    load_error = Some(e.to_string());
                    RecordStore::empty()
                }
            }
        } else {
            info!(path = %data_file.display(), "no data file yet, starting empty");
            RecordStore::empty()
        };
        let audit = AuditLogger::new(paths.audit_log());

        Ok(Self {
            paths,
            settings,
            store,
            audit,
            data_file: Some(data_file),
            load_error,
        })
    }

    /// Why the data file could not be loaded, if it could not
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Fail with the load error when the data file could not be loaded
    pub fn require_data(&self) -> ExpenseResult<()> {
        match (&self.load_error, &self.data_file) {
            (Some(reason), Some(path)) => Err(ExpenseError::source_unavailable(
                path.display().to_string(),
                format!("{} (replace it with `import`)", reason),
            )),
            (Some(reason), None) => Err(ExpenseError::source_unavailable("data file", reason)),
            (None, _) => Ok(()),
        }
    }

    pub fn collection(&self) -> &ExpenseCollection {
        self.store.collection()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn paths(&self) -> &ExpensePaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Where edits are persisted, if anywhere
    pub fn data_file(&self) -> Option<&Path> {
        self.data_file.as_deref()
    }

    /// Description of the loaded source
    pub fn source_label(&self) -> String {
        match (self.store.source(), &self.data_file) {
            (Some(source), _) => source.to_string(),
            (None, Some(path)) => format!("{} (new)", path.display()),
            (None, None) => "(none)".to_string(),
        }
    }

    /// Append a record and persist it; returns its 1-based row.
    ///
    /// The file is written before the in-memory collection changes, so a
    /// failed save leaves both untouched. Once saved the edit stands; a
    /// failed audit write is only logged.
    pub fn add_expense(&mut self, record: ExpenseRecord) -> ExpenseResult<usize> {
        self.require_data()?;
        let record = record.normalized();
        record.validate()?;

        match &self.data_file {
            Some(path) => save_atomic(
                path,
                self.store.collection().iter().chain(std::iter::once(&record)),
            )?,
            None => warn!("working on an upload; new expense is not saved to disk"),
        }

        let row = self.store.len() + 1;
        let entry = AuditEntry::append(row, &record, row);
        self.store.append(record)?;
        self.record_audit(&entry);
        Ok(row)
    }

    /// Remove the record at a 1-based row and persist the result
    pub fn remove_expense(&mut self, row: usize) -> ExpenseResult<ExpenseRecord> {
        self.require_data()?;
        let len = self.store.len();
        let index = row
            .checked_sub(1)
            .filter(|&i| i < len)
            .ok_or_else(|| {
                ExpenseError::record_not_found(format!("row {} (collection has {} rows)", row, len))
            })?;

        match &self.data_file {
            Some(path) => save_atomic(
                path,
                self.store
                    .collection()
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| *i != index)
                    .map(|(_, r)| r),
            )?,
            None => warn!("working on an upload; removal is not saved to disk"),
        }

        let removed = self.store.remove(index)?;
        self.record_audit(&AuditEntry::remove(row, &removed, self.store.len()));
        Ok(removed)
    }

    /// Replace the collection with uploaded bytes.
    ///
    /// The upload is not written over the data file; later edits stay in
    /// memory until [`Session::use_file`] selects a file again.
    pub fn upload(&mut self, name: &str, bytes: Vec<u8>) -> ExpenseResult<usize> {
        let source = ExpenseSource::upload(name, bytes);
        let label = source.to_string();
        self.store.replace(source)?;
        self.data_file = None;
        self.load_error = None;
        self.record_audit(&AuditEntry::replace(label, self.store.len()));
        Ok(self.store.len())
    }

    /// Replace the collection with a CSV file, which becomes the save target
    pub fn use_file(&mut self, path: impl Into<PathBuf>) -> ExpenseResult<usize> {
        let path = path.into();
        self.store.replace(ExpenseSource::file(&path))?;
        self.record_audit(&AuditEntry::replace(
            path.display().to_string(),
            self.store.len(),
        ));
        self.data_file = Some(path);
        self.load_error = None;
        Ok(self.store.len())
    }

    /// Copy the rows of a CSV file over the data file.
    ///
    /// The file is fully loaded before anything is written, so a bad file
    /// leaves the data file and the collection as they were. This also
    /// replaces a data file that could not be loaded.
    pub fn import_file(&mut self, path: &Path) -> ExpenseResult<usize> {
        let source = ExpenseSource::file(path);
        let imported = load(&source)?;

        match &self.data_file {
            Some(target) => {
                save_atomic(target, &imported)?;
                self.store.replace(ExpenseSource::file(target))?;
            }
            None => {
                warn!("working on an upload; imported rows are not saved to disk");
                self.store.replace(source)?;
            }
        }

        self.load_error = None;
        self.record_audit(&AuditEntry::replace(
            path.display().to_string(),
            self.store.len(),
        ));
        Ok(self.store.len())
    }

    /// Store the current data file in the settings for later runs
    pub fn remember_data_file(&mut self) -> ExpenseResult<()> {
        self.settings.data_file = self.data_file.clone();
        self.settings.save(&self.paths)
    }

    /// Flip between light and dark and save the preference
    pub fn toggle_theme(&mut self) -> ExpenseResult<Theme> {
        self.settings.theme = self.settings.theme.toggled();
        self.settings.save(&self.paths)?;
        Ok(self.settings.theme)
    }

    fn record_audit(&self, entry: &AuditEntry) {
        if let Err(e) = self.audit.log(entry) {
            warn!(error = %e, operation = %entry.operation, "audit entry not written");
        }
    }

    /// Filter the collection and compute every chart input
    pub fn dashboard(&self, spec: &FilterSpec) -> ExpenseResult<Dashboard<'_>> {
        Dashboard::generate(self.store.collection(), spec)
    }
}
