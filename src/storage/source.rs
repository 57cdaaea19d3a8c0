//! Where an expense table comes from

use std::fmt;
use std::path::PathBuf;

use super::csv_io::read_expenses;
use super::file_io::load_file;
use crate::error::ExpenseResult;
use crate::models::ExpenseCollection;

/// A readable expense table: a file on disk or bytes handed over by an upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseSource {
    File(PathBuf),
    Upload { name: String, bytes: Vec<u8> },
}

impl ExpenseSource {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    pub fn upload(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self::Upload {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Read and parse the whole source
    pub fn read(&self) -> ExpenseResult<ExpenseCollection> {
        match self {
            Self::File(path) => load_file(path),
            Self::Upload { name, bytes } => read_expenses(bytes.as_slice(), name),
        }
    }

    /// The file path, for sources that can be written back
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::File(path) => Some(path),
            Self::Upload { .. } => None,
        }
    }
}

impl fmt::Display for ExpenseSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Upload { name, .. } => write!(f, "upload:{}", name),
        }
    }
}
