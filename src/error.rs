//! Errors raised while reading a Bookshelf design.
//!
//! Every variant carries the path of the file being read, so that a
//! failure at the top level can always say which input was at fault.
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::policy::FieldKind;

pub type Result<T> = std::result::Result<T, ParseError>;

#[derive(Debug, Error)]
pub enum ParseError {
    /// A required input (nodes, pl, nets, scl, aux) could not be opened.
    #[error("failed to open {}: {source}", path.display())]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading failed part way through a file.
    #[error("error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A token that should have been numeric was not, and the recovery
    /// policy for its field says the whole parse must stop.
    #[error("{}:{line}: malformed {field} value '{token}'", path.display())]
    MalformedNumericField {
        path: PathBuf,
        line: usize,
        field: FieldKind,
        token: String,
    },

    /// The aux file did not contain a usable `RowBasedPlacement` line.
    #[error("{}: no RowBasedPlacement line naming five files", path.display())]
    MalformedAux { path: PathBuf },
}

impl ParseError {
    /// The file the error refers to.
    pub fn path(&self) -> &PathBuf {
        match self {
            ParseError::FileNotFound { path, .. }
            | ParseError::Io { path, .. }
            | ParseError::MalformedNumericField { path, .. }
            | ParseError::MalformedAux { path } => path,
        }
    }
}
