use std::path::PathBuf;
use thiserror::Error;

/// Everything that can abort a pipeline.
#[derive(Error, Debug)]
pub enum Error {
    #[error("input file {} not found", .path.display())]
    MissingInput { path: PathBuf },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}:{line}: can not parse {text:?} as {expected}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        text: String,
        expected: &'static str,
    },

    #[error("malformed binary file {}: {reason}", .path.display())]
    Format { path: PathBuf, reason: String },

    #[error("header of {} claims {header} elements but the file holds {actual}", .path.display())]
    HeaderMismatch {
        path: PathBuf,
        header: u64,
        actual: usize,
    },

    #[error("column {0} has no data")]
    EmptyColumn(String),

    #[error("invalid column specification {0:?}, expected NAME:u64 or NAME:f64")]
    InvalidColumnSpec(String),

    #[error("invalid distribution: {0}")]
    InvalidDistribution(String),

    #[error("failed to render histogram {}: {reason}", .path.display())]
    Plot { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io { path: path.into(), source }
    }
}
