use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BrcError>;

#[derive(Error, Debug)]
pub enum BrcError {
    /// The measurements file could not be opened or mapped.
    #[error("cannot read measurements from {}: {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A reading fell outside the exact decimal grammar and the policy did not let it through.
    #[error("unparsable reading {value:?} on line {line}")]
    UnparsableReading { line: u64, value: String },
}

impl BrcError {
    pub(crate) fn unparsable(line: u64, value: &[u8]) -> Self {
        BrcError::UnparsableReading {
            line,
            value: String::from_utf8_lossy(value).into_owned(),
        }
    }
}
