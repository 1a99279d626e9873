use querysift_core::error::{CompileError, ConfigError};
use thiserror::Error as ThisError;

///
/// Error
///
/// Public error type. A failed compile must be surfaced to the caller,
/// never treated as "match everything".
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl Error {
    /// Surface path of the offending key, when the failure names one.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Compile(err) => Some(err.path()),
            Self::Config(_) => None,
        }
    }
}
