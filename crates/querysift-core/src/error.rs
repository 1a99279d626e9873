use crate::query::Operator;
use thiserror::Error as ThisError;

///
/// CompileError
///
/// A predicate was requested but cannot be built. Callers must surface this
/// (for example as a rejected request); it never means "match everything".
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum CompileError {
    #[error("unknown field path '{path}'")]
    UnknownField { path: String },

    #[error("field '{path}' is not nullable and cannot be compared {op} null")]
    NullComparison { path: String, op: Operator },

    #[error("operator {op} is not valid for {kind} field '{path}'")]
    InvalidOperator {
        path: String,
        op: Operator,
        kind: String,
    },

    #[error("invalid literal '{literal}' for field '{path}': {message}")]
    InvalidLiteral {
        path: String,
        literal: String,
        message: String,
    },
}

impl CompileError {
    /// Surface path of the offending key.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::UnknownField { path }
            | Self::NullComparison { path, .. }
            | Self::InvalidOperator { path, .. }
            | Self::InvalidLiteral { path, .. } => path,
        }
    }

    /// Returns true if the error comes from a literal that failed to parse.
    #[must_use]
    pub const fn is_literal_error(&self) -> bool {
        matches!(self, Self::InvalidLiteral { .. })
    }
}

///
/// ConfigError
///
/// Invalid filter configuration or schema descriptor tables.
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("invalid toml: {0}")]
    Toml(#[from] toml::de::Error),

    #[cfg(feature = "json")]
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("value delimiter '{0}' would collide with key or literal syntax")]
    InvalidDelimiter(char),

    #[error("schema '{schema}' declares field '{field}' more than once")]
    DuplicateField { schema: String, field: String },
}
