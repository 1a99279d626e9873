//! ## Crate layout
//! - `core`: schemas, record access, values, and the filter pipeline.
//! - `query_string`: decoding of raw URL query strings into parameters.
//! - `filter`: typed entry point binding a query to a `Filterable` record.
//!
//! The `prelude` module mirrors the surface most callers need to filter a
//! collection from an incoming request.

pub use querysift_core as core;

mod error;
mod filter;
pub mod query_string;

pub use error::Error;
pub use filter::{Filter, Filterable, compile};

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        Error, Filter, Filterable,
        core::{
            config::FilterConfig,
            error::CompileError,
            query::{Expression, Parameters, Predicate},
            record::{Document, Record, Slot},
            schema::{LeafKind, Schema},
            value::Value,
        },
    };
}
