//! Core runtime for QuerySift: schema descriptors, record access, and the
//! query-string to predicate pipeline exported via the `prelude`.
#![warn(unreachable_pub)]

pub mod config;
pub mod error;
pub mod query;
pub mod record;
pub mod schema;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, builders, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        config::FilterConfig,
        query::{Expression, Parameters, Predicate},
        record::{Document, Record, Slot},
        schema::{FieldKind, LeafKind, Schema},
        value::Value,
    };
}
