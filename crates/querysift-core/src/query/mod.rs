//! Query-string filtering pipeline.
//!
//! Keys are parsed into paths and operators (`key`), literals are formatted
//! against the resolved leaf (`literal`), grouped into a filter tree
//! (`expr`), and compiled into an executable predicate (`compile`).
pub mod compile;
pub mod expr;
pub mod key;
pub mod literal;
pub mod params;


pub use compile::{CompiledPredicate, Predicate, compile};
pub use expr::{Expression, ExpressionNode, build};
pub use key::{FieldPath, Operator, ParsedKey, PathSegment, parse_key};
pub use literal::{ComparisonNode, Formatted, Literal, NULL_KEYWORD, format_literal};
pub use params::{DEFAULT_VALUE_DELIMITER, Parameters, RawParameter};
