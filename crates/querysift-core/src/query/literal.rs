use crate::{
    query::key::{FieldPath, Operator},
    schema::{LeafDescriptor, LeafKind, ResolvedKind},
};
use std::fmt;

/// Keyword that turns any comparison into a null comparison.
pub const NULL_KEYWORD: &str = "null";

///
/// Literal
///
/// Surface form of a comparison's right-hand side. Literals stay raw until
/// compilation, which parses them against the leaf kind.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Literal {
    Null,
    /// Bool / numeric / enum: rendered unquoted.
    Bare(String),
    /// Text or opaque value: rendered quoted.
    Quoted(String),
    /// Date/time: parsed at compile time.
    DateTime(String),
}

impl Literal {
    /// Raw literal text; `None` for the null keyword.
    #[must_use]
    pub fn raw(&self) -> Option<&str> {
        match self {
            Self::Null => None,
            Self::Bare(raw) | Self::Quoted(raw) | Self::DateTime(raw) => Some(raw),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str(NULL_KEYWORD),
            Self::Bare(raw) => f.write_str(raw),
            Self::Quoted(raw) => write_quoted(f, raw),
            Self::DateTime(raw) => {
                f.write_str("datetime(")?;
                write_quoted(f, raw)?;
                f.write_str(")")
            }
        }
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, raw: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in raw.chars() {
        if matches!(c, '"' | '\\') {
            f.write_str("\\")?;
        }
        write!(f, "{c}")?;
    }
    f.write_str("\"")
}

///
/// ComparisonNode
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ComparisonNode {
    pub path: FieldPath,
    pub operator: Operator,
    pub literal: Literal,
    pub kind: LeafKind,
}

impl fmt::Display for ComparisonNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.path, self.operator, self.literal)
    }
}

///
/// Formatted
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Formatted {
    Node(ComparisonNode),
    /// The path ends at a value no literal can be compared with.
    Unsupported,
}

/// Build one comparison node from a resolved leaf, an operator and a raw
/// literal token.
///
/// Kind-directed: the null keyword, bool, numeric and enum leaves compare
/// relationally; text compares case-insensitively for `=`/`!` and by
/// substring for `^`/`$`/`*`; `<`/`>` on text fall back to equality.
/// Text-only operators against other kinds are accepted here and rejected
/// by the compiler.
#[must_use]
pub fn format_literal(
    path: &FieldPath,
    leaf: &LeafDescriptor<'_>,
    operator: Operator,
    raw: &str,
) -> Formatted {
    let ResolvedKind::Leaf(kind) = leaf.kind else {
        return Formatted::Unsupported;
    };

    let (operator, literal) = if raw.eq_ignore_ascii_case(NULL_KEYWORD) {
        (operator, Literal::Null)
    } else {
        match kind {
            LeafKind::Bool
            | LeafKind::Int
            | LeafKind::Uint
            | LeafKind::Float
            | LeafKind::Enum { .. } => (operator, Literal::Bare(raw.to_string())),
            LeafKind::Text => {
                let operator = match operator {
                    Operator::Le | Operator::Ge => Operator::Eq,
                    other => other,
                };
                (operator, Literal::Quoted(raw.to_string()))
            }
            LeafKind::DateTime => (operator, Literal::DateTime(raw.to_string())),
            LeafKind::Other => (operator, Literal::Quoted(raw.to_string())),
        }
    };

    Formatted::Node(ComparisonNode {
        path: path.clone(),
        operator,
        literal,
        kind: kind.clone(),
    })
}
