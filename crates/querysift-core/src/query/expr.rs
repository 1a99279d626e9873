use crate::{
    config::FilterConfig,
    query::{
        key::parse_key,
        literal::{ComparisonNode, Formatted, format_literal},
        params::Parameters,
    },
    schema::{Schema, resolve},
};
use std::fmt;
use tracing::{debug, trace};

///
/// ExpressionNode
///
/// Structured filter tree. The builder always produces an `And` of per-key
/// groups; a group is a single `Leaf` or an `Or` of two or more leaves.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ExpressionNode {
    Leaf(ComparisonNode),
    And(Vec<Self>),
    Or(Vec<Self>),
}

impl ExpressionNode {
    /// Visit every comparison in tree order.
    pub fn comparisons(&self) -> Box<dyn Iterator<Item = &ComparisonNode> + '_> {
        match self {
            Self::Leaf(node) => Box::new(std::iter::once(node)),
            Self::And(children) | Self::Or(children) => {
                Box::new(children.iter().flat_map(Self::comparisons))
            }
        }
    }
}

impl fmt::Display for ExpressionNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leaf(node) => write!(f, "{node}"),
            Self::And(children) => {
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" AND ")?;
                    }
                    write!(f, "({child})")?;
                }
                Ok(())
            }
            Self::Or(children) => {
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" OR ")?;
                    }
                    write!(f, "{child}")?;
                }
                Ok(())
            }
        }
    }
}

///
/// Expression
///
/// Builder output: either a tree, or `Empty` when nothing survived.
/// `Empty` compiles to "no predicate" (accept everything).
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum Expression {
    #[default]
    Empty,
    Tree(ExpressionNode),
}

impl Expression {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    #[must_use]
    pub const fn tree(&self) -> Option<&ExpressionNode> {
        match self {
            Self::Empty => None,
            Self::Tree(node) => Some(node),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Tree(node) => write!(f, "{node}"),
        }
    }
}

/// Build the filter tree for `params` against `schema`.
///
/// Ignored keys are dropped before parsing. A key whose path does not
/// resolve is dropped whole; within a key, literals that format as
/// unsupported are dropped individually. Surviving literals of one key are
/// OR-ed, and keys are AND-ed in input order.
#[must_use]
pub fn build(schema: &Schema, params: &Parameters, config: &FilterConfig) -> Expression {
    let mut groups = Vec::new();

    for param in params {
        if config.is_ignored(&param.name) {
            debug!(key = %param.name, "ignoring query parameter");
            continue;
        }

        let key = parse_key(&param.name);
        let Some(leaf) = resolve(schema, key.path.names()) else {
            debug!(
                key = %param.name,
                schema = %schema.name,
                "query parameter does not resolve to a field"
            );
            continue;
        };

        let mut nodes = Vec::new();
        for token in param.tokens(config.value_delimiter()) {
            let token = if config.trim_values() { token.trim() } else { token };

            match format_literal(&key.path, &leaf, key.operator, token) {
                Formatted::Node(node) => {
                    trace!(key = %param.name, comparison = %node, "formatted comparison");
                    nodes.push(ExpressionNode::Leaf(node));
                }
                Formatted::Unsupported => {
                    trace!(key = %param.name, literal = token, "unsupported literal");
                }
            }
        }

        match nodes.len() {
            0 => debug!(key = %param.name, "no comparable literal for query parameter"),
            1 => groups.extend(nodes),
            _ => groups.push(ExpressionNode::Or(nodes)),
        }
    }

    if groups.is_empty() {
        Expression::Empty
    } else {
        Expression::Tree(ExpressionNode::And(groups))
    }
}
