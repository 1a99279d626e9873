mod eval;

#[cfg(test)]
mod tests;

use crate::{
    error::CompileError,
    query::{
        expr::{Expression, ExpressionNode},
        key::Operator,
        literal::ComparisonNode,
    },
    record::Record,
    schema::{LeafKind, ResolvedKind, Schema, resolve},
    value::{Number, parse_date_time},
};
use eval::{Access, Bound, Comparison, Evaluator, Test};
use tracing::debug;

///
/// Predicate
///
/// Compiler output. `None` is the "no predicate" value produced for an
/// empty expression and accepts every record.
///

#[derive(Clone, Debug)]
pub enum Predicate {
    None,
    Compiled(CompiledPredicate),
}

impl Predicate {
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    #[must_use]
    pub fn matches(&self, record: &dyn Record) -> bool {
        match self {
            Self::None => true,
            Self::Compiled(predicate) => predicate.evaluate(record),
        }
    }

    /// Rendered expression this predicate was compiled from.
    #[must_use]
    pub fn expression(&self) -> Option<&str> {
        match self {
            Self::None => None,
            Self::Compiled(predicate) => Some(predicate.expression()),
        }
    }

    /// Turn the predicate into a plain closure for iterator adaptors.
    pub fn into_fn(self) -> impl Fn(&dyn Record) -> bool + Send + Sync {
        move |record: &dyn Record| self.matches(record)
    }
}

///
/// CompiledPredicate
///
/// Pure and reentrant: evaluation never mutates the predicate, so one
/// instance can be shared across threads.
///

#[derive(Clone, Debug)]
pub struct CompiledPredicate {
    root: Evaluator,
    expression: String,
}

impl CompiledPredicate {
    #[must_use]
    pub fn evaluate(&self, record: &dyn Record) -> bool {
        self.root.eval(record)
    }

    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }
}

/// Compile an expression into a predicate against `schema`.
///
/// Every leaf is re-resolved and its literal parsed against the leaf kind,
/// so all failures surface here and evaluation itself is infallible.
pub fn compile(expression: &Expression, schema: &Schema) -> Result<Predicate, CompileError> {
    let Expression::Tree(tree) = expression else {
        return Ok(Predicate::None);
    };

    let root = compile_node(tree, schema).inspect_err(|err| {
        debug!(schema = %schema.name, error = %err, "predicate compilation failed");
    })?;

    let expression = tree.to_string();
    debug!(schema = %schema.name, %expression, "compiled predicate");

    Ok(Predicate::Compiled(CompiledPredicate { root, expression }))
}

fn compile_node(node: &ExpressionNode, schema: &Schema) -> Result<Evaluator, CompileError> {
    let compile_all = |children: &[ExpressionNode]| {
        children
            .iter()
            .map(|child| compile_node(child, schema))
            .collect::<Result<Vec<_>, _>>()
    };

    match node {
        ExpressionNode::Leaf(cmp) => compile_comparison(cmp, schema),
        ExpressionNode::And(children) => compile_all(children).map(Evaluator::All),
        ExpressionNode::Or(children) => compile_all(children).map(Evaluator::Any),
    }
}

fn compile_comparison(cmp: &ComparisonNode, schema: &Schema) -> Result<Evaluator, CompileError> {
    let leaf = resolve(schema, cmp.path.names()).ok_or_else(|| CompileError::UnknownField {
        path: cmp.path.to_string(),
    })?;

    let kind = match leaf.kind {
        ResolvedKind::Leaf(kind) => kind,
        ResolvedKind::Record(_) => return Err(invalid_operator(cmp, "record")),
    };

    let access = leaf
        .fields
        .iter()
        .zip(cmp.path.iter())
        .map(|(field, segment)| Access {
            field: (*field).to_string(),
            indices: segment.indices.clone(),
        })
        .collect();

    let test = compile_test(cmp, kind, leaf.nullable)?;
    let compare = Evaluator::Compare(Comparison { access, test });

    Ok(if cmp.operator == Operator::Ne {
        Evaluator::Not(Box::new(compare))
    } else {
        compare
    })
}

// Build the positive test; `Ne` is negated by the caller.
fn compile_test(
    cmp: &ComparisonNode,
    kind: &LeafKind,
    nullable: bool,
) -> Result<Test, CompileError> {
    let op = cmp.operator;

    let Some(raw) = cmp.literal.raw() else {
        if !nullable {
            return Err(CompileError::NullComparison {
                path: cmp.path.to_string(),
                op,
            });
        }

        return match op {
            Operator::Eq | Operator::Ne => Ok(Test::IsNull),
            _ => Err(invalid_operator(cmp, kind.label())),
        };
    };

    let bound = match op {
        Operator::Le => Some(Bound::AtMost),
        Operator::Ge => Some(Bound::AtLeast),
        _ => None,
    };

    match kind {
        LeafKind::Text => Ok(text_test(op, raw)),

        _ if op.is_text_only() => Err(invalid_operator(cmp, kind.label())),

        LeafKind::Bool => {
            let value = parse_bool(raw)
                .ok_or_else(|| invalid_literal(cmp, raw, "expected true or false"))?;
            match bound {
                None => Ok(Test::Bool(value)),
                Some(_) => Err(invalid_operator(cmp, kind.label())),
            }
        }

        LeafKind::Int | LeafKind::Uint | LeafKind::Float => {
            let number = Number::parse(raw)
                .ok_or_else(|| invalid_literal(cmp, raw, "expected a number"))?;
            Ok(match bound {
                None => Test::NumberEq(number),
                Some(bound) => Test::NumberCmp(bound, number),
            })
        }

        LeafKind::Enum { variants } => {
            let position = variants.iter().position(|v| v.eq_ignore_ascii_case(raw));
            if !variants.is_empty() && position.is_none() {
                return Err(invalid_literal(cmp, raw, "unknown enum variant"));
            }

            match (bound, position) {
                (None, _) => Ok(Test::EnumEq(raw.to_string())),
                (Some(bound), Some(position)) => Ok(Test::EnumCmp {
                    bound,
                    position,
                    variants: variants.clone(),
                }),
                // undeclared variant order cannot be compared
                (Some(_), None) => Err(invalid_operator(cmp, kind.label())),
            }
        }

        LeafKind::DateTime => {
            let dt = parse_date_time(raw)
                .ok_or_else(|| invalid_literal(cmp, raw, "expected a date/time"))?;
            Ok(match bound {
                None => Test::DateTimeEq(dt),
                Some(bound) => Test::DateTimeCmp(bound, dt),
            })
        }

        LeafKind::Other => match bound {
            None => Ok(Test::OtherEq(raw.to_string())),
            Some(_) => Err(invalid_operator(cmp, kind.label())),
        },
    }
}

// Ordering on text falls back to case-insensitive equality.
fn text_test(op: Operator, raw: &str) -> Test {
    let raw = raw.to_string();

    match op {
        Operator::Eq | Operator::Ne | Operator::Le | Operator::Ge => Test::TextEq(raw),
        Operator::StartsWith => Test::StartsWith(raw),
        Operator::EndsWith => Test::EndsWith(raw),
        Operator::Contains => Test::Contains(raw),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    if raw.eq_ignore_ascii_case("true") {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn invalid_operator(cmp: &ComparisonNode, kind: &str) -> CompileError {
    CompileError::InvalidOperator {
        path: cmp.path.to_string(),
        op: cmp.operator,
        kind: kind.to_string(),
    }
}

fn invalid_literal(cmp: &ComparisonNode, raw: &str, message: &str) -> CompileError {
    CompileError::InvalidLiteral {
        path: cmp.path.to_string(),
        literal: raw.to_string(),
        message: message.to_string(),
    }
}
