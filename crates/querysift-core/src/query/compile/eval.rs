use crate::{
    record::{Record, Slot},
    value::{Number, TextMode, Value},
};
use chrono::NaiveDateTime;
use std::cmp::Ordering;

///
/// Evaluator
///
/// Executable form of an expression tree. Built only by the compiler, so
/// every node has already been checked against the schema.
///

#[derive(Clone, Debug)]
pub(crate) enum Evaluator {
    All(Vec<Self>),
    Any(Vec<Self>),
    Not(Box<Self>),
    Compare(Comparison),
}

impl Evaluator {
    pub(crate) fn eval(&self, record: &dyn Record) -> bool {
        match self {
            Self::All(children) => children.iter().all(|child| child.eval(record)),
            Self::Any(children) => children.iter().any(|child| child.eval(record)),
            Self::Not(inner) => !inner.eval(record),
            Self::Compare(cmp) => cmp.eval(record),
        }
    }
}

///
/// Access
///
/// One step of a field read: the declared field name plus any element
/// selections taken from `[n]` annotations.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Access {
    pub(crate) field: String,
    pub(crate) indices: Vec<usize>,
}

///
/// Comparison
///

#[derive(Clone, Debug)]
pub(crate) struct Comparison {
    pub(crate) access: Vec<Access>,
    pub(crate) test: Test,
}

impl Comparison {
    fn eval(&self, record: &dyn Record) -> bool {
        walk(Slot::Record(record), &self.access, &self.test)
    }
}

// Unindexed collections are existential: any element may satisfy the test.
fn walk(slot: Slot<'_>, rest: &[Access], test: &Test) -> bool {
    match slot {
        Slot::Missing => false,
        Slot::List(items) => items.into_iter().any(|item| walk(item, rest, test)),
        Slot::Value(value) => rest.is_empty() && test.matches(&value),
        Slot::Record(record) => {
            let Some((access, tail)) = rest.split_first() else {
                return false;
            };

            let slot = access
                .indices
                .iter()
                .fold(record.field(&access.field), |slot, index| slot.index(*index));

            walk(slot, tail, test)
        }
    }
}

///
/// Bound
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Bound {
    AtMost,
    AtLeast,
}

impl Bound {
    const fn admits(self, ordering: Ordering) -> bool {
        match self {
            Self::AtMost => ordering.is_le(),
            Self::AtLeast => ordering.is_ge(),
        }
    }
}

///
/// Test
///
/// Typed leaf test. `!` comparisons are compiled as `Evaluator::Not`
/// around the equality test, never as a separate variant.
///

#[derive(Clone, Debug)]
pub(crate) enum Test {
    IsNull,
    Bool(bool),
    NumberEq(Number),
    NumberCmp(Bound, Number),
    EnumEq(String),
    EnumCmp {
        bound: Bound,
        position: usize,
        variants: Vec<String>,
    },
    DateTimeEq(NaiveDateTime),
    DateTimeCmp(Bound, NaiveDateTime),
    TextEq(String),
    StartsWith(String),
    EndsWith(String),
    Contains(String),
    OtherEq(String),
}

impl Test {
    pub(crate) fn matches(&self, value: &Value) -> bool {
        match self {
            Self::IsNull => value.is_null(),
            Self::Bool(expected) => value.as_bool() == Some(*expected),
            Self::NumberEq(expected) => value.as_number().is_some_and(|n| n == *expected),
            Self::NumberCmp(bound, expected) => value
                .as_number()
                .and_then(|n| n.partial_cmp(expected))
                .is_some_and(|ord| bound.admits(ord)),
            Self::EnumEq(expected) => value
                .as_enum_name()
                .is_some_and(|name| name.eq_ignore_ascii_case(expected)),
            Self::EnumCmp {
                bound,
                position,
                variants,
            } => value
                .as_enum_name()
                .and_then(|name| variants.iter().position(|v| v.eq_ignore_ascii_case(name)))
                .is_some_and(|actual| bound.admits(actual.cmp(position))),
            Self::DateTimeEq(expected) => value.as_date_time() == Some(*expected),
            Self::DateTimeCmp(bound, expected) => value
                .as_date_time()
                .is_some_and(|dt| bound.admits(dt.cmp(expected))),
            Self::TextEq(expected) => value.text_eq(expected, TextMode::Ci).unwrap_or(false),
            Self::StartsWith(needle) => value
                .text_starts_with(needle, TextMode::Cs)
                .unwrap_or(false),
            Self::EndsWith(needle) => value.text_ends_with(needle, TextMode::Cs).unwrap_or(false),
            Self::Contains(needle) => value.text_contains(needle, TextMode::Cs).unwrap_or(false),
            Self::OtherEq(expected) => !value.is_null() && value.to_string() == *expected,
        }
    }
}
