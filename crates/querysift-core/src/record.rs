//! Record access capability.
//!
//! Predicate evaluation never inspects host types; it asks a `Record` for
//! fields by their declared schema name and walks the returned `Slot`s.
use crate::value::Value;
use std::{collections::BTreeMap, rc::Rc, sync::Arc};

///
/// Record
///
/// Abstraction over a record-like value that can expose fields by name.
/// This decouples predicate evaluation from concrete host types.
///

pub trait Record {
    /// Read a field by its declared schema name.
    fn field(&self, name: &str) -> Slot<'_>;
}

impl<R: Record + ?Sized> Record for &R {
    fn field(&self, name: &str) -> Slot<'_> {
        (**self).field(name)
    }
}

impl<R: Record + ?Sized> Record for Box<R> {
    fn field(&self, name: &str) -> Slot<'_> {
        (**self).field(name)
    }
}

impl<R: Record + ?Sized> Record for Rc<R> {
    fn field(&self, name: &str) -> Slot<'_> {
        (**self).field(name)
    }
}

impl<R: Record + ?Sized> Record for Arc<R> {
    fn field(&self, name: &str) -> Slot<'_> {
        (**self).field(name)
    }
}

///
/// Slot
///
/// Result of reading one field. Distinguishes a missing field from a
/// present field whose value is `Value::Null`.
///

pub enum Slot<'a> {
    Value(Value),
    Record(&'a dyn Record),
    List(Vec<Self>),
    Missing,
}

impl<'a> Slot<'a> {
    pub fn value(value: impl Into<Value>) -> Self {
        Self::Value(value.into())
    }

    /// Optional nested record; `None` reads as `Value::Null`.
    pub fn record<R: Record>(record: Option<&'a R>) -> Self {
        match record {
            Some(record) => Self::Record(record),
            None => Self::Value(Value::Null),
        }
    }

    /// Collection of scalar values.
    pub fn values<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Self::List(items.into_iter().map(|v| Self::Value(v.into())).collect())
    }

    /// Collection of nested records.
    pub fn records<R: Record>(items: &'a [R]) -> Self {
        Self::List(
            items
                .iter()
                .map(|item| Self::Record(item as &dyn Record))
                .collect(),
        )
    }

    /// Select a list element; anything else selects nothing.
    #[must_use]
    pub fn index(self, index: usize) -> Self {
        match self {
            Self::List(items) => items.into_iter().nth(index).unwrap_or(Self::Missing),
            _ => Self::Missing,
        }
    }
}

impl std::fmt::Debug for Slot<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Record(_) => f.write_str("Record(..)"),
            Self::List(items) => f.debug_tuple("List").field(items).finish(),
            Self::Missing => f.write_str("Missing"),
        }
    }
}

///
/// Document
///
/// Owned, map-backed record for hosts without static types.
/// Field names are matched exactly against the schema's declared names.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    fields: BTreeMap<String, DocumentField>,
}

///
/// DocumentField
///

#[derive(Clone, Debug, PartialEq)]
pub enum DocumentField {
    Value(Value),
    Document(Document),
    List(Vec<Self>),
}

impl Document {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fields: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, field: DocumentField) {
        self.fields.insert(name.into(), field);
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, DocumentField::Value(value.into()));
        self
    }

    #[must_use]
    pub fn with_document(mut self, name: impl Into<String>, document: Self) -> Self {
        self.insert(name, DocumentField::Document(document));
        self
    }

    #[must_use]
    pub fn with_list(mut self, name: impl Into<String>, items: Vec<DocumentField>) -> Self {
        self.insert(name, DocumentField::List(items));
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&DocumentField> {
        self.fields.get(name)
    }

    /// Convert a JSON object into a document. Strings stay text; date and
    /// enum fields are coerced from text at evaluation time.
    #[cfg(feature = "json")]
    #[must_use]
    pub fn from_json(json: &serde_json::Value) -> Option<Self> {
        match DocumentField::from_json(json) {
            DocumentField::Document(document) => Some(document),
            _ => None,
        }
    }
}

impl DocumentField {
    fn slot(&self) -> Slot<'_> {
        match self {
            Self::Value(value) => Slot::Value(value.clone()),
            Self::Document(document) => Slot::Record(document),
            Self::List(items) => Slot::List(items.iter().map(Self::slot).collect()),
        }
    }

    #[cfg(feature = "json")]
    #[must_use]
    pub fn from_json(json: &serde_json::Value) -> Self {
        use serde_json::Value as Json;

        match json {
            Json::Null => Self::Value(Value::Null),
            Json::Bool(b) => Self::Value(Value::Bool(*b)),
            Json::Number(n) => Self::Value(
                n.as_i64()
                    .map(Value::Int)
                    .or_else(|| n.as_u64().map(Value::Uint))
                    .or_else(|| n.as_f64().map(Value::Float))
                    .unwrap_or(Value::Null),
            ),
            Json::String(s) => Self::Value(Value::Text(s.clone())),
            Json::Array(items) => Self::List(items.iter().map(Self::from_json).collect()),
            Json::Object(map) => Self::Document(Document {
                fields: map
                    .iter()
                    .map(|(name, value)| (name.clone(), Self::from_json(value)))
                    .collect(),
            }),
        }
    }
}

impl From<Value> for DocumentField {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<Document> for DocumentField {
    fn from(document: Document) -> Self {
        Self::Document(document)
    }
}

impl Record for Document {
    fn field(&self, name: &str) -> Slot<'_> {
        self.fields.get(name).map_or(Slot::Missing, DocumentField::slot)
    }
}

///
/// TESTS
///
