//! Explicit record schemas.
//!
//! A `Schema` describes the filterable shape of one record type: named
//! fields, their leaf kinds, nullability, nested records and collections.
//! Schemas are built once (by hand, by the builder, or deserialized from a
//! descriptor table) and shared read-only by every compilation.
mod builder;
mod resolve;


use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;

// re-exports
pub use builder::SchemaBuilder;
pub use resolve::{LeafDescriptor, ResolvedKind, resolve};

///
/// LeafKind
///
/// Terminal type category of a field; drives comparison semantics.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LeafKind {
    Bool,
    Int,
    Uint,
    Float,
    Enum {
        /// Declared variants in declaration order. Empty means open.
        #[serde(default)]
        variants: Vec<String>,
    },
    Text,
    DateTime,
    Other,
}

impl LeafKind {
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Int | Self::Uint | Self::Float)
    }

    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Text)
    }

    #[must_use]
    pub const fn is_enum(&self) -> bool {
        matches!(self, Self::Enum { .. })
    }

    /// Whether `<` / `>` comparisons have a defined meaning.
    #[must_use]
    pub const fn is_orderable(&self) -> bool {
        match self {
            Self::Int | Self::Uint | Self::Float | Self::DateTime => true,
            Self::Enum { variants } => !variants.is_empty(),
            Self::Bool | Self::Text | Self::Other => false,
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Uint => "uint",
            Self::Float => "float",
            Self::Enum { .. } => "enum",
            Self::Text => "text",
            Self::DateTime => "date_time",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for LeafKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

///
/// FieldKind
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Leaf(LeafKind),
    Record(Schema),
    List(Box<Self>),
}

impl FieldKind {
    #[must_use]
    pub const fn is_collection(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Strip every collection layer, returning the innermost element kind.
    #[must_use]
    pub fn element(&self) -> &Self {
        match self {
            Self::List(inner) => inner.element(),
            other => other,
        }
    }

}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leaf(kind) => write!(f, "{kind}"),
            Self::Record(schema) => write!(f, "record<{}>", schema.name),
            Self::List(inner) => write!(f, "list<{inner}>"),
        }
    }
}

///
/// FieldModel
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct FieldModel {
    /// Declared field name; the record capability is asked for this name.
    pub name: String,
    pub kind: FieldKind,
    #[serde(default)]
    pub nullable: bool,
}

impl FieldModel {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: FieldKind, nullable: bool) -> Self {
        Self {
            name: name.into(),
            kind,
            nullable,
        }
    }
}

/// Field names compare by lowercase folding; the ASCII path skips the
/// Unicode tables.
fn same_name(a: &str, b: &str) -> bool {
    if a.is_ascii() && b.is_ascii() {
        return a.eq_ignore_ascii_case(b);
    }

    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

///
/// Schema
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Schema {
    pub name: String,
    pub fields: Vec<FieldModel>,
}

impl Schema {
    #[must_use]
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder::new(name)
    }

    /// Case-insensitive field lookup.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldModel> {
        self.fields
            .iter()
            .find(|field| same_name(&field.name, name))
    }

    /// Reject schemas whose field names collide case-insensitively, at any
    /// nesting depth.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (i, field) in self.fields.iter().enumerate() {
            let duplicate = self.fields[..i]
                .iter()
                .any(|prior| same_name(&prior.name, &field.name));
            if duplicate {
                return Err(ConfigError::DuplicateField {
                    schema: self.name.clone(),
                    field: field.name.clone(),
                });
            }

            if let FieldKind::Record(nested) = field.kind.element() {
                nested.validate()?;
            }
        }

        Ok(())
    }

    /// Load and validate a schema descriptor table from JSON.
    #[cfg(feature = "json")]
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let schema: Self = serde_json::from_str(json)?;
        schema.validate()?;

        Ok(schema)
    }

    /// Load and validate a schema descriptor table from TOML.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let schema: Self = toml::from_str(source)?;
        schema.validate()?;

        Ok(schema)
    }
}
