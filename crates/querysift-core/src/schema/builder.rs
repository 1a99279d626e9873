use crate::{
    error::ConfigError,
    schema::{FieldKind, FieldModel, LeafKind, Schema},
};

///
/// SchemaBuilder
///
/// Fluent construction for hand-written descriptor tables.
///

#[derive(Clone, Debug)]
pub struct SchemaBuilder {
    name: String,
    fields: Vec<FieldModel>,
}

impl SchemaBuilder {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn field(mut self, name: impl Into<String>, kind: FieldKind, nullable: bool) -> Self {
        self.fields.push(FieldModel::new(name, kind, nullable));
        self
    }

    fn leaf(self, name: impl Into<String>, kind: LeafKind, nullable: bool) -> Self {
        self.field(name, FieldKind::Leaf(kind), nullable)
    }

    ///
    /// SCALARS
    ///

    #[must_use]
    pub fn bool(self, name: impl Into<String>) -> Self {
        self.leaf(name, LeafKind::Bool, false)
    }

    #[must_use]
    pub fn nullable_bool(self, name: impl Into<String>) -> Self {
        self.leaf(name, LeafKind::Bool, true)
    }

    #[must_use]
    pub fn int(self, name: impl Into<String>) -> Self {
        self.leaf(name, LeafKind::Int, false)
    }

    #[must_use]
    pub fn nullable_int(self, name: impl Into<String>) -> Self {
        self.leaf(name, LeafKind::Int, true)
    }

    #[must_use]
    pub fn uint(self, name: impl Into<String>) -> Self {
        self.leaf(name, LeafKind::Uint, false)
    }

    #[must_use]
    pub fn float(self, name: impl Into<String>) -> Self {
        self.leaf(name, LeafKind::Float, false)
    }

    #[must_use]
    pub fn nullable_float(self, name: impl Into<String>) -> Self {
        self.leaf(name, LeafKind::Float, true)
    }

    #[must_use]
    pub fn text(self, name: impl Into<String>) -> Self {
        self.leaf(name, LeafKind::Text, false)
    }

    #[must_use]
    pub fn nullable_text(self, name: impl Into<String>) -> Self {
        self.leaf(name, LeafKind::Text, true)
    }

    /// Enum field with declared variants (declaration order defines `<`/`>`).
    #[must_use]
    pub fn enumeration<I, S>(self, name: impl Into<String>, variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let variants = variants.into_iter().map(Into::into).collect();
        self.leaf(name, LeafKind::Enum { variants }, false)
    }

    #[must_use]
    pub fn date_time(self, name: impl Into<String>) -> Self {
        self.leaf(name, LeafKind::DateTime, false)
    }

    #[must_use]
    pub fn nullable_date_time(self, name: impl Into<String>) -> Self {
        self.leaf(name, LeafKind::DateTime, true)
    }

    #[must_use]
    pub fn other(self, name: impl Into<String>) -> Self {
        self.leaf(name, LeafKind::Other, true)
    }

    ///
    /// NESTED
    ///

    #[must_use]
    pub fn record(self, name: impl Into<String>, schema: Schema) -> Self {
        self.field(name, FieldKind::Record(schema), true)
    }

    /// Collection of scalar leaves.
    #[must_use]
    pub fn list(self, name: impl Into<String>, element: LeafKind) -> Self {
        let kind = FieldKind::List(Box::new(FieldKind::Leaf(element)));
        self.field(name, kind, true)
    }

    /// Collection of nested records.
    #[must_use]
    pub fn records(self, name: impl Into<String>, schema: Schema) -> Self {
        let kind = FieldKind::List(Box::new(FieldKind::Record(schema)));
        self.field(name, kind, true)
    }

    pub fn build(self) -> Result<Schema, ConfigError> {
        let schema = Schema {
            name: self.name,
            fields: self.fields,
        };
        schema.validate()?;

        Ok(schema)
    }
}
