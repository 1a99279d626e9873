use crate::schema::{FieldKind, LeafKind, Schema};

///
/// ResolvedKind
///
/// What a path ends at: a comparable leaf, or a nested record that has no
/// scalar form.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResolvedKind<'s> {
    Leaf(&'s LeafKind),
    Record(&'s Schema),
}

///
/// LeafDescriptor
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LeafDescriptor<'s> {
    /// Declared field names along the path, one per segment.
    pub fields: Vec<&'s str>,
    pub kind: ResolvedKind<'s>,
    /// Nullability of the terminal field.
    pub nullable: bool,
    /// True when any segment crossed a collection.
    pub collection: bool,
}

impl<'s> LeafDescriptor<'s> {
    #[must_use]
    pub const fn leaf(&self) -> Option<&'s LeafKind> {
        match self.kind {
            ResolvedKind::Leaf(kind) => Some(kind),
            ResolvedKind::Record(_) => None,
        }
    }

    #[must_use]
    pub const fn is_enum(&self) -> bool {
        matches!(self.kind, ResolvedKind::Leaf(LeafKind::Enum { .. }))
    }
}

/// Resolve a sequence of path segments against `schema`.
///
/// Each segment is looked up case-insensitively. A collection-typed field is
/// descended through its element type, so the segment selects the collection
/// rather than an index. Any missing segment, or a segment that tries to
/// descend into a scalar, yields `None`.
#[must_use]
pub fn resolve<'s, 'p, I>(schema: &'s Schema, segments: I) -> Option<LeafDescriptor<'s>>
where
    I: IntoIterator<Item = &'p str>,
{
    let mut segments = segments.into_iter().peekable();
    let mut current = schema;
    let mut fields = Vec::new();
    let mut collection = false;

    while let Some(segment) = segments.next() {
        let field = current.field(segment)?;
        fields.push(field.name.as_str());
        collection |= field.kind.is_collection();

        let element = field.kind.element();

        if segments.peek().is_none() {
            let kind = match element {
                FieldKind::Leaf(kind) => ResolvedKind::Leaf(kind),
                FieldKind::Record(nested) => ResolvedKind::Record(nested),
                FieldKind::List(_) => return None,
            };

            return Some(LeafDescriptor {
                fields,
                kind,
                nullable: field.nullable,
                collection,
            });
        }

        match element {
            FieldKind::Record(nested) => current = nested,
            FieldKind::Leaf(_) | FieldKind::List(_) => return None,
        }
    }

    None
}
