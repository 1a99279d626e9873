use derive_more::Deref;
use std::fmt;

///
/// Operator
///
/// Comparison operator carried by an augmented key's last character.
/// Absent a recognized suffix the operator is `Eq`.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Operator {
    Eq,
    Ne,
    Le,
    Ge,
    StartsWith,
    EndsWith,
    Contains,
}

impl Operator {
    pub const ALL: [Self; 7] = [
        Self::Eq,
        Self::Ne,
        Self::Le,
        Self::Ge,
        Self::StartsWith,
        Self::EndsWith,
        Self::Contains,
    ];

    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '=' => Some(Self::Eq),
            '!' => Some(Self::Ne),
            '<' => Some(Self::Le),
            '>' => Some(Self::Ge),
            '^' => Some(Self::StartsWith),
            '$' => Some(Self::EndsWith),
            '*' => Some(Self::Contains),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Eq => '=',
            Self::Ne => '!',
            Self::Le => '<',
            Self::Ge => '>',
            Self::StartsWith => '^',
            Self::EndsWith => '$',
            Self::Contains => '*',
        }
    }

    /// The operator character with `=` appended.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Le => "<=",
            Self::Ge => ">=",
            Self::StartsWith => "^=",
            Self::EndsWith => "$=",
            Self::Contains => "*=",
        }
    }

    /// Operators that only have a meaning against text fields
    /// (CSS attribute-selector convention).
    #[must_use]
    pub const fn is_text_only(self) -> bool {
        matches!(self, Self::StartsWith | Self::EndsWith | Self::Contains)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

///
/// PathSegment
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PathSegment {
    pub name: String,
    /// `[n]` annotations in the order they appeared. They select elements at
    /// evaluation time and never take part in schema resolution.
    pub indices: Vec<usize>,
}

impl PathSegment {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            indices: Vec::new(),
        }
    }

    fn parse(raw: &str) -> Self {
        let mut name = String::with_capacity(raw.len());
        let mut indices = Vec::new();
        let mut rest = raw;

        while let Some(open) = rest.find('[') {
            name.push_str(&rest[..open]);
            let tail = &rest[open + 1..];

            match index_annotation(tail) {
                Some((index, consumed)) => {
                    indices.push(index);
                    rest = &tail[consumed..];
                }
                None => {
                    name.push('[');
                    rest = tail;
                }
            }
        }
        name.push_str(rest);

        Self { name, indices }
    }
}

// Match `<digits>]` at the start of `tail`; returns the index and bytes consumed.
fn index_annotation(tail: &str) -> Option<(usize, usize)> {
    let digits = tail.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 || tail.as_bytes().get(digits) != Some(&b']') {
        return None;
    }

    // an index too large to address anything selects nothing
    let index = tail[..digits].parse().unwrap_or(usize::MAX);

    Some((index, digits + 1))
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        for index in &self.indices {
            write!(f, "[{index}]")?;
        }

        Ok(())
    }
}

///
/// FieldPath
///
/// Dotted property path. `Display` renders the surface form including
/// indices (`legs[0].status`); `canonical` drops them (`legs.status`).
///

#[derive(Clone, Debug, Deref, Eq, PartialEq)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
    pub const SEPARATOR: char = '.';

    #[must_use]
    pub const fn new(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }

    /// Parse a dotted path, extracting `[n]` index annotations.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        Self(raw.split(Self::SEPARATOR).map(PathSegment::parse).collect())
    }

    /// Segment names with indices stripped, for schema resolution.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|segment| segment.name.as_str())
    }

    #[must_use]
    pub fn canonical(&self) -> String {
        self.names().collect::<Vec<_>>().join(".")
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", Self::SEPARATOR)?;
            }
            write!(f, "{segment}")?;
        }

        Ok(())
    }
}

///
/// ParsedKey
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParsedKey {
    pub path: FieldPath,
    pub operator: Operator,
}

/// Split an augmented key into its property path and comparison operator.
///
/// Total: a trailing operator character is stripped when recognized
/// (otherwise the operator is `Eq`), hyphens become path separators, and
/// `[n]` annotations are lifted out of the segment names.
#[must_use]
pub fn parse_key(raw_name: &str) -> ParsedKey {
    let (name, operator) = match raw_name.chars().last().and_then(Operator::from_char) {
        Some(op) => (&raw_name[..raw_name.len() - op.as_char().len_utf8()], op),
        None => (raw_name, Operator::Eq),
    };

    let normalized = name.replace('-', ".");

    ParsedKey {
        path: FieldPath::parse(&normalized),
        operator,
    }
}
