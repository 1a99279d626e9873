/// Delimiter separating the OR-group values of one key.
pub const DEFAULT_VALUE_DELIMITER: char = ',';

///
/// RawParameter
///
/// One decoded query key and every raw value it was given, in query order.
/// Values stay undelimited until `tokens` splits them, so the delimiter is
/// chosen by whoever builds the expression.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RawParameter {
    pub name: String,
    pub values: Vec<String>,
}

impl RawParameter {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: vec![value.into()],
        }
    }

    /// Split every occurrence into its ordered literal tokens.
    pub fn tokens(&self, delimiter: char) -> impl Iterator<Item = &str> {
        self.values.iter().flat_map(move |value| value.split(delimiter))
    }
}

///
/// Parameters
///
/// Insertion-ordered multimap of decoded query parameters. Repeated keys
/// fold into the first occurrence's position.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Parameters {
    entries: Vec<RawParameter>,
}

impl Parameters {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Record one occurrence of `name`.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();

        match self.entries.iter_mut().find(|entry| entry.name == name) {
            Some(entry) => entry.values.push(value.into()),
            None => self.entries.push(RawParameter::new(name, value)),
        }
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.values.as_slice())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RawParameter> {
        self.entries.iter()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Parameters
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (name, value) in iter {
            params.insert(name, value);
        }

        params
    }
}

impl<'a> IntoIterator for &'a Parameters {
    type Item = &'a RawParameter;
    type IntoIter = std::slice::Iter<'a, RawParameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
