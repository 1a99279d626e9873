use crate::{error::ConfigError, query::params::DEFAULT_VALUE_DELIMITER};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

///
/// FilterConfig
///
/// Per-endpoint expression-building options. Threaded explicitly into
/// `build`; there is no global ignore list. Every way of constructing one,
/// including deserializing it inside a host's own config, is validated.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(try_from = "FilterConfigFields")]
pub struct FilterConfig {
    ignore: BTreeSet<String>,
    value_delimiter: char,
    trim_values: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            ignore: BTreeSet::new(),
            value_delimiter: DEFAULT_VALUE_DELIMITER,
            trim_values: false,
        }
    }
}

impl FilterConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let fields: FilterConfigFields = toml::from_str(source)?;

        Self::try_from(fields)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let c = self.value_delimiter;
        let collides = c.is_alphanumeric()
            || c.is_whitespace()
            || matches!(c, '-' | '.' | '[' | ']' | '"' | '\\');

        if collides {
            return Err(ConfigError::InvalidDelimiter(c));
        }

        Ok(())
    }

    /// Parameter names skipped before parsing (exact match).
    pub fn ignored(&self) -> impl Iterator<Item = &str> {
        self.ignore.iter().map(String::as_str)
    }

    /// Splits one key's raw value into OR-group literals.
    #[must_use]
    pub const fn value_delimiter(&self) -> char {
        self.value_delimiter
    }

    /// Trim surrounding whitespace from each literal token.
    #[must_use]
    pub const fn trim_values(&self) -> bool {
        self.trim_values
    }

    #[must_use]
    pub fn ignore(mut self, name: impl Into<String>) -> Self {
        self.ignore.insert(name.into());
        self
    }

    #[must_use]
    pub fn ignore_all<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn with_value_delimiter(mut self, delimiter: char) -> Result<Self, ConfigError> {
        self.value_delimiter = delimiter;
        self.validate()?;

        Ok(self)
    }

    #[must_use]
    pub const fn with_trim_values(mut self, trim: bool) -> Self {
        self.trim_values = trim;
        self
    }

    #[must_use]
    pub fn is_ignored(&self, name: &str) -> bool {
        self.ignore.contains(name)
    }
}

///
/// FilterConfigFields
///
/// Unvalidated serde shape; missing keys take the defaults.
///

#[derive(Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FilterConfigFields {
    ignore: BTreeSet<String>,
    value_delimiter: char,
    trim_values: bool,
}

impl Default for FilterConfigFields {
    fn default() -> Self {
        let FilterConfig {
            ignore,
            value_delimiter,
            trim_values,
        } = FilterConfig::default();

        Self {
            ignore,
            value_delimiter,
            trim_values,
        }
    }
}

impl TryFrom<FilterConfigFields> for FilterConfig {
    type Error = ConfigError;

    fn try_from(fields: FilterConfigFields) -> Result<Self, Self::Error> {
        let config = Self {
            ignore: fields.ignore,
            value_delimiter: fields.value_delimiter,
            trim_values: fields.trim_values,
        };
        config.validate()?;

        Ok(config)
    }
}

///
/// TESTS
///
