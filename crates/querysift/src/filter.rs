use crate::{Error, query_string};
use querysift_core::{
    config::FilterConfig,
    query::{self, Expression, Parameters, Predicate},
    record::Record,
    schema::Schema,
};
use std::{fmt, marker::PhantomData};
use tracing::debug;

///
/// Filterable
///
/// A record type with a fixed schema. Implementors usually keep the schema
/// in a `LazyLock` and expose fields through `Record::field`.
///

pub trait Filterable: Record {
    fn schema() -> &'static Schema;
}

///
/// Filter
///
/// A query bound to one `Filterable` type. The expression is built eagerly;
/// compiling it is a separate, fallible step.
///

pub struct Filter<T> {
    expression: Expression,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Filterable> Filter<T> {
    /// Build from a raw query string with the default configuration.
    #[must_use]
    pub fn new(query: &str) -> Self {
        Self::with_config(query, &FilterConfig::default())
    }

    #[must_use]
    pub fn with_config(query: &str, config: &FilterConfig) -> Self {
        let params = query_string::parse(query);

        Self::from_parameters(&params, config)
    }

    /// Build from already-decoded parameters (for hosts whose web framework
    /// has parsed the query string).
    #[must_use]
    pub fn from_parameters(params: &Parameters, config: &FilterConfig) -> Self {
        Self {
            expression: query::build(T::schema(), params, config),
            _marker: PhantomData,
        }
    }

    #[must_use]
    pub const fn expression(&self) -> &Expression {
        &self.expression
    }

    pub fn compile(&self) -> Result<Predicate, Error> {
        Ok(query::compile(&self.expression, T::schema())?)
    }

    /// Compile, then keep only the items the predicate accepts.
    pub fn apply<I>(&self, items: I) -> Result<impl Iterator<Item = I::Item>, Error>
    where
        I: IntoIterator,
        I::Item: Record,
    {
        let predicate = self.compile()?;
        debug!(
            schema = %T::schema().name,
            expression = predicate.expression().unwrap_or_default(),
            "applying filter"
        );

        Ok(items
            .into_iter()
            .filter(move |item| predicate.matches(item)))
    }
}

impl<T> fmt::Debug for Filter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter")
            .field("expression", &self.expression)
            .finish()
    }
}

impl<T> Clone for Filter<T> {
    fn clone(&self) -> Self {
        Self {
            expression: self.expression.clone(),
            _marker: PhantomData,
        }
    }
}

/// Renders the expression string; empty when nothing survived.
impl<T> fmt::Display for Filter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expression)
    }
}

/// Compile a raw query string for `T` with the default configuration.
pub fn compile<T: Filterable>(query: &str) -> Result<Predicate, Error> {
    Filter::<T>::new(query).compile()
}
