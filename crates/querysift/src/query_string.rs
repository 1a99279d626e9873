//! Raw query-string decoding.
use querysift_core::query::Parameters;
use tracing::trace;
use url::form_urlencoded;

/// Decode an `application/x-www-form-urlencoded` query string.
///
/// A leading `?` is tolerated. Keys are kept verbatim after percent-decoding;
/// a key repeated in the query keeps every occurrence, so `a=1&a=2` builds
/// like `a=1,2` whatever the value delimiter.
#[must_use]
pub fn parse(query: &str) -> Parameters {
    let query = query.strip_prefix('?').unwrap_or(query);

    let mut params = Parameters::new();
    for (name, value) in form_urlencoded::parse(query.as_bytes()) {
        params.insert(name, value);
    }
    trace!(count = params.len(), "decoded query string");

    params
}

///
/// TESTS
///
