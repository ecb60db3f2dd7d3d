//! # Row access: the `profiles` and `elevators` tables
//!
//! Plain REST calls under `/rest/v1`. Filters use the `column=eq.value`
//! syntax and writes ask for `Prefer: return=representation` so the affected
//! rows come back; an empty representation means no row matched (either it
//! does not exist or row-level security hides it) and becomes
//! [`ApiError::NotFound`](crate::ApiError::NotFound).

mod elevators;
mod profiles;

use reqwest::{RequestBuilder, Url};

pub(crate) const RETURN_REPRESENTATION: &str = "return=representation";

/// `?<column>=eq.<value>` on a table URL.
pub(crate) fn eq_filter(mut url: Url, column: &str, value: &str) -> Url {
    url.query_pairs_mut().append_pair(column, &format!("eq.{value}"));
    url
}

pub(crate) fn returning(req: RequestBuilder) -> RequestBuilder {
    req.header("Prefer", RETURN_REPRESENTATION)
}

/// The single row a filtered write or read is expected to touch.
pub(crate) fn single<T>(rows: Vec<T>, what: &str) -> Result<T, crate::ApiError> {
    rows.into_iter()
        .next()
        .ok_or_else(|| crate::ApiError::NotFound(what.to_string()))
}
