//! Shared query infrastructure: the [`Query`] trait.

use url::Url;

/// Trait implemented by the per-exchange query builders. Each query targets a
/// single trading day and knows how to render that day in its feed's format.
pub trait Query {
    /// Appends this query's parameters to the given URL, returning the modified URL.
    fn add_to_url(&self, url: &Url) -> Url;
}
