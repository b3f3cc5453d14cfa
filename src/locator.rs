//! Pluggable discovery strategies.

use crate::context::Context;
use thiserror::Error;

/// Failure modes of a discovery strategy.
///
/// Locators are expected to skip individual registrations that fail to
/// resolve (logging them at trace level) and only return `Err` when the whole
/// attempt is unusable. The cache treats any `Err` as "no providers found"
/// rather than surfacing it to callers.
#[derive(Debug, Error)]
pub enum LocateError {
    /// A single candidate registration could not be resolved.
    #[error("provider registration `{name}` failed to resolve")]
    Registration {
        name: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// The discovery attempt failed wholesale.
    #[error("discovery failed: {0}")]
    Failed(String),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// A discovery strategy: given a caller scope, produce the ordered provider
/// list visible to that scope.
///
/// Invoked by the cache only on a miss. Invocations are treated as idempotent
/// and side-effect-free: under a concurrent miss race the strategy may run
/// more than once for the same scope and all but the last result discarded.
pub trait Locator: Send + Sync {
    type Provider: Send + Sync;

    fn discover(&self, scope: Option<&Context>) -> Result<Vec<Self::Provider>, LocateError>;
}

/// Fixed-list strategy: every scope sees the same providers.
pub struct StaticLocator<P> {
    providers: Vec<P>,
}

impl<P> StaticLocator<P> {
    pub fn new(providers: Vec<P>) -> Self {
        Self { providers }
    }
}

impl<P: Clone + Send + Sync> Locator for StaticLocator<P> {
    type Provider = P;

    fn discover(&self, _scope: Option<&Context>) -> Result<Vec<P>, LocateError> {
        Ok(self.providers.clone())
    }
}

/// Adapter turning a closure into a [`Locator`]; see [`locate_fn`].
pub struct LocateFn<F> {
    f: F,
}

/// Wrap a closure as a discovery strategy.
///
/// ```
/// use discovery_cache::{locate_fn, DiscoveryCache};
///
/// let cache = DiscoveryCache::new(locate_fn(|_| Ok(vec!["p1", "p2"])));
/// assert_eq!(cache.lookup(None).len(), 2);
/// ```
pub fn locate_fn<P, F>(f: F) -> LocateFn<F>
where
    P: Send + Sync,
    F: Fn(Option<&Context>) -> Result<Vec<P>, LocateError> + Send + Sync,
{
    LocateFn { f }
}

impl<P, F> Locator for LocateFn<F>
where
    P: Send + Sync,
    F: Fn(Option<&Context>) -> Result<Vec<P>, LocateError> + Send + Sync,
{
    type Provider = P;

    fn discover(&self, scope: Option<&Context>) -> Result<Vec<P>, LocateError> {
        (self.f)(scope)
    }
}
