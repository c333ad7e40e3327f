//! Collaborator contracts: the link graph, the embedding cache, hub
//! membership, and the cooperative cancellation signal.

use std::collections::{BTreeSet, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::ProviderError;

/// Trait for hyperlink graphs that can be explored one page at a time.
///
/// # Contract
///
/// - `neighbors` returns outgoing-link titles already filtered for
///   link-worthiness. Order is preserved but carries no meaning.
/// - Lookups use the caller's casing verbatim; normalization is the
///   search's concern, not the provider's.
pub trait GraphProvider: Send + Sync {
    /// Whether a page with this title exists.
    fn exists(&self, title: &str) -> bool;

    /// The provider's canonical spelling of `title`, if the page exists.
    ///
    /// The default echoes the input for providers without a canonical form.
    fn canonical_title(&self, title: &str) -> Option<String> {
        self.exists(title).then(|| title.to_string())
    }

    /// Outgoing-link titles of the page.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] if the page is unknown or the backend
    /// cannot be reached.
    fn neighbors(&self, title: &str) -> Result<Vec<String>, ProviderError>;
}

/// Trait for title embedding caches.
///
/// Vectors returned by `get` are unit-norm. Fills are idempotent: encoding a
/// title twice stores an equal vector.
pub trait EmbeddingProvider: Send + Sync {
    /// Fill any missing cache entries for `titles`.
    ///
    /// Individual encoding failures are tolerated; those titles simply stay
    /// unknown. A call where every title is cached leaves the cache unchanged.
    fn ensure(&self, titles: &[String]);

    /// Cached unit vector for `title`, or `None` if unknown.
    fn get(&self, title: &str) -> Option<Arc<[f32]>>;
}

/// Membership test for curated "hub" pages.
pub trait HubSet: Send + Sync {
    fn is_hub(&self, title: &str) -> bool;
}

/// Hub set with no members.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHubs;

impl HubSet for NoHubs {
    fn is_hub(&self, _title: &str) -> bool {
        false
    }
}

impl HubSet for BTreeSet<String> {
    fn is_hub(&self, title: &str) -> bool {
        self.contains(title)
    }
}

impl HubSet for HashSet<String> {
    fn is_hub(&self, title: &str) -> bool {
        self.contains(title)
    }
}

/// Cooperative cancellation flag shared between a run and its controller.
///
/// Clones share the same flag. The engine clears it when a run starts; the
/// search loop polls it once per iteration.
#[derive(Debug, Clone, Default)]
pub struct CancelSignal {
    flag: Arc<AtomicBool>,
}

impl CancelSignal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of the in-flight run.
    pub fn set(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Reset the flag for a new run.
    pub fn clear(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_set(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}
