//! Link-worthiness filter and the graph wrapper that applies it.

use serde::{Deserialize, Serialize};

use speedrun_search::contract::GraphProvider;
use speedrun_search::error::ProviderError;

/// Cheap title filter that drops links unlikely to be useful hops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkFilter {
    /// Longest accepted title, in characters.
    pub max_chars: usize,
    /// Fewest alphabetic characters an accepted title may contain.
    pub min_alphabetic: usize,
    /// Reject namespace-qualified titles (anything containing `:`).
    pub reject_namespaced: bool,
}

impl LinkFilter {
    #[must_use]
    pub fn accepts(&self, title: &str) -> bool {
        if self.reject_namespaced && title.contains(':') {
            return false;
        }
        if title.chars().count() > self.max_chars {
            return false;
        }
        title.chars().filter(|c| c.is_alphabetic()).count() >= self.min_alphabetic
    }
}

impl Default for LinkFilter {
    fn default() -> Self {
        Self {
            max_chars: 30,
            min_alphabetic: 3,
            reject_namespaced: true,
        }
    }
}

/// Graph provider that filters another provider's neighbor lists.
///
/// Existence checks and canonical titles pass through unfiltered, so a
/// namespaced start or end page still resolves.
#[derive(Debug, Clone)]
pub struct FilteredGraph<G> {
    inner: G,
    filter: LinkFilter,
}

impl<G> FilteredGraph<G> {
    pub fn new(inner: G, filter: LinkFilter) -> Self {
        Self { inner, filter }
    }

    pub fn inner(&self) -> &G {
        &self.inner
    }

    pub fn filter(&self) -> LinkFilter {
        self.filter
    }
}

impl<G: GraphProvider> GraphProvider for FilteredGraph<G> {
    fn exists(&self, title: &str) -> bool {
        self.inner.exists(title)
    }

    fn canonical_title(&self, title: &str) -> Option<String> {
        self.inner.canonical_title(title)
    }

    fn neighbors(&self, title: &str) -> Result<Vec<String>, ProviderError> {
        let mut links = self.inner.neighbors(title)?;
        links.retain(|link| self.filter.accepts(link));
        Ok(links)
    }
}
