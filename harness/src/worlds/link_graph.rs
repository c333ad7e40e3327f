//! `InMemoryLinkGraph`: a fully materialized link graph for fixtures,
//! tests, and benchmarks.
//!
//! Titles resolve case- and padding-insensitively; the first spelling seen
//! for a title becomes its canonical form. Every link target is itself a
//! page (with no outgoing links unless it is added explicitly).

use std::collections::{BTreeMap, BTreeSet, HashMap};

use speedrun_search::contract::GraphProvider;
use speedrun_search::error::ProviderError;
use speedrun_search::title::normalize;

#[derive(Debug, Clone, Default)]
pub struct InMemoryLinkGraph {
    /// Canonical title → outgoing links, in insertion order.
    pages: BTreeMap<String, Vec<String>>,
    /// Normalized title → canonical title.
    canonical: HashMap<String, String>,
    /// Canonical titles whose neighbor fetch fails.
    unreachable: BTreeSet<String>,
}

impl InMemoryLinkGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from `(page, links)` pairs.
    pub fn from_edges<I, T, L, S>(edges: I) -> Self
    where
        I: IntoIterator<Item = (T, L)>,
        T: Into<String>,
        L: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut graph = Self::new();
        for (title, links) in edges {
            graph.add_page(title, links);
        }
        graph
    }

    /// Add (or extend) a page and register its link targets as pages.
    pub fn add_page<T, L, S>(&mut self, title: T, links: L)
    where
        T: Into<String>,
        L: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let title = self.register(title.into());
        let links: Vec<String> = links
            .into_iter()
            .map(|link| {
                let link = link.into();
                self.register(link.clone());
                link
            })
            .collect();
        self.pages.entry(title).or_default().extend(links);
    }

    /// Make neighbor fetches for `title` fail with
    /// [`ProviderError::Unavailable`]. Unknown titles are registered first.
    pub fn mark_unreachable(&mut self, title: &str) {
        let canonical = self.register(title.to_string());
        self.unreachable.insert(canonical);
    }

    fn register(&mut self, title: String) -> String {
        let key = normalize(&title);
        if let Some(existing) = self.canonical.get(&key) {
            return existing.clone();
        }
        self.canonical.insert(key, title.clone());
        self.pages.entry(title.clone()).or_default();
        title
    }

    fn resolve(&self, title: &str) -> Option<&String> {
        self.canonical.get(&normalize(title))
    }

    /// Number of distinct pages, link targets included.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Outgoing links of a page, unfiltered.
    #[must_use]
    pub fn links(&self, title: &str) -> Option<&[String]> {
        self.resolve(title)
            .and_then(|canonical| self.pages.get(canonical))
            .map(Vec::as_slice)
    }

    /// Whether `from` links to `to` (both resolved insensitively).
    #[must_use]
    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        let target = normalize(to);
        self.links(from)
            .is_some_and(|links| links.iter().any(|link| normalize(link) == target))
    }
}

impl GraphProvider for InMemoryLinkGraph {
    fn exists(&self, title: &str) -> bool {
        self.resolve(title).is_some()
    }

    fn canonical_title(&self, title: &str) -> Option<String> {
        self.resolve(title).cloned()
    }

    fn neighbors(&self, title: &str) -> Result<Vec<String>, ProviderError> {
        let Some(canonical) = self.resolve(title) else {
            return Err(ProviderError::PageNotFound {
                title: title.to_string(),
            });
        };
        if self.unreachable.contains(canonical) {
            return Err(ProviderError::Unavailable {
                detail: format!("{canonical} is marked unreachable"),
            });
        }
        Ok(self.pages.get(canonical).cloned().unwrap_or_default())
    }
}
