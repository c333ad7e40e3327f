//! Popular-pages hub set.
//!
//! Hub membership is read from the outgoing links of one listing page. The
//! list is fetched on the first membership query and then kept for the life
//! of the value; a failed or panicking fetch leaves the set empty rather
//! than retrying on every score.

use std::collections::BTreeSet;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::OnceLock;

use tracing::{debug, warn};

use speedrun_search::contract::{GraphProvider, HubSet};

use crate::worlds::filter::LinkFilter;

/// Listing page whose links define the hub set.
pub const POPULAR_PAGES_TITLE: &str = "Wikipedia:Popular_pages";

/// Lazily loaded set of popular page titles.
pub struct PopularPages<'a> {
    graph: &'a dyn GraphProvider,
    listing: String,
    filter: LinkFilter,
    pages: OnceLock<BTreeSet<String>>,
}

impl<'a> PopularPages<'a> {
    /// Hubs read from [`POPULAR_PAGES_TITLE`] with the default link filter.
    #[must_use]
    pub fn new(graph: &'a dyn GraphProvider) -> Self {
        Self::from_listing(graph, POPULAR_PAGES_TITLE, LinkFilter::default())
    }

    #[must_use]
    pub fn from_listing(graph: &'a dyn GraphProvider, listing: &str, filter: LinkFilter) -> Self {
        Self {
            graph,
            listing: listing.to_string(),
            filter,
            pages: OnceLock::new(),
        }
    }

    /// The loaded hub titles. Triggers the load on first use.
    pub fn pages(&self) -> &BTreeSet<String> {
        self.pages.get_or_init(|| self.load())
    }

    fn load(&self) -> BTreeSet<String> {
        let fetched = catch_unwind(AssertUnwindSafe(|| self.graph.neighbors(&self.listing)));
        match fetched {
            Ok(Ok(links)) => {
                let pages: BTreeSet<String> = links
                    .into_iter()
                    .filter(|link| self.filter.accepts(link))
                    .collect();
                debug!(listing = %self.listing, hubs = pages.len(), "hub set loaded");
                pages
            }
            Ok(Err(error)) => {
                warn!(listing = %self.listing, %error, "hub listing unavailable; no hubs");
                BTreeSet::new()
            }
            Err(_) => {
                warn!(listing = %self.listing, "hub listing provider panicked; no hubs");
                BTreeSet::new()
            }
        }
    }
}

impl HubSet for PopularPages<'_> {
    fn is_hub(&self, title: &str) -> bool {
        self.pages().contains(title)
    }
}
