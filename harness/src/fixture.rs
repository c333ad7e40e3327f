//! JSON fixtures: link graphs and search policies read from disk.
//!
//! A graph fixture looks like:
//!
//! ```json
//! {
//!   "pages": { "Rome": ["Italy", "Carthage"], "Italy": ["Rome"] },
//!   "unreachable": ["Carthage"]
//! }
//! ```
//!
//! Link targets without an entry in `pages` exist as pages with no links.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use speedrun_search::policy::SearchPolicy;

use crate::worlds::link_graph::InMemoryLinkGraph;

/// Failure to load a fixture or policy file.
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Serialized form of an in-memory link graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LinkFixture {
    pub pages: BTreeMap<String, Vec<String>>,
    /// Pages whose neighbor fetch fails.
    #[serde(default)]
    pub unreachable: Vec<String>,
}

impl LinkFixture {
    #[must_use]
    pub fn into_graph(self) -> InMemoryLinkGraph {
        let mut graph = InMemoryLinkGraph::from_edges(self.pages);
        for title in &self.unreachable {
            graph.mark_unreachable(title);
        }
        graph
    }
}

/// Read a [`LinkFixture`] from a JSON file.
///
/// # Errors
///
/// Returns [`FixtureError`] if the file cannot be read or parsed.
pub fn load_fixture(path: &Path) -> Result<LinkFixture, FixtureError> {
    read_json(path)
}

/// Read a [`SearchPolicy`] from a JSON file. Missing fields take their
/// defaults; the policy is not validated here.
///
/// # Errors
///
/// Returns [`FixtureError`] if the file cannot be read or parsed, including
/// unknown fields and negative time limits.
pub fn load_policy(path: &Path) -> Result<SearchPolicy, FixtureError> {
    read_json(path)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, FixtureError> {
    let text = fs::read_to_string(path).map_err(|source| FixtureError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| FixtureError::Json {
        path: path.to_path_buf(),
        source,
    })
}
