//! Deterministic synthetic link graphs for tests and benchmarks.

use super::link_graph::InMemoryLinkGraph;

/// Title of the `index`-th page of a chain.
#[must_use]
pub fn chain_title(index: usize) -> String {
    format!("Chain page {index}")
}

/// `Chain page 0 → Chain page 1 → … → Chain page {len-1}`, no other edges.
#[must_use]
pub fn chain(len: usize) -> InMemoryLinkGraph {
    let mut graph = InMemoryLinkGraph::new();
    for i in 0..len {
        let links = if i + 1 < len {
            vec![chain_title(i + 1)]
        } else {
            Vec::new()
        };
        graph.add_page(chain_title(i), links);
    }
    graph
}

/// Title of a spoke in [`star`].
#[must_use]
pub fn spoke_title(index: usize) -> String {
    format!("Spoke {index:05}")
}

/// One hub page linking to `spokes` leaf pages.
#[must_use]
pub fn star(hub: &str, spokes: usize) -> InMemoryLinkGraph {
    let spokes: Vec<String> = (0..spokes).map(spoke_title).collect();
    InMemoryLinkGraph::from_edges([(hub.to_string(), spokes)])
}

/// Title of page `index` in layer `layer` of [`layered`].
#[must_use]
pub fn layer_title(layer: usize, index: usize) -> String {
    format!("Layer {layer} page {index}")
}

/// A layered graph: `layers` layers of `width` pages, each page linking to
/// `fanout` pages of the next layer chosen by a fixed stride.
///
/// With `fanout >= 1` every page reaches the last layer in exactly
/// `layers - 1 - layer` hops.
#[must_use]
pub fn layered(layers: usize, width: usize, fanout: usize) -> InMemoryLinkGraph {
    let mut graph = InMemoryLinkGraph::new();
    if width == 0 {
        return graph;
    }
    let stride = width / fanout.max(1) + 1;
    for layer in 0..layers {
        for index in 0..width {
            let links: Vec<String> = if layer + 1 < layers {
                (0..fanout)
                    .map(|j| layer_title(layer + 1, (index * 7 + j * stride) % width))
                    .collect()
            } else {
                Vec::new()
            };
            graph.add_page(layer_title(layer, index), links);
        }
    }
    graph
}
