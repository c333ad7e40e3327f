//! Graph provider implementations for the harness.

pub mod filter;
pub mod link_graph;
pub mod synthetic;
