//! Speedrun Harness: concrete collaborators for `speedrun_search` and the
//! `speedrun` command-line surface.
//!
//! The harness does NOT implement search logic; it supplies a link graph,
//! an embedding cache, and a hub set, then hands them to the engine.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod embedding;
pub mod fixture;
pub mod hubs;
pub mod report;
pub mod runner;
pub mod worlds;
