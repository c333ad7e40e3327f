//! Shared helpers for cross-crate lock tests.

#![forbid(unsafe_code)]
