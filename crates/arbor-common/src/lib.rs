//! Common utilities for the arbor crates.
//!
//! This crate provides shared infrastructure used by the tree and the
//! tree-construction helpers:
//! - **Warning System** - colored terminal output for recoverable oddities

pub mod warning;
