//! Common utilities for the Sprig HTML tree.
//!
//! This crate provides shared infrastructure used by the parser:
//! - **Warning System** - colored terminal output for lenient parse recoveries

pub mod warning;
