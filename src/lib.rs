//! reacttree: reconstruct a React component hierarchy from source files
//!
//! Layering follows domain → application → infrastructure → cli.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
