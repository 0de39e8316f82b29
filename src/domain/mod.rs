//! Domain layer: scanning rules and the component tree
//!
//! This layer is independent of external concerns (no file access, no CLI, no config loading).

pub mod error;
pub mod node;
pub mod resolver;
pub mod scanner;
pub mod tags;

pub use error::DomainError;
pub use node::{ComponentNode, Expansion};
pub use resolver::{ImportResolver, MatchMode};
pub use scanner::{LineKind, LineScanner, ScannedSource, DEFAULT_EXTENSIONS};
pub use tags::{TagExtractor, HTML_ELEMENTS};
