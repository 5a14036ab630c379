//! Fingerprinting Core Analysis
//!
//! The package-identification pipeline's leaf components:
//! - source parsing over a JS/TS-superset grammar
//! - notable-string extraction with bounded top-N-longest retention
//! - import-graph resolution to a package's own source closure

pub mod parser;
pub mod resolver;
pub mod strings;

pub use resolver::{ImportScan, ResolvedFiles, collect_imports, resolve_module};
pub use strings::{NotableStringSet, collect_notable_strings};
