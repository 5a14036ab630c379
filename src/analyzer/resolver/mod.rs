//! Source Graph Resolution
//!
//! Entry-point-to-source-closure discovery: Node-style specifier resolution
//! plus a concurrent transitive walker over static imports.

pub mod node_resolve;
pub mod walker;

pub use node_resolve::resolve_module;
pub use walker::{ImportScan, ResolvedFiles, collect_imports};
