//! BundleScope - Web Bundle and Framework Fingerprinting
//!
//! Identifies which npm packages (and which versions) a site's JavaScript
//! bundles were built from, and which front-end framework a page runs, from
//! static artifacts alone.
//!
//! ## Core Features
//!
//! - **Source Graph Resolution**: concurrent import-graph walking with
//!   Node-style module resolution, via tree-sitter parsing of JS/TS
//! - **Notable String Fingerprints**: long string literals as per-version
//!   package signatures
//! - **Version Corpus Builder**: installs sampled versions of a package
//!   side by side and fingerprints each one
//! - **Bundle Matching**: ranks corpus versions by fingerprint overlap with
//!   an unknown bundle
//! - **Static Framework Detection**: HTML/JS marker scans with
//!   version-by-proximity heuristics for React, Angular, AngularJS, and Vue
//!
//! ## Quick Start
//!
//! ```ignore
//! use bundlescope::corpus::{CorpusBuilder, NpmRegistry};
//! use bundlescope::corpus::rank_versions;
//!
//! let builder = CorpusBuilder::new(NpmRegistry::new());
//! let corpus = builder.build("react", versions).await?;
//! let ranking = rank_versions(&bundle_content, &corpus);
//! ```
//!
//! ## Modules
//!
//! - [`analyzer`]: tree-sitter parsing, string extraction, module resolution
//! - [`corpus`]: package installation, fingerprinting, and matching
//! - [`detector`]: static framework detection over fetched page sources
//! - [`config`]: layered TOML configuration

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod constants;
pub mod corpus;
pub mod detector;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{Config, ConfigLoader};

// Error Types
pub use types::{Result, ScopeError};

// Corpus pipeline
pub use corpus::{CorpusBuilder, NpmRegistry, PackageRegistry, rank_versions};

// Detection
pub use detector::{merge_outputs, scan};
pub use types::{ConfidenceLevel, DetectorOutput, SpaInfo, SpaType};
