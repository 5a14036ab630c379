//! Core Types
//!
//! Shared data model: error types, detection output contract, and the
//! persisted corpus artifact.

pub mod corpus;
pub mod detection;
pub mod error;

pub use corpus::{MatchOutcome, VersionCorpus};
pub use detection::{
    ConfidenceLevel, DetectorOutput, PageSource, SPA_TYPES, SpaInfo, SpaType,
};
pub use error::{Result, ScopeError};
