//! Detection Output Types
//!
//! The stable output contract of the framework detector: one optional
//! [`SpaInfo`] per framework tag. Serialized field names (`reasonURL`,
//! `isStatic`, numeric `confidence`) are consumed by downstream aggregation
//! and must not change.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Closed set of detectable front-end frameworks
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpaType {
    React,
    Angular,
    AngularJs,
    Vue,
}

/// All framework tags, in a fixed order
pub const SPA_TYPES: [SpaType; 4] = [
    SpaType::React,
    SpaType::Angular,
    SpaType::AngularJs,
    SpaType::Vue,
];

impl SpaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::React => "react",
            Self::Angular => "angular",
            Self::AngularJs => "angularjs",
            Self::Vue => "vue",
        }
    }
}

impl std::fmt::Display for SpaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ordinal confidence attached to each observation.
///
/// Medium is the ceiling when no version was extracted; High is reserved for
/// unambiguous version-bearing evidence (e.g. an `ng-version` HTML marker or
/// a runtime version field read by a dynamic probe).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum ConfidenceLevel {
    Low = 0,
    Medium = 1,
    High = 2,
}

impl From<ConfidenceLevel> for u8 {
    fn from(level: ConfidenceLevel) -> u8 {
        level as u8
    }
}

impl TryFrom<u8> for ConfidenceLevel {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Low),
            1 => Ok(Self::Medium),
            2 => Ok(Self::High),
            other => Err(format!("invalid confidence level: {}", other)),
        }
    }
}

/// One piece of framework evidence for a single site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaInfo {
    /// Extracted version, when one was found
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// URL of the source that produced this evidence
    #[serde(rename = "reasonURL")]
    pub reason_url: String,

    pub confidence: ConfidenceLevel,

    /// Textual evidence (true) vs runtime-probe evidence (false)
    #[serde(rename = "isStatic")]
    pub is_static: bool,
}

/// Per-site detection result: at most one entry per framework.
/// Absence of a key means "no evidence found".
pub type DetectorOutput = BTreeMap<SpaType, SpaInfo>;

/// One fetched source supplied by the crawling collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSource {
    pub url: String,
    pub content: String,
}

impl PageSource {
    pub fn new(url: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            content: content.into(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
