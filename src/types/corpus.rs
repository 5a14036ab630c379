//! Corpus and Match Types
//!
//! [`VersionCorpus`] is the long-lived persisted artifact of a package
//! analysis run; [`MatchOutcome`] is the result of testing an unknown blob
//! against one reference string set.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Per-version notable-string fingerprints for one npm package.
///
/// `version_order` lists only the versions that actually installed, in the
/// order they were attempted; `versions` maps each of them to its collected
/// string list. The JSON shape is the fingerprint database format consumed
/// by later matching runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionCorpus {
    #[serde(rename = "packageName")]
    pub package_name: String,

    #[serde(rename = "versionOrder")]
    pub version_order: Vec<String>,

    pub versions: BTreeMap<String, Vec<String>>,

    #[serde(rename = "generatedAt", default = "Utc::now")]
    pub generated_at: DateTime<Utc>,
}

impl VersionCorpus {
    pub fn new(package_name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            version_order: Vec::new(),
            versions: BTreeMap::new(),
            generated_at: Utc::now(),
        }
    }

    /// String set recorded for one version, if that version installed
    pub fn strings_for(&self, version: &str) -> Option<BTreeSet<String>> {
        self.versions
            .get(version)
            .map(|list| list.iter().cloned().collect())
    }
}

/// Result of testing a blob's notable strings against a reference set.
///
/// `matched` is present in both; `unmatched` only in the reference;
/// `extra` only in the blob. `matched` and `unmatched` always partition
/// the reference set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub matched: BTreeSet<String>,
    pub unmatched: BTreeSet<String>,
    pub extra: BTreeSet<String>,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corpus_json_shape() {
        let mut corpus = VersionCorpus::new("react-dom");
        corpus.version_order.push("16.8.0".to_string());
        corpus.versions.insert(
            "16.8.0".to_string(),
            vec!["Minified React error #%s; visit".to_string()],
        );

        let json = serde_json::to_value(&corpus).unwrap();
        assert_eq!(json["packageName"], "react-dom");
        assert_eq!(json["versionOrder"][0], "16.8.0");
        assert!(json["versions"]["16.8.0"].is_array());
    }

    #[test]
    fn test_corpus_accepts_artifact_without_timestamp() {
        // Fingerprint databases written by other tooling may omit generatedAt.
        let raw = r#"{"packageName":"vue","versionOrder":["2.6.11"],"versions":{"2.6.11":[]}}"#;
        let corpus: VersionCorpus = serde_json::from_str(raw).unwrap();
        assert_eq!(corpus.package_name, "vue");
        assert_eq!(corpus.strings_for("2.6.11"), Some(BTreeSet::new()));
        assert_eq!(corpus.strings_for("3.0.0"), None);
    }
}
