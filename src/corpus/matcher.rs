//! Bundle Fingerprint Matching
//!
//! Tests an unknown blob's notable strings against reference fingerprints.
//! Blob extraction is uncapped: losing a candidate string to eviction here
//! would silently cost matches.

use std::collections::BTreeSet;
use std::path::Path;

use crate::analyzer::strings::{NotableStringSet, collect_notable_strings};
use crate::types::{MatchOutcome, VersionCorpus};

/// Extract every notable string from an unknown blob, unbounded
pub fn bundle_strings(content: &str) -> BTreeSet<String> {
    let mut set = NotableStringSet::with_capacity(None);
    // The blob is JS by assumption; a non-JS blob just yields few strings
    collect_notable_strings(content, Path::new("bundle.js"), &mut set);
    set.into_set()
}

/// Match a blob against one reference string set.
///
/// `matched` and `unmatched` partition the reference set; `extra` is what
/// the blob carries beyond the reference.
pub fn match_against_set(content: &str, reference: &BTreeSet<String>) -> MatchOutcome {
    let blob = bundle_strings(content);

    let mut matched = BTreeSet::new();
    let mut unmatched = BTreeSet::new();
    for s in reference {
        if blob.contains(s) {
            matched.insert(s.clone());
        } else {
            unmatched.insert(s.clone());
        }
    }
    let extra = blob.difference(&matched).cloned().collect();

    MatchOutcome {
        matched,
        unmatched,
        extra,
    }
}

/// Match counts per corpus version, best first.
///
/// Ranking only; no single-best-match policy is imposed here. Ties keep
/// the corpus's version order.
pub fn rank_versions(content: &str, corpus: &VersionCorpus) -> Vec<(String, usize)> {
    let blob = bundle_strings(content);

    let mut counts: Vec<(String, usize)> = corpus
        .version_order
        .iter()
        .filter_map(|version| {
            corpus.versions.get(version).map(|strings| {
                let hits = strings.iter().filter(|s| blob.contains(*s)).count();
                (version.clone(), hits)
            })
        })
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(strings: &[&str]) -> BTreeSet<String> {
        strings.iter().map(|s| s.to_string()).collect()
    }

    const BUNDLE: &str = r#"
        var a = "shared fingerprint present in both sides";
        var b = "a bundle-only string nobody referenced";
        var tiny = "short";
    "#;

    #[test]
    fn test_match_partitions_reference() {
        let reference = reference(&[
            "shared fingerprint present in both sides",
            "reference-only string the bundle lacks",
        ]);
        let outcome = match_against_set(BUNDLE, &reference);

        assert!(outcome.matched.contains("shared fingerprint present in both sides"));
        assert!(outcome.unmatched.contains("reference-only string the bundle lacks"));
        assert!(outcome.extra.contains("a bundle-only string nobody referenced"));

        // matched ∪ unmatched == reference, matched ⊆ both sides
        let union: BTreeSet<String> = outcome.matched.union(&outcome.unmatched).cloned().collect();
        assert_eq!(union, reference);
        assert!(outcome.matched.is_subset(&reference));
        assert!(outcome.matched.is_subset(&bundle_strings(BUNDLE)));
        assert!(outcome.matched.is_disjoint(&outcome.extra));
    }

    #[test]
    fn test_short_strings_never_match() {
        let outcome = match_against_set(BUNDLE, &reference(&["short"]));
        assert!(outcome.matched.is_empty());
        assert_eq!(outcome.unmatched.len(), 1);
    }

    #[test]
    fn test_rank_versions_orders_by_hits() {
        let mut corpus = VersionCorpus::new("pkg");
        corpus.version_order = vec!["1.0.0".to_string(), "2.0.0".to_string()];
        corpus.versions.insert(
            "1.0.0".to_string(),
            vec!["a string found nowhere in this bundle".to_string()],
        );
        corpus.versions.insert(
            "2.0.0".to_string(),
            vec!["shared fingerprint present in both sides".to_string()],
        );

        let ranking = rank_versions(BUNDLE, &corpus);
        assert_eq!(ranking[0], ("2.0.0".to_string(), 1));
        assert_eq!(ranking[1], ("1.0.0".to_string(), 0));
    }
}
