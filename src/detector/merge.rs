//! Observation Merging
//!
//! Evidence for one framework arrives from several sources (multiple page
//! files, static and dynamic passes). Merging is monotone: a versioned
//! entry is never overwritten by an unversioned or weaker one, and a
//! version, once acquired, is sticky.

use crate::types::{DetectorOutput, SpaInfo, SpaType};

/// Merge one observation into the output map.
///
/// Replace when no entry exists, or when the new observation is at least
/// as confident and the stored entry has no version. Otherwise, if the
/// stored entry lacks a version and the new one has it, graft the version
/// (and its provenance URL) onto the stored entry without touching its
/// confidence.
pub fn merge_info(output: &mut DetectorOutput, spa_type: SpaType, info: SpaInfo) {
    match output.get_mut(&spa_type) {
        None => {
            output.insert(spa_type, info);
        }
        Some(existing) => {
            if info.confidence >= existing.confidence && existing.version.is_none() {
                *existing = info;
            } else if existing.version.is_none() && info.version.is_some() {
                existing.version = info.version;
                if !info.reason_url.is_empty() {
                    existing.reason_url = info.reason_url;
                }
                // Confidence level inherits the stored level
            }
        }
    }
}

/// Combine two independently produced outputs (e.g. static scan + dynamic
/// probe): apply the single-observation rule per framework key of `second`
/// onto a copy of `first`.
pub fn merge_outputs(first: &DetectorOutput, second: &DetectorOutput) -> DetectorOutput {
    let mut output = first.clone();
    for (spa_type, info) in second {
        merge_info(&mut output, *spa_type, info.clone());
    }
    output
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ConfidenceLevel;

    fn info(
        version: Option<&str>,
        url: &str,
        confidence: ConfidenceLevel,
        is_static: bool,
    ) -> SpaInfo {
        SpaInfo {
            version: version.map(str::to_string),
            reason_url: url.to_string(),
            confidence,
            is_static,
        }
    }

    #[test]
    fn test_first_observation_inserted() {
        let mut output = DetectorOutput::new();
        merge_info(
            &mut output,
            SpaType::React,
            info(None, "a", ConfidenceLevel::Low, true),
        );
        assert_eq!(output[&SpaType::React].confidence, ConfidenceLevel::Low);
    }

    #[test]
    fn test_equal_confidence_upgrades_unversioned() {
        let mut output = DetectorOutput::new();
        merge_info(
            &mut output,
            SpaType::React,
            info(None, "a", ConfidenceLevel::Medium, true),
        );
        merge_info(
            &mut output,
            SpaType::React,
            info(Some("16.8.0"), "b", ConfidenceLevel::Medium, true),
        );
        let stored = &output[&SpaType::React];
        assert_eq!(stored.version.as_deref(), Some("16.8.0"));
        assert_eq!(stored.reason_url, "b");
    }

    #[test]
    fn test_version_grafted_from_weaker_observation() {
        let mut output = DetectorOutput::new();
        merge_info(
            &mut output,
            SpaType::Vue,
            info(None, "a", ConfidenceLevel::High, false),
        );
        merge_info(
            &mut output,
            SpaType::Vue,
            info(Some("2.6.11"), "b", ConfidenceLevel::Medium, true),
        );
        let stored = &output[&SpaType::Vue];
        // Version and provenance grafted; confidence stays High
        assert_eq!(stored.version.as_deref(), Some("2.6.11"));
        assert_eq!(stored.reason_url, "b");
        assert_eq!(stored.confidence, ConfidenceLevel::High);
        assert!(!stored.is_static);
    }

    #[test]
    fn test_versioned_entry_is_sticky() {
        let mut output = DetectorOutput::new();
        merge_info(
            &mut output,
            SpaType::Angular,
            info(Some("11.2.4"), "a", ConfidenceLevel::High, true),
        );
        merge_info(
            &mut output,
            SpaType::Angular,
            info(None, "b", ConfidenceLevel::Medium, false),
        );
        let stored = &output[&SpaType::Angular];
        assert_eq!(stored.version.as_deref(), Some("11.2.4"));
        assert_eq!(stored.confidence, ConfidenceLevel::High);
        assert_eq!(stored.reason_url, "a");
    }

    #[test]
    fn test_merge_outputs_idempotent() {
        let mut a = DetectorOutput::new();
        merge_info(
            &mut a,
            SpaType::React,
            info(Some("15.6.2"), "a", ConfidenceLevel::Medium, true),
        );
        merge_info(
            &mut a,
            SpaType::Vue,
            info(None, "b", ConfidenceLevel::Medium, true),
        );

        assert_eq!(merge_outputs(&a, &a), a);
    }

    #[test]
    fn test_merge_with_empty_is_noop() {
        let mut a = DetectorOutput::new();
        merge_info(
            &mut a,
            SpaType::React,
            info(Some("16.0.0"), "a", ConfidenceLevel::High, false),
        );
        let empty = DetectorOutput::new();
        assert_eq!(merge_outputs(&a, &empty), a);
        assert_eq!(merge_outputs(&empty, &a), a);
    }
}
