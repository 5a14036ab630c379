//! Match Command
//!
//! Rank a corpus's versions by how many of their fingerprint strings a
//! bundle contains.

use std::collections::BTreeSet;
use std::path::Path;

use tokio::fs;
use tracing::info;

use super::corpus::load_corpus;
use crate::cli::output::Output;
use crate::corpus::{match_against_set, rank_versions};
use crate::types::Result;

pub async fn run(bundle_path: &Path, corpus_path: &Path, format: &str, detailed: bool) -> Result<()> {
    let out = Output::new();

    let content = fs::read_to_string(bundle_path).await?;
    let corpus = load_corpus(corpus_path).await?;
    info!(
        bundle = %bundle_path.display(),
        package = %corpus.package_name,
        versions = corpus.version_order.len(),
        "matching bundle"
    );

    let ranking = rank_versions(&content, &corpus);

    match format {
        "json" => {
            let entries: Vec<serde_json::Value> = ranking
                .iter()
                .map(|(version, hits)| {
                    serde_json::json!({ "version": version, "matches": hits })
                })
                .collect();
            let report = serde_json::json!({
                "packageName": corpus.package_name,
                "ranking": entries,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => {
            out.section(&format!("Match results for {}", corpus.package_name));
            if ranking.is_empty() {
                out.warning("corpus has no versions to match against");
                return Ok(());
            }
            for (version, hits) in &ranking {
                let reference = corpus
                    .versions
                    .get(version)
                    .map(|strings| strings.len())
                    .unwrap_or_default();
                println!("  {:>4}/{:<4} {}", hits, reference, version);
            }

            if detailed
                && let Some((best, _)) = ranking.first()
                && let Some(strings) = corpus.versions.get(best)
            {
                let reference: BTreeSet<String> = strings.iter().cloned().collect();
                let outcome = match_against_set(&content, &reference);
                out.section(&format!("Detail for best candidate {}", best));
                for s in &outcome.matched {
                    out.success(s);
                }
                for s in &outcome.unmatched {
                    out.warning(s);
                }
                out.info(&format!(
                    "{} strings in the bundle have no corpus counterpart",
                    outcome.extra.len()
                ));
            }
        }
    }
    Ok(())
}
