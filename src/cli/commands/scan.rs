//! Scan Command
//!
//! Run the static framework detector over saved page sources (HTML and JS
//! files fetched from a site) and report what it finds.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, info};
use url::Url;

use crate::cli::output::Output;
use crate::config::Config;
use crate::detector::{is_likely_first_party, is_spa, scan};
use crate::types::{PageSource, Result};

pub async fn run(config: &Config, files: &[PathBuf], host: &str, format: &str) -> Result<()> {
    let out = Output::new();

    let mut sources = Vec::with_capacity(files.len());
    for file in files {
        let content = fs::read_to_string(file).await?;
        let url = file_url(file).await?;

        if config.detector.first_party_only && !is_likely_first_party(&url, host) {
            debug!("skipping third-party source {}", url);
            continue;
        }
        sources.push(PageSource::new(&url, &content));
    }

    let output = scan(&sources, host);
    info!(host, sources = sources.len(), frameworks = output.len(), "scan complete");

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&output)?),
        _ => {
            out.section(&format!("Frameworks detected for {}", host));
            if output.is_empty() {
                out.info("no framework evidence found");
            }
            for (spa_type, spa_info) in &output {
                out.detection(
                    spa_type.as_str(),
                    spa_info.version.as_deref(),
                    &format!(
                        "{:?} confidence, via {}",
                        spa_info.confidence, spa_info.reason_url
                    ),
                );
            }
            if is_spa(&sources, host, &output, false) {
                out.info("site looks like a single-page app");
            }
        }
    }
    Ok(())
}

/// file:// URL for a local saved source, so the URL-shape classifiers see
/// the real filename
async fn file_url(path: &Path) -> Result<String> {
    let absolute = fs::canonicalize(path).await?;
    match Url::from_file_path(&absolute) {
        Ok(url) => Ok(url.to_string()),
        Err(()) => Ok(format!("file://{}", absolute.display())),
    }
}
