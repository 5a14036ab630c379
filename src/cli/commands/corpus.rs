//! Corpus Command
//!
//! Build a version fingerprint corpus for an npm package and write it as
//! JSON.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::info;

use crate::cli::output::Output;
use crate::config::Config;
use crate::corpus::{CorpusBuilder, NpmRegistry};
use crate::types::Result;

pub struct CorpusOptions {
    pub package: String,
    /// Explicit versions to fingerprint; empty means sample from the registry
    pub versions: Vec<String>,
    /// Sample size when no explicit versions are given
    pub sample: Option<usize>,
    pub output: Option<PathBuf>,
    pub keep_workspace: bool,
    pub include_prerelease: bool,
}

pub async fn run(config: &Config, options: CorpusOptions) -> Result<()> {
    let out = Output::new();

    let registry = NpmRegistry::with_bin(config.registry.npm_bin.clone());
    let mut builder = CorpusBuilder::new(registry)
        .with_limit(Some(config.fingerprint.string_limit))
        .main_only(config.fingerprint.main_only);
    if options.include_prerelease || !config.registry.ignore_prerelease {
        builder = builder.include_prerelease(true);
    }
    if options.keep_workspace || config.registry.keep_workspace {
        builder = builder.keep_workspace(true);
    }

    let versions = if options.versions.is_empty() && options.sample.is_some() {
        builder
            .sample_versions(&options.package, options.sample)
            .await?
    } else {
        options.versions
    };

    out.section(&format!("Building corpus for {}", options.package));
    let corpus = builder.build(&options.package, versions).await?;

    let collected = corpus
        .versions
        .values()
        .filter(|strings| !strings.is_empty())
        .count();
    info!(
        package = %options.package,
        versions = corpus.version_order.len(),
        collected,
        "corpus built"
    );

    let output_path = options
        .output
        .unwrap_or_else(|| PathBuf::from(format!("{}.corpus.json", sanitize(&options.package))));
    let json = serde_json::to_string_pretty(&corpus)?;
    fs::write(&output_path, json).await?;

    out.success(&format!(
        "{} versions fingerprinted ({} with strings), written to {}",
        corpus.version_order.len(),
        collected,
        output_path.display()
    ));
    Ok(())
}

/// List (and optionally sample) the registry versions a corpus run would use
pub async fn list_versions(
    config: &Config,
    package: &str,
    sample: Option<usize>,
    include_prerelease: bool,
) -> Result<()> {
    let registry = NpmRegistry::with_bin(config.registry.npm_bin.clone());
    let builder = CorpusBuilder::new(registry)
        .include_prerelease(include_prerelease || !config.registry.ignore_prerelease);

    let versions = builder.sample_versions(package, sample).await?;
    for version in &versions {
        println!("{}", version);
    }
    info!(package, count = versions.len(), "versions listed");
    Ok(())
}

/// Scoped package names contain `/`, which is unusable in a filename
fn sanitize(package: &str) -> String {
    package.replace('/', "__")
}

pub async fn load_corpus(path: &Path) -> Result<crate::types::VersionCorpus> {
    let raw = fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&raw)?)
}
