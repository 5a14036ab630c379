//! Configuration Types
//!
//! All configuration structures with sensible defaults.
//! Supports global (~/.config/bundlescope/) and project (.bundlescope/)
//! level configuration.

use serde::{Deserialize, Serialize};

use crate::constants::fingerprint::DEFAULT_NOTABLE_STRING_LIMIT;
use crate::constants::registry::DEFAULT_NPM_BIN;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// Fingerprint extraction settings
    pub fingerprint: FingerprintConfig,

    /// Package registry settings
    pub registry: RegistryConfig,

    /// Static detector settings
    pub detector: DetectorConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            fingerprint: FingerprintConfig::default(),
            registry: RegistryConfig::default(),
            detector: DetectorConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    /// Returns `ScopeError::Config` on validation failure.
    pub fn validate(&self) -> crate::types::Result<()> {
        if self.fingerprint.string_limit == 0 {
            return Err(crate::types::ScopeError::Config(
                "fingerprint string_limit must be greater than 0".to_string(),
            ));
        }

        if self.registry.npm_bin.trim().is_empty() {
            return Err(crate::types::ScopeError::Config(
                "registry npm_bin must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

// =============================================================================
// Fingerprint Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FingerprintConfig {
    /// Maximum notable strings retained per package version
    pub string_limit: usize,

    /// Follow only the manifest `main` entry point, skipping `exports`
    pub main_only: bool,
}

impl Default for FingerprintConfig {
    fn default() -> Self {
        Self {
            string_limit: DEFAULT_NOTABLE_STRING_LIMIT,
            main_only: false,
        }
    }
}

// =============================================================================
// Registry Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// npm executable to invoke
    pub npm_bin: String,

    /// Skip alpha/beta/rc versions when sampling
    pub ignore_prerelease: bool,

    /// Keep the install workspace on disk after a build
    pub keep_workspace: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            npm_bin: DEFAULT_NPM_BIN.to_string(),
            ignore_prerelease: true,
            keep_workspace: false,
        }
    }
}

// =============================================================================
// Detector Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Only scan sources whose URL looks first-party for the target host
    pub first_party_only: bool,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            first_party_only: false,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.fingerprint.string_limit, 50);
        assert_eq!(config.registry.npm_bin, "npm");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_zero_limit() {
        let mut config = Config::default();
        config.fingerprint.string_limit = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_blank_npm_bin() {
        let mut config = Config::default();
        config.registry.npm_bin = "  ".to_string();
        assert!(config.validate().is_err());
    }
}
