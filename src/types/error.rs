//! Unified Error Type System
//!
//! Centralized error types for the entire application.
//!
//! ## Design Principles
//!
//! - Single unified error type (ScopeError) for the entire application
//! - Structured variants with context for better debugging
//! - No panic/unwrap - all errors are recoverable
//!
//! Per-file resolution failures and per-version install failures are
//! recovered at their call sites (logged and skipped); only configuration
//! and top-level I/O problems surface to the CLI.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScopeError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // Resolution Errors
    // -------------------------------------------------------------------------
    /// A module specifier could not be resolved to a concrete file
    #[error("Cannot resolve '{specifier}' from {base}: {message}")]
    Resolve {
        specifier: String,
        base: String,
        message: String,
    },

    #[error("Parse error in {path}: {message}")]
    Parse { message: String, path: String },

    /// A package.json was missing or malformed
    #[error("Invalid manifest at {path}: {message}")]
    Manifest { path: String, message: String },

    // -------------------------------------------------------------------------
    // Registry Errors
    // -------------------------------------------------------------------------
    #[error("Registry error: {0}")]
    Registry(String),

    #[error("Failed to install {package}@{version}: {message}")]
    Install {
        package: String,
        version: String,
        message: String,
    },

    #[error("Workspace error: {0}")]
    Workspace(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ScopeError>;

// =============================================================================
// Helper Constructors
// =============================================================================

impl ScopeError {
    /// Create a resolution error
    pub fn resolve(
        specifier: impl Into<String>,
        base: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Resolve {
            specifier: specifier.into(),
            base: base.into(),
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a manifest error
    pub fn manifest(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Manifest {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an install error
    pub fn install(
        package: impl Into<String>,
        version: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Install {
            package: package.into(),
            version: version.into(),
            message: message.into(),
        }
    }

    /// Whether this error only invalidates one file or one version,
    /// leaving the surrounding run intact
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::Resolve { .. } | Self::Parse { .. } | Self::Install { .. }
        )
    }
}

// =============================================================================
// Tests
// =============================================================================
