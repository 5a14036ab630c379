//! Package Corpus Pipeline
//!
//! Resolver -> extractor -> corpus builder -> matcher: the one-directional
//! package-identification path. The registry/installer is an external
//! collaborator behind the [`PackageRegistry`] trait.

pub mod builder;
pub mod matcher;
pub mod package;
pub mod registry;
pub mod workspace;

pub use builder::CorpusBuilder;
pub use matcher::{bundle_strings, match_against_set, rank_versions};
pub use package::{collect_package_strings, collect_source_files};
pub use registry::{NpmRegistry, PackageRegistry};
pub use workspace::Workspace;
