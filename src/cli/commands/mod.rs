pub mod config;
pub mod corpus;
pub mod match_bundle;
pub mod scan;
pub mod strings;
