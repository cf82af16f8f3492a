//! # inkweave-cli
//!
//! Filesystem-facing pieces of the `inkweave` binary: configuration, frontmatter
//! splitting and the directory-backed record source.

pub mod config;
pub mod frontmatter;
pub mod source;

pub use config::{Config, ConfigError};
pub use source::DirectorySource;
