//! Configuration parsing and management.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),
}

/// Main configuration struct matching the inkweave.yml schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,

    #[serde(default)]
    pub paths: PathsConfig,

    /// File extensions treated as content sources
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    #[serde(default = "default_words_per_minute")]
    pub words_per_minute: u32,

    // Internal: path to config file (for relative path resolution)
    #[serde(skip)]
    config_path: Option<PathBuf>,
}

fn default_extensions() -> Vec<String> {
    vec![String::from("md")]
}

fn default_words_per_minute() -> u32 {
    200
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,
}

/// Content directories; the four collections are relative to `content`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_content")]
    pub content: PathBuf,

    #[serde(default = "default_topics")]
    pub topics: PathBuf,

    #[serde(default = "default_projects")]
    pub projects: PathBuf,

    #[serde(default = "default_blog")]
    pub blog: PathBuf,

    #[serde(default = "default_notes")]
    pub notes: PathBuf,
}

fn default_content() -> PathBuf {
    PathBuf::from("markdown")
}

fn default_topics() -> PathBuf {
    PathBuf::from("topics")
}

fn default_projects() -> PathBuf {
    PathBuf::from("projects")
}

fn default_blog() -> PathBuf {
    PathBuf::from("blog")
}

fn default_notes() -> PathBuf {
    PathBuf::from("notes")
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            content: default_content(),
            topics: default_topics(),
            projects: default_projects(),
            blog: default_blog(),
            notes: default_notes(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site: SiteConfig::default(),
            paths: PathsConfig::default(),
            extensions: default_extensions(),
            words_per_minute: default_words_per_minute(),
            config_path: None,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::from_yaml(&contents)?;

        // Store config file path for relative path resolution
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        // An empty file is a valid, all-defaults config
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Get the content root, resolved relative to config file
    pub fn content_dir(&self) -> PathBuf {
        self.resolve_path(&self.paths.content)
    }

    pub fn topics_dir(&self) -> PathBuf {
        self.content_dir().join(&self.paths.topics)
    }

    pub fn projects_dir(&self) -> PathBuf {
        self.content_dir().join(&self.paths.projects)
    }

    pub fn blog_dir(&self) -> PathBuf {
        self.content_dir().join(&self.paths.blog)
    }

    pub fn notes_dir(&self) -> PathBuf {
        self.content_dir().join(&self.paths.notes)
    }

    /// Whether a file name carries one of the configured extensions
    pub fn is_content_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }

    /// Resolve a path relative to the config file location
    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else if let Some(config_path) = &self.config_path {
            if let Some(parent) = config_path.parent() {
                parent.join(path)
            } else {
                path.to_path_buf()
            }
        } else {
            path.to_path_buf()
        }
    }
}
