use crate::engine::SearchOptions;
use crate::matcher::MatchOptions;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use log::debug;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub matching: MatchingConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct MatchingConfig {
    #[serde(default)]
    pub location: usize,
    #[serde(default = "default_distance")]
    pub distance: usize,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    #[serde(default)]
    pub case_sensitive: bool,
}

fn default_distance() -> usize { 100 }
fn default_threshold() -> f64 { 0.6 }

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            location: 0,
            distance: default_distance(),
            threshold: default_threshold(),
            case_sensitive: false,
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SearchConfig {
    #[serde(default)]
    pub keys: Vec<String>,
    pub id: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Plain,
    Json,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct OutputConfig {
    pub limit: Option<usize>,
    #[serde(default)]
    pub show_scores: bool,
    #[serde(default)]
    pub format: OutputFormat,
}

impl Config {
    pub fn match_options(&self) -> MatchOptions {
        MatchOptions {
            location: self.matching.location,
            distance: self.matching.distance,
            threshold: self.matching.threshold,
            case_sensitive: self.matching.case_sensitive,
        }
    }

    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            matching: self.match_options(),
            keys: self.search.keys.clone(),
            id: self.search.id.clone(),
        }
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("org", "seeker", "seeker").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Loads `path`, or the per-user config file when no path is given.
///
/// A missing per-user file yields the defaults; a missing explicit file is an error.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let config_path = match path {
        Some(p) => p.to_path_buf(),
        None => match default_config_path() {
            Some(p) if p.exists() => p,
            _ => return Ok(Config::default()),
        },
    };

    debug!("Loading config from {:?}", config_path);
    let content = fs::read_to_string(&config_path)
        .with_context(|| format!("reading config {}", config_path.display()))?;
    let config: Config = toml::from_str(&content)
        .with_context(|| format!("parsing config {}", config_path.display()))?;
    Ok(config)
}
