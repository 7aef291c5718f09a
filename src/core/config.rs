//! Configuration management with layered hierarchy

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::ingest::{LoadOptions, DEFAULT_SKIP_ROWS};

/// File name of the per-directory config
pub const LOCAL_CONFIG_FILE: &str = ".bomcheck.yaml";

/// Default report file name
pub const DEFAULT_REPORT_NAME: &str = "bom_check_results.xlsx";

/// BOM Check configuration with layered hierarchy
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Title rows above the header row
    pub skip_rows: Option<usize>,

    /// Sheet to read instead of the first one
    pub sheet: Option<String>,

    /// File name for the saved report
    pub report_name: Option<String>,

    /// Default output format
    pub default_format: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::load_from(&cwd)
    }

    /// Load configuration using `dir` for the local config file
    pub fn load_from(dir: &Path) -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (resolved in the accessors)

        // 2. Global user config (~/.config/bomcheck/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if let Some(global) = Self::read_file(&global_path) {
                config.merge(global);
            }
        }

        // 3. Local config (./.bomcheck.yaml)
        if let Some(local) = Self::read_file(&dir.join(LOCAL_CONFIG_FILE)) {
            config.merge(local);
        }

        // 4. Environment variables
        if let Ok(skip) = std::env::var("BOMCHECK_SKIP_ROWS") {
            match skip.trim().parse() {
                Ok(n) => config.skip_rows = Some(n),
                Err(_) => tracing::warn!(value = %skip, "ignoring invalid BOMCHECK_SKIP_ROWS"),
            }
        }
        if let Ok(sheet) = std::env::var("BOMCHECK_SHEET") {
            config.sheet = Some(sheet);
        }

        config
    }

    fn read_file(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }
        let contents = std::fs::read_to_string(path).ok()?;
        match serde_yml::from_str::<Config>(&contents) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable config file");
                None
            }
        }
    }

    /// Get the path to the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "bomcheck")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.skip_rows.is_some() {
            self.skip_rows = other.skip_rows;
        }
        if other.sheet.is_some() {
            self.sheet = other.sheet;
        }
        if other.report_name.is_some() {
            self.report_name = other.report_name;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
    }

    pub fn skip_rows(&self) -> usize {
        self.skip_rows.unwrap_or(DEFAULT_SKIP_ROWS)
    }

    pub fn report_name(&self) -> &str {
        self.report_name.as_deref().unwrap_or(DEFAULT_REPORT_NAME)
    }

    /// Ingestion options, with command-line overrides applied
    pub fn load_options(&self, skip_rows: Option<usize>, sheet: Option<String>) -> LoadOptions {
        LoadOptions {
            skip_rows: skip_rows.unwrap_or_else(|| self.skip_rows()),
            sheet: sheet.or_else(|| self.sheet.clone()),
        }
    }
}
