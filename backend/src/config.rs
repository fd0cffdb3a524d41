//! Application configuration.
//!
//! Settings come from a TOML file (every key optional) and are then
//! overridden by environment variables:
//!
//! | Variable                  | Setting                  |
//! |---------------------------|--------------------------|
//! | `HOST`                    | `server.host`            |
//! | `PORT`                    | `server.port`            |
//! | `YIELDMAP_DATA_DIR`       | `data.data_dir`          |
//! | `YIELDMAP_GEO_CSV`        | `data.geo_file`          |
//! | `YIELDMAP_KPI_CSV`        | `data.kpi_file`          |
//! | `YIELDMAP_KPI_STATS_CSV`  | `data.kpi_stats_file`    |
//! | `YIELDMAP_GRID_ROWS`      | `pipeline.grid_rows`     |
//! | `YIELDMAP_GRID_COLS`      | `pipeline.grid_cols`     |
//! | `YIELDMAP_BINS`           | `pipeline.bins`          |

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::services::dashboard::DashboardOptions;
use crate::services::grid::{GridConfig, DEFAULT_GRID_COLS, DEFAULT_GRID_ROWS, MAX_GRID_DIM};
use crate::services::scale::{DEFAULT_BINS, MAX_BINS};

/// Name of the configuration file searched by [`AppConfig::from_default_location`].
pub const CONFIG_FILE_NAME: &str = "yieldmap.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("No {0} found in standard locations")]
    NotFound(&'static str),

    #[error("Invalid value for {var}: '{value}'")]
    InvalidEnv { var: &'static str, value: String },
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub pipeline: PipelineSettings,
}

/// Listen address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Dataset locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSettings {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_geo_file")]
    pub geo_file: String,
    #[serde(default = "default_kpi_file")]
    pub kpi_file: String,
    #[serde(default = "default_kpi_stats_file")]
    pub kpi_stats_file: String,
}

/// Default pipeline parameters; requests may override them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineSettings {
    #[serde(default = "default_grid_rows")]
    pub grid_rows: usize,
    #[serde(default = "default_grid_cols")]
    pub grid_cols: usize,
    #[serde(default = "default_bins")]
    pub bins: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_geo_file() -> String {
    "geo.csv".to_string()
}

fn default_kpi_file() -> String {
    "kpi.csv".to_string()
}

fn default_kpi_stats_file() -> String {
    "kpi_stats.csv".to_string()
}

fn default_grid_rows() -> usize {
    DEFAULT_GRID_ROWS
}

fn default_grid_cols() -> usize {
    DEFAULT_GRID_COLS
}

fn default_bins() -> usize {
    DEFAULT_BINS
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            geo_file: default_geo_file(),
            kpi_file: default_kpi_file(),
            kpi_stats_file: default_kpi_stats_file(),
        }
    }
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            grid_rows: default_grid_rows(),
            grid_cols: default_grid_cols(),
            bins: default_bins(),
        }
    }
}

impl ServerSettings {
    /// `host:port` string for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl PipelineSettings {
    /// Dashboard options seeded with these defaults, clamped to the
    /// accepted grid and bin limits.
    pub fn dashboard_options(&self) -> DashboardOptions {
        DashboardOptions {
            grid: GridConfig::new(self.grid_rows, self.grid_cols),
            bins: self.bins.clamp(1, MAX_BINS),
            ..DashboardOptions::default()
        }
    }
}

fn parse_env<T: FromStr>(var: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(var) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnv { var, value }),
        Err(_) => Ok(None),
    }
}

fn parse_env_at_most(var: &'static str, max: usize) -> Result<Option<usize>, ConfigError> {
    match parse_env::<usize>(var)? {
        Some(v) if v > max => Err(ConfigError::InvalidEnv {
            var,
            value: v.to_string(),
        }),
        other => Ok(other),
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Load configuration from the first `yieldmap.toml` found in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> Result<Self, ConfigError> {
        let search_paths = [
            PathBuf::from(CONFIG_FILE_NAME),
            PathBuf::from("backend").join(CONFIG_FILE_NAME),
            PathBuf::from("..").join(CONFIG_FILE_NAME),
        ];

        for path in search_paths {
            if path.exists() {
                info!("Loading configuration from {}", path.display());
                return Self::from_file(&path);
            }
        }

        Err(ConfigError::NotFound(CONFIG_FILE_NAME))
    }

    /// Override settings from environment variables.
    ///
    /// Unset variables leave the setting untouched; unparseable numbers and
    /// grid or bin sizes above the limits are an error.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Some(host) = parse_env::<String>("HOST")? {
            self.server.host = host;
        }
        if let Some(port) = parse_env("PORT")? {
            self.server.port = port;
        }
        if let Some(dir) = parse_env("YIELDMAP_DATA_DIR")? {
            self.data.data_dir = dir;
        }
        if let Some(name) = parse_env("YIELDMAP_GEO_CSV")? {
            self.data.geo_file = name;
        }
        if let Some(name) = parse_env("YIELDMAP_KPI_CSV")? {
            self.data.kpi_file = name;
        }
        if let Some(name) = parse_env("YIELDMAP_KPI_STATS_CSV")? {
            self.data.kpi_stats_file = name;
        }
        if let Some(rows) = parse_env_at_most("YIELDMAP_GRID_ROWS", MAX_GRID_DIM)? {
            self.pipeline.grid_rows = rows;
        }
        if let Some(cols) = parse_env_at_most("YIELDMAP_GRID_COLS", MAX_GRID_DIM)? {
            self.pipeline.grid_cols = cols;
        }
        if let Some(bins) = parse_env_at_most("YIELDMAP_BINS", MAX_BINS)? {
            self.pipeline.bins = bins;
        }
        Ok(())
    }

    /// File from the default location (or built-in defaults when there is
    /// none), then environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match Self::from_default_location() {
            Ok(config) => config,
            Err(ConfigError::NotFound(_)) => {
                info!("No {} found, using defaults", CONFIG_FILE_NAME);
                Self::default()
            }
            Err(e) => return Err(e),
        };
        config.apply_env()?;
        Ok(config)
    }
}
