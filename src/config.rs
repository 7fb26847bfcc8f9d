//! Dashboard configuration.
//!
//! Every field has a default, so a missing `alarm-map.toml` simply yields the
//! stock setup for the Taitung installation register.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default config file, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "alarm-map.toml";

/// Environment variable overriding [`DEFAULT_CONFIG_FILE`].
pub const CONFIG_ENV_VAR: &str = "ALARM_MAP_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DashboardConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub columns: ColumnConfig,
    #[serde(default)]
    pub redaction: RedactionConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Where the worksheet lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Spreadsheet URL as copied from the browser.
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default = "default_worksheet")]
    pub worksheet: String,
    /// Request timeout in seconds (0 = no timeout)
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            worksheet: default_worksheet(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_url() -> String {
    "https://docs.google.com/spreadsheets/d/1NCGE9kFRh85HJoVlsZhtA4PDc68TCTGtEG9v4TmFY0A/edit?gid=1508388728#gid=1508388728".to_string()
}

fn default_worksheet() -> String {
    "test0225".to_string()
}

fn default_timeout() -> u64 {
    30
}

/// Header text of the columns the dashboard reads. Must match the
/// worksheet's first row verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnConfig {
    #[serde(default = "default_year")]
    pub year: String,
    #[serde(default = "default_position")]
    pub position: String,
    /// Optional in the worksheet: no eligibility filter when absent.
    #[serde(default = "default_eligibility")]
    pub eligibility: String,
    /// Optional in the worksheet: unit total falls back to row count.
    #[serde(default = "default_device_count")]
    pub device_count: String,
    #[serde(default = "default_latitude")]
    pub latitude: String,
    #[serde(default = "default_longitude")]
    pub longitude: String,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            year: default_year(),
            position: default_position(),
            eligibility: default_eligibility(),
            device_count: default_device_count(),
            latitude: default_latitude(),
            longitude: default_longitude(),
        }
    }
}

fn default_year() -> String {
    "年度".to_string()
}

fn default_position() -> String {
    "裝置位置".to_string()
}

fn default_eligibility() -> String {
    "補助資格".to_string()
}

fn default_device_count() -> String {
    "裝置數量".to_string()
}

fn default_latitude() -> String {
    "緯度".to_string()
}

fn default_longitude() -> String {
    "經度".to_string()
}

/// Identity columns hidden from the detail table whatever the config says.
pub const IDENTITY_COLUMNS: [&str; 3] = ["姓名", "國民身分證統一編號", "電話"];

/// Columns that never reach the detail table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RedactionConfig {
    /// Hidden in addition to [`IDENTITY_COLUMNS`].
    #[serde(default)]
    pub columns: Vec<String>,
}

impl RedactionConfig {
    /// Every hidden column: the identity columns plus the configured extras.
    pub fn hidden(&self) -> Vec<&str> {
        let mut hidden: Vec<&str> = IDENTITY_COLUMNS.to_vec();
        for extra in &self.columns {
            if !hidden.contains(&extra.as_str()) {
                hidden.push(extra);
            }
        }
        hidden
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_subtitle")]
    pub subtitle: String,
    /// TTF/OTF font with CJK glyphs; egui's built-in fonts have none.
    #[serde(default)]
    pub font_path: Option<PathBuf>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            subtitle: default_subtitle(),
            font_path: None,
        }
    }
}

fn default_title() -> String {
    "📍 住警器裝設地理分佈分析".to_string()
}

fn default_subtitle() -> String {
    "目前顯示：臺東縣政府補助安裝住宅用火災警報器清冊數據".to_string()
}

impl DashboardConfig {
    /// Load the configuration from `path`, falling back to defaults when the
    /// file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::warn!("Config file {path:?} not found, using built-in defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path:?}"))?;
        let config: DashboardConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML configuration: {path:?}"))?;
        Ok(config)
    }

    /// Config path from `ALARM_MAP_CONFIG`, else [`DEFAULT_CONFIG_FILE`].
    pub fn default_path() -> PathBuf {
        std::env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }
}
