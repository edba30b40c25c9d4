//! Dashboard configuration and the optional on-disk override file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::color_scheme::ColorScheme;
use crate::data::channels::{parse_hex_color, Channel, ChannelColors};
use crate::data::chart::ChartConfig;
use crate::data::dataset::DEFAULT_DATA_PATH;
use crate::data::filter::DEFAULT_AGENT_COUNT;

/// File names probed by [`DashboardConfig::load_or_default`], in order.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["dashboard.yaml", "dashboard.yml", "dashboard.json"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown channel `{0}`")]
    UnknownChannel(String),
    #[error("invalid color `{color}` for channel `{channel}`")]
    InvalidColor { channel: String, color: String },
    #[error("unknown color scheme `{0}`")]
    UnknownColorScheme(String),
}

/// Serialized form of the override file. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfigFile {
    pub title: Option<String>,
    pub headline: Option<String>,
    pub data_path: Option<PathBuf>,
    pub color_scheme: Option<String>,
    /// Channel display name → `#rrggbb`. Replaces the built-in map.
    pub channel_colors: Option<BTreeMap<String, String>>,
    pub default_agent_count: Option<usize>,
    pub chart_base_height: Option<f32>,
    pub chart_row_height: Option<f32>,
}

/// Top-level configuration for the dashboard window.
pub struct DashboardConfig {
    /// Native window title.
    pub title: String,
    /// Headline rendered at the top of the window.
    pub headline: Option<String>,
    /// Location of the aggregated Parquet file.
    pub data_path: PathBuf,
    pub color_scheme: ColorScheme,
    pub channel_colors: ChannelColors,
    /// Agents pre-selected in compare mode.
    pub default_agent_count: usize,
    pub chart: ChartConfig,
    /// Optional eframe native-window options.
    pub native_options: Option<eframe::NativeOptions>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: "Pedidos por Canal".to_string(),
            headline: Some("📊 Análise de Pedidos por Canal e Vendedora".to_string()),
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            color_scheme: ColorScheme::default(),
            channel_colors: ChannelColors::default(),
            default_agent_count: DEFAULT_AGENT_COUNT,
            chart: ChartConfig::default(),
            native_options: None,
        }
    }
}

impl Clone for DashboardConfig {
    fn clone(&self) -> Self {
        Self {
            title: self.title.clone(),
            headline: self.headline.clone(),
            data_path: self.data_path.clone(),
            color_scheme: self.color_scheme,
            channel_colors: self.channel_colors.clone(),
            default_agent_count: self.default_agent_count,
            chart: self.chart,
            native_options: self.native_options.clone(),
        }
    }
}

impl DashboardConfig {
    /// Apply an override file on top of `self`.
    pub fn apply_file(mut self, file: DashboardConfigFile) -> Result<Self, ConfigError> {
        if let Some(title) = file.title {
            self.title = title;
        }
        if let Some(headline) = file.headline {
            self.headline = Some(headline);
        }
        if let Some(path) = file.data_path {
            self.data_path = path;
        }
        if let Some(name) = file.color_scheme {
            self.color_scheme =
                ColorScheme::from_name(&name).ok_or(ConfigError::UnknownColorScheme(name))?;
        }
        if let Some(colors) = file.channel_colors {
            self.channel_colors = parse_channel_colors(&colors)?;
        }
        if let Some(n) = file.default_agent_count {
            self.default_agent_count = n;
        }
        if let Some(h) = file.chart_base_height {
            self.chart.base_height = h;
        }
        if let Some(h) = file.chart_row_height {
            self.chart.row_height = h;
        }
        for (a, b) in self.channel_colors.shared_colors() {
            warn!(%a, %b, "channels share a display color");
        }
        Ok(self)
    }

    /// Defaults, overridden by the first config file found in `dir`.
    pub fn load_or_default<P: AsRef<Path>>(dir: P) -> Result<Self, ConfigError> {
        let dir = dir.as_ref();
        for name in CONFIG_FILE_NAMES {
            let path = dir.join(name);
            if !path.is_file() {
                continue;
            }
            let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
                path: path.clone(),
                source,
            })?;
            let file: DashboardConfigFile = if text.trim().is_empty() {
                DashboardConfigFile::default()
            } else if name.ends_with(".json") {
                serde_json::from_str(&text)?
            } else {
                serde_yaml::from_str(&text)?
            };
            info!(path = %path.display(), "loaded dashboard config");
            return Self::default().apply_file(file);
        }
        Ok(Self::default())
    }
}

/// Validate channel names against the registry and parse their colors.
pub fn parse_channel_colors(map: &BTreeMap<String, String>) -> Result<ChannelColors, ConfigError> {
    let mut colors = ChannelColors::empty();
    for (name, hex) in map {
        let channel =
            Channel::from_name(name).ok_or_else(|| ConfigError::UnknownChannel(name.clone()))?;
        let color = parse_hex_color(hex).ok_or_else(|| ConfigError::InvalidColor {
            channel: name.clone(),
            color: hex.clone(),
        })?;
        colors = colors.with(channel, color);
    }
    Ok(colors)
}
