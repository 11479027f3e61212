use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use crate::form::ReorderMode;

/// Designer configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Config {
    /// Form editing behaviour
    #[serde(default)]
    pub designer: DesignerConfig,

    /// UI settings
    #[serde(default)]
    pub ui: UiConfig,

    /// Log output
    #[serde(default)]
    pub log: LogConfig,
}

/// Form editing settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DesignerConfig {
    /// Reflow while dragging, or only when the drag is released
    #[serde(default)]
    pub reorder_mode: ReorderMode,

    /// Select a field as soon as it is added to the canvas
    #[serde(default = "default_select_on_add")]
    pub select_on_add: bool,
}

/// UI settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UiConfig {
    #[serde(default = "default_show_status_bar")]
    pub show_status_bar: bool,

    /// How long a toast stays on screen, in milliseconds
    #[serde(default = "default_toast_duration_ms")]
    pub toast_duration_ms: u64,

    #[serde(default = "default_max_toasts")]
    pub max_toasts: usize,

    /// Capture the mouse for click and drag editing
    #[serde(default = "default_mouse")]
    pub mouse: bool,
}

/// Log settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LogConfig {
    /// Filter directive used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_select_on_add() -> bool {
    true
}
fn default_show_status_bar() -> bool {
    true
}
fn default_toast_duration_ms() -> u64 {
    3000
}
fn default_max_toasts() -> usize {
    5
}
fn default_mouse() -> bool {
    true
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for DesignerConfig {
    fn default() -> Self {
        Self {
            reorder_mode: ReorderMode::default(),
            select_on_add: default_select_on_add(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_status_bar: default_show_status_bar(),
            toast_duration_ms: default_toast_duration_ms(),
            max_toasts: default_max_toasts(),
            mouse: default_mouse(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl UiConfig {
    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }
}

/// Directory holding the config and log files
pub fn user_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("formdesk")
}

/// Configuration manager
pub struct ConfigManager {
    config: Config,
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a manager for `config.json` inside `config_dir`
    pub fn new(config_dir: &Path) -> Self {
        Self {
            config: Config::default(),
            config_path: config_dir.join("config.json"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Load the config, keeping defaults when the file does not exist
    pub fn load(&mut self) -> Result<()> {
        if !self.config_path.exists() {
            return Ok(());
        }

        let config_str = fs::read_to_string(&self.config_path)
            .with_context(|| format!("Failed to read {}", self.config_path.display()))?;
        self.config = serde_json::from_str(&config_str)
            .map_err(|e| anyhow!("Failed to parse config: {}", e))?;

        Ok(())
    }

    /// Save the config, creating its directory if needed
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let config_str = serde_json::to_string_pretty(&self.config)?;
        fs::write(&self.config_path, config_str)?;
        Ok(())
    }

    pub fn get_config(&self) -> &Config {
        &self.config
    }

    pub fn into_config(self) -> Config {
        self.config
    }

    /// Update a setting by its dotted path
    pub fn update_setting(&mut self, path: &str, value: serde_json::Value) -> Result<()> {
        match path {
            "designer.reorderMode" => {
                self.config.designer.reorder_mode = serde_json::from_value(value)
                    .map_err(|e| anyhow!("Expected \"live\" or \"on_drop\": {}", e))?;
            }
            "designer.selectOnAdd" => {
                self.config.designer.select_on_add =
                    value.as_bool().ok_or_else(|| anyhow!("Expected boolean"))?;
            }
            "ui.showStatusBar" => {
                self.config.ui.show_status_bar =
                    value.as_bool().ok_or_else(|| anyhow!("Expected boolean"))?;
            }
            "ui.toastDurationMs" => {
                self.config.ui.toast_duration_ms =
                    value.as_u64().ok_or_else(|| anyhow!("Expected number"))?;
            }
            "ui.maxToasts" => {
                self.config.ui.max_toasts =
                    value.as_u64().ok_or_else(|| anyhow!("Expected number"))? as usize;
            }
            "ui.mouse" => {
                self.config.ui.mouse = value.as_bool().ok_or_else(|| anyhow!("Expected boolean"))?;
            }
            "log.level" => {
                self.config.log.level = value
                    .as_str()
                    .ok_or_else(|| anyhow!("Expected string"))?
                    .to_string();
            }
            _ => return Err(anyhow!("Unsupported setting path: {}", path)),
        }

        Ok(())
    }

    /// Get a setting by its dotted path
    pub fn get_setting(&self, path: &str) -> Result<serde_json::Value> {
        match path {
            "designer.reorderMode" => Ok(serde_json::to_value(self.config.designer.reorder_mode)?),
            "designer.selectOnAdd" => Ok(serde_json::json!(self.config.designer.select_on_add)),
            "ui.showStatusBar" => Ok(serde_json::json!(self.config.ui.show_status_bar)),
            "ui.toastDurationMs" => Ok(serde_json::json!(self.config.ui.toast_duration_ms)),
            "ui.maxToasts" => Ok(serde_json::json!(self.config.ui.max_toasts)),
            "ui.mouse" => Ok(serde_json::json!(self.config.ui.mouse)),
            "log.level" => Ok(serde_json::json!(self.config.log.level)),
            _ => Err(anyhow!("Unsupported setting path: {}", path)),
        }
    }
}
