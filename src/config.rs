use clap::{ArgAction, Parser, ValueHint};
use dirs_next::home_dir;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Interval used when the widget block leaves `interval_ms` unset.
pub const DEFAULT_INTERVAL_MS: u64 = 1000;

/// Error type for config loading/validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Top-level app configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// General options
    pub log_level: Option<String>, // e.g., "info" | "debug"
    /// Value store connection URL, e.g. "redis://127.0.0.1/"
    pub store_url: Option<String>,
    /// Base directory for relative icon paths
    pub base_dir: Option<PathBuf>,
    /// Target panel geometry & output
    pub device: Option<DeviceConfig>,
    /// The widget itself: slots, layout, icon
    pub widget: Option<WidgetConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DeviceConfig {
    /// Side length of the square drawing area, pixels
    pub pixels: Option<u32>,
    /// Panel density hint for sinks
    pub dpi: Option<u16>,
    /// Where the PNG sink writes frames
    pub output: Option<PathBuf>,
}

/// One widget block: parallel lists are padded with defaults up to the
/// key count at widget construction.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WidgetConfig {
    /// Store key names, one per slot
    #[serde(default)]
    pub keys: Vec<String>,
    /// Font names, padded with the regular face
    #[serde(default)]
    pub font: Vec<String>,
    /// Layout directives (see widget::layout)
    #[serde(default)]
    pub layout: Vec<String>,
    /// Slot colors, padded with the default color
    #[serde(default)]
    pub color: Vec<String>,
    /// Store key whose value names the icon resource
    pub icon_key: Option<String>,
    /// Refresh interval in milliseconds, clamped to a 1 s floor
    pub interval_ms: Option<u64>,
}

/// CLI overrides. All fields are Options so we can layer them over YAML.
#[derive(Debug, Parser, Clone)]
#[command(name = "kvdeck", about = "kvdeck key-value display widget", disable_help_flag = false)]
pub struct Cli {
    /// Path to a YAML config file (overrides search)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub log_level: Option<String>,
    #[arg(long)]
    pub store_url: Option<String>,
    #[arg(long)]
    pub interval_ms: Option<u64>,
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,
    /// dump fully merged config (after overrides) and exit
    #[arg(long, action = ArgAction::SetTrue)]
    pub dump_config: bool,
}

/// Public entry point: parse CLI, read YAML, merge, validate.
pub fn load() -> Result<Config, ConfigError> {
    let cli = Cli::parse();

    // 1) defaults (from `Default` impl)
    let mut cfg = Config::default();

    // 2) YAML file (explicit path or search)
    if let Some(p) = cli.config.as_ref() {
        if p.exists() {
            let y = read_yaml(p)?;
            merge(&mut cfg, y);
        } else {
            return Err(ConfigError::Validation(format!(
                "Config file not found: {}",
                p.display()
            )));
        }
    } else if let Some(p) = find_config_file() {
        let y = read_yaml(&p)?;
        merge(&mut cfg, y);
    }

    // 3) CLI overrides (highest precedence)
    apply_cli_overrides(&mut cfg, &cli);

    // 4) Validate
    validate(&cfg)?;

    if cli.dump_config {
        // Pretty YAML of effective config (nice for debugging)
        let s = serde_yaml::to_string(&cfg)?;
        println!("{s}");
        std::process::exit(0);
    }

    Ok(cfg)
}

/// Try common locations in order (first hit wins).
fn find_config_file() -> Option<PathBuf> {
    // XDG-style: ~/.config/kvdeck/config.yaml
    if let Some(home) = home_dir() {
        let p = home.join(".config/kvdeck/config.yaml");
        if p.exists() {
            return Some(p);
        }
        let p = home.join(".config/kvdeck.yaml");
        if p.exists() {
            return Some(p);
        }
    }
    // project local
    for candidate in &["kvdeck.yaml", "config.yaml", "config/kvdeck.yaml"] {
        let p = PathBuf::from(candidate);
        if p.exists() {
            return Some(p);
        }
    }
    None
}

fn read_yaml(path: &Path) -> Result<Config, ConfigError> {
    let s = fs::read_to_string(path)?;
    let cfg: Config = serde_yaml::from_str(&s)?;
    Ok(cfg)
}

/// Shallow merge `src` into `dst`, Option-by-Option.
fn merge(dst: &mut Config, src: Config) {
    if src.log_level.is_some() {
        dst.log_level = src.log_level;
    }
    if src.store_url.is_some() {
        dst.store_url = src.store_url;
    }
    if src.base_dir.is_some() {
        dst.base_dir = src.base_dir;
    }
    match (&mut dst.device, src.device) {
        (None, Some(c)) => dst.device = Some(c),
        (Some(d), Some(s)) => merge_device(d, s),
        _ => {}
    }
    // the widget block replaces wholesale: its lists are positional
    if src.widget.is_some() {
        dst.widget = src.widget;
    }
}

fn merge_device(dst: &mut DeviceConfig, src: DeviceConfig) {
    if src.pixels.is_some() {
        dst.pixels = src.pixels;
    }
    if src.dpi.is_some() {
        dst.dpi = src.dpi;
    }
    if src.output.is_some() {
        dst.output = src.output;
    }
}

fn apply_cli_overrides(cfg: &mut Config, cli: &Cli) {
    if cli.log_level.is_some() {
        cfg.log_level = cli.log_level.clone();
    }
    if cli.store_url.is_some() {
        cfg.store_url = cli.store_url.clone();
    }
    if cli.interval_ms.is_some() {
        if cfg.widget.is_none() {
            cfg.widget = Some(WidgetConfig::default());
        }
        if let Some(widget) = cfg.widget.as_mut() {
            widget.interval_ms = cli.interval_ms;
        }
    }
    if cli.output.is_some() {
        if cfg.device.is_none() {
            cfg.device = Some(DeviceConfig::default());
        }
        if let Some(device) = cfg.device.as_mut() {
            device.output = cli.output.clone();
        }
    }
}

/// Put any invariants here (required fields, ranges, etc.)
fn validate(cfg: &Config) -> Result<(), ConfigError> {
    let widget = cfg
        .widget
        .as_ref()
        .ok_or_else(|| ConfigError::Validation("missing widget section".into()))?;
    if widget.keys.is_empty() && widget.icon_key.as_deref().unwrap_or("").is_empty() {
        return Err(ConfigError::Validation(
            "widget needs keys and/or icon_key, nothing to display".into(),
        ));
    }
    if let Some(device) = cfg.device.as_ref() {
        if let Some(px) = device.pixels {
            if px == 0 {
                return Err(ConfigError::Validation("device pixels must be > 0".into()));
            }
        }
    }
    Ok(())
}
