use crate::ring::Ring;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use trinket::asset::AssetSource;
use trinket::geom::Point;

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct RingConfig {
    #[serde(default = "default_center_x")]
    pub center_x: f64,
    #[serde(default = "default_center_y")]
    pub center_y: f64,
    #[serde(default = "default_radius")]
    pub radius: f64,
}

fn default_center_x() -> f64 {
    250.0
}

fn default_center_y() -> f64 {
    250.0
}

fn default_radius() -> f64 {
    100.0
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            center_x: default_center_x(),
            center_y: default_center_y(),
            radius: default_radius(),
        }
    }
}

impl RingConfig {
    pub fn to_ring(&self) -> Ring {
        Ring::new(Point::new(self.center_x, self.center_y), self.radius)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PaletteEntry {
    pub asset: AssetSource,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct EditorConfig {
    #[serde(default)]
    pub ring: RingConfig,
    #[serde(default)]
    pub palette: Vec<PaletteEntry>,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}

pub fn get_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "atelier", "bangle").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<EditorConfig, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(config::Environment::with_prefix("BANGLE"))
        .build()?;

    Ok(s.try_deserialize()?)
}

/// The embedded fallback palette, used until a config file exists.
pub fn default_config() -> Result<EditorConfig, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from_str(
            DEFAULT_CONFIG,
            config::FileFormat::Toml,
        ))
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_or_default() -> EditorConfig {
    if let Ok(path) = get_config_path()
        && !path.exists()
    {
        return default_config().unwrap_or_default();
    }

    load_config().unwrap_or_else(|e| {
        log::error!("Failed to load config: {}", e);
        default_config().unwrap_or_default()
    })
}

pub fn write_default_config() -> std::io::Result<std::path::PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");
