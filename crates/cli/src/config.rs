//! `truckstock.toml`: store location, registry files and export settings.
//!
//! ```toml
//! [store]
//! dir = "templates"
//!
//! [registry]
//! consumables = "parts.csv"
//! trucks = "trucks.xlsx"
//!
//! [export]
//! adjustment_type = "Inventory Quantity Adjustment"
//! location_suffix = "Truck Inventory"
//! format = "xlsx"
//! ```
//!
//! Every key is optional. Relative paths resolve against the config file's
//! directory.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use truckstock_io::export::{AdjustmentSettings, ExportFormat};

#[derive(Debug)]
pub enum ConfigError {
    Read { path: PathBuf, message: String },
    Parse(String),
    Validation(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, message } => write!(f, "cannot read config {}: {message}", path.display()),
            Self::Parse(msg) => write!(f, "config parse error: {msg}"),
            Self::Validation(msg) => write!(f, "config validation error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub registry: RegistryConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    pub consumables: Option<PathBuf>,
    pub trucks: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ExportConfig {
    pub adjustment_type: String,
    pub location_suffix: String,
    pub format: ExportFormat,
}

impl Default for ExportConfig {
    fn default() -> Self {
        let settings = AdjustmentSettings::default();
        Self {
            adjustment_type: settings.adjustment_type,
            location_suffix: settings.location_suffix,
            format: ExportFormat::default(),
        }
    }
}

impl ExportConfig {
    pub fn adjustment_settings(&self) -> AdjustmentSettings {
        AdjustmentSettings {
            adjustment_type: self.adjustment_type.clone(),
            location_suffix: self.location_suffix.clone(),
        }
    }
}

impl AppConfig {
    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(input).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.export.adjustment_type.trim().is_empty() {
            return Err(ConfigError::Validation("export.adjustment_type must not be empty".into()));
        }
        if self.export.location_suffix.trim().is_empty() {
            return Err(ConfigError::Validation("export.location_suffix must not be empty".into()));
        }

        let paths = [
            ("store.dir", &self.store.dir),
            ("registry.consumables", &self.registry.consumables),
            ("registry.trucks", &self.registry.trucks),
        ];
        for (key, path) in paths {
            if path.as_ref().is_some_and(|p| p.as_os_str().is_empty()) {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
        }
        Ok(())
    }

    /// `<config dir>/truckstock/config.toml`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("truckstock")
            .join("config.toml")
    }

    /// Load `explicit` if given (it must exist), else the default path if it
    /// exists, else built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => {
                let p = Self::default_path();
                if !p.exists() {
                    log::debug!("no config at {}; using defaults", p.display());
                    return Ok(Self::default());
                }
                p
            }
        };

        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::Read {
            path: path.clone(),
            message: e.to_string(),
        })?;
        let config = Self::from_toml(&content)?;
        log::debug!("loaded config from {}", path.display());

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        Ok(config.resolve_paths(base))
    }

    fn resolve_paths(mut self, base: &Path) -> Self {
        let resolve = |p: &mut Option<PathBuf>| {
            if let Some(path) = p.as_mut() {
                if path.is_relative() {
                    *path = base.join(&*path);
                }
            }
        };
        resolve(&mut self.store.dir);
        resolve(&mut self.registry.consumables);
        resolve(&mut self.registry.trucks);
        self
    }
}
