//! Design files: TOML load/save plus layered resolution.

use std::fmt;
use std::path::Path;

use figment::Figment;
use figment::providers::{Format, Serialized, Toml};
use serde::Serialize;

use crate::design::QrDesign;
use crate::params;

/// Error type for design file operations.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading/writing file
    Io(std::io::Error),
    /// TOML parsing error
    Parse(toml::de::Error),
    /// Layered resolution error
    Extract(figment::Error),
    /// TOML serialization error
    Serialize(toml::ser::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {}", e),
            Self::Parse(e) => write!(f, "TOML parse error: {}", e),
            Self::Extract(e) => write!(f, "design file error: {}", e),
            Self::Serialize(e) => write!(f, "TOML serialize error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Parse(e)
    }
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        Self::Extract(e)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(e: toml::ser::Error) -> Self {
        Self::Serialize(e)
    }
}

/// Load a design file as-is, without CLI layering.
pub fn load(path: &Path) -> Result<QrDesign, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let design: QrDesign = toml::from_str(&content)?;
    Ok(params::sanitize(design))
}

/// Save a design to a TOML file.
pub fn save(design: &QrDesign, path: &Path) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(design)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Resolve the effective design: defaults, then the design file, then CLI
/// overrides. Later layers win; flags left unset never mask file values.
pub fn resolve(file: Option<&Path>, overrides: &impl Serialize) -> Result<QrDesign, ConfigError> {
    let mut figment = Figment::from(Serialized::defaults(QrDesign::default()));
    if let Some(path) = file {
        if !path.exists() {
            return Err(ConfigError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("design file not found: {}", path.display()),
            )));
        }
        figment = figment.merge(Toml::file(path));
    }
    let design: QrDesign = figment.merge(Serialized::defaults(overrides)).extract()?;
    Ok(params::sanitize(design))
}
