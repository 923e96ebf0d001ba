use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::model::location::{Catalog, Location};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub locations: Vec<LocationEntry>,
}

/// Config-file shape of a catalog location. Config files use conventional
/// `snake_case` keys; the stored JSON records use `camelCase`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationEntry {
    pub id: String,
    pub name: String,
    pub region: String,
    #[serde(default)]
    pub image_ref: String,
}

impl ProjectConfig {
    /// The catalog this project reports against. An empty or absent
    /// `[catalog]` section falls back to the built-in zones.
    #[must_use]
    pub fn catalog(&self) -> Catalog {
        if self.catalog.locations.is_empty() {
            return Catalog::builtin();
        }

        Catalog::from_locations(
            self.catalog
                .locations
                .iter()
                .map(|entry| Location {
                    id: entry.id.clone(),
                    name: entry.name.clone(),
                    region: entry.region.clone(),
                    image_ref: entry.image_ref.clone(),
                })
                .collect(),
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserConfig {
    /// Default caller id, used when neither `--as` nor the environment
    /// provides one.
    #[serde(default)]
    pub identity: Option<String>,
}

/// Load `.encosta/config.toml` under `project_root`, or defaults when the
/// file does not exist.
///
/// # Errors
///
/// Returns an error when the file exists but cannot be read or parsed.
pub fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
    let path = project_root.join(".encosta/config.toml");
    if !path.exists() {
        return Ok(ProjectConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<ProjectConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Load the per-user config from the platform config directory, or
/// defaults when there is none.
///
/// # Errors
///
/// Returns an error when the file exists but cannot be read or parsed.
pub fn load_user_config() -> Result<UserConfig> {
    let Some(config_dir) = dirs::config_dir() else {
        return Ok(UserConfig::default());
    };

    let path = config_dir.join("encosta/config.toml");
    if !path.exists() {
        return Ok(UserConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<UserConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}
