//! `settings.toml` handling.
//!
//! The file lives in the platform config folder unless `--config` points
//! elsewhere:
//! - macOS: ~/Library/Application Support/com.maillist.Mailing-List/
//! - Windows: %APPDATA%/maillist/Mailing List/config/
//! - Linux: ~/.config/mailinglist/

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use maillist_csv::MAX_CSV_FILE_SIZE;
use maillist_model::{SystemHeader, default_catalog};

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "maillist";
const APP_NAME: &str = "Mailing List";
const CONFIG_FILENAME: &str = "settings.toml";
const DATA_FILENAME: &str = "maillist.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub store: StoreSettings,
    pub user: UserSettings,
    pub upload: UploadSettings,
    pub catalog: CatalogSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Snapshot file holding campaigns, lists, records and segments.
    pub data_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    /// Owner recorded on everything this CLI creates.
    pub id: String,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            id: "local".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadSettings {
    /// Largest CSV file accepted, in bytes.
    pub max_file_size: u64,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            max_file_size: MAX_CSV_FILE_SIZE,
        }
    }
}

/// Catalog seeded into an empty data file. Ignored once a catalog exists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    pub fields: Vec<CatalogField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogField {
    pub name: String,
    #[serde(default)]
    pub required: bool,
}

impl Settings {
    /// Catalog to seed: the configured fields, or the default catalog when
    /// none are configured.
    pub fn catalog(&self) -> Vec<SystemHeader> {
        if self.catalog.fields.is_empty() {
            return default_catalog();
        }
        self.catalog
            .fields
            .iter()
            .filter_map(|field| {
                let header = SystemHeader::from_name(&field.name, field.required);
                if header.is_none() {
                    tracing::warn!(name = %field.name, "skipping catalog field without a usable name");
                }
                header
            })
            .collect()
    }

    /// Data file in precedence order: `--data-file`, the settings file, the
    /// platform data directory, then the working directory.
    pub fn data_file(&self, cli_override: Option<&Path>) -> PathBuf {
        if let Some(path) = cli_override {
            return path.to_path_buf();
        }
        if let Some(path) = &self.store.data_file {
            return path.clone();
        }
        ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
            .map(|dirs| dirs.data_dir().join(DATA_FILENAME))
            .unwrap_or_else(|| PathBuf::from(DATA_FILENAME))
    }
}

/// Default settings location, if the platform has a config directory.
pub fn settings_path() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// Load settings from `explicit`, or from the platform config directory.
///
/// Never fails: a missing, unreadable or unparsable file yields the
/// defaults, with a warning unless the default location simply has no file.
pub fn load_settings(explicit: Option<&Path>) -> Settings {
    let Some(path) = explicit.map(Path::to_path_buf).or_else(settings_path) else {
        tracing::warn!("no config directory on this platform, using default settings");
        return Settings::default();
    };
    match read_settings(&path) {
        Ok(Some(settings)) => {
            tracing::info!(path = %path.display(), "loaded settings");
            settings
        }
        Ok(None) if explicit.is_none() => {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            Settings::default()
        }
        Ok(None) => {
            tracing::warn!(
                path = %path.display(),
                "settings file does not exist, using defaults"
            );
            Settings::default()
        }
        Err(error) => {
            tracing::warn!(path = %path.display(), "ignoring settings file: {error:#}");
            Settings::default()
        }
    }
}

fn read_settings(path: &Path) -> anyhow::Result<Option<Settings>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).context("read settings"),
    };
    let settings = toml::from_str(&content).context("parse settings")?;
    Ok(Some(settings))
}

/// Writes `settings` to `path` as TOML, creating parent directories.
pub fn save_settings(settings: &Settings, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    let content = toml::to_string_pretty(settings).context("serialize settings")?;
    fs::write(path, content).with_context(|| format!("write {}", path.display()))?;
    tracing::info!(path = %path.display(), "saved settings");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_other_defaults() {
        let settings: Settings = toml::from_str("[user]\nid = \"ana\"\n").unwrap();
        assert_eq!(settings.user.id, "ana");
        assert_eq!(settings.upload.max_file_size, MAX_CSV_FILE_SIZE);
        assert!(settings.store.data_file.is_none());
    }

    #[test]
    fn configured_catalog_replaces_default() {
        let settings: Settings = toml::from_str(
            r#"
            [[catalog.fields]]
            name = "Email"
            required = true

            [[catalog.fields]]
            name = "Postal Code"

            [[catalog.fields]]
            name = "!!"
            "#,
        )
        .unwrap();
        let catalog = settings.catalog();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[1].id.as_str(), "postal_code");
        assert!(catalog[0].is_required);
        assert!(!catalog[1].is_required);
    }

    #[test]
    fn empty_catalog_falls_back_to_default() {
        assert_eq!(Settings::default().catalog(), default_catalog());
    }

    #[test]
    fn cli_data_file_wins() {
        let settings = Settings {
            store: StoreSettings {
                data_file: Some(PathBuf::from("configured.json")),
            },
            ..Settings::default()
        };
        assert_eq!(
            settings.data_file(Some(Path::new("cli.json"))),
            PathBuf::from("cli.json")
        );
        assert_eq!(settings.data_file(None), PathBuf::from("configured.json"));
    }
}
