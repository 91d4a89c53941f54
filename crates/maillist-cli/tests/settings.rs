use std::fs;
use std::path::PathBuf;

use maillist_cli::settings::{
    CatalogField, Settings, StoreSettings, UserSettings, load_settings, save_settings,
};
use tempfile::TempDir;

#[test]
fn saved_settings_load_back() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("settings.toml");
    let mut settings = Settings {
        store: StoreSettings {
            data_file: Some(PathBuf::from("/srv/maillist/data.json")),
        },
        user: UserSettings {
            id: "ana".to_string(),
        },
        ..Settings::default()
    };
    settings.upload.max_file_size = 1024;
    settings.catalog.fields.push(CatalogField {
        name: "Email".to_string(),
        required: true,
    });

    save_settings(&settings, &path).unwrap();
    assert_eq!(load_settings(Some(&path)), settings);
}

#[test]
fn unparsable_file_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.toml");
    fs::write(&path, "[user\nid = ").unwrap();
    assert_eq!(load_settings(Some(&path)), Settings::default());
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let settings = load_settings(Some(&dir.path().join("absent.toml")));
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.user.id, "local");
}

#[test]
fn configured_data_file_is_used() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.toml");
    fs::write(&path, "[store]\ndata_file = \"lists.json\"\n").unwrap();
    let settings = load_settings(Some(&path));
    assert_eq!(settings.data_file(None), PathBuf::from("lists.json"));
}
