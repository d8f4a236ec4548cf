use std::fs;
use std::path::PathBuf;

use qamus_config::Config;

use crate::profile::{
    Profile, load_config, load_config_file, load_profile_from, save_profile_to,
};

fn temp_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("qamus-{}-{}", std::process::id(), name));
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_load_config_file() {
    let path = temp_file(
        "config.json",
        r#"{ "cache": { "capacity": 3 }, "ui": { "json": true } }"#,
    );

    let config = load_config(Some(path.as_path()), Some("ignored")).unwrap();
    assert_eq!(config.cache.capacity, 3);
    assert!(config.ui.json);
    assert_eq!(config.ui.max_results, 20);

    fs::remove_file(path).unwrap();
}

#[test]
fn test_bad_config_file_is_an_error() {
    let path = temp_file("broken.json", "{ not json");
    let err = load_config_file(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse"));
    fs::remove_file(path).unwrap();

    let missing = std::env::temp_dir().join("qamus-definitely-missing.json");
    assert!(load_config_file(&missing).is_err());
}

#[test]
fn test_profile_shape() {
    let json = r#"{ "name": "work", "value": { "network": { "offline": true } } }"#;
    let profile: Profile = serde_json::from_str(json).unwrap();
    assert_eq!(profile.name, "work");
    assert!(profile.value.network.offline);
}

#[test]
fn test_saved_profile_loads_back() {
    let dir = std::env::temp_dir().join(format!("qamus-profiles-{}", std::process::id()));

    let mut config = Config::default();
    config.cache.capacity = 7;
    config.ui.max_results = 3;
    let file = save_profile_to(&dir, "work", &config).unwrap();
    assert!(file.ends_with("work.json"));

    let loaded = load_profile_from(&dir, "work").unwrap();
    assert_eq!(loaded.ui.max_results, 3);

    // unknown names fall back to main, then to defaults
    let fallback = load_profile_from(&dir, "missing").unwrap();
    assert_eq!(fallback.ui.max_results, 20);

    save_profile_to(&dir, "main", &config).unwrap();
    let main = load_profile_from(&dir, "missing").unwrap();
    assert_eq!(main.ui.max_results, 3);

    fs::remove_dir_all(dir).unwrap();
}
