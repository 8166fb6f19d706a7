use std::fs;
use std::path::Path;

use jdis::{
    default_config_path, load_config, resolve_config_path, resolve_tool_paths, save_config,
    sha256_bytes, JdisConfig, CURRENT_CONFIG_VERSION,
};
use jdis_core::config::{ENV_JAVAP, ENV_JAVA_HOME};
use tempfile::tempdir;

#[test]
fn config_round_trips_through_disk() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("config.json");

    let mut config = JdisConfig::new();
    config.javap = Some("/opt/jdk".to_string());
    config.javap_version = Some("17.0.1".to_string());
    save_config(&path, &config).expect("save config");

    let loaded = load_config(&path).expect("load config");
    assert_eq!(loaded, config);
}

#[test]
fn absent_fields_are_omitted_from_the_file() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("config.json");

    save_config(&path, &JdisConfig::new()).expect("save config");

    let body = fs::read_to_string(&path).expect("read config");
    assert!(!body.contains("javap"), "empty config should omit optional keys: {body}");
    assert!(body.contains("config_version"));
}

#[test]
fn missing_config_file_loads_as_defaults() {
    let temp = tempdir().expect("tempdir");
    let config = load_config(&temp.path().join("no-such.json")).expect("load missing config");
    assert_eq!(config.config_version, CURRENT_CONFIG_VERSION);
    assert!(config.javap.is_none());
    assert!(config.javap_version.is_none());
}

#[test]
fn corrupt_config_file_errors_with_context() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("config.json");
    fs::write(&path, "not-json").expect("write corrupt config");

    let err = load_config(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config JSON"), "unexpected error: {err}");
}

#[test]
fn config_path_flag_overrides_the_default_location() {
    let path = resolve_config_path(Some("/tmp/custom.json")).expect("resolve flagged path");
    assert_eq!(path, Path::new("/tmp/custom.json"));

    let home_var = if cfg!(windows) { "USERPROFILE" } else { "HOME" };
    if std::env::var_os(home_var).is_some() {
        let default = default_config_path().expect("default config path");
        assert!(default.ends_with(".jdis.json"), "unexpected default: {}", default.display());
    }
}

/// All environment mutation stays inside this one test so parallel tests in
/// this binary never race on the variables.
#[test]
fn tool_resolution_prefers_flag_then_env_then_file() {
    std::env::remove_var(ENV_JAVAP);
    std::env::remove_var(ENV_JAVA_HOME);

    let mut file_config = JdisConfig::new();
    file_config.javap = Some("/from/file".to_string());

    // File config is the last resort.
    let tools = resolve_tool_paths(None, &file_config);
    assert_eq!(tools.javap.as_deref(), Some(Path::new("/from/file")));

    // JAVA_HOME beats the file.
    std::env::set_var(ENV_JAVA_HOME, "/from/java-home");
    let tools = resolve_tool_paths(None, &file_config);
    assert_eq!(tools.javap.as_deref(), Some(Path::new("/from/java-home")));

    // The direct executable variable beats JAVA_HOME.
    std::env::set_var(ENV_JAVAP, "/from/jdis-javap");
    let tools = resolve_tool_paths(None, &file_config);
    assert_eq!(tools.javap.as_deref(), Some(Path::new("/from/jdis-javap")));

    // An explicit flag beats everything.
    let tools = resolve_tool_paths(Some(Path::new("/from/flag")), &file_config);
    assert_eq!(tools.javap.as_deref(), Some(Path::new("/from/flag")));

    std::env::remove_var(ENV_JAVAP);
    std::env::remove_var(ENV_JAVA_HOME);

    // With nothing set anywhere, resolution yields an unconfigured result.
    let tools = resolve_tool_paths(None, &JdisConfig::new());
    assert!(!tools.is_configured());
}

#[test]
fn sha256_bytes_hashes_known_content() {
    let digest = sha256_bytes(b"abc");
    assert_eq!(digest, "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad");

    assert_eq!(
        sha256_bytes(b""),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
}
