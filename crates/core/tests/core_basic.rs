use std::path::PathBuf;

use jdis_core::config::{ToolPaths, ENV_JAVAP, ENV_JAVA_HOME};
use jdis_core::model::ClassUnit;
use jdis_core::version;

#[test]
fn version_is_non_empty() {
    let v = version();
    assert!(!v.is_empty());
}

#[test]
fn class_units_expose_their_name_and_bytes() {
    let unit = ClassUnit::new("Hello", vec![0xCA, 0xFE, 0xBA, 0xBE]);
    assert_eq!(unit.name(), "Hello");
    assert_eq!(unit.bytes(), [0xCA, 0xFE, 0xBA, 0xBE]);
    assert_eq!(unit.len(), 4);
    assert!(!unit.is_empty());

    let empty = ClassUnit::new("Empty", Vec::new());
    assert!(empty.is_empty());
    assert_eq!(empty.len(), 0);
}

#[test]
fn overlay_prefers_the_first_source() {
    let flag = ToolPaths { javap: Some(PathBuf::from("/from/flag")) };
    let file = ToolPaths { javap: Some(PathBuf::from("/from/file")) };

    let merged = flag.clone().or(file.clone());
    assert_eq!(merged.javap.as_deref(), Some(std::path::Path::new("/from/flag")));

    let merged = ToolPaths::default().or(file);
    assert_eq!(merged.javap.as_deref(), Some(std::path::Path::new("/from/file")));

    assert!(merged.is_configured());
    assert!(!ToolPaths::default().is_configured());
}

/// All environment mutation stays inside this one test so parallel tests in
/// this binary never race on the variables.
#[test]
fn env_resolution_prefers_the_direct_executable_variable() {
    std::env::remove_var(ENV_JAVAP);
    std::env::remove_var(ENV_JAVA_HOME);
    assert_eq!(ToolPaths::from_env(), ToolPaths::default());

    std::env::set_var(ENV_JAVA_HOME, "/opt/jdk");
    assert_eq!(
        ToolPaths::from_env().javap.as_deref(),
        Some(std::path::Path::new("/opt/jdk"))
    );

    std::env::set_var(ENV_JAVAP, "/opt/jdk/bin/javap");
    assert_eq!(
        ToolPaths::from_env().javap.as_deref(),
        Some(std::path::Path::new("/opt/jdk/bin/javap"))
    );

    std::env::remove_var(ENV_JAVAP);
    std::env::remove_var(ENV_JAVA_HOME);
}
