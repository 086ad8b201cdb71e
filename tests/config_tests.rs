//! Integration tests for configuration management

use relgraph::config::{Config, ConfigOverrides};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to create a temporary config directory
fn setup_temp_config() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_file = temp_dir.path().join("config.toml");
    (temp_dir, config_file)
}

#[test]
fn test_config_from_defaults() {
    let config = Config::from_defaults();

    assert!(!config.logging.level.is_empty());
    assert!(!config.paths.input.is_empty());
    assert!(!config.paths.out_dir.is_empty());
    assert_eq!(config.render.format, "svg");
    assert_eq!((config.render.width, config.render.height), (1920, 1080));
    assert!((config.render.curvature + 0.3).abs() < 1e-12);
    assert!((config.render.label_offset - 0.04).abs() < 1e-12);
}

#[test]
fn test_config_from_toml_basic() {
    let toml_str = r#"
[logging]
level = "info"
file = "/tmp/test.log"
verbose = true

[paths]
input = "./sheet.xlsx"
out_dir = "./out"

[render]
format = "png"
width = 800
height = 600
node_radius = 5.0
font_size = 10.0
curvature = 0.0
label_offset = 0.1
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML");

    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.file, "/tmp/test.log");
    assert!(config.logging.verbose);
    assert_eq!(config.paths.input, "./sheet.xlsx");
    assert_eq!(config.paths.out_dir, "./out");
    assert_eq!(config.render.format, "png");
    assert_eq!(config.render.width, 800);
    assert_eq!(config.render.height, 600);
    assert!(config.render.curvature.abs() < 1e-12);
}

#[test]
fn test_config_from_toml_partial() {
    let toml_str = r#"
[logging]
level = "error"

[paths]
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse partial TOML");

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "");
    assert!(!config.logging.verbose);
    assert_eq!(config.paths.input, "");
    // Missing [render] section falls back to the built-in drawing defaults
    assert_eq!(config.render.width, 1920);
}

#[test]
fn test_config_variable_expansion() {
    let toml_str = r#"
[logging]
file = "$RELGRAPH/test.log"

[paths]
out_dir = "$RELGRAPH/renders"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML with variables");

    assert!(config.logging.file.contains("relgraph"));
    assert!(!config.logging.file.contains("$RELGRAPH"));
    assert!(config.paths.out_dir.ends_with("renders"));
    assert!(!config.paths.out_dir.contains("$RELGRAPH"));
}

#[test]
fn test_config_get_set() {
    let mut config = Config::from_defaults();

    assert!(config.get("level").is_some());

    config.set("level", "debug").expect("Failed to set level");
    assert_eq!(config.get("level").unwrap(), "debug");

    config.set("verbose", "true").expect("Failed to set verbose");
    assert!(config.logging.verbose);

    config.set("width", "640").expect("Failed to set width");
    assert_eq!(config.render.width, 640);
    config.set("node-radius", "4.5").expect("Failed to set node radius");
    assert_eq!(config.get("node_radius").unwrap(), "4.5");

    assert!(config.set("width", "wide").is_err());
    assert!(config.set("verbose", "maybe").is_err());
    assert!(config.get("unknown_key").is_none());
    assert!(config.set("unknown_key", "value").is_err());
}

#[test]
fn test_config_unset() {
    let mut config = Config::from_defaults();
    let defaults = Config::from_defaults();

    config.set("level", "error").expect("Failed to set level");
    config.set("curvature", "0.5").expect("Failed to set curvature");

    config.unset("level", &defaults).expect("Failed to unset level");
    config
        .unset("curvature", &defaults)
        .expect("Failed to unset curvature");
    assert_eq!(config.logging.level, defaults.logging.level);
    assert_eq!(config.render.curvature, defaults.render.curvature);
    assert!(config.unset("nope", &defaults).is_err());
}

#[test]
fn test_config_save_and_load() {
    let (_temp_dir, config_file) = setup_temp_config();

    let mut config = Config::from_defaults();
    config.set("format", "html").expect("Failed to set format");

    let toml_str = toml::to_string_pretty(&config).expect("Failed to serialize");
    fs::write(&config_file, toml_str).expect("Failed to write config");

    let content = fs::read_to_string(&config_file).expect("Failed to read config");
    let loaded_config = Config::from_toml(&content).expect("Failed to parse loaded config");

    assert_eq!(loaded_config.render.format, "html");
    assert_eq!(loaded_config.paths.input, config.paths.input);
}

#[test]
fn test_config_overrides_apply() {
    let mut config = Config::from_defaults();

    let overrides = ConfigOverrides {
        level: Some("error".to_string()),
        file: Some("/custom/path.log".to_string()),
        verbose: Some(true),
        input: Some("./other.csv".to_string()),
        out_dir: Some("./custom_renders".to_string()),
    };

    config.apply_overrides(&overrides);

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/custom/path.log");
    assert!(config.logging.verbose);
    assert_eq!(config.paths.input, "./other.csv");
    assert_eq!(config.paths.out_dir, "./custom_renders");
}

#[test]
fn test_config_overrides_partial() {
    let mut config = Config::from_defaults();
    let before = config.paths.out_dir.clone();

    let overrides = ConfigOverrides {
        level: Some("debug".to_string()),
        ..Default::default()
    };
    config.apply_overrides(&overrides);

    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.paths.out_dir, before);
}

#[test]
fn test_config_display_format() {
    let config = Config::from_defaults();
    let display_str = format!("{config}");

    assert!(display_str.contains("[logging]"));
    assert!(display_str.contains("[paths]"));
    assert!(display_str.contains("[render]"));
    assert!(display_str.contains("out_dir"));
    assert!(display_str.contains("curvature"));
}

#[test]
fn test_merge_defaults_adds_missing_fields() {
    let toml_str = r#"
[logging]
level = "error"
file = ""
verbose = false

[paths]
input = ""
out_dir = ""

[render]
width = 0
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse minimal config");
    let defaults = Config::from_defaults();

    assert!(config.merge_defaults(&defaults));
    assert_eq!(config.paths.input, defaults.paths.input);
    assert_eq!(config.render.width, defaults.render.width);
    assert_eq!(config.render.format, defaults.render.format);
}

#[test]
fn test_partial_render_section_keeps_drawing_defaults() {
    let toml_str = r#"
[logging]
level = "warn"

[render]
width = 800
curvature = 0.0
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse partial render section");
    let defaults = Config::from_defaults();
    config.merge_defaults(&defaults);

    assert_eq!(config.render.width, 800);
    assert_eq!(config.render.height, 1080);
    assert!((config.render.node_radius - 9.0).abs() < 1e-12);
    assert!((config.render.font_size - 13.0).abs() < 1e-12);
    assert!((config.render.label_offset - 0.04).abs() < 1e-12);
    assert_eq!(config.render.format, "svg");
    // An explicit zero curvature means straight edges and is kept
    assert!(config.render.curvature.abs() < 1e-12);

    let config = Config::from_toml("[logging]\n[render]\nwidth = 800\n").expect("Failed to parse render section");
    assert!((config.render.curvature + 0.3).abs() < 1e-12);
}

#[test]
fn test_merge_defaults_preserves_existing() {
    let toml_str = r#"
[logging]
level = "error"
file = "/my/custom/path.log"
verbose = false

[paths]
input = "mine.xlsx"
out_dir = ""
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse config");
    let defaults = Config::from_defaults();

    config.merge_defaults(&defaults);

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/my/custom/path.log");
    assert_eq!(config.paths.input, "mine.xlsx");
}

#[test]
fn test_get_relgraph_dir() {
    let dir = Config::get_relgraph_dir();

    assert!(dir.to_string_lossy().contains("relgraph"));
    assert_ne!(dir, PathBuf::from("."));
}

#[test]
fn test_get_config_file_path() {
    let path = Config::get_config_file_path();

    let path_str = path.to_string_lossy();
    assert!(path_str.ends_with("config.toml") || path_str.ends_with("dconfig.toml"));
}
