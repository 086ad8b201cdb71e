//! Configuration module for `relgraph`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Variable expanded to the config directory in path values
const DIR_VARIABLE: &str = "$RELGRAPH";

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Paths configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Spreadsheet read when `render` or `inspect` get no input argument
    #[serde(default)]
    pub input: String,
    /// Directory for rendered drawings
    #[serde(default)]
    pub out_dir: String,
}

/// Drawing configuration
///
/// Keys missing from a `[render]` section keep their built-in values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Output format (svg, html, png)
    pub format: String,
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Marker radius in pixels
    pub node_radius: f64,
    /// Label font size in pixels
    pub font_size: f64,
    /// Edge curvature (negative bends clockwise)
    pub curvature: f64,
    /// Horizontal label shift in layout units
    pub label_offset: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            format: "svg".to_string(),
            width: 1920,
            height: 1080,
            node_radius: 9.0,
            font_size: 13.0,
            curvature: -0.3,
            label_offset: 0.04,
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
    /// Drawing settings
    #[serde(default)]
    pub render: RenderConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override default input spreadsheet
    pub input: Option<String>,
    /// Override output directory
    pub out_dir: Option<String>,
}

impl Config {
    /// Get the `$RELGRAPH` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/relgraph`
    /// - macOS: `~/Library/Application Support/relgraph`
    /// - Windows: `%APPDATA%\relgraph`
    #[must_use]
    pub fn get_relgraph_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("relgraph")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Empty strings and zero canvas sizes are taken from `defaults`.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    #[allow(clippy::useless_let_if_seq)]
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;

        let strings = [
            (&mut self.logging.level, &defaults.logging.level),
            (&mut self.logging.file, &defaults.logging.file),
            (&mut self.paths.input, &defaults.paths.input),
            (&mut self.paths.out_dir, &defaults.paths.out_dir),
            (&mut self.render.format, &defaults.render.format),
        ];
        for (value, default) in strings {
            if value.is_empty() && !default.is_empty() {
                value.clone_from(default);
                changed = true;
            }
        }

        if self.render.width == 0 && defaults.render.width != 0 {
            self.render.width = defaults.render.width;
            changed = true;
        }
        if self.render.height == 0 && defaults.render.height != 0 {
            self.render.height = defaults.render.height;
            changed = true;
        }
        if self.render.node_radius <= 0.0 && defaults.render.node_radius > 0.0 {
            self.render.node_radius = defaults.render.node_radius;
            changed = true;
        }
        if self.render.font_size <= 0.0 && defaults.render.font_size > 0.0 {
            self.render.font_size = defaults.render.font_size;
            changed = true;
        }

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Only non-`None` values replace config values; the config file is not touched.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let mut config = Config::load();
    /// let overrides = ConfigOverrides {
    ///     level: Some("debug".to_string()),
    ///     ..Default::default()
    /// };
    /// config.apply_overrides(&overrides);
    /// ```
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }

        if let Some(input) = &overrides.input {
            self.paths.input.clone_from(input);
        }
        if let Some(out_dir) = &overrides.out_dir {
            self.paths.out_dir.clone_from(out_dir);
        }
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds, inside
    /// the directory returned by [`get_relgraph_dir`](Self::get_relgraph_dir).
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_relgraph_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$RELGRAPH` in a string to the config directory
    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let relgraph_dir = Self::get_relgraph_dir();
            value.replace(DIR_VARIABLE, relgraph_dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Missing fields use their serde defaults and `$RELGRAPH` is expanded in
    /// path values.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.input = Self::expand_variables(&config.paths.input);
        config.paths.out_dir = Self::expand_variables(&config.paths.out_dir);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// Debug builds use `DefaultCLIConfigDebug.toml`, release builds use
    /// `DefaultCLIConfigRelease.toml`.
    ///
    /// # Panics
    /// Panics if the embedded default configuration cannot be parsed.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from file, or create from defaults if not found
    ///
    /// An existing file gets missing fields merged in from the defaults and is
    /// saved back. On first run the defaults are written to the config file.
    /// Any read or parse failure falls back to the defaults.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if config_file.exists() {
            if let Ok(content) = fs::read_to_string(&config_file) {
                if let Ok(mut config) = Self::from_toml(&content) {
                    if config.merge_defaults(&defaults) {
                        let _ = config.save();
                    }
                    return config;
                }
            }
        } else {
            if let Some(parent) = config_file.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let _ = defaults.save();
            return defaults;
        }

        defaults
    }

    /// Save configuration to the platform-specific config file
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be created or the file
    /// cannot be written
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_file = Self::get_config_file_path();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&config_file, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// Supported keys: `level`, `file`, `verbose`, `input`, `out_dir`,
    /// `format`, `width`, `height`, `node_radius`, `font_size`, `curvature`,
    /// `label_offset`. Underscores may also be written as dashes.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "input" => Some(self.paths.input.clone()),
            "out_dir" | "out-dir" => Some(self.paths.out_dir.clone()),
            "format" => Some(self.render.format.clone()),
            "width" => Some(self.render.width.to_string()),
            "height" => Some(self.render.height.to_string()),
            "node_radius" | "node-radius" => Some(self.render.node_radius.to_string()),
            "font_size" | "font-size" => Some(self.render.font_size.to_string()),
            "curvature" => Some(self.render.curvature.to_string()),
            "label_offset" | "label-offset" => Some(self.render.label_offset.to_string()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Numeric and boolean values are parsed. Call [`save()`](Config::save) to
    /// persist the change.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized or the value cannot be parsed
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "level" => self.logging.level = value.to_string(),
            "file" => self.logging.file = value.to_string(),
            "verbose" => self.logging.verbose = parse_value(key, value)?,
            "input" => self.paths.input = value.to_string(),
            "out_dir" | "out-dir" => self.paths.out_dir = value.to_string(),
            "format" => self.render.format = value.to_string(),
            "width" => self.render.width = parse_value(key, value)?,
            "height" => self.render.height = parse_value(key, value)?,
            "node_radius" | "node-radius" => self.render.node_radius = parse_value(key, value)?,
            "font_size" | "font-size" => self.render.font_size = parse_value(key, value)?,
            "curvature" => self.render.curvature = parse_value(key, value)?,
            "label_offset" | "label-offset" => self.render.label_offset = parse_value(key, value)?,
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to its value in `defaults`)
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "input" => self.paths.input.clone_from(&defaults.paths.input),
            "out_dir" | "out-dir" => self.paths.out_dir.clone_from(&defaults.paths.out_dir),
            "format" => self.render.format.clone_from(&defaults.render.format),
            "width" => self.render.width = defaults.render.width,
            "height" => self.render.height = defaults.render.height,
            "node_radius" | "node-radius" => self.render.node_radius = defaults.render.node_radius,
            "font_size" | "font-size" => self.render.font_size = defaults.render.font_size,
            "curvature" => self.render.curvature = defaults.render.curvature,
            "label_offset" | "label-offset" => {
                self.render.label_offset = defaults.render.label_offset;
            }
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults by deleting the config file
    ///
    /// The next [`load()`](Config::load) recreates it. Succeeds if the file
    /// does not exist.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be deleted
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, String> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| format!("Invalid value for '{key}': '{value}'"))
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  input = \"{}\"", self.paths.input)?;
        writeln!(f, "  out_dir = \"{}\"", self.paths.out_dir)?;

        writeln!(f, "\n[render]")?;
        writeln!(f, "  format = \"{}\"", self.render.format)?;
        writeln!(f, "  width = {}", self.render.width)?;
        writeln!(f, "  height = {}", self.render.height)?;
        writeln!(f, "  node_radius = {}", self.render.node_radius)?;
        writeln!(f, "  font_size = {}", self.render.font_size)?;
        writeln!(f, "  curvature = {}", self.render.curvature)?;
        writeln!(f, "  label_offset = {}", self.render.label_offset)?;

        Ok(())
    }
}
