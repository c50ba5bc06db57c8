use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::{debug, info};
use toml::Value;

use crate::logging::{LogConfig, LogDestination};
use crate::theme::{is_plain_file_name, ApplierSettings, ReloadSignal};

/// Configuration storage - section_name -> key -> value
pub type Configuration = HashMap<String, HashMap<String, String>>;

/// Section holding applier settings
pub const FOOT_SECTION: &str = "foot";

/// Section holding logging settings and top-level keys
pub const BASE_SECTION: &str = "base";

/// Configuration manager
pub struct ConfigManager {
    config: Configuration,
    config_file_path: Option<PathBuf>,
    selected_section: Option<String>,
}

impl ConfigManager {
    /// Create a new ConfigManager from a Configuration (primarily for testing)
    pub fn from_config(config: Configuration) -> Self {
        Self {
            config,
            config_file_path: None,
            selected_section: None,
        }
    }

    /// Load configuration using discovery hierarchy
    pub fn load() -> Result<Self> {
        debug!("Starting configuration discovery");

        for path in discover_config_files() {
            debug!("Attempting to load config from: {}", path.display());
            if path.exists() {
                return Self::load_from_file(path);
            }
        }

        info!("No configuration file found, using defaults");
        Ok(Self::from_config(Configuration::new()))
    }

    /// Load configuration from explicit file path
    pub fn load_from_file(path: PathBuf) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config = parse_toml_config(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        info!("Loaded configuration from: {}", path.display());
        Ok(Self {
            config,
            config_file_path: Some(path),
            selected_section: None,
        })
    }

    pub fn config_file_path(&self) -> Option<&PathBuf> {
        self.config_file_path.as_ref()
    }

    /// Get value from configuration with section fallback
    pub fn get_value(&self, section: &str, key: &str) -> Option<&String> {
        // Priority: selected_section -> specified section -> base
        if let Some(selected) = &self.selected_section {
            if let Some(value) = self.config.get(selected).and_then(|s| s.get(key)) {
                return Some(value);
            }
        }

        if let Some(value) = self.config.get(section).and_then(|s| s.get(key)) {
            return Some(value);
        }

        self.config.get(BASE_SECTION).and_then(|s| s.get(key))
    }

    /// Select configuration section for --config-name
    pub fn select_section(&mut self, section: String) {
        debug!("Selecting configuration section: {}", section);
        self.selected_section = Some(section);
    }

    /// Get boolean value with type conversion
    pub fn get_bool(&self, section: &str, key: &str) -> Result<Option<bool>> {
        match self.get_value(section, key) {
            Some(value) => match value.to_lowercase().as_str() {
                "true" => Ok(Some(true)),
                "false" => Ok(Some(false)),
                _ => Err(anyhow::anyhow!("Invalid boolean value for {}.{}: {}", section, key, value)),
            },
            None => Ok(None),
        }
    }

    /// Get log level value with type conversion
    pub fn get_log_level(&self, section: &str, key: &str) -> Result<Option<log::LevelFilter>> {
        match self.get_value(section, key) {
            Some(value) => Ok(Some(crate::logging::parse_log_level(value)?)),
            None => Ok(None),
        }
    }

    /// Get path value, expanding a leading `~`
    pub fn get_path(&self, section: &str, key: &str) -> Option<PathBuf> {
        self.get_value(section, key).map(|value| expand_tilde(value))
    }

    /// Build applier settings from the `[foot]` section
    pub fn get_applier_settings(&self) -> Result<ApplierSettings> {
        self.get_applier_settings_or(None)
    }

    /// Build applier settings, using `fallback_dir` when `config-dir` is unset
    ///
    /// Without either, the user's foot config directory is used.
    pub fn get_applier_settings_or(&self, fallback_dir: Option<PathBuf>) -> Result<ApplierSettings> {
        let config_dir = self
            .get_path(FOOT_SECTION, "config-dir")
            .or(fallback_dir)
            .or_else(ApplierSettings::default_config_dir)
            .context("Could not determine the user config directory; set foot.config-dir")?;

        let mut settings = ApplierSettings::new(config_dir);

        if let Some(file_name) = self.get_value(FOOT_SECTION, "file-name") {
            if !is_plain_file_name(file_name) {
                return Err(anyhow::anyhow!(
                    "Invalid file-name in config '{}': must be a plain file name",
                    file_name
                ));
            }
            settings.file_name = file_name.clone();
        }

        if let Some(process_name) = self.get_value(FOOT_SECTION, "process-name") {
            settings.process_name = process_name.clone();
        }

        if let Some(signal) = self.get_value(FOOT_SECTION, "signal") {
            settings.signal = signal
                .parse::<ReloadSignal>()
                .map_err(|e| anyhow::anyhow!(e))
                .with_context(|| format!("Invalid signal value in config: {}", signal))?;
        }

        if let Some(reload) = self.get_bool(FOOT_SECTION, "reload")? {
            settings.reload = reload;
        }

        debug!("Applier settings from config: {:?}", settings);
        Ok(settings)
    }
}

/// Render a complete config file for the given effective settings
pub fn export_complete_config(settings: &ApplierSettings, log: &LogConfig) -> Result<String> {
    let mut base = toml::Table::new();
    base.insert(
        "console-level".to_string(),
        Value::String(log.console_level.as_str().to_lowercase()),
    );
    base.insert("log-format".to_string(), Value::String(log.format.as_str().to_string()));

    match &log.destination {
        LogDestination::Console => {}
        LogDestination::File(path) | LogDestination::Both(path) => {
            base.insert("log-file".to_string(), Value::String(path.to_string_lossy().into_owned()));
            if let Some(file_level) = log.file_level {
                base.insert(
                    "file-log-level".to_string(),
                    Value::String(file_level.as_str().to_lowercase()),
                );
            }
        }
    }

    let mut foot = toml::Table::new();
    foot.insert(
        "config-dir".to_string(),
        Value::String(settings.config_dir.to_string_lossy().into_owned()),
    );
    foot.insert("file-name".to_string(), Value::String(settings.file_name.clone()));
    foot.insert("process-name".to_string(), Value::String(settings.process_name.clone()));
    foot.insert("signal".to_string(), Value::String(settings.signal.config_name().to_string()));
    foot.insert("reload".to_string(), Value::Boolean(settings.reload));

    let mut root = toml::Table::new();
    root.insert(BASE_SECTION.to_string(), Value::Table(base));
    root.insert(FOOT_SECTION.to_string(), Value::Table(foot));

    let body = toml::to_string_pretty(&root).context("Failed to serialize configuration")?;
    Ok(format!("# foottheme configuration\n\n{}", body))
}

/// Discover configuration files in order of precedence
fn discover_config_files() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    // 1. Environment variable $FOOTTHEME_CONFIG
    if let Ok(env_path) = env::var("FOOTTHEME_CONFIG") {
        paths.push(PathBuf::from(env_path));
    }

    // 2. XDG config directory
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("foottheme").join("config.toml"));
    }

    // 3. Home directory
    if let Some(home_dir) = dirs::home_dir() {
        paths.push(home_dir.join(".foottheme.toml"));
    }

    // 4. Project local
    paths.push(PathBuf::from("./.foottheme.toml"));

    debug!("Config discovery paths: {:?}", paths);
    paths
}

fn expand_tilde(path: &str) -> PathBuf {
    if path == "~" {
        if let Some(home_dir) = dirs::home_dir() {
            return home_dir;
        }
    } else if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home_dir) = dirs::home_dir() {
            return home_dir.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Parse TOML content to string-based configuration
fn parse_toml_config(content: &str) -> Result<Configuration> {
    let table: toml::Table = toml::from_str(content).context("Failed to parse TOML content")?;

    let mut config = Configuration::new();
    flatten_toml_table(&table, "", &mut config);

    debug!("Parsed configuration: {:?}", config);
    Ok(config)
}

/// Flatten nested tables into dotted section names; top-level scalars land in `base`
fn flatten_toml_table(table: &toml::Table, prefix: &str, config: &mut Configuration) {
    for (key, value) in table {
        match value {
            Value::Table(subtable) => {
                let section_name = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten_toml_table(subtable, &section_name, config);
            }
            _ => {
                let section_name = if prefix.is_empty() { BASE_SECTION } else { prefix };
                config
                    .entry(section_name.to_string())
                    .or_default()
                    .insert(key.clone(), toml_value_to_string(value));
            }
        }
    }
}

/// Convert TOML Value to string representation
fn toml_value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Integer(i) => i.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Boolean(b) => b.to_string(),
        Value::Datetime(d) => d.to_string(),
        Value::Array(_) | Value::Table(_) => value.to_string(),
    }
}
