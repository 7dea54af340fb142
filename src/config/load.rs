use std::{env, path::PathBuf};

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` reads an optional config file, then lets environment
/// variables (prefix `DIRQUEUE__`) override it, and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("DIRQUEUE")
                .separator("__")
                .list_separator(" ")
                .with_list_parse_key("classifier.fast_path_extensions")
                .with_list_parse_key("classifier.sniff_command")
                .with_list_parse_key("classifier.registry_command")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.classifier.sniff_command.is_empty() {
            return Err("classifier.sniff_command must name a program".to_string());
        }
        if self.classifier.registry_command.is_empty() {
            return Err("classifier.registry_command must name a program".to_string());
        }
        if self.playlist.file_name.trim().is_empty() || self.playlist.file_name.contains('/') {
            return Err("playlist.file_name must be a plain file name".to_string());
        }
        Ok(())
    }
}

/// Resolve the config path from `DIRQUEUE_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("DIRQUEUE_CONFIG_PATH") {
        let p = PathBuf::from(p);
        return Some(p);
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/dirqueue/config.toml`
/// or `~/.config/dirqueue/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else if let Some(home) = env::var_os("HOME") {
        Some(PathBuf::from(home).join(".config"))
    } else {
        None
    };

    config_home.map(|d| d.join("dirqueue").join("config.toml"))
}
