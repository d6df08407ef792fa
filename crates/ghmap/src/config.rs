use anyhow::{anyhow, Result};
use directories::{BaseDirs, ProjectDirs};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use model_map::{DecodeMode, DecodeOptions};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// ghmap configuration
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Config {
    /// How missing payload keys are handled
    #[serde(default)]
    pub mode: DecodeMode,
    /// Pretty-print JSON output
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

fn default_pretty() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: DecodeMode::default(),
            pretty: default_pretty(),
        }
    }
}

impl Config {
    /// Load configuration from defaults, config files and `GHMAP_*` env vars.
    ///
    /// An explicit path replaces the per-user config files and must exist.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        if let Some(path) = config_path {
            if !path.exists() {
                return Err(anyhow!("Config file not found: {}", path.display()));
            }
        }

        for path in config_paths(config_path) {
            if path.exists() {
                debug!(path = %path.display(), "loading config file");
                figment = figment.merge(Toml::file(path));
            }
        }

        figment
            .merge(Env::prefixed("GHMAP_").ignore(&["config"]))
            .extract()
            .map_err(|e| anyhow!("Failed to load config: {}", e))
    }

    pub fn merge_with_cli(&mut self, strict: bool, compact: bool) {
        if strict {
            self.mode = DecodeMode::Strict;
        }
        if compact {
            self.pretty = false;
        }
    }

    pub fn decode_options(&self) -> DecodeOptions {
        DecodeOptions { mode: self.mode }
    }
}

fn config_paths(explicit: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(path) = explicit {
        paths.push(path.to_path_buf());
        return paths;
    }

    if let Some(path) = get_project_config_path() {
        push_unique(&mut paths, path);
    }
    if let Some(path) = get_xdg_config_path() {
        push_unique(&mut paths, path);
    }

    paths
}

fn push_unique(paths: &mut Vec<PathBuf>, path: PathBuf) {
    if !paths.contains(&path) {
        paths.push(path);
    }
}

fn get_project_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "ghmap").map(|d| d.config_dir().join("config.toml"))
}

fn get_xdg_config_path() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(dir).join("ghmap").join("config.toml"));
    }

    BaseDirs::new().map(|dirs| {
        dirs.home_dir()
            .join(".config")
            .join("ghmap")
            .join("config.toml")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn defaults_are_lenient_and_pretty() {
        let config = Config::default();
        assert_eq!(config.mode, DecodeMode::Lenient);
        assert!(config.pretty);
    }

    #[test]
    fn explicit_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ghmap.toml");
        fs::write(&path, "mode = \"strict\"\npretty = false\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.mode, DecodeMode::Strict);
        assert!(!config.pretty);
        assert!(config.decode_options().is_strict());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn invalid_mode_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ghmap.toml");
        fs::write(&path, "mode = \"paranoid\"\n").unwrap();

        let err = Config::load(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("Failed to load config"));
    }

    #[test]
    fn cli_flags_override_config() {
        let mut config = Config::default();
        config.merge_with_cli(true, true);
        assert_eq!(config.mode, DecodeMode::Strict);
        assert!(!config.pretty);

        let mut config = Config::default();
        config.merge_with_cli(false, false);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn explicit_path_skips_user_config_files() {
        let path = PathBuf::from("/tmp/explicit.toml");
        assert_eq!(config_paths(Some(&path)), vec![path]);
    }
}
