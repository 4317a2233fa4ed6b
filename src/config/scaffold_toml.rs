//! User configuration file parsing
//!
//! An optional TOML file lets a team pin a fork of the template or a
//! different package manager without repeating flags:
//!
//! ```toml
//! template = "https://github.com/acme/cntrl-template"
//! package_manager = "pnpm"
//! post_generate_script = "generate-layouts"
//! env_file = ".env.local"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::scaffold::package_manager::PackageManager;

/// File name looked up inside the user config directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Contents of the user config file; every key is optional
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Git URL of the template repository
    pub template: Option<String>,

    /// Package manager used for install and scripts
    pub package_manager: Option<PackageManager>,

    /// package.json script run after the env file is written
    pub post_generate_script: Option<String>,

    /// Name of the environment file created in the project root
    pub env_file: Option<String>,
}

impl ConfigFile {
    /// Load configuration from a specific path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;

        Self::parse(&content).with_context(|| format!("Invalid configuration in {}", path.display()))
    }

    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse config.toml")?;
        config.validate()?;
        Ok(config)
    }

    /// Load the explicit file if given, else the default file if it exists
    ///
    /// A missing explicit file is an error; a missing default file is not.
    pub fn locate(explicit: Option<&Path>) -> Result<Option<Self>> {
        if let Some(path) = explicit {
            return Self::load_from_path(path).map(Some);
        }

        match default_config_path() {
            Some(path) if path.is_file() => Self::load_from_path(&path).map(Some),
            _ => Ok(None),
        }
    }

    fn validate(&self) -> Result<()> {
        if let Some(template) = &self.template {
            if template.trim().is_empty() {
                bail!("template must not be empty");
            }
        }

        if let Some(script) = &self.post_generate_script {
            if script.trim().is_empty() || script.contains(char::is_whitespace) {
                bail!("post_generate_script must be a single script name, got '{}'", script);
            }
        }

        if let Some(env_file) = &self.env_file {
            let as_path = Path::new(env_file);
            if env_file.is_empty()
                || as_path.components().count() != 1
                || as_path.file_name().is_none()
            {
                bail!("env_file must be a plain file name, got '{}'", env_file);
            }
        }

        Ok(())
    }
}

/// `<platform config dir>/create-cntrl-site/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("site", "cntrl", "create-cntrl-site")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_config() {
        let config = ConfigFile::parse(
            r#"
            template = "https://github.com/acme/template"
            package_manager = "pnpm"
            post_generate_script = "build-layouts"
            env_file = ".env"
            "#,
        )
        .unwrap();

        assert_eq!(config.template.as_deref(), Some("https://github.com/acme/template"));
        assert_eq!(config.package_manager, Some(PackageManager::Pnpm));
        assert_eq!(config.post_generate_script.as_deref(), Some("build-layouts"));
        assert_eq!(config.env_file.as_deref(), Some(".env"));
    }

    #[test]
    fn test_parse_empty_config() {
        assert_eq!(ConfigFile::parse("").unwrap(), ConfigFile::default());
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(ConfigFile::parse("templte = \"x\"").is_err());
    }

    #[test]
    fn test_unknown_package_manager_rejected() {
        assert!(ConfigFile::parse("package_manager = \"bun\"").is_err());
    }

    #[test]
    fn test_env_file_with_directory_rejected() {
        assert!(ConfigFile::parse("env_file = \"../.env\"").is_err());
        assert!(ConfigFile::parse("env_file = \"conf/.env\"").is_err());
    }

    #[test]
    fn test_script_with_spaces_rejected() {
        assert!(ConfigFile::parse("post_generate_script = \"run all\"").is_err());
    }

    #[test]
    fn test_locate_explicit_missing_is_error() {
        let temp = TempDir::new().unwrap();
        assert!(ConfigFile::locate(Some(&temp.path().join("nope.toml"))).is_err());
    }

    #[test]
    fn test_locate_explicit_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("scaffold.toml");
        std::fs::write(&path, "package_manager = \"yarn\"\n").unwrap();

        let config = ConfigFile::locate(Some(&path)).unwrap().unwrap();
        assert_eq!(config.package_manager, Some(PackageManager::Yarn));
    }

    #[cfg(target_os = "linux")]
    #[test]
    #[serial_test::serial]
    fn test_locate_default_file_under_xdg_config_home() {
        let temp = TempDir::new().unwrap();
        let previous = std::env::var_os("XDG_CONFIG_HOME");
        std::env::set_var("XDG_CONFIG_HOME", temp.path());

        assert_eq!(ConfigFile::locate(None).unwrap(), None);

        let dir = temp.path().join("create-cntrl-site");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(CONFIG_FILE_NAME), "template = \"https://example.com/t\"\n").unwrap();
        let located = ConfigFile::locate(None).unwrap();

        match previous {
            Some(value) => std::env::set_var("XDG_CONFIG_HOME", value),
            None => std::env::remove_var("XDG_CONFIG_HOME"),
        }

        assert_eq!(
            located.and_then(|c| c.template).as_deref(),
            Some("https://example.com/t")
        );
    }
}
