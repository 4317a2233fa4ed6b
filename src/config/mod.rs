//! Scaffold configuration
//!
//! Values resolve in order: CLI flag (or its environment variable), user
//! config file, built-in default.

pub mod scaffold_toml;

use crate::scaffold::package_manager::PackageManager;

pub use scaffold_toml::ConfigFile;

/// Template cloned when nothing else is configured
pub const DEFAULT_TEMPLATE_URL: &str = "https://github.com/cntrl-site/nextjs-template";

/// Script the template defines for post-generation work
pub const DEFAULT_POST_GENERATE_SCRIPT: &str = "generate-layouts";

/// Environment file written into the project root
pub const DEFAULT_ENV_FILE: &str = ".env.local";

/// Key under which the API URL is stored
pub const API_URL_KEY: &str = "CNTRL_API_URL";

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub template: Option<String>,
    pub package_manager: Option<PackageManager>,
}

/// Fully resolved settings for one scaffold run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldConfig {
    pub template_url: String,
    pub package_manager: PackageManager,
    pub post_generate_script: String,
    pub env_file: String,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            template_url: DEFAULT_TEMPLATE_URL.to_string(),
            package_manager: PackageManager::default(),
            post_generate_script: DEFAULT_POST_GENERATE_SCRIPT.to_string(),
            env_file: DEFAULT_ENV_FILE.to_string(),
        }
    }
}

impl ScaffoldConfig {
    /// Layer the config file and overrides on top of the defaults
    pub fn resolve(file: Option<ConfigFile>, overrides: ConfigOverrides) -> Self {
        let defaults = Self::default();
        let file = file.unwrap_or_default();

        Self {
            template_url: overrides
                .template
                .or(file.template)
                .unwrap_or(defaults.template_url),
            package_manager: overrides
                .package_manager
                .or(file.package_manager)
                .unwrap_or(defaults.package_manager),
            post_generate_script: file
                .post_generate_script
                .unwrap_or(defaults.post_generate_script),
            env_file: file.env_file.unwrap_or(defaults.env_file),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScaffoldConfig::resolve(None, ConfigOverrides::default());
        assert_eq!(config.template_url, DEFAULT_TEMPLATE_URL);
        assert_eq!(config.package_manager, PackageManager::Npm);
        assert_eq!(config.post_generate_script, "generate-layouts");
        assert_eq!(config.env_file, ".env.local");
    }

    #[test]
    fn test_file_overrides_defaults() {
        let file = ConfigFile {
            template: Some("https://example.com/fork".to_string()),
            package_manager: Some(PackageManager::Yarn),
            post_generate_script: None,
            env_file: Some(".env".to_string()),
        };
        let config = ScaffoldConfig::resolve(Some(file), ConfigOverrides::default());
        assert_eq!(config.template_url, "https://example.com/fork");
        assert_eq!(config.package_manager, PackageManager::Yarn);
        assert_eq!(config.post_generate_script, DEFAULT_POST_GENERATE_SCRIPT);
        assert_eq!(config.env_file, ".env");
    }

    #[test]
    fn test_overrides_beat_file() {
        let file = ConfigFile {
            template: Some("https://example.com/fork".to_string()),
            package_manager: Some(PackageManager::Yarn),
            ..ConfigFile::default()
        };
        let overrides = ConfigOverrides {
            template: Some("https://example.com/cli".to_string()),
            package_manager: Some(PackageManager::Pnpm),
        };
        let config = ScaffoldConfig::resolve(Some(file), overrides);
        assert_eq!(config.template_url, "https://example.com/cli");
        assert_eq!(config.package_manager, PackageManager::Pnpm);
    }
}
