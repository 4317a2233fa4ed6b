//! CLI argument parsing using clap derive macros

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser};

use crate::config::{ConfigFile, ConfigOverrides, ScaffoldConfig};
use crate::error::{hints, ScaffoldError};
use crate::exec::subprocess::SystemRunner;
use crate::scaffold::package_manager::PackageManager;
use crate::scaffold::Scaffolder;
use crate::utils::terminal;

/// Create a new Cntrl site from the Next.js template
///
/// Clones the template, installs its dependencies, asks for the project's
/// API url and writes it to .env.local, then generates the layouts.
#[derive(Parser, Debug)]
#[command(name = "create-cntrl-site")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to create the project in
    #[arg(value_name = "PROJECT_DIRECTORY")]
    pub project_directory: Option<String>,

    /// Template repository to clone
    #[arg(long, value_name = "URL", env = "CNTRL_TEMPLATE_URL")]
    pub template: Option<String>,

    /// API url from the editor's development tab (skips the prompt)
    #[arg(long, value_name = "URL", env = "CREATE_CNTRL_SITE_API_URL")]
    pub api_url: Option<String>,

    /// Package manager used to install dependencies and run scripts
    #[arg(long, value_enum, env = "CNTRL_PACKAGE_MANAGER")]
    pub package_manager: Option<PackageManager>,

    /// Path to a config.toml overriding the user config file
    #[arg(long, value_name = "PATH", env = "CNTRL_SCAFFOLD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// Execute the scaffold
    pub fn execute(self) -> Result<()> {
        if self.no_color {
            console::set_colors_enabled(false);
            console::set_colors_enabled_stderr(false);
        }

        let project_dir = match self.project_directory.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => PathBuf::from(name),
            _ => {
                return Err(ScaffoldError::MissingProjectDirectory {
                    usage: Cli::command().render_usage().to_string(),
                }
                .into())
            }
        };

        let config = self.resolve_config()?;
        if self.verbose {
            terminal::print_detail(&format!("template: {}", config.template_url));
            terminal::print_detail(&format!("package manager: {}", config.package_manager));
            terminal::print_detail(&format!(
                "post-generate script: {}",
                config.post_generate_script
            ));
        }

        let mut scaffolder = Scaffolder::new(config, SystemRunner::new(self.verbose));
        let mut input = io::stdin().lock();
        let mut output = io::stdout();
        let report = scaffolder.run(&project_dir, self.api_url, &mut input, &mut output)?;

        if self.verbose {
            terminal::print_detail(&format!(
                "{} template files copied, API url written to {}",
                report.files_copied,
                report.env_file.display()
            ));
        }
        terminal::print_success("Project generated.");
        terminal::print_info(&format!(
            "Please run \"cd {} && {} run dev\" to start it locally",
            report.project_dir.display(),
            scaffolder.config().package_manager
        ));

        Ok(())
    }

    fn resolve_config(&self) -> Result<ScaffoldConfig> {
        let file = ConfigFile::locate(self.config.as_deref()).map_err(|e| {
            ScaffoldError::config_error_with_hint(
                "Failed to load the scaffold config file",
                Some(e),
                hints::invalid_config(),
            )
        })?;

        Ok(ScaffoldConfig::resolve(
            file,
            ConfigOverrides {
                template: self.template.clone(),
                package_manager: self.package_manager,
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_all_flags() {
        let cli = Cli::try_parse_from([
            "create-cntrl-site",
            "my-site",
            "--template",
            "https://example.com/t",
            "--api-url",
            "https://api.example.com",
            "--package-manager",
            "pnpm",
            "-v",
        ])
        .unwrap();

        assert_eq!(cli.project_directory.as_deref(), Some("my-site"));
        assert_eq!(cli.template.as_deref(), Some("https://example.com/t"));
        assert_eq!(cli.api_url.as_deref(), Some("https://api.example.com"));
        assert_eq!(cli.package_manager, Some(PackageManager::Pnpm));
        assert!(cli.verbose);
    }

    #[test]
    fn test_project_directory_is_optional_at_parse_time() {
        let cli = Cli::try_parse_from(["create-cntrl-site", "--no-color"]).unwrap();
        assert!(cli.project_directory.is_none());
    }

    fn assert_missing_project_directory(args: &[&str]) {
        let cli = Cli::try_parse_from(args).unwrap();
        let err = cli.execute().unwrap_err();
        match err.downcast_ref::<ScaffoldError>() {
            Some(ScaffoldError::MissingProjectDirectory { usage }) => {
                assert!(usage.contains("PROJECT_DIRECTORY"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_project_directory_is_error() {
        assert_missing_project_directory(&["create-cntrl-site", "--no-color"]);
    }

    #[test]
    fn test_empty_project_directory_is_error() {
        assert_missing_project_directory(&["create-cntrl-site", "--no-color", ""]);
        assert_missing_project_directory(&["create-cntrl-site", "--no-color", "  "]);
    }

    #[test]
    fn test_api_url_ignores_generated_project_key() {
        // CNTRL_API_URL belongs to the generated site, not to this tool
        let cli = Cli::command();
        let api_url = cli
            .get_arguments()
            .find(|arg| arg.get_id() == "api_url")
            .unwrap();
        assert_eq!(
            api_url.get_env(),
            Some(std::ffi::OsStr::new("CREATE_CNTRL_SITE_API_URL"))
        );
    }

    #[test]
    fn test_unknown_package_manager_rejected() {
        assert!(Cli::try_parse_from(["create-cntrl-site", "x", "--package-manager", "bun"]).is_err());
    }
}
