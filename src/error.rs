//! Error types and helpers for user-friendly error messages
//!
//! Every failure aborts the scaffold. The variants here are the ones worth
//! explaining to the operator; anything else travels as `anyhow::Error`.

use std::path::PathBuf;

use thiserror::Error;

/// Scaffolding errors with an optional actionable hint
#[derive(Error, Debug)]
pub enum ScaffoldError {
    /// No project directory on the command line
    #[error("Missing project directory")]
    MissingProjectDirectory { usage: String },

    /// An external command exited unsuccessfully
    #[error("Failed to execute {command}: {reason}")]
    CommandFailed {
        command: String,
        reason: String,
        hint: Option<String>,
    },

    /// Tool/executable not found on PATH
    #[error("Missing tool: {tool}")]
    MissingTool {
        tool: String,
        required_for: String,
        hint: String,
    },

    /// Target directory already has content
    #[error("Target directory is not empty: {}", path.display())]
    TargetNotEmpty { path: PathBuf, hint: String },

    /// Target path exists but is a file or other non-directory
    #[error("Target path exists and is not a directory: {}", path.display())]
    TargetNotDirectory { path: PathBuf, hint: String },

    /// Operator closed stdin before answering
    #[error("Prompt cancelled: {question}")]
    PromptCancelled { question: String },

    /// Configuration file errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
        hint: Option<String>,
    },
}

impl ScaffoldError {
    /// Create a command failure from the rendered command line
    pub fn command_failed(command: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::CommandFailed {
            command: command.into(),
            reason: reason.into(),
            hint: None,
        }
    }

    /// Create a command failure with a hint
    pub fn command_failed_with_hint(
        command: impl Into<String>,
        reason: impl Into<String>,
        hint: impl Into<String>,
    ) -> Self {
        Self::CommandFailed {
            command: command.into(),
            reason: reason.into(),
            hint: Some(hint.into()),
        }
    }

    /// Create a missing tool error
    pub fn missing_tool(
        tool: impl Into<String>,
        required_for: impl Into<String>,
        hint: impl Into<String>,
    ) -> Self {
        Self::MissingTool {
            tool: tool.into(),
            required_for: required_for.into(),
            hint: hint.into(),
        }
    }

    pub fn target_not_empty(path: impl Into<PathBuf>) -> Self {
        Self::TargetNotEmpty {
            path: path.into(),
            hint: hints::target_not_empty().to_string(),
        }
    }

    pub fn target_not_directory(path: impl Into<PathBuf>) -> Self {
        Self::TargetNotDirectory {
            path: path.into(),
            hint: hints::target_not_directory().to_string(),
        }
    }

    /// Create a configuration error with source and hint
    pub fn config_error_with_hint(
        message: impl Into<String>,
        source: Option<anyhow::Error>,
        hint: impl Into<String>,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source,
            hint: Some(hint.into()),
        }
    }

    /// Display error with formatting and hints
    pub fn display_with_hints(&self) {
        use console::style;

        eprintln!("\n{} {}", style("ERROR:").red().bold(), self);

        match self {
            ScaffoldError::CommandFailed { hint, .. } | ScaffoldError::Config { hint, .. } => {
                if let Some(h) = hint {
                    eprintln!("\n{} {}", style("HINT:").yellow().bold(), h);
                }
            }
            ScaffoldError::MissingTool {
                required_for, hint, ..
            } => {
                eprintln!("Required for: {}", required_for);
                eprintln!("\n{} {}", style("HINT:").yellow().bold(), hint);
            }
            ScaffoldError::TargetNotEmpty { hint, .. }
            | ScaffoldError::TargetNotDirectory { hint, .. } => {
                eprintln!("\n{} {}", style("HINT:").yellow().bold(), hint);
            }
            ScaffoldError::MissingProjectDirectory { usage } => {
                eprintln!("\n{}", usage);
                eprintln!("\nFor example:\n  create-cntrl-site my-cntrl-site");
            }
            ScaffoldError::PromptCancelled { .. } => {}
        }

        if let ScaffoldError::Config {
            source: Some(source),
            ..
        } = self
        {
            eprintln!("\n{}", style("CAUSE:").cyan().bold());
            for cause in source.chain() {
                eprintln!("  • {}", cause);
            }
        }

        eprintln!();
    }
}

/// Common error hints
pub mod hints {
    /// Get hint for missing Git
    pub fn git() -> &'static str {
        "Install Git from https://git-scm.com/ or use your package manager:\n\
         • macOS: brew install git\n\
         • Ubuntu: sudo apt install git\n\
         • Windows: winget install Git.Git"
    }

    /// Get hint for a missing Node.js package manager
    pub fn node_package_manager(tool: &str) -> String {
        match tool {
            "npm" => "Install Node.js (which ships npm) from https://nodejs.org/ or use your package manager:\n\
                      • macOS: brew install node\n\
                      • Ubuntu: sudo apt install nodejs npm\n\
                      • Windows: winget install OpenJS.NodeJS"
                .to_string(),
            other => format!(
                "Install Node.js from https://nodejs.org/, then enable {}:\n\
                 • corepack enable\n\
                 • Or pass --package-manager npm",
                other
            ),
        }
    }

    /// Get hint for a failed template clone
    pub fn clone_failed() -> &'static str {
        "Could not clone the template repository. Try:\n\
         • Check your network connection\n\
         • Check the template URL (--template or CNTRL_TEMPLATE_URL)\n\
         • Check that you have access to the repository"
    }

    /// Get hint for a failed dependency install
    pub fn install_failed() -> &'static str {
        "Dependency installation failed. The project directory was left in place;\n\
         fix the problem above, then run the install command inside it manually."
    }

    pub fn target_not_empty() -> &'static str {
        "Choose a new directory name, or remove the existing directory first."
    }

    pub fn target_not_directory() -> &'static str {
        "Choose a directory name that is not already used by a file."
    }

    /// Get hint for invalid config file
    pub fn invalid_config() -> &'static str {
        "The scaffold config file is invalid. Supported keys:\n\
         • template = \"<git url>\"\n\
         • package_manager = \"npm\" | \"yarn\" | \"pnpm\"\n\
         • post_generate_script = \"<package.json script>\"\n\
         • env_file = \"<file name>\""
    }
}
