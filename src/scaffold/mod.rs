//! Project scaffolding workflow
//!
//! ```text
//! validate → clone → install → prompt → write-config → post-build
//! ```
//!
//! Steps run strictly in order and the first failure aborts the run. Nothing
//! is retried and nothing already written is rolled back.

pub mod env_file;
pub mod package_manager;
pub mod prompt;
pub mod template;

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::config::ScaffoldConfig;
use crate::error::{hints, ScaffoldError};
use crate::exec::subprocess::{render_command_line, CommandResult, CommandRunner};
use crate::utils::{paths, terminal};

/// Number of numbered steps reported to the operator
pub const TOTAL_STEPS: usize = 5;

/// What a successful run produced
#[derive(Debug, Clone)]
pub struct ScaffoldReport {
    pub project_dir: PathBuf,
    pub env_file: PathBuf,
    pub files_copied: u64,
}

/// Runs the scaffold steps against one target directory
pub struct Scaffolder<R: CommandRunner> {
    config: ScaffoldConfig,
    runner: R,
}

impl<R: CommandRunner> Scaffolder<R> {
    pub fn new(config: ScaffoldConfig, runner: R) -> Self {
        Self { config, runner }
    }

    pub fn config(&self) -> &ScaffoldConfig {
        &self.config
    }

    /// Scaffold a project into `project_dir`
    ///
    /// `api_url` skips the interactive prompt when given. `input`/`output`
    /// carry the prompt conversation.
    pub fn run<I: BufRead, W: Write>(
        &mut self,
        project_dir: &Path,
        api_url: Option<String>,
        input: &mut I,
        output: &mut W,
    ) -> Result<ScaffoldReport> {
        let name = project_dir.display().to_string();
        let pm = self.config.package_manager;

        if project_dir.exists() && !project_dir.is_dir() {
            return Err(ScaffoldError::target_not_directory(project_dir).into());
        }
        if !paths::is_usable_target(project_dir)? {
            return Err(ScaffoldError::target_not_empty(project_dir).into());
        }
        self.runner.ensure_tool("git", "cloning the template")?;
        self.runner.ensure_tool(pm.program(), "installing dependencies")?;

        terminal::print_step(1, TOTAL_STEPS, &format!("Cloning the repository with name {}", name));
        let files_copied = template::fetch_template(&mut self.runner, &self.config.template_url, project_dir)?;

        terminal::print_step(2, TOTAL_STEPS, &format!("Installing dependencies for {}", name));
        run_checked(
            &mut self.runner,
            pm.program(),
            &pm.install_args(),
            project_dir,
            Some(hints::install_failed()),
        )?;

        terminal::print_step(3, TOTAL_STEPS, "Configuring the API url");
        let api_url = match api_url.map(|url| url.trim().to_string()) {
            Some(url) if !url.is_empty() => url,
            _ => prompt::prompt_api_url(input, output)?,
        };

        terminal::print_step(4, TOTAL_STEPS, &format!("Writing {}", self.config.env_file));
        let env_file = env_file::write_env_file(project_dir, &self.config.env_file, &api_url)?;

        terminal::print_step(5, TOTAL_STEPS, &format!("Running {}", self.config.post_generate_script));
        run_checked(
            &mut self.runner,
            pm.program(),
            &pm.run_script_args(&self.config.post_generate_script),
            project_dir,
            None,
        )?;

        Ok(ScaffoldReport {
            project_dir: project_dir.to_path_buf(),
            env_file,
            files_copied,
        })
    }
}

/// Run a command and turn spawn errors or a nonzero exit into `CommandFailed`
pub(crate) fn run_checked<R: CommandRunner + ?Sized>(
    runner: &mut R,
    program: &str,
    args: &[String],
    cwd: &Path,
    hint: Option<&str>,
) -> Result<CommandResult> {
    let line = render_command_line(program, args);
    let failed = |reason: String| match hint {
        Some(h) => ScaffoldError::command_failed_with_hint(&line, reason, h),
        None => ScaffoldError::command_failed(&line, reason),
    };

    let result = runner
        .run(program, args, cwd)
        .map_err(|e| failed(format!("{:#}", e)))?;

    if !result.success {
        return Err(failed(result.failure_reason()).into());
    }

    Ok(result)
}
