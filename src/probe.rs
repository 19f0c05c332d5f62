use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

/// The status-probe executable, resolved through PATH at deploy time.
pub const DEFAULT_PROBE_COMMAND: &str = "gitprompt-go";

/// Format selector for the compact branch/ahead/behind/change encoding.
pub const STATUS_FORMAT: &str =
    "$(BRANCH)$(AHEAD)$(BEHIND)$(SEPARATOR)$(UNTRACKED)$(MODIFIED)$(DELETED)$(UNMERGED)$(STAGED)";

/// Format selector for the toolchain version string.
pub const TOOLCHAIN_FORMAT: &str = "$(GOVERSION)";

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Failed to execute {command}: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },
    #[error("{command} exited with status {code:?}")]
    NonZeroExit { command: String, code: Option<i32> },
}

/// Answers status questions about a folder by running an external program.
pub trait StatusProbe {
    fn query(&self, dir: &Path, format: &str) -> Result<String, ProbeError>;
}

/// Runs the git-prompt executable as `<command> -f <format>` with the
/// target folder as working directory and captures stdout.
pub struct GitPromptProbe {
    command: PathBuf,
}

impl GitPromptProbe {
    pub fn new(command: impl Into<PathBuf>) -> Self {
        GitPromptProbe {
            command: command.into(),
        }
    }
}

impl Default for GitPromptProbe {
    fn default() -> Self {
        GitPromptProbe::new(DEFAULT_PROBE_COMMAND)
    }
}

impl StatusProbe for GitPromptProbe {
    fn query(&self, dir: &Path, format: &str) -> Result<String, ProbeError> {
        let output = Command::new(&self.command)
            .arg("-f")
            .arg(format)
            .current_dir(dir)
            .output()
            .map_err(|error| ProbeError::Spawn {
                command: self.command.display().to_string(),
                source: error,
            })?;

        if !output.status.success() {
            return Err(ProbeError::NonZeroExit {
                command: self.command.display().to_string(),
                code: output.status.code(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}
