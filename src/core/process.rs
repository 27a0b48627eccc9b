// ─── External processes ───
// Installers and the server itself run with inherited stdio; only the exit
// status is observed.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::core::error::{InstallError, InstallResult};

/// A program, its argument vector and the directory to run it in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl CommandSpec {
    pub fn new<I, S>(program: impl Into<String>, args: I, cwd: impl Into<PathBuf>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            cwd: cwd.into(),
        }
    }

    /// `<java> -jar <jar> <args...>`
    pub fn java_jar<I, S>(java: &str, jar: &str, args: I, cwd: impl Into<PathBuf>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut argv = vec!["-jar".to_string(), jar.to_string()];
        argv.extend(args.into_iter().map(Into::into));
        Self::new(java, argv, cwd)
    }
}

#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run to completion. A non-zero exit is an error.
    async fn run(&self, command: &CommandSpec) -> InstallResult<()>;
}

/// Spawns real processes wired to this terminal.
pub struct SystemRunner;

#[async_trait]
impl ProcessRunner for SystemRunner {
    async fn run(&self, command: &CommandSpec) -> InstallResult<()> {
        info!("Running {} {}", command.program, command.args.join(" "));
        debug!("Working directory: {}", command.cwd.display());

        let status = tokio::process::Command::new(&command.program)
            .args(&command.args)
            .current_dir(&command.cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|source| InstallError::ProcessSpawn {
                program: command.program.clone(),
                source,
            })?;

        if !status.success() {
            return Err(InstallError::ProcessFailed {
                program: command.program.clone(),
                code: status.code(),
            });
        }

        Ok(())
    }
}
