use crate::{
    config::BinaryConfig,
    error::{UpgradeError, UpgradeResult},
};
use async_trait::async_trait;
use std::{path::Path, process::Stdio};
use tokio::process::Command;
use tracing::{debug, info, instrument};

/// Arguments for a single invocation of the node binary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BinaryCmdArgs {
    pub subcommand: Vec<String>,
    /// Key name passed as `--from`
    pub from: Option<String>,
    /// Append chain id, keyring, gas and auto-confirm flags
    pub use_defaults: bool,
    /// Log the command line at debug instead of info
    pub quiet: bool,
}

impl BinaryCmdArgs {
    pub fn new<I, S>(subcommand: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            subcommand: subcommand.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn signed_by(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    pub fn with_defaults(mut self) -> Self {
        self.use_defaults = true;
        self
    }

    pub fn quiet(mut self) -> Self {
        self.quiet = true;
        self
    }
}

#[async_trait]
pub trait Executor: Send + Sync {
    /// Runs the subcommand and returns its standard output
    async fn execute(&self, args: &BinaryCmdArgs) -> UpgradeResult<String>;
}

/// Executes commands against the locally installed node binary
#[derive(Debug, Clone, Copy)]
pub struct Binary<'a> {
    config: &'a BinaryConfig,
}

impl<'a> Binary<'a> {
    pub fn new(config: &'a BinaryConfig) -> Self {
        Self { config }
    }

    /// Full argument vector handed to the binary
    pub fn command_line(&self, args: &BinaryCmdArgs) -> Vec<String> {
        let mut line = args.subcommand.clone();

        if let Some(from) = &args.from {
            line.push("--from".into());
            line.push(from.clone());
        }

        if args.use_defaults {
            line.extend([
                "--chain-id".into(),
                self.config.chain_id.clone(),
                "--keyring-backend".into(),
                self.config.keyring_backend.clone(),
                "--gas".into(),
                "auto".into(),
                "--gas-adjustment".into(),
                self.config.gas_adjustment.to_string(),
                "--fees".into(),
                self.config.fees.clone(),
                "-b".into(),
                "sync".into(),
                "-y".into(),
            ]);
        }

        line.push("--home".into());
        line.push(self.config.home.display().to_string());
        line
    }
}

#[async_trait]
impl Executor for Binary<'_> {
    #[instrument(skip_all)]
    async fn execute(&self, args: &BinaryCmdArgs) -> UpgradeResult<String> {
        let line = self.command_line(args);
        let command = format!("{} {}", command_label(&self.config.appd), line.join(" "));

        if args.quiet {
            debug!("Executing {command}");
        } else {
            info!("Executing {command}");
        }

        let output = Command::new(&self.config.appd)
            .args(&line)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| UpgradeError::Execution {
                command: command.clone(),
                output: e.to_string(),
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(UpgradeError::Execution {
                command,
                output: format!("{} ({})", combine_output(&stderr, &stdout), output.status),
            });
        }

        debug!("{} bytes of output", stdout.len());
        Ok(stdout)
    }
}

fn command_label(appd: &Path) -> String {
    appd.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| appd.display().to_string())
}

fn combine_output(stderr: &str, stdout: &str) -> String {
    [stderr.trim(), stdout.trim()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
