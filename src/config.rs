use crate::constants::*;
use anyhow::anyhow;
use clap::Args;
use std::{path::PathBuf, time::Duration};
use tracing::{debug, instrument, level_filters::LevelFilter};

#[derive(Args, Debug, Clone)]
pub struct NodeArgs {
    /// Node binary to drive
    #[arg(long, default_value = DEFAULT_BINARY)]
    binary: PathBuf,
    /// Home directory of the local node [default: $HOME/.tmp-evmosd]
    #[arg(long)]
    home: Option<PathBuf>,
    /// Chain id passed to transactions
    #[arg(long, default_value = DEFAULT_CHAIN_ID)]
    chain_id: String,
    /// Keyring backend holding the test accounts
    #[arg(long, default_value = DEFAULT_KEYRING_BACKEND)]
    keyring_backend: String,
    /// Fees attached to every transaction
    #[arg(long, default_value = DEFAULT_FEES)]
    fees: String,
    /// Multiplier applied to simulated gas
    #[arg(long, default_value_t = DEFAULT_GAS_ADJUSTMENT)]
    gas_adjustment: f64,
    /// Key that signs the upgrade proposal
    #[arg(long, default_value = DEFAULT_PROPOSER)]
    proposer: String,
    /// Seconds to let chain state settle before voting
    #[arg(long, default_value_t = DEFAULT_SETTLE_SECS)]
    settle_secs: u64,
}

#[derive(Args, Debug, Clone)]
pub struct LogArgs {
    /// Max stdout log level
    #[arg(long, default_value_t = LevelFilter::INFO)]
    pub log_level_stdout: LevelFilter,
    /// Also write logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
    /// Max file log level
    #[arg(long, default_value_t = LevelFilter::DEBUG)]
    pub log_level: LevelFilter,
}

/// Read-only settings shared by every call into the node binary
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryConfig {
    pub appd: PathBuf,
    pub home: PathBuf,
    pub chain_id: String,
    pub keyring_backend: String,
    pub fees: String,
    pub gas_adjustment: f64,
    pub proposer: String,
    pub settle_delay: Duration,
}

impl BinaryConfig {
    pub fn new(appd: impl Into<PathBuf>, home: impl Into<PathBuf>) -> Self {
        Self {
            appd: appd.into(),
            home: home.into(),
            chain_id: DEFAULT_CHAIN_ID.into(),
            keyring_backend: DEFAULT_KEYRING_BACKEND.into(),
            fees: DEFAULT_FEES.into(),
            gas_adjustment: DEFAULT_GAS_ADJUSTMENT,
            proposer: DEFAULT_PROPOSER.into(),
            settle_delay: Duration::from_secs(DEFAULT_SETTLE_SECS),
        }
    }

    pub fn with_settle_delay(mut self, settle_delay: Duration) -> Self {
        self.settle_delay = settle_delay;
        self
    }
}

#[instrument]
pub fn handle_node_arguments(args: NodeArgs) -> anyhow::Result<BinaryConfig> {
    debug!("Parsing node args");
    let home = match args.home {
        Some(home) => home,
        None => std::env::var_os("HOME")
            .map(|home| PathBuf::from(home).join(DEFAULT_HOME_DIR_NAME))
            .ok_or_else(|| anyhow!("HOME is not set, pass --home explicitly"))?,
    };

    Ok(BinaryConfig {
        appd: args.binary,
        home,
        chain_id: args.chain_id,
        keyring_backend: args.keyring_backend,
        fees: args.fees,
        gas_adjustment: args.gas_adjustment,
        proposer: args.proposer,
        settle_delay: Duration::from_secs(args.settle_secs),
    })
}
