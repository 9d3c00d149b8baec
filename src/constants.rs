pub const DEFAULT_BINARY: &str = "evmosd";
pub const DEFAULT_CHAIN_ID: &str = "evmos_9000-1";
pub const DEFAULT_HOME_DIR_NAME: &str = ".tmp-evmosd";
pub const DEFAULT_KEYRING_BACKEND: &str = "test";
pub const DEFAULT_FEES: &str = "10000000000000000aevmos";
pub const DEFAULT_GAS_ADJUSTMENT: f64 = 1.3;
pub const DEFAULT_SETTLE_SECS: u64 = 1;

/// Test account that signs the upgrade proposal
pub const DEFAULT_PROPOSER: &str = "dev0";

pub const UPGRADE_DEPOSIT: &str = "100000000000000000000aevmos";
pub const SUBMIT_PROPOSAL_EVENT: &str = "submit_proposal";
pub const PROPOSAL_ID_ATTRIBUTE: &str = "proposal_id";
pub const VOTE_OPTION_YES: &str = "yes";
