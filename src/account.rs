use crate::{binary::BinaryCmdArgs, error::UpgradeResult, node::Node};
use serde_derive::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Staking relationship between a delegator and a validator, as reported by
/// the node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delegation {
    pub delegator_address: String,
    pub validator_address: String,
    pub shares: String,
}

/// Key record from `keys list`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyOutput {
    pub name: String,
    #[serde(rename = "type", default)]
    pub key_type: String,
    pub address: String,
    #[serde(default, deserialize_with = "crate::codec::string_or_json")]
    pub pubkey: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub name: String,
    #[serde(rename = "type")]
    pub key_type: String,
    pub address: String,
    pub pubkey: String,
    #[serde(default)]
    pub delegations: Vec<Delegation>,
}

impl From<KeyOutput> for Account {
    fn from(key: KeyOutput) -> Self {
        Self {
            name: key.name,
            key_type: key.key_type,
            address: key.address,
            pubkey: key.pubkey,
            delegations: vec![],
        }
    }
}

impl Account {
    pub fn is_staking(&self) -> bool {
        !self.delegations.is_empty()
    }
}

/// Lists the keys in the node's keyring
#[instrument(skip(node))]
pub async fn get_accounts(node: &Node<'_>) -> UpgradeResult<Vec<Account>> {
    let out = node
        .executor
        .execute(&BinaryCmdArgs::new(["keys", "list", "--output=json"]))
        .await
        .map_err(|e| e.wrap("error listing keys"))?;

    let keys = node.codec.parse_keys(&out)?;
    debug!("Found {} keys", keys.len());
    Ok(keys.into_iter().map(Account::from).collect())
}

/// Queries the delegations held by the given address
pub async fn query_delegations(node: &Node<'_>, address: &str) -> UpgradeResult<Vec<Delegation>> {
    let args = BinaryCmdArgs::new(["query", "staking", "delegations", address, "--output=json"])
        .quiet();
    let out = node
        .executor
        .execute(&args)
        .await
        .map_err(|e| e.wrap(format!("error querying delegations of {address}")))?;

    node.codec.parse_delegations(&out)
}

/// Keeps the accounts that hold at least one delegation, in their original
/// order. An account whose delegations cannot be queried or parsed is
/// treated as having none.
#[instrument(skip_all)]
pub async fn staking_accounts(node: &Node<'_>, accounts: Vec<Account>) -> Vec<Account> {
    let mut staking = Vec::with_capacity(accounts.len());

    for mut account in accounts {
        match query_delegations(node, &account.address).await {
            Ok(delegations) => account.delegations = delegations,
            Err(e) => {
                warn!("Skipping key {}: {e}", account.name);
                continue;
            }
        }

        if account.is_staking() {
            debug!(
                "Key {} has {} delegations",
                account.name,
                account.delegations.len()
            );
            staking.push(account);
        }
    }

    staking
}

/// Lists all keys and keeps those that delegate stake
pub async fn filter_accounts_with_delegations(node: &Node<'_>) -> UpgradeResult<Vec<Account>> {
    let accounts = get_accounts(node).await?;
    let total = accounts.len();
    let staking = staking_accounts(node, accounts).await;

    info!("{} of {total} keys have delegations", staking.len());
    Ok(staking)
}
