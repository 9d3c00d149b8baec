//! Decoding of the node's JSON responses.
//!
//! Orchestration only depends on [`ResponseCodec`], so the node's query
//! schemas can change or be replaced in tests without touching it.

use crate::{
    account::{Delegation, KeyOutput},
    error::{UpgradeError, UpgradeResult},
    gov::Proposal,
    tx::TxResponse,
};
use serde::de::{DeserializeOwned, Deserializer};
use serde_derive::Deserialize;
use serde_json::Value;

pub trait ResponseCodec: Send + Sync {
    fn parse_keys(&self, out: &str) -> UpgradeResult<Vec<KeyOutput>>;
    fn parse_delegations(&self, out: &str) -> UpgradeResult<Vec<Delegation>>;
    fn parse_proposals(&self, out: &str) -> UpgradeResult<Vec<Proposal>>;
    fn parse_tx_response(&self, out: &str) -> UpgradeResult<TxResponse>;
}

/// Cosmos SDK CLI JSON output decoded with serde_json
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonCodec;

#[derive(Debug, Deserialize)]
struct DelegationsResponse {
    #[serde(default)]
    delegation_responses: Vec<DelegationResponse>,
}

#[derive(Debug, Deserialize)]
struct DelegationResponse {
    delegation: Delegation,
}

#[derive(Debug, Deserialize)]
struct ProposalsResponse {
    #[serde(default)]
    proposals: Vec<Proposal>,
}

fn from_json<T: DeserializeOwned>(out: &str, what: &str) -> UpgradeResult<T> {
    serde_json::from_str(out.trim())
        .map_err(|e| UpgradeError::parse(format!("error unmarshalling {what}"), e))
}

impl ResponseCodec for JsonCodec {
    fn parse_keys(&self, out: &str) -> UpgradeResult<Vec<KeyOutput>> {
        from_json(out, "keys")
    }

    fn parse_delegations(&self, out: &str) -> UpgradeResult<Vec<Delegation>> {
        let response: DelegationsResponse = from_json(out, "delegations")?;
        Ok(response
            .delegation_responses
            .into_iter()
            .map(|response| response.delegation)
            .collect())
    }

    fn parse_proposals(&self, out: &str) -> UpgradeResult<Vec<Proposal>> {
        let response: ProposalsResponse = from_json(out, "proposals")?;
        Ok(response.proposals)
    }

    fn parse_tx_response(&self, out: &str) -> UpgradeResult<TxResponse> {
        from_json(out, "tx response")
    }
}

/// Accepts a JSON string as is and any other JSON value as its compact text
pub fn string_or_json<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Value = serde::Deserialize::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Accepts integers encoded either as JSON numbers or as decimal strings
pub fn u64_from_string_or_number<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let value: Value = serde::Deserialize::deserialize(deserializer)?;
    match value {
        Value::String(s) => s.parse().map_err(D::Error::custom),
        Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| D::Error::custom(format!("{n} is not a valid u64"))),
        other => Err(D::Error::custom(format!(
            "expected an integer, found {other}"
        ))),
    }
}
