pub mod proposal;
pub mod vote;

pub use proposal::{
    build_upgrade_proposal_command, get_proposal_id_from_submit_events, query_latest_proposal_id,
    submit_upgrade_proposal,
};
pub use vote::{submit_all_votes_for_proposal, vote_for_proposal, VoteOutcome};

use crate::{error::UpgradeResult, node::Node};
use serde_derive::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Governance proposal as listed by `q gov proposals`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    #[serde(
        rename = "proposal_id",
        alias = "id",
        deserialize_with = "crate::codec::u64_from_string_or_number"
    )]
    pub id: u64,
}

#[derive(Debug)]
pub struct UpgradeReport {
    pub proposal_id: u64,
    pub votes: Vec<VoteOutcome>,
}

/// Submits the upgrade proposal and votes yes with every staking account
#[instrument(skip(node))]
pub async fn upgrade(
    node: &Node<'_>,
    target_version: &str,
    upgrade_height: u64,
) -> UpgradeResult<UpgradeReport> {
    let proposal_id = submit_upgrade_proposal(node, target_version, upgrade_height).await?;
    info!("Submitted upgrade proposal {proposal_id}");

    let votes = submit_all_votes_for_proposal(node, proposal_id).await?;
    Ok(UpgradeReport { proposal_id, votes })
}
