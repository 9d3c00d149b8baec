use crate::{
    account::filter_accounts_with_delegations,
    binary::BinaryCmdArgs,
    constants::VOTE_OPTION_YES,
    error::{UpgradeError, UpgradeResult},
    node::Node,
};
use tokio::time::sleep;
use tracing::{info, instrument, warn};

/// Result of voting with a single key
#[derive(Debug)]
pub struct VoteOutcome {
    pub account: String,
    pub result: UpgradeResult<()>,
}

impl VoteOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    pub fn error(&self) -> Option<&UpgradeError> {
        self.result.as_ref().err()
    }
}

/// Votes yes on the proposal, signing with the given key
pub async fn vote_for_proposal(node: &Node<'_>, proposal_id: u64, sender: &str) -> UpgradeResult<()> {
    let args = BinaryCmdArgs::new([
        "tx".to_string(),
        "gov".into(),
        "vote".into(),
        proposal_id.to_string(),
        VOTE_OPTION_YES.into(),
    ])
    .signed_by(sender)
    .with_defaults()
    .quiet();

    node.executor
        .execute(&args)
        .await
        .map(|_| ())
        .map_err(|e| e.wrap(format!("failed to vote for proposal {proposal_id} using key {sender}")))
}

/// Votes yes with every key that holds a delegation. Individual vote
/// failures are logged and reported in the outcomes, they don't stop the
/// remaining votes.
#[instrument(skip(node))]
pub async fn submit_all_votes_for_proposal(
    node: &Node<'_>,
    proposal_id: u64,
) -> UpgradeResult<Vec<VoteOutcome>> {
    let accounts = filter_accounts_with_delegations(node)
        .await
        .map_err(|e| e.wrap("error filtering accounts"))?;

    sleep(node.config.settle_delay).await;
    info!("Voting for upgrade...");

    let mut outcomes = Vec::with_capacity(accounts.len());
    for account in accounts {
        let result = vote_for_proposal(node, proposal_id, &account.name).await;
        match &result {
            Ok(()) => info!("  - voted using key: {}", account.name),
            Err(e) => warn!("  - could NOT vote using key: {} ({e})", account.name),
        }

        outcomes.push(VoteOutcome {
            account: account.name,
            result,
        });
    }

    Ok(outcomes)
}
