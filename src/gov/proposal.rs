use crate::{
    binary::BinaryCmdArgs,
    constants::*,
    error::{UpgradeError, UpgradeResult},
    node::Node,
    tx::Event,
};
use tokio::time::sleep;
use tracing::{debug, instrument};

/// Command line for a legacy software upgrade proposal
pub fn build_upgrade_proposal_command(target_version: &str, upgrade_height: u64) -> Vec<String> {
    let title = format!("Upgrade to {target_version}");
    vec![
        "tx".into(),
        "gov".into(),
        "submit-legacy-proposal".into(),
        "software-upgrade".into(),
        target_version.into(),
        "--title".into(),
        title.clone(),
        "--description".into(),
        title,
        "--upgrade-height".into(),
        upgrade_height.to_string(),
        "--deposit".into(),
        UPGRADE_DEPOSIT.into(),
        "--output".into(),
        "json".into(),
        "--no-validate".into(),
    ]
}

/// Finds the proposal id in the events of a proposal submission transaction.
///
/// The first `proposal_id` attribute of the first `submit_proposal` event
/// that carries one wins.
pub fn get_proposal_id_from_submit_events(events: &[Event]) -> UpgradeResult<u64> {
    let mut submit_events = events
        .iter()
        .filter(|event| event.kind == SUBMIT_PROPOSAL_EVENT)
        .peekable();

    if submit_events.peek().is_none() {
        return Err(UpgradeError::not_found("proposal submission event not found"));
    }

    for event in submit_events {
        if let Some(attribute) = event
            .attributes
            .iter()
            .find(|attribute| attribute.key == PROPOSAL_ID_ATTRIBUTE)
        {
            return attribute
                .value
                .parse()
                .map_err(|e| UpgradeError::parse("error parsing proposal id", e));
        }
    }

    Err(UpgradeError::not_found(format!(
        "{PROPOSAL_ID_ATTRIBUTE} attribute not found in {SUBMIT_PROPOSAL_EVENT} event"
    )))
}

/// Last non-empty line of the output; gas estimates are printed before the
/// JSON response
pub fn last_json_line(out: &str) -> &str {
    out.trim()
        .lines()
        .rev()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or_default()
}

/// Events of the broadcast transaction. Sync broadcasts return no events, in
/// which case the transaction is looked up once by hash after the settle
/// delay.
pub async fn get_tx_events(node: &Node<'_>, payload: &str) -> UpgradeResult<Vec<Event>> {
    let response = node.codec.parse_tx_response(payload)?;
    if !response.is_success() {
        return Err(UpgradeError::Execution {
            command: format!("broadcast of tx {}", response.txhash),
            output: format!("code {}: {}", response.code, response.raw_log),
        });
    }

    let txhash = response.txhash.clone();
    let events = response.into_events();
    if !events.is_empty() || txhash.is_empty() {
        return Ok(events);
    }

    debug!("No events in broadcast response, querying tx {txhash}");
    sleep(node.config.settle_delay).await;

    let out = node
        .executor
        .execute(&BinaryCmdArgs::new(["q", "tx", txhash.as_str(), "--output=json"]).quiet())
        .await
        .map_err(|e| e.wrap(format!("error querying tx {txhash}")))?;
    let response = node.codec.parse_tx_response(&out)?;
    Ok(response.into_events())
}

/// Submits a software upgrade proposal and returns its id
#[instrument(skip(node))]
pub async fn submit_upgrade_proposal(
    node: &Node<'_>,
    target_version: &str,
    upgrade_height: u64,
) -> UpgradeResult<u64> {
    let args = BinaryCmdArgs::new(build_upgrade_proposal_command(target_version, upgrade_height))
        .signed_by(node.config.proposer.as_str())
        .with_defaults();

    let out = node.executor.execute(&args).await.map_err(|e| {
        e.wrap(format!(
            "failed to submit upgrade proposal to {target_version} at height {upgrade_height}"
        ))
    })?;

    let events = get_tx_events(node, last_json_line(&out))
        .await
        .map_err(|e| e.wrap("error getting tx events"))?;

    get_proposal_id_from_submit_events(&events)
}

/// Id of the most recently created proposal
#[instrument(skip(node))]
pub async fn query_latest_proposal_id(node: &Node<'_>) -> UpgradeResult<u64> {
    let out = node
        .executor
        .execute(&BinaryCmdArgs::new(["q", "gov", "proposals", "--output=json"]))
        .await
        .map_err(|e| e.wrap("error querying proposals"))?;

    let proposals = node.codec.parse_proposals(&out)?;
    proposals
        .last()
        .map(|proposal| proposal.id)
        .ok_or_else(|| UpgradeError::not_found("no proposals found"))
}
