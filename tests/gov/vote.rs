use crate::helpers::*;
use upgrade_local_node::{
    codec::JsonCodec,
    error::ErrorKind,
    gov::{submit_all_votes_for_proposal, vote_for_proposal},
    node::Node,
};

fn staking_executor() -> ScriptedExecutor {
    ScriptedExecutor::new()
        .respond(&["keys", "list"], KEYS_LIST)
        .respond(
            &["query", "staking", "delegations", DEV0],
            delegations_of(DEV0, &["evmosvaloper1a"]),
        )
        .respond(
            &["query", "staking", "delegations", DEV1],
            delegations_of(DEV1, &["evmosvaloper1a"]),
        )
        .respond(
            &["query", "staking", "delegations", DEV2],
            delegations_of(DEV2, &["evmosvaloper1a"]),
        )
        .respond(
            &["query", "staking", "delegations", MYKEY],
            delegations_of(MYKEY, &[]),
        )
}

#[tokio::test]
async fn vote_is_a_quiet_signed_transaction() -> anyhow::Result<()> {
    let config = test_config();
    let executor = ScriptedExecutor::new().respond(&["tx", "gov", "vote"], "");
    let node = Node::new(&config, &executor, &JsonCodec);

    vote_for_proposal(&node, 7, "dev1").await?;

    let calls = executor.calls();
    assert_eq!(calls[0].subcommand, vec!["tx", "gov", "vote", "7", "yes"]);
    assert_eq!(calls[0].from.as_deref(), Some("dev1"));
    assert!(calls[0].use_defaults);
    assert!(calls[0].quiet);
    Ok(())
}

#[tokio::test]
async fn failed_vote_names_proposal_and_key() {
    let config = test_config();
    let executor = ScriptedExecutor::new().fail(&["tx", "gov", "vote"], "exit status: 1");
    let node = Node::new(&config, &executor, &JsonCodec);

    let err = vote_for_proposal(&node, 7, "dev0").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Execution);
    let message = err.to_string();
    assert!(message.contains('7'));
    assert!(message.contains("dev0"));
}

#[tokio::test]
async fn votes_with_every_staking_account() -> anyhow::Result<()> {
    let config = test_config();
    let executor = staking_executor().respond(&["tx", "gov", "vote", "4", "yes"], "");
    let node = Node::new(&config, &executor, &JsonCodec);

    let outcomes = submit_all_votes_for_proposal(&node, 4).await?;

    let voters: Vec<&str> = outcomes.iter().map(|vote| vote.account.as_str()).collect();
    assert_eq!(voters, vec!["dev0", "dev1", "dev2"]);
    assert!(outcomes.iter().all(|vote| vote.is_success()));

    let signers: Vec<Option<String>> = executor
        .calls()
        .into_iter()
        .filter(|call| call.subcommand.starts_with(&["tx".to_string()]))
        .map(|call| call.from)
        .collect();
    assert_eq!(
        signers,
        vec![
            Some("dev0".to_string()),
            Some("dev1".to_string()),
            Some("dev2".to_string())
        ]
    );
    Ok(())
}

#[tokio::test]
async fn one_failed_vote_does_not_stop_the_others() -> anyhow::Result<()> {
    let config = test_config();
    let executor = staking_executor()
        .fail_for(&["tx", "gov", "vote"], "dev1", "account sequence mismatch")
        .respond(&["tx", "gov", "vote"], "");
    let node = Node::new(&config, &executor, &JsonCodec);

    let outcomes = submit_all_votes_for_proposal(&node, 4).await?;

    let results: Vec<(&str, bool)> = outcomes
        .iter()
        .map(|vote| (vote.account.as_str(), vote.is_success()))
        .collect();
    assert_eq!(results, vec![("dev0", true), ("dev1", false), ("dev2", true)]);

    let err = outcomes[1].error().unwrap();
    assert!(err.to_string().contains("failed to vote for proposal 4 using key dev1"));
    assert!(err.to_string().contains("account sequence mismatch"));
    Ok(())
}

#[tokio::test]
async fn no_votes_without_accounts() {
    let config = test_config();
    let executor = ScriptedExecutor::new().fail(&["keys", "list"], "keyring not found");
    let node = Node::new(&config, &executor, &JsonCodec);

    let err = submit_all_votes_for_proposal(&node, 4).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Execution);
    assert!(executor
        .calls()
        .iter()
        .all(|call| !call.subcommand.starts_with(&["tx".to_string()])));
}
