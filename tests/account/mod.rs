use crate::helpers::*;
use upgrade_local_node::{
    account::{filter_accounts_with_delegations, get_accounts, staking_accounts, Account},
    codec::JsonCodec,
    error::ErrorKind,
    node::Node,
};

fn names(accounts: &[Account]) -> Vec<&str> {
    accounts.iter().map(|account| account.name.as_str()).collect()
}

#[tokio::test]
async fn lists_accounts_without_delegations() -> anyhow::Result<()> {
    let config = test_config();
    let executor = ScriptedExecutor::new().respond(&["keys", "list"], KEYS_LIST);
    let node = Node::new(&config, &executor, &JsonCodec);

    let accounts = get_accounts(&node).await?;

    assert_eq!(names(&accounts), vec!["dev0", "dev1", "dev2", "mykey"]);
    assert_eq!(accounts[0].address, DEV0);
    assert_eq!(accounts[0].key_type, "local");
    assert!(accounts[0].pubkey.contains("ethsecp256k1"));
    assert!(accounts.iter().all(|account| account.delegations.is_empty()));
    assert_eq!(
        executor.calls()[0].subcommand,
        vec!["keys", "list", "--output=json"]
    );
    Ok(())
}

#[tokio::test]
async fn listing_failures_are_fatal() {
    let config = test_config();
    let executor = ScriptedExecutor::new().fail(&["keys", "list"], "keyring not found");
    let node = Node::new(&config, &executor, &JsonCodec);

    let err = filter_accounts_with_delegations(&node).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Execution);
    assert!(err.to_string().contains("keyring not found"));
    assert_eq!(executor.calls().len(), 1);

    let executor = ScriptedExecutor::new().respond(&["keys", "list"], "not json");
    let node = Node::new(&config, &executor, &JsonCodec);
    let err = get_accounts(&node).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
}

#[tokio::test]
async fn keeps_delegating_accounts_in_order() -> anyhow::Result<()> {
    let config = test_config();
    let executor = ScriptedExecutor::new()
        .respond(&["keys", "list"], KEYS_LIST)
        .respond(
            &["query", "staking", "delegations", DEV0],
            delegations_of(DEV0, &["evmosvaloper1a"]),
        )
        .respond(
            &["query", "staking", "delegations", DEV1],
            delegations_of(DEV1, &[]),
        )
        .respond(
            &["query", "staking", "delegations", DEV2],
            delegations_of(DEV2, &["evmosvaloper1a", "evmosvaloper1b"]),
        )
        .respond(
            &["query", "staking", "delegations", MYKEY],
            delegations_of(MYKEY, &["evmosvaloper1b"]),
        );
    let node = Node::new(&config, &executor, &JsonCodec);

    let accounts = filter_accounts_with_delegations(&node).await?;

    assert_eq!(names(&accounts), vec!["dev0", "dev2", "mykey"]);
    assert_eq!(accounts[1].delegations.len(), 2);
    assert_eq!(accounts[1].delegations[1].validator_address, "evmosvaloper1b");
    assert_eq!(accounts[0].delegations[0].delegator_address, DEV0);
    Ok(())
}

#[tokio::test]
async fn failed_delegation_queries_do_not_block_other_accounts() -> anyhow::Result<()> {
    let config = test_config();
    let executor = ScriptedExecutor::new()
        .respond(&["keys", "list"], KEYS_LIST)
        .fail(&["query", "staking", "delegations", DEV0], "rpc error")
        .respond(&["query", "staking", "delegations", DEV1], "{not json")
        .respond(
            &["query", "staking", "delegations", DEV2],
            delegations_of(DEV2, &["evmosvaloper1a"]),
        );
    let node = Node::new(&config, &executor, &JsonCodec);

    let accounts = filter_accounts_with_delegations(&node).await?;

    // mykey has no scripted response, so its query fails too
    assert_eq!(names(&accounts), vec!["dev2"]);
    assert_eq!(executor.calls().len(), 5);
    Ok(())
}

#[tokio::test]
async fn delegation_queries_are_quiet() {
    let config = test_config();
    let executor = ScriptedExecutor::new().respond(
        &["query", "staking", "delegations"],
        delegations_of(DEV0, &["evmosvaloper1a"]),
    );
    let node = Node::new(&config, &executor, &JsonCodec);
    let account = Account {
        name: "dev0".into(),
        key_type: "local".into(),
        address: DEV0.into(),
        pubkey: String::new(),
        delegations: vec![],
    };

    let accounts = staking_accounts(&node, vec![account]).await;

    assert_eq!(accounts.len(), 1);
    let calls = executor.calls();
    assert_eq!(
        calls[0].subcommand,
        vec!["query", "staking", "delegations", DEV0, "--output=json"]
    );
    assert!(calls[0].quiet);
    assert!(calls[0].from.is_none());
    assert!(!calls[0].use_defaults);
}
