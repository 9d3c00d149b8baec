use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::prelude::*;
use upgrade_local_node::{
    account,
    binary::Binary,
    codec::JsonCodec,
    config::{handle_node_arguments, LogArgs, NodeArgs},
    gov::{self, VoteOutcome},
    node::Node,
};

#[derive(Parser, Debug)]
#[command(name = "upgrade-local-node", author, version, about, long_about = Some("Upgrade Local Node\n\n\
Submit a software upgrade proposal to a local development node and vote for it with every staking test account"))]
struct Cli {
    #[command(flatten)]
    node: NodeArgs,
    #[command(flatten)]
    log: LogArgs,
    #[command(subcommand)]
    command: UpgradeCommand,
}

#[derive(Subcommand, Debug)]
enum UpgradeCommand {
    /// Submit an upgrade proposal and vote for it with all staking accounts
    Upgrade(ProposalArgs),
    /// Submit an upgrade proposal without voting
    Propose(ProposalArgs),
    /// Vote yes with all staking accounts
    Vote {
        /// Proposal to vote for [default: latest proposal]
        #[arg(short, long)]
        proposal_id: Option<u64>,
    },
    /// Show the id of the latest proposal
    LatestProposal,
    /// List the keys that hold delegations
    StakingAccounts {
        /// Output JSON data
        #[arg(short, long, default_value_t = false)]
        json: bool,
    },
}

#[derive(Args, Debug)]
struct ProposalArgs {
    /// Version the node upgrades to
    target_version: String,
    /// Block height at which the upgrade takes effect
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    upgrade_height: u64,
}

fn init_tracing(args: &LogArgs) -> anyhow::Result<()> {
    let file_layer = match &args.log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let log_file = std::fs::File::create(path)
                .with_context(|| format!("unable to create log file {}", path.display()))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Arc::new(log_file))
                    .with_filter(args.log_level),
            )
        }
        None => None,
    };

    let stdout_layer = tracing_subscriber::fmt::layer();
    tracing_subscriber::registry()
        .with(stdout_layer.with_filter(args.log_level_stdout))
        .with(file_layer)
        .init();
    Ok(())
}

fn report_votes(proposal_id: u64, votes: &[VoteOutcome]) {
    let successful = votes.iter().filter(|vote| vote.is_success()).count();
    if votes.is_empty() {
        warn!("No staking accounts found, nobody voted for proposal {proposal_id}");
    } else {
        info!(
            "{successful} of {} accounts voted for proposal {proposal_id}",
            votes.len()
        );
    }
}

#[tokio::main(flavor = "current_thread")]
pub async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log)?;

    let config = handle_node_arguments(cli.node)?;
    let binary = Binary::new(&config);
    let node = Node::new(&config, &binary, &JsonCodec);

    match cli.command {
        UpgradeCommand::Upgrade(args) => {
            let report = gov::upgrade(&node, &args.target_version, args.upgrade_height).await?;
            report_votes(report.proposal_id, &report.votes);
            println!("{}", report.proposal_id);
        }
        UpgradeCommand::Propose(args) => {
            let proposal_id =
                gov::submit_upgrade_proposal(&node, &args.target_version, args.upgrade_height)
                    .await?;
            println!("{proposal_id}");
        }
        UpgradeCommand::Vote { proposal_id } => {
            let proposal_id = match proposal_id {
                Some(proposal_id) => proposal_id,
                None => gov::query_latest_proposal_id(&node).await?,
            };
            let votes = gov::submit_all_votes_for_proposal(&node, proposal_id).await?;
            report_votes(proposal_id, &votes);
        }
        UpgradeCommand::LatestProposal => {
            println!("{}", gov::query_latest_proposal_id(&node).await?);
        }
        UpgradeCommand::StakingAccounts { json } => {
            let accounts = account::filter_accounts_with_delegations(&node).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&accounts)?);
            } else {
                for account in accounts {
                    println!(
                        "{} {} ({} delegations)",
                        account.name,
                        account.address,
                        account.delegations.len()
                    );
                }
            }
        }
    }

    Ok(())
}
