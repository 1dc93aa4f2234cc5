//! Devnet enrollment CLI
//!
//! Drives the enrollment program on devnet: wallet setup, account
//! initialization, and per-track submissions. Every command is a single
//! sequential pass; a failure aborts the remaining steps and completed
//! steps are left as-is.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use enroll_sdk::{
    wallet, ApplicationRecord, ChainClient, Keypair, Pubkey, RpcChainClient, Signature, Signer,
    SubmissionWorkflow, Track,
};
use solana_sdk::system_instruction;
use std::{path::Path, str::FromStr};
use tracing::{error, info};

mod config;
use config::Config;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<String>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a new wallet keypair and write it to the configured path
    Keygen,
    /// Request a devnet airdrop
    Airdrop {
        #[arg(default_value_t = 2_000_000_000)]
        lamports: u64,
    },
    /// Show the wallet balance
    Balance,
    /// Transfer lamports to another address
    Transfer { to: String, lamports: u64 },
    /// Transfer the entire balance, minus the fee, to another address
    Drain { to: String },
    /// Create the application record with a github handle
    Initialize { github: String },
    /// Update the recorded github handle
    Update { github: String },
    /// Submit the TypeScript track
    SubmitTs,
    /// Submit the Rust track
    SubmitRs,
    /// Create a new collection
    CreateCollection,
    /// Close the application record
    Close,
    /// Show the application record, balance, and rent-exempt minimum
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(args.log_level.as_str())
        .with_target(false)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = Config::load(args.config.as_deref())?;
    let client = RpcChainClient::new(&config.rpc_url);

    run(args.command, &config, &client).await
}

async fn run(command: Command, config: &Config, client: &RpcChainClient) -> Result<()> {
    let workflow = SubmissionWorkflow::new(
        client,
        config.program_id()?,
        config.collection()?,
        config.mpl_core_program_id()?,
    );

    match command {
        Command::Keygen => {
            if Path::new(&config.keypair_path).exists() {
                anyhow::bail!("refusing to overwrite existing {}", config.keypair_path);
            }
            let keypair = Keypair::new();
            wallet::write_keypair_file(&keypair, &config.keypair_path)?;
            println!("New wallet: {}", keypair.pubkey());
            println!("Saved to {}", config.keypair_path);
        }

        Command::Airdrop { lamports } => {
            let keypair = config.load_keypair()?;
            let signature = client.request_airdrop(&keypair.pubkey(), lamports).await?;
            info!(%signature, lamports, "airdrop requested");
            println!("{}", explorer_url(&signature));
        }

        Command::Balance => {
            let keypair = config.load_keypair()?;
            let balance = client.get_balance(&keypair.pubkey()).await?;
            println!("{} has {} lamports", keypair.pubkey(), balance);
        }

        Command::Transfer { to, lamports } => {
            let keypair = config.load_keypair()?;
            let to = Pubkey::from_str(&to).context("Invalid destination address")?;
            let ix = system_instruction::transfer(&keypair.pubkey(), &to, lamports);
            let signature = client.submit_transaction(&[ix], &[&keypair]).await?;
            println!("{}", explorer_url(&signature));
        }

        Command::Drain { to } => {
            let keypair = config.load_keypair()?;
            let to = Pubkey::from_str(&to).context("Invalid destination address")?;
            let balance = client.get_balance(&keypair.pubkey()).await?;

            let probe = system_instruction::transfer(&keypair.pubkey(), &to, balance);
            let fee = client.estimate_fee(&[probe], &keypair.pubkey()).await?;
            anyhow::ensure!(balance > fee, "balance {balance} does not cover the fee {fee}");

            let ix = system_instruction::transfer(&keypair.pubkey(), &to, balance - fee);
            let signature = client.submit_transaction(&[ix], &[&keypair]).await?;
            info!(%signature, amount = balance - fee, "balance drained");
            println!("{}", explorer_url(&signature));
        }

        Command::Initialize { github } => {
            let keypair = config.load_keypair()?;
            let signature = report(workflow.initialize(&keypair, &github).await)?;
            println!("{}", explorer_url(&signature));
        }

        Command::Update { github } => {
            let keypair = config.load_keypair()?;
            let signature = report(workflow.update(&keypair, &github).await)?;
            println!("{}", explorer_url(&signature));
        }

        Command::SubmitTs => {
            let keypair = config.load_keypair()?;
            let (signature, mint) = report(workflow.submit(&keypair, Track::TypeScript).await)?;
            println!("Minted asset: {mint}");
            println!("{}", explorer_url(&signature));
        }

        Command::SubmitRs => {
            let keypair = config.load_keypair()?;
            let (signature, mint) = report(workflow.submit(&keypair, Track::Rust).await)?;
            println!("Minted asset: {mint}");
            println!("{}", explorer_url(&signature));
        }

        Command::CreateCollection => {
            let keypair = config.load_keypair()?;
            let (signature, collection) = workflow.create_collection(&keypair).await?;
            println!("New collection: {collection}");
            println!("{}", explorer_url(&signature));
        }

        Command::Close => {
            let keypair = config.load_keypair()?;
            let signature = workflow.close(&keypair).await?;
            println!("{}", explorer_url(&signature));
        }

        Command::Status => {
            let keypair = config.load_keypair()?;
            let user = keypair.pubkey();
            let (record_address, bump) = workflow.application_address(&user)?;
            let balance = client.get_balance(&user).await?;

            println!("Wallet:  {user}");
            println!("Balance: {balance} lamports");
            println!("Record:  {record_address} (bump {bump})");

            match client.get_account_info(&record_address).await? {
                Some(account) => {
                    let record = ApplicationRecord::from_account_data(&account.data)?;
                    let rent = client
                        .minimum_balance_for_rent_exemption(account.data.len())
                        .await?;
                    print_record(&record, account.lamports, rent);
                }
                None => println!("Record not initialized yet"),
            }
        }
    }

    Ok(())
}

fn print_record(record: &ApplicationRecord, lamports: u64, rent_exempt_minimum: u64) {
    println!("Github:  {}", record.github);
    println!("Tracks:  ts={} rs={}", record.ts_done, record.rs_done);
    println!(
        "Rent:    {lamports} lamports held, {rent_exempt_minimum} required for exemption"
    );
}

/// Surface the program's idempotency errors with a hint before
/// propagating.
fn report<T>(result: enroll_sdk::Result<T>) -> Result<T> {
    if let Err(e) = &result {
        let message = e.to_string();
        if message.contains("PreReqTsAlreadyCompleted") {
            error!("the TypeScript track is already completed");
        } else if message.contains("PreReqRsAlreadyCompleted") {
            error!("the Rust track is already completed");
        } else if message.contains("PreReqTsNotCompleted") {
            error!("complete the TypeScript track before submitting Rust");
        }
    }
    result.map_err(Into::into)
}

fn explorer_url(signature: &Signature) -> String {
    format!("https://explorer.solana.com/tx/{signature}?cluster=devnet")
}
