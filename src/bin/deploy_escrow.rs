//! Deploy the escrow contract with three party wallets.
//!
//! Usage:
//!   cargo run --bin deploy_escrow -- <payer> <payee> <referee>
//!
//! Example:
//!   cargo run --bin deploy_escrow -- 0.0.AAA 0.0.BBB 0.0.CCC
//!
//! where the payer funds the escrow, the payee receives the funds and
//! the referee may also trigger the release.

use clap::Parser;
use hedera::AccountId;
use hedera_escrow_lab::abi::{load_artifact, long_zero_address};
use hedera_escrow_lab::{contract, print_step, Confirm, ContractInterface, Settings, TerminalConfirm};

const DEPLOY_GAS: u64 = 500_000;

#[derive(Parser)]
#[command(
    name = "deploy_escrow",
    about = "Deploy the escrow contract with payer, payee and referee wallets"
)]
struct Args {
    /// Account that pays into escrow
    payer: AccountId,
    /// Account that receives the escrowed funds
    payee: AccountId,
    /// Account that referees the release
    referee: AccountId,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let settings = match Settings::from_env() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    println!("Using ENVIRONMENT: {}", settings.network.label());
    println!(
        "Using wallets: payer {} payee {} referee {}",
        args.payer, args.payee, args.referee
    );
    println!("Using Operator: {}", settings.operator_id);

    print_step(1, "Loading contract artifact...");
    let artifact = load_artifact(&settings.contract_name)?;
    let iface = ContractInterface::new(artifact.abi);
    println!(
        "  {}: {} bytes of bytecode",
        settings.contract_name,
        artifact.bytecode.len()
    );

    if !TerminalConfirm.confirm("Do you want to deploy the contract?") {
        println!("Exiting...");
        std::process::exit(1);
    }

    print_step(2, "Deploying contract...");
    println!("  gas @ {DEPLOY_GAS}");
    let client = settings.client();
    let contract_id = contract::deploy_contract(
        &client,
        &iface,
        &artifact.bytecode,
        DEPLOY_GAS,
        args.payer,
        args.payee,
        args.referee,
    )
    .await?;

    let evm_address = long_zero_address(contract_id.shard, contract_id.realm, contract_id.num);
    println!("Contract deployed successfully: {contract_id} / {evm_address}");

    Ok(())
}
