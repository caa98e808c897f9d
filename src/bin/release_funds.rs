//! Trigger the escrow release and trace the emitted event.
//!
//! Usage:
//!   cargo run --bin release_funds -- [contract-id]
//!
//! The contract id may be given as the single positional argument or
//! via the `CONTRACT_ID` environment variable.

use std::time::Duration;

use clap::Parser;
use hedera::ContractId;
use hedera_escrow_lab::abi::load_artifact;
use hedera_escrow_lab::{
    contract, print_step, Confirm, ContractInterface, MirrorClient, Settings, TerminalConfirm,
};

const EXECUTE_GAS: u64 = 200_000;

#[derive(Parser)]
#[command(name = "release_funds", about = "Release the escrowed funds to the payee")]
struct Args {
    /// Contract to call; falls back to the CONTRACT_ID environment variable
    contract_id: Option<ContractId>,
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
    println!("Using Operator: {}", settings.operator_id);

    let contract_id = match args.contract_id.or(settings.contract_id) {
        Some(id) => id,
        None => {
            eprintln!(
                "ContractId required, please set CONTRACT_ID in the environment \
                 or pass it as an argument"
            );
            std::process::exit(1);
        }
    };
    println!("Using Contract: {contract_id}");

    print_step(1, "Loading contract artifact...");
    let artifact = load_artifact(&settings.contract_name)?;
    let iface = ContractInterface::new(artifact.abi);

    if !TerminalConfirm.confirm("Do you want to release funds?") {
        println!("Aborting");
        std::process::exit(1);
    }

    print_step(2, "Calling release...");
    let client = settings.client();
    let outcome =
        contract::contract_execute(&client, &iface, contract_id, EXECUTE_GAS, "release", &[], None)
            .await?;
    println!("Contract Results: {:?}", outcome.receipt.status);

    print_step(3, "Checking mirror node for the release event...");
    // The mirror lags consensus by a few seconds.
    tokio::time::sleep(Duration::from_secs(3)).await;
    let mirror = MirrorClient::new(settings.network.mirror_base_url());
    mirror.check_last_event(&iface, &contract_id).await;

    Ok(())
}
