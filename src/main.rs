//! Hedera Escrow Lab
//!
//! Operator tooling for a three-party escrow contract.
//!
//! ## Running the scripts
//! ```bash
//! cargo run --bin deploy_escrow -- <payer> <payee> <referee>
//! cargo run --bin release_funds -- [contract-id]
//! cargo run --bin escrow_live_test
//! ```

fn main() {
    println!("Hedera Escrow Lab");
    println!("=================");
    println!();
    println!("Run the operator scripts:");
    println!("  cargo run --bin deploy_escrow -- <payer> <payee> <referee>");
    println!("  cargo run --bin release_funds -- [contract-id]");
    println!("  cargo run --bin escrow_live_test");
    println!();
    println!("Set ENVIRONMENT, CONTRACT_NAME, ACCOUNT_ID and PRIVATE_KEY first.");
}
