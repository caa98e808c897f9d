//! Hedera Escrow Lab
//!
//! Deployment and integration-test tooling for a three-party escrow
//! contract (payer, payee, referee). The contract itself ships only as a
//! build artifact; this crate deploys it, drives `fundEscrow`/`release`,
//! reads its settings back, and cross-checks emitted events against the
//! mirror node.
//!
//! ## Running the scripts
//! ```bash
//! cargo run --bin deploy_escrow -- 0.0.AAA 0.0.BBB 0.0.CCC
//! cargo run --bin release_funds -- 0.0.XXX
//! cargo run --bin escrow_live_test
//! ```
//!
//! Requires `ENVIRONMENT`, `CONTRACT_NAME`, `ACCOUNT_ID` and
//! `PRIVATE_KEY` in the environment (see `config`).

pub mod abi;
pub mod config;
pub mod confirm;
pub mod contract;
pub mod error;
pub mod mirror;

pub use abi::{load_artifact, ContractArtifact, ContractInterface};
pub use config::{Network, Settings};
pub use confirm::{AutoApprove, Confirm, TerminalConfirm};
pub use contract::ExecuteOutcome;
pub use error::EscrowLabError;
pub use mirror::MirrorClient;

pub fn print_header(title: &str) {
    println!("\n=== {} ===\n", title);
}

pub fn print_step(num: usize, description: &str) {
    println!("Step {}: {}", num, description);
}
