//! Environment-sourced operator configuration.
//!
//! Everything a script needs to talk to the network comes from the
//! process environment: `ENVIRONMENT` (TEST or MAIN), `CONTRACT_NAME`
//! (artifact to load), `ACCOUNT_ID` + `PRIVATE_KEY` (operator), and an
//! optional `CONTRACT_ID` for scripts that act on an existing contract.
//! Missing values are reported before any network call is attempted.

use std::env;
use std::str::FromStr;

use hedera::{AccountId, Client, ContractId, PrivateKey};

use crate::error::EscrowLabError;

const MIRROR_MAINNET: &str = "https://mainnet-public.mirrornode.hedera.com";
const MIRROR_TESTNET: &str = "https://testnet.mirrornode.hedera.com";

/// Target network selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    Test,
    Main,
}

impl Network {
    /// Parse the `ENVIRONMENT` value, case-insensitively.
    pub fn parse(value: &str) -> Result<Self, EscrowLabError> {
        match value.to_uppercase().as_str() {
            "TEST" => Ok(Self::Test),
            "MAIN" => Ok(Self::Main),
            other => Err(EscrowLabError::Config(format!(
                "ENVIRONMENT must be TEST or MAIN, got {other}"
            ))),
        }
    }

    pub fn mirror_base_url(&self) -> &'static str {
        match self {
            Self::Test => MIRROR_TESTNET,
            Self::Main => MIRROR_MAINNET,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Test => "TESTNET",
            Self::Main => "MAINNET",
        }
    }
}

/// Fully resolved operator settings for one script run.
pub struct Settings {
    pub network: Network,
    pub contract_name: String,
    pub operator_id: AccountId,
    pub operator_key: PrivateKey,
    pub contract_id: Option<ContractId>,
}

impl Settings {
    /// Read and validate all required variables from the environment.
    pub fn from_env() -> Result<Self, EscrowLabError> {
        let network = Network::parse(&require_var("ENVIRONMENT")?)?;
        let contract_name = require_var("CONTRACT_NAME")?;
        let operator_id = AccountId::from_str(&require_var("ACCOUNT_ID")?)
            .map_err(|e| EscrowLabError::Config(format!("bad ACCOUNT_ID: {e}")))?;
        let operator_key = PrivateKey::from_str(&require_var("PRIVATE_KEY")?)
            .map_err(|e| EscrowLabError::Config(format!("bad PRIVATE_KEY: {e}")))?;

        let contract_id = match env::var("CONTRACT_ID") {
            Ok(v) if !v.trim().is_empty() => Some(
                ContractId::from_str(v.trim())
                    .map_err(|e| EscrowLabError::Config(format!("bad CONTRACT_ID: {e}")))?,
            ),
            _ => None,
        };

        Ok(Self {
            network,
            contract_name,
            operator_id,
            operator_key,
            contract_id,
        })
    }

    /// Build a network client with this operator set.
    pub fn client(&self) -> Client {
        let client = match self.network {
            Network::Test => Client::for_testnet(),
            Network::Main => Client::for_mainnet(),
        };
        client.set_operator(self.operator_id, self.operator_key.clone());
        client
    }

    /// Build a client for the same network operated by another party.
    /// The live suite uses one client per party instead of mutating a
    /// shared operator between calls.
    pub fn client_for(&self, account: AccountId, key: PrivateKey) -> Client {
        let client = match self.network {
            Network::Test => Client::for_testnet(),
            Network::Main => Client::for_mainnet(),
        };
        client.set_operator(account, key);
        client
    }
}

fn require_var(name: &str) -> Result<String, EscrowLabError> {
    match env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(EscrowLabError::Config(format!(
            "{name} required, please set it in the environment"
        ))),
    }
}
