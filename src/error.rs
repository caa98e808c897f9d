use std::fmt;

#[derive(Debug)]
pub enum EscrowLabError {
    Config(String),
    Artifact(String),
    Codec(String),
    Ledger(String),
    Mirror(String),
    MissingField { function: String, field: String },
}

impl fmt::Display for EscrowLabError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config error: {e}"),
            Self::Artifact(e) => write!(f, "artifact error: {e}"),
            Self::Codec(e) => write!(f, "ABI codec error: {e}"),
            Self::Ledger(e) => write!(f, "ledger error: {e}"),
            Self::Mirror(e) => write!(f, "mirror node error: {e}"),
            Self::MissingField { function, field } => {
                write!(f, "function {function} has no output named {field}")
            }
        }
    }
}

impl std::error::Error for EscrowLabError {}

impl From<hedera::Error> for EscrowLabError {
    fn from(e: hedera::Error) -> Self {
        Self::Ledger(format!("{e}"))
    }
}

impl From<reqwest::Error> for EscrowLabError {
    fn from(e: reqwest::Error) -> Self {
        Self::Mirror(format!("{e}"))
    }
}

impl From<alloy_dyn_abi::Error> for EscrowLabError {
    fn from(e: alloy_dyn_abi::Error) -> Self {
        Self::Codec(format!("{e}"))
    }
}

impl From<std::io::Error> for EscrowLabError {
    fn from(e: std::io::Error) -> Self {
        Self::Artifact(format!("{e}"))
    }
}

impl From<serde_json::Error> for EscrowLabError {
    fn from(e: serde_json::Error) -> Self {
        Self::Artifact(format!("{e}"))
    }
}

impl From<hex::FromHexError> for EscrowLabError {
    fn from(e: hex::FromHexError) -> Self {
        Self::Artifact(format!("bad hex in bytecode: {e}"))
    }
}
