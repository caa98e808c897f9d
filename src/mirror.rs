//! Mirror-node event verification.
//!
//! The mirror node is a read-only HTTP index of ledger history. After a
//! state-changing call the scripts ask it for the newest log emitted by
//! the contract and print one trace line per event. The mirror lags the
//! consensus network by a few seconds, so callers sleep briefly before
//! checking. Failures here never abort a script — the on-chain work is
//! already done.

use hedera::ContractId;
use serde::Deserialize;

use crate::abi::{render_value, ContractInterface};
use crate::error::EscrowLabError;

#[derive(Debug, Deserialize)]
pub struct LogsResponse {
    pub logs: Vec<LogEntry>,
}

/// One raw log entry as the mirror API returns it.
#[derive(Debug, Deserialize)]
pub struct LogEntry {
    pub data: String,
    pub topics: Vec<String>,
    pub block_number: u64,
    pub transaction_hash: String,
}

pub struct MirrorClient {
    base_url: String,
    http: reqwest::Client,
}

impl MirrorClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
        }
    }

    /// Fetch the most recent log entries for a contract, newest first,
    /// limited to one entry.
    pub async fn latest_logs(
        &self,
        contract_id: &ContractId,
    ) -> Result<Vec<LogEntry>, EscrowLabError> {
        let url = format!(
            "{}/api/v1/contracts/{}/results/logs?order=desc&limit=1",
            self.base_url, contract_id
        );
        let response = self.http.get(&url).send().await?.error_for_status()?;
        let parsed: LogsResponse = response.json().await?;
        Ok(parsed.logs)
    }

    /// Decode and print the most recent contract event as a single trace
    /// line. HTTP or parse failures are logged and swallowed; returns the
    /// rendered lines (empty when nothing was printed).
    pub async fn check_last_event(
        &self,
        iface: &ContractInterface,
        contract_id: &ContractId,
    ) -> Vec<String> {
        let logs = match self.latest_logs(contract_id).await {
            Ok(logs) => logs,
            Err(e) => {
                eprintln!("mirror check failed: {e}");
                return Vec::new();
            }
        };

        let mut lines = Vec::new();
        for log in &logs {
            match render_log_line(iface, log) {
                Ok(Some(line)) => {
                    println!("{line}");
                    lines.push(line);
                }
                Ok(None) => {} // empty data entry, nothing to decode
                Err(e) => eprintln!("mirror log decode failed: {e}"),
            }
        }
        lines
    }
}

/// Render one log entry as
/// `Block: <n> : Tx Hash: <hash> : Event: <name> : <arg> : <arg> …`.
/// Entries whose data is `0x` are skipped.
pub fn render_log_line(
    iface: &ContractInterface,
    log: &LogEntry,
) -> Result<Option<String>, EscrowLabError> {
    if log.data == "0x" {
        return Ok(None);
    }

    let data = decode_hex_field(&log.data)?;
    let topics = log
        .topics
        .iter()
        .map(|t| decode_hex_field(t))
        .collect::<Result<Vec<_>, _>>()?;

    let event = iface.decode_event(&topics, &data)?;

    let mut line = format!(
        "Block: {} : Tx Hash: {} : Event: {}",
        log.block_number, log.transaction_hash, event.name
    );
    for value in &event.args {
        line.push_str(" : ");
        line.push_str(&render_value(value));
    }
    Ok(Some(line))
}

fn decode_hex_field(field: &str) -> Result<Vec<u8>, EscrowLabError> {
    hex::decode(field.trim_start_matches("0x"))
        .map_err(|e| EscrowLabError::Mirror(format!("bad hex in log entry: {e}")))
}
