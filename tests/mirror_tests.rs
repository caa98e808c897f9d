//! Tests for the mirror-node client: log parsing, trace-line rendering
//! and the non-fatal failure policy. HTTP cases run against a mockito
//! server, no live mirror node needed.

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::U256;
use hedera::{AccountId, ContractId};
use hedera_escrow_lab::abi::{account_evm_address, parse_artifact};
use hedera_escrow_lab::mirror::{render_log_line, LogEntry, MirrorClient};
use hedera_escrow_lab::ContractInterface;

const ARTIFACT_JSON: &str = include_str!("fixtures/EscrowContract.json");

fn escrow_interface() -> ContractInterface {
    let artifact = parse_artifact(ARTIFACT_JSON).expect("fixture artifact parses");
    ContractInterface::new(artifact.abi)
}

/// Hex-encode the EscrowFunded topics and data for a payer/amount pair.
fn funded_log(block: u64, tx_hash: &str) -> LogEntry {
    let iface = escrow_interface();
    let event = iface
        .abi()
        .events
        .get("EscrowFunded")
        .and_then(|o| o.first())
        .unwrap()
        .clone();
    let payer = account_evm_address(&AccountId::new(0, 0, 1001));
    let data = DynSolValue::Tuple(vec![DynSolValue::Uint(U256::from(1_000_000_000u64), 256)])
        .abi_encode_params();
    LogEntry {
        data: format!("0x{}", hex::encode(data)),
        topics: vec![
            format!("0x{}", hex::encode(event.selector())),
            format!("0x{}", hex::encode(DynSolValue::Address(payer).abi_encode())),
        ],
        block_number: block,
        transaction_hash: tx_hash.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Trace-line rendering
// ---------------------------------------------------------------------------

mod rendering {
    use super::*;

    #[test]
    fn renders_one_line_with_colon_joined_arguments() {
        let iface = escrow_interface();
        let log = funded_log(4_016_332, "0x8f705e2c");
        let line = render_log_line(&iface, &log).unwrap().unwrap();
        assert_eq!(
            line,
            "Block: 4016332 : Tx Hash: 0x8f705e2c : Event: EscrowFunded : 0.0.1001 : 1000000000"
        );
    }

    #[test]
    fn empty_data_entries_are_skipped() {
        let iface = escrow_interface();
        let log = LogEntry {
            data: "0x".to_string(),
            topics: vec![],
            block_number: 1,
            transaction_hash: "0x00".to_string(),
        };
        assert!(render_log_line(&iface, &log).unwrap().is_none());
    }

    #[test]
    fn unknown_event_is_a_decode_error() {
        let iface = escrow_interface();
        let mut log = funded_log(1, "0x00");
        log.topics[0] = format!("0x{}", hex::encode([0u8; 32]));
        assert!(render_log_line(&iface, &log).is_err());
    }
}

// ---------------------------------------------------------------------------
// HTTP behaviour
// ---------------------------------------------------------------------------

mod http {
    use super::*;

    fn logs_body(log: &LogEntry) -> String {
        format!(
            r#"{{"logs":[{{"address":"0x0000000000000000000000000000000000117d2a",
                "data":"{}","topics":["{}","{}"],
                "block_number":{},"transaction_hash":"{}","index":0}}]}}"#,
            log.data, log.topics[0], log.topics[1], log.block_number, log.transaction_hash
        )
    }

    #[tokio::test]
    async fn fetches_the_latest_log_newest_first() {
        let mut server = mockito::Server::new_async().await;
        let log = funded_log(4_016_332, "0x8f705e2c");
        let mock = server
            .mock("GET", "/api/v1/contracts/0.0.1147178/results/logs")
            .match_query(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("order".into(), "desc".into()),
                mockito::Matcher::UrlEncoded("limit".into(), "1".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(logs_body(&log))
            .create_async()
            .await;

        let contract_id: ContractId = "0.0.1147178".parse().unwrap();
        let client = MirrorClient::new(server.url());
        let logs = client.latest_logs(&contract_id).await.unwrap();

        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].block_number, 4_016_332);
        assert_eq!(logs[0].transaction_hash, "0x8f705e2c");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn check_last_event_renders_the_decoded_line() {
        let mut server = mockito::Server::new_async().await;
        let log = funded_log(7, "0xbeef");
        let _mock = server
            .mock("GET", "/api/v1/contracts/0.0.1147178/results/logs")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(logs_body(&log))
            .create_async()
            .await;

        let contract_id: ContractId = "0.0.1147178".parse().unwrap();
        let client = MirrorClient::new(server.url());
        let iface = escrow_interface();
        let lines = client.check_last_event(&iface, &contract_id).await;

        assert_eq!(
            lines,
            ["Block: 7 : Tx Hash: 0xbeef : Event: EscrowFunded : 0.0.1001 : 1000000000"]
        );
    }

    #[tokio::test]
    async fn http_failure_is_non_fatal() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v1/contracts/0.0.1147178/results/logs")
            .match_query(mockito::Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let contract_id: ContractId = "0.0.1147178".parse().unwrap();
        let client = MirrorClient::new(server.url());

        assert!(client.latest_logs(&contract_id).await.is_err());
        // The verifier swallows the failure and returns nothing.
        let iface = escrow_interface();
        assert!(client.check_last_event(&iface, &contract_id).await.is_empty());
    }

    #[tokio::test]
    async fn empty_log_list_prints_nothing() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v1/contracts/0.0.1147178/results/logs")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"logs":[]}"#)
            .create_async()
            .await;

        let contract_id: ContractId = "0.0.1147178".parse().unwrap();
        let client = MirrorClient::new(server.url());
        let iface = escrow_interface();
        assert!(client.check_last_event(&iface, &contract_id).await.is_empty());
    }
}
