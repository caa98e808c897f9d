//! Tests for network selection.

use hedera_escrow_lab::{EscrowLabError, Network};

#[test]
fn environment_selector_is_case_insensitive() {
    assert_eq!(Network::parse("TEST").unwrap(), Network::Test);
    assert_eq!(Network::parse("test").unwrap(), Network::Test);
    assert_eq!(Network::parse("Main").unwrap(), Network::Main);
}

#[test]
fn unknown_environment_is_a_config_error() {
    assert!(matches!(
        Network::parse("STAGING"),
        Err(EscrowLabError::Config(_))
    ));
}

#[test]
fn mirror_base_url_follows_the_network() {
    assert_eq!(
        Network::Test.mirror_base_url(),
        "https://testnet.mirrornode.hedera.com"
    );
    assert_eq!(
        Network::Main.mirror_base_url(),
        "https://mainnet-public.mirrornode.hedera.com"
    );
}

#[test]
fn labels_match_the_console_output() {
    assert_eq!(Network::Test.label(), "TESTNET");
    assert_eq!(Network::Main.label(), "MAINNET");
}
