//! Ledger operations: deploy, execute, query, plus the account and
//! transfer helpers the live suite needs.
//!
//! Every operation is a single blocking round-trip sequence — submit,
//! await receipt, and (for state-changing calls) await the record. None
//! of them retry: a rejected submission or failed receipt surfaces as an
//! error and the operator re-runs by hand.

use alloy_dyn_abi::DynSolValue;
use hedera::{
    AccountBalanceQuery, AccountCreateTransaction, AccountId, Client, ContractCallQuery,
    ContractCreateFlow, ContractExecuteTransaction, ContractId, Hbar, PrivateKey, Status,
    TransactionReceipt, TransactionRecord, TransferTransaction,
};

use crate::abi::{account_evm_address, ContractInterface};
use crate::error::EscrowLabError;

/// Query payment attached to every read-only contract call.
const QUERY_PAYMENT_TINYBAR: i64 = 1_000_000; // 0.01 hbar

/// Outcome of a state-changing contract call.
///
/// `results` is `None` when the contract returned no payload or the
/// payload failed to decode — in both cases the on-chain effects of a
/// successful receipt stand regardless.
pub struct ExecuteOutcome {
    pub receipt: TransactionReceipt,
    pub results: Option<Vec<DynSolValue>>,
    pub record: TransactionRecord,
}

/// Deploy the escrow contract with the three party addresses as
/// constructor parameters. Returns the network-assigned contract id.
pub async fn deploy_contract(
    client: &Client,
    iface: &ContractInterface,
    bytecode: &[u8],
    gas: u64,
    payer: AccountId,
    payee: AccountId,
    referee: AccountId,
) -> Result<ContractId, EscrowLabError> {
    let constructor_params = iface.encode_constructor(&[
        DynSolValue::Address(account_evm_address(&payer)),
        DynSolValue::Address(account_evm_address(&payee)),
        DynSolValue::Address(account_evm_address(&referee)),
    ]);

    let receipt = ContractCreateFlow::new()
        .bytecode(bytecode.to_vec())
        .gas(gas)
        .constructor_parameters(constructor_params)
        .execute(client)
        .await?
        .get_receipt(client)
        .await?;

    receipt
        .contract_id
        .ok_or_else(|| EscrowLabError::Ledger("create receipt carried no contract id".into()))
}

/// Call a state-changing contract function.
///
/// The call is encoded against the ABI, submitted, and confirmed via
/// receipt before the record is fetched for the return payload. An empty
/// payload is reported as informational; a payload that fails to decode
/// is reported together with a best-effort ABI error decode. Neither
/// case is an error here — once the receipt succeeds the state change
/// is settled whatever the local decode does.
pub async fn contract_execute(
    client: &Client,
    iface: &ContractInterface,
    contract_id: ContractId,
    gas: u64,
    function: &str,
    args: &[DynSolValue],
    payable: Option<Hbar>,
) -> Result<ExecuteOutcome, EscrowLabError> {
    let payload = iface.encode_call(function, args)?;

    let mut tx = ContractExecuteTransaction::new();
    tx.contract_id(contract_id)
        .gas(gas)
        .function_parameters(payload);
    if let Some(amount) = payable {
        tx.payable_amount(amount);
    }

    let response = tx.execute(client).await?;
    let receipt = response.get_receipt(client).await?;
    let record = response.get_record(client).await?;

    let return_bytes = record
        .contract_function_result
        .as_ref()
        .map(|r| r.bytes.clone())
        .unwrap_or_default();

    let results = if return_bytes.is_empty() {
        println!(
            "{} No data returned from contract - check the call",
            response.transaction_id
        );
        None
    } else {
        match iface.decode_output(function, &return_bytes) {
            Ok(values) => Some(values),
            Err(e) => {
                println!("Error {} {e}", response.transaction_id);
                if let Some(reason) = iface.decode_error(&return_bytes) {
                    println!("  {reason}");
                }
                None
            }
        }
    };

    Ok(ExecuteOutcome {
        receipt,
        results,
        record,
    })
}

/// Read contract state with a paid query and extract the named output
/// fields in the order requested. No receipt step — queries return
/// synchronously and mutate nothing.
pub async fn get_settings(
    client: &Client,
    iface: &ContractInterface,
    contract_id: ContractId,
    gas: u64,
    function: &str,
    fields: &[&str],
) -> Result<Vec<DynSolValue>, EscrowLabError> {
    let payload = iface.encode_call(function, &[])?;

    let result = ContractCallQuery::new()
        .contract_id(contract_id)
        .gas(gas)
        .function_parameters(payload)
        .payment_amount(Hbar::from_tinybars(QUERY_PAYMENT_TINYBAR))
        .execute(client)
        .await?;

    let decoded = iface.decode_output(function, &result.bytes)?;

    fields
        .iter()
        .map(|field| {
            let idx = iface.output_index(function, field)?;
            decoded.get(idx).cloned().ok_or_else(|| {
                EscrowLabError::Codec(format!("{function} output has no value at position {idx}"))
            })
        })
        .collect()
}

/// Create a fresh account funded by the operator.
pub async fn create_account(
    client: &Client,
    key: &PrivateKey,
    initial_balance: Hbar,
) -> Result<AccountId, EscrowLabError> {
    let receipt = AccountCreateTransaction::new()
        .key(key.public_key())
        .initial_balance(initial_balance)
        .max_automatic_token_associations(10)
        .execute(client)
        .await?
        .get_receipt(client)
        .await?;

    receipt
        .account_id
        .ok_or_else(|| EscrowLabError::Ledger("create receipt carried no account id".into()))
}

/// Two-leg hbar transfer, signed by the client's operator.
pub async fn transfer_hbar(
    client: &Client,
    from: AccountId,
    to: AccountId,
    amount: Hbar,
) -> Result<Status, EscrowLabError> {
    let receipt = TransferTransaction::new()
        .hbar_transfer(from, Hbar::from_tinybars(-amount.to_tinybars()))
        .hbar_transfer(to, amount)
        .execute(client)
        .await?
        .get_receipt(client)
        .await?;
    Ok(receipt.status)
}

/// Current hbar balance of an account (free query).
pub async fn account_balance(client: &Client, account: AccountId) -> Result<Hbar, EscrowLabError> {
    let balance = AccountBalanceQuery::new()
        .account_id(account)
        .execute(client)
        .await?;
    Ok(balance.hbars)
}
