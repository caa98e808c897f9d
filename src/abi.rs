//! ABI artifact loading and the typed encode/decode layer.
//!
//! The contract's Solidity source is not part of this repo; everything
//! the scripts know about it comes from the Hardhat build artifact
//! (`abi` + `bytecode`). [`ContractInterface`] wraps the parsed
//! signature table and does all call/output/error/event coding, so the
//! scripts never touch raw selectors or words.

use alloy_dyn_abi::{DynSolType, DynSolValue};
use alloy_json_abi::{Event, Function, JsonAbi};
use alloy_primitives::{Address, B256};
use hedera::AccountId;
use serde::Deserialize;

use crate::error::EscrowLabError;

/// Selector of the standard `Error(string)` revert.
const ERROR_STRING_SELECTOR: [u8; 4] = [0x08, 0xc3, 0x79, 0xa0];

/// Parsed build artifact: signature table plus deployable bytecode.
pub struct ContractArtifact {
    pub abi: JsonAbi,
    pub bytecode: Vec<u8>,
}

/// Read the artifact for `contract_name` from the Hardhat output tree.
pub fn load_artifact(contract_name: &str) -> Result<ContractArtifact, EscrowLabError> {
    let path = format!("./artifacts/contracts/{contract_name}.sol/{contract_name}.json");
    let raw = std::fs::read_to_string(&path)
        .map_err(|e| EscrowLabError::Artifact(format!("cannot read {path}: {e}")))?;
    parse_artifact(&raw)
}

/// Parse an artifact JSON document (`abi` + 0x-prefixed `bytecode`).
pub fn parse_artifact(json: &str) -> Result<ContractArtifact, EscrowLabError> {
    #[derive(Deserialize)]
    struct RawArtifact {
        abi: JsonAbi,
        bytecode: String,
    }
    let raw: RawArtifact = serde_json::from_str(json)?;
    let bytecode = hex::decode(raw.bytecode.trim_start_matches("0x"))?;
    Ok(ContractArtifact {
        abi: raw.abi,
        bytecode,
    })
}

/// A decoded contract event with its declared-order argument values.
pub struct DecodedEvent {
    pub name: String,
    pub args: Vec<DynSolValue>,
}

/// Typed codec over one contract's signature table.
pub struct ContractInterface {
    abi: JsonAbi,
}

impl ContractInterface {
    pub fn new(abi: JsonAbi) -> Self {
        Self { abi }
    }

    pub fn abi(&self) -> &JsonAbi {
        &self.abi
    }

    fn function(&self, name: &str) -> Result<&Function, EscrowLabError> {
        self.abi
            .functions
            .get(name)
            .and_then(|overloads| overloads.first())
            .ok_or_else(|| EscrowLabError::Codec(format!("no function {name} in ABI")))
    }

    /// Encode a call payload: 4-byte selector followed by the params.
    pub fn encode_call(
        &self,
        name: &str,
        args: &[DynSolValue],
    ) -> Result<Vec<u8>, EscrowLabError> {
        let function = self.function(name)?;
        if function.inputs.len() != args.len() {
            return Err(EscrowLabError::Codec(format!(
                "{name} takes {} arguments, got {}",
                function.inputs.len(),
                args.len()
            )));
        }
        let mut data = function.selector().as_slice().to_vec();
        data.extend_from_slice(&DynSolValue::Tuple(args.to_vec()).abi_encode_params());
        Ok(data)
    }

    /// Encode constructor parameters (bare params, no selector — the
    /// network appends these to the deployed bytecode).
    pub fn encode_constructor(&self, args: &[DynSolValue]) -> Vec<u8> {
        DynSolValue::Tuple(args.to_vec()).abi_encode_params()
    }

    /// Decode a function's return payload into its declared outputs.
    pub fn decode_output(
        &self,
        name: &str,
        data: &[u8],
    ) -> Result<Vec<DynSolValue>, EscrowLabError> {
        let function = self.function(name)?;
        let types = function
            .outputs
            .iter()
            .map(|p| parse_type(&p.ty))
            .collect::<Result<Vec<_>, _>>()?;
        let decoded = DynSolType::Tuple(types)
            .abi_decode_params(data)
            .map_err(|e| EscrowLabError::Codec(format!("decoding {name} output: {e}")))?;
        Ok(flatten_tuple(decoded))
    }

    /// Position of a named output field of `name`.
    pub fn output_index(&self, name: &str, field: &str) -> Result<usize, EscrowLabError> {
        let function = self.function(name)?;
        function
            .outputs
            .iter()
            .position(|p| p.name == field)
            .ok_or_else(|| EscrowLabError::MissingField {
                function: name.to_string(),
                field: field.to_string(),
            })
    }

    /// Best-effort decode of a revert payload: the standard
    /// `Error(string)` shape first, then the ABI's own error table.
    pub fn decode_error(&self, data: &[u8]) -> Option<String> {
        if data.len() < 4 {
            return None;
        }
        let (selector, payload) = data.split_at(4);

        if selector == ERROR_STRING_SELECTOR.as_slice() {
            if let Ok(DynSolValue::Tuple(vals)) =
                DynSolType::Tuple(vec![DynSolType::String]).abi_decode_params(payload)
            {
                if let Some(DynSolValue::String(reason)) = vals.first() {
                    return Some(format!("reverted: {reason}"));
                }
            }
            return None;
        }

        for error in self.abi.errors.values().flatten() {
            if error.selector().as_slice() != selector {
                continue;
            }
            let types = error
                .inputs
                .iter()
                .map(|p| parse_type(&p.ty))
                .collect::<Result<Vec<_>, _>>()
                .ok()?;
            let decoded = DynSolType::Tuple(types).abi_decode_params(payload).ok()?;
            let rendered: Vec<String> = flatten_tuple(decoded).iter().map(render_value).collect();
            return Some(format!("{}({})", error.name, rendered.join(", ")));
        }
        None
    }

    /// Decode a mirror log entry against the ABI event table. `topics[0]`
    /// selects the event; remaining topics carry the indexed fields.
    pub fn decode_event(
        &self,
        topics: &[Vec<u8>],
        data: &[u8],
    ) -> Result<DecodedEvent, EscrowLabError> {
        let topic0 = topics
            .first()
            .ok_or_else(|| EscrowLabError::Codec("log entry has no topics".into()))?;
        let event = self
            .abi
            .events
            .values()
            .flatten()
            .find(|e| e.selector().as_slice() == topic0.as_slice())
            .ok_or_else(|| EscrowLabError::Codec("no matching event in ABI".into()))?;

        let args = decode_event_args(event, &topics[1..], data)?;
        Ok(DecodedEvent {
            name: event.name.clone(),
            args,
        })
    }
}

fn decode_event_args(
    event: &Event,
    indexed_topics: &[Vec<u8>],
    data: &[u8],
) -> Result<Vec<DynSolValue>, EscrowLabError> {
    let body_types = event
        .inputs
        .iter()
        .filter(|p| !p.indexed)
        .map(|p| parse_type(&p.ty))
        .collect::<Result<Vec<_>, _>>()?;
    let mut body_values = DynSolType::Tuple(body_types)
        .abi_decode_params(data)
        .map(flatten_tuple)
        .map_err(|e| EscrowLabError::Codec(format!("decoding {} data: {e}", event.name)))?
        .into_iter();
    let mut topics = indexed_topics.iter();

    // Re-interleave indexed and body values in declared order.
    let mut args = Vec::with_capacity(event.inputs.len());
    for param in &event.inputs {
        if param.indexed {
            let topic = topics.next().ok_or_else(|| {
                EscrowLabError::Codec(format!("{} is missing an indexed topic", event.name))
            })?;
            let ty = parse_type(&param.ty)?;
            // Dynamic indexed values arrive as their keccak hash; keep
            // the raw topic word in that case.
            let value = match ty.abi_decode(topic) {
                Ok(v) => v,
                Err(_) => DynSolValue::FixedBytes(word(topic)?, 32),
            };
            args.push(value);
        } else {
            let value = body_values.next().ok_or_else(|| {
                EscrowLabError::Codec(format!("{} data is missing a field", event.name))
            })?;
            args.push(value);
        }
    }
    Ok(args)
}

fn word(bytes: &[u8]) -> Result<B256, EscrowLabError> {
    if bytes.len() != 32 {
        return Err(EscrowLabError::Codec(format!(
            "expected a 32-byte topic, got {} bytes",
            bytes.len()
        )));
    }
    Ok(B256::from_slice(bytes))
}

fn parse_type(ty: &str) -> Result<DynSolType, EscrowLabError> {
    ty.parse::<DynSolType>()
        .map_err(|e| EscrowLabError::Codec(format!("cannot parse type {ty}: {e}")))
}

fn flatten_tuple(value: DynSolValue) -> Vec<DynSolValue> {
    match value {
        DynSolValue::Tuple(values) => values,
        other => vec![other],
    }
}

/// Render a decoded value for the trace line. Addresses become native
/// `shard.realm.num` account strings; everything else is stringified.
pub fn render_value(value: &DynSolValue) -> String {
    match value {
        DynSolValue::Address(addr) => address_to_account_string(addr),
        DynSolValue::Uint(u, _) => u.to_string(),
        DynSolValue::Int(i, _) => i.to_string(),
        DynSolValue::Bool(b) => b.to_string(),
        DynSolValue::String(s) => s.clone(),
        DynSolValue::Bytes(b) => format!("0x{}", hex::encode(b)),
        DynSolValue::FixedBytes(w, size) => format!("0x{}", hex::encode(&w.as_slice()[..*size])),
        other => format!("{other:?}"),
    }
}

/// Long-zero EVM address for a `shard.realm.num` entity.
pub fn long_zero_address(shard: u64, realm: u64, num: u64) -> Address {
    let mut bytes = [0u8; 20];
    bytes[0..4].copy_from_slice(&(shard as u32).to_be_bytes());
    bytes[4..12].copy_from_slice(&realm.to_be_bytes());
    bytes[12..20].copy_from_slice(&num.to_be_bytes());
    Address::from(bytes)
}

/// EVM address form of an account, as passed to the constructor.
pub fn account_evm_address(id: &AccountId) -> Address {
    long_zero_address(id.shard, id.realm, id.num)
}

/// Native account-identity string for a long-zero EVM address.
pub fn address_to_account_string(addr: &Address) -> String {
    let bytes = addr.as_slice();
    let shard = u32::from_be_bytes(bytes[0..4].try_into().expect("address is 20 bytes"));
    let realm = u64::from_be_bytes(bytes[4..12].try_into().expect("address is 20 bytes"));
    let num = u64::from_be_bytes(bytes[12..20].try_into().expect("address is 20 bytes"));
    format!("{shard}.{realm}.{num}")
}
