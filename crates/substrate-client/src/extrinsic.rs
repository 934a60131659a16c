//! `sygmaBridge.deposit` call encoder
//!
//! Produces the unsigned call the user's wallet signs. The destination is
//! encoded as a relative multilocation:
//! ```text
//! { parents: 0, interior: { x2: [
//!     { generalKey: { length, data } },   // recipient bytes, zero-padded to 32
//!     { generalIndex: <domain id> }
//! ] } }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use sygma_core::{address_to_bytes, ClientError, Network, XcmMultiAssetId};

use crate::Result;

const BRIDGE_PALLET: &str = "sygmaBridge";
const DEPOSIT_CALL: &str = "deposit";
const GENERAL_KEY_LEN: usize = 32;

/// Arguments of a deposit
#[derive(Debug, Clone, PartialEq)]
pub struct DepositParams {
    pub asset: XcmMultiAssetId,
    /// Amount in base units, as a decimal string
    pub amount: String,
    /// Destination domain ID, as a decimal string
    pub destination_domain_id: String,
    pub destination_address: String,
    /// Network family the destination address belongs to
    pub destination_network: Network,
}

/// An unsigned extrinsic call, ready to be signed and submitted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnsignedExtrinsic {
    pub pallet: String,
    pub call: String,
    pub args: Vec<Value>,
}

impl UnsignedExtrinsic {
    /// Fungible amount carried by a deposit call
    pub fn deposit_amount(&self) -> Option<&str> {
        self.args.first()?.get("fun")?.get("fungible")?.as_str()
    }
}

impl fmt::Display for UnsignedExtrinsic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.pallet, self.call)
    }
}

/// Encode a `sygmaBridge.deposit(asset, dest)` call.
pub fn deposit(params: &DepositParams) -> Result<UnsignedExtrinsic> {
    if params.amount.is_empty() || !params.amount.chars().all(|c| c.is_ascii_digit()) {
        return Err(ClientError::InvalidCall {
            reason: format!("amount '{}' is not a decimal integer", params.amount),
        });
    }

    let domain_index: u128 =
        params
            .destination_domain_id
            .parse()
            .map_err(|_| ClientError::InvalidCall {
                reason: format!(
                    "destination domain id '{}' is not numeric",
                    params.destination_domain_id
                ),
            })?;

    let recipient = recipient_bytes(&params.destination_address, params.destination_network)?;
    let mut key = [0u8; GENERAL_KEY_LEN];
    key[..recipient.len()].copy_from_slice(&recipient);

    let asset = json!({
        "id": params.asset,
        "fun": { "fungible": params.amount },
    });

    let dest = json!({
        "parents": 0,
        "interior": {
            "x2": [
                {
                    "generalKey": {
                        "length": recipient.len(),
                        "data": format!("0x{}", hex::encode(key)),
                    }
                },
                { "generalIndex": domain_index.to_string() },
            ]
        }
    });

    Ok(UnsignedExtrinsic {
        pallet: BRIDGE_PALLET.to_string(),
        call: DEPOSIT_CALL.to_string(),
        args: vec![asset, dest],
    })
}

/// Recipient account bytes on the destination network.
fn recipient_bytes(address: &str, network: Network) -> Result<Vec<u8>> {
    let bytes = address_to_bytes(address, network).map_err(|e| ClientError::InvalidCall {
        reason: format!("recipient '{}': {}", address, e),
    })?;

    if bytes.is_empty() || bytes.len() > GENERAL_KEY_LEN {
        return Err(ClientError::InvalidCall {
            reason: format!(
                "recipient must be 1 to {} bytes, got {}",
                GENERAL_KEY_LEN,
                bytes.len()
            ),
        });
    }
    Ok(bytes)
}
