//! Serializable transfer summaries

use serde::{Deserialize, Serialize};
use substrate_client::FeeHandlerKind;

use crate::validate::FeePolicy;

/// Fee and cost breakdown of a pending transfer.
///
/// Amounts are decimal strings in the resource's base unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferPreview {
    pub source_domain: String,
    pub destination_domain: String,
    pub resource_id: String,
    pub symbol: Option<String>,
    pub sender_address: String,
    pub destination_address: String,
    pub amount: String,
    pub fee: String,
    pub fee_handler: FeeHandlerKind,
    pub fee_policy: FeePolicy,
    /// Free balance the sender needs
    pub total_cost: String,
    /// Amount released on the destination chain
    pub receiving_amount: String,
}
