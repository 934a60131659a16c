//! Transfer errors

use sygma_core::{AddressError, Balance, ClientError, ConfigError, DomainId, ResourceId, ResourceType};
use thiserror::Error;

/// Errors raised while pricing, validating or building a transfer
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("Sender address is incorrect: {reason}")]
    InvalidSenderAddress { address: String, reason: String },

    #[error("Unable to retrieve fee: no fee handler registered for destination domain {destination_domain_id}")]
    FeeHandlerUnresolved { destination_domain_id: DomainId },

    #[error("Transfer amount {amount} should be higher than transfer fee {fee}")]
    AmountBelowFee { amount: Balance, fee: Balance },

    #[error("Insufficient balance to perform the transaction: available {available}, required {required}")]
    InsufficientBalance { available: Balance, required: Balance },

    #[error("Unsupported resource type: {resource_type}")]
    UnsupportedResourceType { resource_type: ResourceType },

    #[error("Transfer amount must be greater than zero")]
    InvalidAmount,

    #[error("Transfer cost overflows: amount {amount} plus fee {fee}")]
    CostOverflow { amount: Balance, fee: Balance },

    #[error("Resource {resource_id} has no XCM multi-asset id")]
    MissingAssetId { resource_id: ResourceId },

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Address(#[from] AddressError),
}

impl TransferError {
    /// Get a machine-friendly error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidSenderAddress { .. } => "invalid_sender_address",
            Self::FeeHandlerUnresolved { .. } => "fee_handler_unresolved",
            Self::AmountBelowFee { .. } => "amount_below_fee",
            Self::InsufficientBalance { .. } => "insufficient_balance",
            Self::UnsupportedResourceType { .. } => "unsupported_resource_type",
            Self::InvalidAmount => "invalid_amount",
            Self::CostOverflow { .. } => "cost_overflow",
            Self::MissingAssetId { .. } => "missing_asset_id",
            Self::Client(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::Address(_) => "invalid_address",
        }
    }
}
