//! Sender and balance checks run before a deposit is built

use serde::{Deserialize, Serialize};
use sygma_core::{validate_address, Balance, Network};

use crate::error::TransferError;

/// How the bridge fee is accounted against the transfer amount
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FeePolicy {
    /// Fee is paid on top: the sender needs `amount + fee`.
    #[default]
    AddOnTop,
    /// Fee comes out of the amount: the sender needs `amount` and the
    /// recipient gets `amount - fee`.
    DeductFromAmount,
}

impl FeePolicy {
    /// Free balance the sender must hold
    pub fn required_balance(&self, amount: Balance, fee: Balance) -> Result<Balance, TransferError> {
        match self {
            Self::AddOnTop => amount
                .checked_add(fee)
                .ok_or(TransferError::CostOverflow { amount, fee }),
            Self::DeductFromAmount => Ok(amount),
        }
    }

    /// Amount released on the destination chain
    pub fn receiving_amount(&self, amount: Balance, fee: Balance) -> Balance {
        match self {
            Self::AddOnTop => amount,
            Self::DeductFromAmount => amount.saturating_sub(fee),
        }
    }
}

pub fn validate_sender_address(address: &str) -> Result<(), TransferError> {
    validate_address(address, Network::Substrate).map_err(|e| {
        TransferError::InvalidSenderAddress {
            address: address.to_string(),
            reason: e.to_string(),
        }
    })
}

pub fn check_amount_covers_fee(amount: Balance, fee: Balance) -> Result<(), TransferError> {
    if amount < fee {
        return Err(TransferError::AmountBelowFee { amount, fee });
    }
    Ok(())
}

pub fn check_balance(
    free: Balance,
    amount: Balance,
    fee: Balance,
    policy: FeePolicy,
) -> Result<(), TransferError> {
    let required = policy.required_balance(amount, fee)?;
    if free < required {
        return Err(TransferError::InsufficientBalance {
            available: free,
            required,
        });
    }
    Ok(())
}
