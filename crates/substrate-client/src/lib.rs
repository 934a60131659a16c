//! substrate-client: Chain client seam for Sygma transfers from Substrate chains
//!
//! [`ChainClient`] is the read-only view of the source chain that transfer
//! construction needs: the fee-handler router, the fee handlers' storage, and
//! account balances. It also builds the `sygmaBridge.deposit` call, by default
//! with the local encoder in [`extrinsic`].

pub mod extrinsic;
pub mod fee;
pub mod queries;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sygma_core::{Balance, ClientError, DomainId, XcmMultiAssetId};

pub use extrinsic::{deposit, DepositParams, UnsignedExtrinsic};
pub use fee::{calculate_percentage_fee, FeeHandlerKind, FeeQuote, PercentageFeeRate, TransferDetails};
pub use queries::{get_account_balance, get_basic_fee, get_fee_handler, get_percentage_fee};

/// Result type for chain client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Balances of an account as stored in `system.account`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountData {
    pub free: Balance,
    pub reserved: Balance,
    pub frozen: Balance,
}

impl AccountData {
    pub fn with_free(free: Balance) -> Self {
        Self {
            free,
            ..Self::default()
        }
    }
}

/// Read access to a Substrate chain running the Sygma pallets.
///
/// Every call is a fresh chain read; implementations must not cache.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Fee handler registered in `sygmaFeeHandlerRouter` for the pair, if any
    /// handler this toolkit understands is registered.
    async fn fee_handler(
        &self,
        destination_domain_id: DomainId,
        asset: &XcmMultiAssetId,
    ) -> Result<Option<FeeHandlerKind>>;

    /// Flat fee from `sygmaBasicFeeHandler.assetFees`
    async fn basic_fee(
        &self,
        destination_domain_id: DomainId,
        asset: &XcmMultiAssetId,
    ) -> Result<Option<Balance>>;

    /// Rate and bounds from `sygmaPercentageFeeHandler.assetFeeRate`
    async fn percentage_fee_rate(
        &self,
        destination_domain_id: DomainId,
        asset: &XcmMultiAssetId,
    ) -> Result<Option<PercentageFeeRate>>;

    /// Account balances from `system.account`
    async fn account(&self, address: &str) -> Result<AccountData>;

    /// Build the unsigned `sygmaBridge.deposit` call.
    async fn build_deposit(&self, params: &DepositParams) -> Result<UnsignedExtrinsic> {
        extrinsic::deposit(params)
    }
}
