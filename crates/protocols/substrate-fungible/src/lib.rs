//! Substrate Fungible Transfers over Sygma
//!
//! Prices, validates and builds fungible-asset transfers out of a Substrate
//! parachain. The fee comes from whichever fee handler the chain's router
//! names for (destination domain, asset): a flat basic fee or a percentage of
//! the amount. The result is an unsigned `sygmaBridge.deposit` call; signing
//! and submission are left to the wallet.

pub mod error;
pub mod fee;
pub mod state;
pub mod transfer;
pub mod validate;

pub use error::TransferError;
pub use fee::{quote_fee, resolve_fee_handler_kind};
pub use state::TransferPreview;
pub use transfer::{
    create_substrate_fungible_asset_transfer, create_substrate_fungible_asset_transfer_from_url,
    SubstrateAssetTransferRequest, SubstrateFungibleAssetTransfer,
};
pub use validate::FeePolicy;
