//! Fee handler resolution and dispatch

use substrate_client::{
    get_basic_fee, get_fee_handler, get_percentage_fee, ChainClient, FeeHandlerKind, FeeQuote,
    TransferDetails,
};
use sygma_core::{DomainId, XcmMultiAssetId};

use crate::error::TransferError;

/// Fee handler routed for (destination domain, asset). An empty or unknown
/// router entry is an error.
pub async fn resolve_fee_handler_kind(
    client: &dyn ChainClient,
    destination_domain_id: DomainId,
    asset: &XcmMultiAssetId,
) -> Result<FeeHandlerKind, TransferError> {
    get_fee_handler(client, destination_domain_id, asset)
        .await?
        .ok_or(TransferError::FeeHandlerUnresolved {
            destination_domain_id,
        })
}

/// Quote the fee for a transfer with whichever handler the router names.
pub async fn quote_fee(
    client: &dyn ChainClient,
    details: &TransferDetails,
) -> Result<FeeQuote, TransferError> {
    let kind =
        resolve_fee_handler_kind(client, details.destination_domain_id, &details.asset).await?;

    let quote = match kind {
        FeeHandlerKind::Basic => {
            get_basic_fee(client, details.destination_domain_id, &details.asset).await?
        }
        FeeHandlerKind::Percentage => get_percentage_fee(client, details).await?,
    };
    Ok(quote)
}
