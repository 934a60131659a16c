//! Query helpers over a [`ChainClient`]
//!
//! Each helper performs exactly one chain read and turns missing storage into
//! a [`ClientError::StorageNotFound`]. No retries.

use sygma_core::{Balance, ClientError, DomainId, XcmMultiAssetId};

use crate::fee::{calculate_percentage_fee, FeeHandlerKind, FeeQuote, TransferDetails};
use crate::{AccountData, ChainClient, Result};

/// Fee handler routed for (destination domain, asset), or `None` if the
/// router has no handler this toolkit understands.
pub async fn get_fee_handler(
    client: &dyn ChainClient,
    destination_domain_id: DomainId,
    asset: &XcmMultiAssetId,
) -> Result<Option<FeeHandlerKind>> {
    let handler = client.fee_handler(destination_domain_id, asset).await?;
    tracing::debug!(
        destination_domain_id = %destination_domain_id,
        asset = %asset,
        handler = ?handler,
        "Resolved fee handler"
    );
    Ok(handler)
}

/// Flat fee for (destination domain, asset) from the basic fee handler.
pub async fn get_basic_fee(
    client: &dyn ChainClient,
    destination_domain_id: DomainId,
    asset: &XcmMultiAssetId,
) -> Result<FeeQuote> {
    let fee = client
        .basic_fee(destination_domain_id, asset)
        .await?
        .ok_or_else(|| ClientError::StorageNotFound {
            item: format!(
                "sygmaBasicFeeHandler.assetFees({}, {})",
                destination_domain_id, asset
            ),
        })?;

    Ok(FeeQuote {
        fee,
        handler: FeeHandlerKind::Basic,
        asset: asset.clone(),
    })
}

/// Percentage fee for a transfer, clamped to the on-chain bounds.
pub async fn get_percentage_fee(
    client: &dyn ChainClient,
    details: &TransferDetails,
) -> Result<FeeQuote> {
    let rate = client
        .percentage_fee_rate(details.destination_domain_id, &details.asset)
        .await?
        .ok_or_else(|| ClientError::StorageNotFound {
            item: format!(
                "sygmaPercentageFeeHandler.assetFeeRate({}, {})",
                details.destination_domain_id, details.asset
            ),
        })?;

    let fee = calculate_percentage_fee(details.amount, &rate);
    tracing::debug!(
        amount = %details.amount,
        rate_bps = rate.rate_bps,
        fee = %fee,
        "Computed percentage fee"
    );

    Ok(FeeQuote {
        fee,
        handler: FeeHandlerKind::Percentage,
        asset: details.asset.clone(),
    })
}

/// Free balance of an account.
pub async fn get_account_balance(client: &dyn ChainClient, address: &str) -> Result<Balance> {
    let AccountData { free, .. } = client.account(address).await?;
    Ok(free)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fee::PercentageFeeRate;
    use crate::mock::InMemoryChainClient;
    use serde_json::json;

    fn asset() -> XcmMultiAssetId {
        json!({ "concrete": { "parents": 0, "interior": "here" } })
    }

    #[tokio::test]
    async fn test_basic_fee() {
        let client = InMemoryChainClient::new().with_basic_fee(DomainId(1), &asset(), 100);
        let quote = get_basic_fee(&client, DomainId(1), &asset()).await.unwrap();
        assert_eq!(quote.fee, 100);
        assert_eq!(quote.handler, FeeHandlerKind::Basic);
    }

    #[tokio::test]
    async fn test_basic_fee_missing() {
        let client = InMemoryChainClient::new();
        let err = get_basic_fee(&client, DomainId(1), &asset()).await.unwrap_err();
        assert!(matches!(err, ClientError::StorageNotFound { .. }));
    }

    #[tokio::test]
    async fn test_percentage_fee() {
        let client = InMemoryChainClient::new().with_percentage_rate(
            DomainId(1),
            &asset(),
            PercentageFeeRate::unbounded(100),
        );
        let details = TransferDetails {
            destination_domain_id: DomainId(1),
            asset: asset(),
            amount: 10_000,
            recipient: "0x742d35Cc6634C0532925a3b844Bc9e7595f2bD08".to_string(),
        };
        let quote = get_percentage_fee(&client, &details).await.unwrap();
        assert_eq!(quote.fee, 100);
        assert_eq!(quote.handler, FeeHandlerKind::Percentage);
    }

    #[tokio::test]
    async fn test_account_balance_defaults_to_zero() {
        let client = InMemoryChainClient::new();
        let free = get_account_balance(&client, "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY")
            .await
            .unwrap();
        assert_eq!(free, 0);
        assert_eq!(client.account_reads(), 1);
    }

    #[tokio::test]
    async fn test_query_failure_propagates() {
        let client = InMemoryChainClient::new().failing("connection reset");
        let err = get_fee_handler(&client, DomainId(1), &asset())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Rpc { .. }));
    }
}
