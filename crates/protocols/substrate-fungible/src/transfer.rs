//! Fungible asset transfer from a Substrate source domain
//!
//! Flow: quote the fee, check the sender can cover it, then build the
//! `sygmaBridge.deposit` call for the wallet to sign. Every step reads the
//! chain fresh; nothing is cached between calls.

use std::sync::Arc;

use substrate_client::{
    get_account_balance, ChainClient, DepositParams, FeeQuote, TransferDetails, UnsignedExtrinsic,
};
use sygma_core::{
    is_valid_address_for_network, validate_address, Balance, Config, Domain, Domainlike,
    Environment, Resource, Resourcelike, XcmMultiAssetId,
};

use crate::error::TransferError;
use crate::fee::quote_fee;
use crate::state::TransferPreview;
use crate::validate::{check_amount_covers_fee, check_balance, validate_sender_address, FeePolicy};

/// Parameters for a fungible transfer out of a Substrate chain
pub struct SubstrateAssetTransferRequest {
    pub source_domain: Domainlike,
    pub destination_domain: Domainlike,
    /// Client for the source chain
    pub source_network_provider: Arc<dyn ChainClient>,
    /// Resource ID (looked up on the source domain) or the full resource
    pub resource: Resourcelike,
    pub amount: Balance,
    pub destination_address: String,
    pub sender_address: String,
}

/// Load the shared config for the environment in `SYGMA_ENV` and build the
/// transfer.
pub async fn create_substrate_fungible_asset_transfer(
    request: SubstrateAssetTransferRequest,
) -> Result<SubstrateFungibleAssetTransfer, TransferError> {
    let config = Config::init(Environment::from_env()).await?;
    SubstrateFungibleAssetTransfer::new(request, &config)
}

/// Same as [`create_substrate_fungible_asset_transfer`], with the shared config
/// fetched from `config_url`.
pub async fn create_substrate_fungible_asset_transfer_from_url(
    request: SubstrateAssetTransferRequest,
    config_url: &str,
) -> Result<SubstrateFungibleAssetTransfer, TransferError> {
    let config = Config::init_from_url(config_url).await?;
    SubstrateFungibleAssetTransfer::new(request, &config)
}

pub struct SubstrateFungibleAssetTransfer {
    source_domain: Domain,
    destination_domain: Domain,
    source_network_provider: Arc<dyn ChainClient>,
    resource: Resource,
    amount: Balance,
    destination_address: String,
    sender_address: String,
    fee_policy: FeePolicy,
}

impl SubstrateFungibleAssetTransfer {
    /// Resolve domains and resource against `config`.
    ///
    /// A destination address that is not valid on the destination network is
    /// dropped, leaving the address empty until [`Self::set_destination_address`]
    /// is called with a valid one.
    pub fn new(request: SubstrateAssetTransferRequest, config: &Config) -> Result<Self, TransferError> {
        if request.amount == 0 {
            return Err(TransferError::InvalidAmount);
        }

        let source_domain = config.find_domain(&request.source_domain)?.clone();
        let destination_domain = config.find_domain(&request.destination_domain)?.clone();

        let resource = match request.resource {
            Resourcelike::Id(id) => config.find_resource(&source_domain, id.as_str())?.clone(),
            Resourcelike::Resource(resource) => *resource,
        };

        let destination_address =
            if is_valid_address_for_network(&request.destination_address, destination_domain.network) {
                request.destination_address
            } else {
                tracing::warn!(
                    address = %request.destination_address,
                    network = %destination_domain.network,
                    "Ignoring invalid destination address"
                );
                String::new()
            };

        Ok(Self {
            source_domain,
            destination_domain,
            source_network_provider: request.source_network_provider,
            resource,
            amount: request.amount,
            destination_address,
            sender_address: request.sender_address,
            fee_policy: FeePolicy::default(),
        })
    }

    pub fn with_fee_policy(mut self, fee_policy: FeePolicy) -> Self {
        self.fee_policy = fee_policy;
        self
    }

    pub fn source_domain(&self) -> &Domain {
        &self.source_domain
    }

    pub fn destination_domain(&self) -> &Domain {
        &self.destination_domain
    }

    pub fn resource(&self) -> &Resource {
        &self.resource
    }

    pub fn amount(&self) -> Balance {
        self.amount
    }

    pub fn destination_address(&self) -> &str {
        &self.destination_address
    }

    pub fn sender_address(&self) -> &str {
        &self.sender_address
    }

    pub fn fee_policy(&self) -> FeePolicy {
        self.fee_policy
    }

    pub fn set_amount(&mut self, amount: Balance) -> Result<(), TransferError> {
        if amount == 0 {
            return Err(TransferError::InvalidAmount);
        }
        self.amount = amount;
        Ok(())
    }

    /// Replace the destination address. On a validation failure the previous
    /// address is kept.
    pub fn set_destination_address(&mut self, address: &str) -> Result<(), TransferError> {
        validate_address(address, self.destination_domain.network)?;
        self.destination_address = address.to_string();
        Ok(())
    }

    /// Quote the bridge fee. A non-zero `amount` replaces the stored amount
    /// first.
    pub async fn get_fee(&mut self, amount: Option<Balance>) -> Result<FeeQuote, TransferError> {
        if let Some(amount) = amount.filter(|a| *a > 0) {
            self.amount = amount;
        }
        self.quote().await
    }

    /// Check that the sender can pay for the transfer.
    pub async fn verify_balance(&self) -> Result<(), TransferError> {
        validate_sender_address(&self.sender_address)?;

        let quote = self.quote().await?;
        check_amount_covers_fee(self.amount, quote.fee)?;

        let free =
            get_account_balance(self.source_network_provider.as_ref(), &self.sender_address).await?;
        check_balance(free, self.amount, quote.fee, self.fee_policy)?;

        tracing::debug!(
            sender = %self.sender_address,
            amount = %self.amount,
            fee = %quote.fee,
            free = %free,
            "Balance covers transfer"
        );
        Ok(())
    }

    /// Build the unsigned deposit call for the sender to sign and submit.
    pub async fn get_transfer_transaction(&self) -> Result<UnsignedExtrinsic, TransferError> {
        if !self.resource.is_fungible() {
            return Err(TransferError::UnsupportedResourceType {
                resource_type: self.resource.resource_type,
            });
        }

        validate_address(&self.destination_address, self.destination_domain.network)?;
        self.verify_balance().await?;

        let params = DepositParams {
            asset: self.asset()?.clone(),
            amount: self.amount.to_string(),
            destination_domain_id: self.destination_domain.id.to_string(),
            destination_address: self.destination_address.clone(),
            destination_network: self.destination_domain.network,
        };
        let call = self.source_network_provider.build_deposit(&params).await?;

        tracing::info!(
            resource_id = %self.resource.resource_id,
            source = %self.source_domain.name,
            destination = %self.destination_domain.name,
            amount = %params.amount,
            "Built deposit call {}",
            call
        );
        Ok(call)
    }

    /// Fee and cost breakdown from a fresh fee quote.
    pub async fn preview(&self) -> Result<TransferPreview, TransferError> {
        let quote = self.quote().await?;

        Ok(TransferPreview {
            source_domain: self.source_domain.name.clone(),
            destination_domain: self.destination_domain.name.clone(),
            resource_id: self.resource.resource_id.to_string(),
            symbol: self.resource.symbol.clone(),
            sender_address: self.sender_address.clone(),
            destination_address: self.destination_address.clone(),
            amount: self.amount.to_string(),
            fee: quote.fee.to_string(),
            fee_handler: quote.handler,
            fee_policy: self.fee_policy,
            total_cost: self
                .fee_policy
                .required_balance(self.amount, quote.fee)?
                .to_string(),
            receiving_amount: self
                .fee_policy
                .receiving_amount(self.amount, quote.fee)
                .to_string(),
        })
    }

    fn asset(&self) -> Result<&XcmMultiAssetId, TransferError> {
        self.resource
            .xcm_multi_asset_id
            .as_ref()
            .ok_or_else(|| TransferError::MissingAssetId {
                resource_id: self.resource.resource_id.clone(),
            })
    }

    async fn quote(&self) -> Result<FeeQuote, TransferError> {
        let details = TransferDetails {
            destination_domain_id: self.destination_domain.id,
            asset: self.asset()?.clone(),
            amount: self.amount,
            recipient: self.destination_address.clone(),
        };
        quote_fee(self.source_network_provider.as_ref(), &details).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use substrate_client::mock::InMemoryChainClient;
    use substrate_client::{FeeHandlerKind, PercentageFeeRate};
    use sygma_core::{AddressError, ClientError, ConfigError, DomainId, ResourceType};

    const ALICE: &str = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY";
    const EVM_RECIPIENT: &str = "0x742d35Cc6634C0532925a3b844Bc9e7595f2bD08";
    const PHA: &str = "0x0000000000000000000000000000000000000000000000000000000000001000";
    const COLLECTIBLE: &str = "0x0000000000000000000000000000000000000000000000000000000000002000";

    const SHARED_CONFIG: &str = r#"{
        "domains": [
            {
                "id": 1,
                "chainId": 11155111,
                "name": "sepolia",
                "type": "evm",
                "bridge": "0x4CF326d3817558038D1DEF9e76b727202c3E8492",
                "resources": [
                    {
                        "resourceId": "0x0000000000000000000000000000000000000000000000000000000000001000",
                        "type": "fungible",
                        "address": "0xA9F30c6B5E7996D1bAd51D213277c30750bcBB36",
                        "symbol": "PHA",
                        "decimals": 18
                    }
                ]
            },
            {
                "id": 3,
                "chainId": 5231,
                "name": "rococo-phala",
                "type": "substrate",
                "parachainId": 2004,
                "resources": [
                    {
                        "resourceId": "0x0000000000000000000000000000000000000000000000000000000000001000",
                        "type": "fungible",
                        "native": true,
                        "symbol": "PHA",
                        "decimals": 12,
                        "xcmMultiAssetId": { "concrete": { "parents": 0, "interior": "here" } }
                    },
                    {
                        "resourceId": "0x0000000000000000000000000000000000000000000000000000000000002000",
                        "type": "nonfungible",
                        "xcmMultiAssetId": { "concrete": { "parents": 1, "interior": "here" } }
                    }
                ]
            }
        ]
    }"#;

    fn config() -> Config {
        Config::from_json(SHARED_CONFIG).unwrap()
    }

    fn pha_asset() -> XcmMultiAssetId {
        json!({ "concrete": { "parents": 0, "interior": "here" } })
    }

    fn request(client: Arc<InMemoryChainClient>, amount: Balance) -> SubstrateAssetTransferRequest {
        SubstrateAssetTransferRequest {
            source_domain: Domainlike::ChainId(5231),
            destination_domain: Domainlike::Id(DomainId(1)),
            source_network_provider: client,
            resource: PHA.into(),
            amount,
            destination_address: EVM_RECIPIENT.to_string(),
            sender_address: ALICE.to_string(),
        }
    }

    fn transfer(client: &Arc<InMemoryChainClient>, amount: Balance) -> SubstrateFungibleAssetTransfer {
        SubstrateFungibleAssetTransfer::new(request(client.clone(), amount), &config()).unwrap()
    }

    fn basic_client(fee: Balance, balance: Balance) -> Arc<InMemoryChainClient> {
        Arc::new(
            InMemoryChainClient::new()
                .with_basic_fee(DomainId(1), &pha_asset(), fee)
                .with_free_balance(ALICE, balance),
        )
    }

    fn percentage_client(rate: PercentageFeeRate, balance: Balance) -> Arc<InMemoryChainClient> {
        Arc::new(
            InMemoryChainClient::new()
                .with_percentage_rate(DomainId(1), &pha_asset(), rate)
                .with_free_balance(ALICE, balance),
        )
    }

    #[tokio::test]
    async fn test_basic_fee_transfer_builds_deposit() {
        let client = basic_client(100, 700);
        let t = transfer(&client, 500);

        t.verify_balance().await.unwrap();
        let call = t.get_transfer_transaction().await.unwrap();

        assert_eq!(call.to_string(), "sygmaBridge.deposit");
        assert_eq!(call.deposit_amount(), Some("500"));
        assert_eq!(call.args[1]["interior"]["x2"][1]["generalIndex"], "1");
        assert_eq!(call.args[0]["id"], pha_asset());
    }

    #[tokio::test]
    async fn test_amount_below_fee() {
        let client = basic_client(100, 1_000_000);
        let t = transfer(&client, 50);

        let err = t.verify_balance().await.unwrap_err();
        assert!(matches!(
            err,
            TransferError::AmountBelowFee { amount: 50, fee: 100 }
        ));
        assert_eq!(client.account_reads(), 0);

        let err = t.get_transfer_transaction().await.unwrap_err();
        assert_eq!(err.error_code(), "amount_below_fee");
    }

    #[tokio::test]
    async fn test_percentage_fee_balance_boundary() {
        let rate = PercentageFeeRate::unbounded(100);

        let mut t = transfer(&percentage_client(rate, 10_100), 10_000);
        let quote = t.get_fee(None).await.unwrap();
        assert_eq!(quote.fee, 100);
        assert_eq!(quote.handler, FeeHandlerKind::Percentage);
        t.verify_balance().await.unwrap();

        let t = transfer(&percentage_client(rate, 10_099), 10_000);
        assert!(matches!(
            t.verify_balance().await,
            Err(TransferError::InsufficientBalance {
                available: 10_099,
                required: 10_100
            })
        ));

        let t = transfer(&percentage_client(rate, 10_050), 10_000);
        assert!(t.verify_balance().await.is_err());
        let t = t.with_fee_policy(FeePolicy::DeductFromAmount);
        t.verify_balance().await.unwrap();
    }

    #[tokio::test]
    async fn test_unresolved_handler_skips_balance_read() {
        let client = Arc::new(InMemoryChainClient::new().with_free_balance(ALICE, 1_000_000));
        let mut t = transfer(&client, 500);

        let err = t.get_fee(None).await.unwrap_err();
        assert!(matches!(err, TransferError::FeeHandlerUnresolved { .. }));

        let err = t.verify_balance().await.unwrap_err();
        assert!(matches!(err, TransferError::FeeHandlerUnresolved { .. }));
        assert_eq!(client.account_reads(), 0);
    }

    #[tokio::test]
    async fn test_invalid_destination_address() {
        let client = basic_client(100, 700);
        let mut req = request(client, 500);
        req.destination_address = ALICE.to_string();

        let mut t = SubstrateFungibleAssetTransfer::new(req, &config()).unwrap();
        assert_eq!(t.destination_address(), "");

        t.set_destination_address(EVM_RECIPIENT).unwrap();
        assert_eq!(t.destination_address(), EVM_RECIPIENT);

        let err = t.set_destination_address("0x1234").unwrap_err();
        assert!(matches!(err, TransferError::Address(_)));
        assert_eq!(t.destination_address(), EVM_RECIPIENT);
    }

    #[tokio::test]
    async fn test_deposit_needs_destination_address() {
        let client = basic_client(100, 700);
        let mut req = request(client.clone(), 500);
        req.destination_address = "not-an-address".to_string();

        let mut t = SubstrateFungibleAssetTransfer::new(req, &config()).unwrap();
        let err = t.get_transfer_transaction().await.unwrap_err();
        assert!(matches!(err, TransferError::Address(AddressError::Empty)));
        assert_eq!(client.queries(), 0);

        t.set_destination_address(EVM_RECIPIENT).unwrap();
        let call = t.get_transfer_transaction().await.unwrap();
        assert_eq!(call.deposit_amount(), Some("500"));
    }

    #[tokio::test]
    async fn test_non_fungible_resource_makes_no_queries() {
        let client = basic_client(100, 700);
        let mut req = request(client.clone(), 500);
        req.resource = COLLECTIBLE.into();

        let t = SubstrateFungibleAssetTransfer::new(req, &config()).unwrap();
        let err = t.get_transfer_transaction().await.unwrap_err();
        assert!(matches!(
            err,
            TransferError::UnsupportedResourceType {
                resource_type: ResourceType::NonFungible
            }
        ));
        assert_eq!(client.queries(), 0);
    }

    #[tokio::test]
    async fn test_basic_fee_independent_of_amount() {
        let client = basic_client(100, 0);
        let mut t = transfer(&client, 500);

        let small = t.get_fee(Some(1)).await.unwrap();
        assert_eq!(t.amount(), 1);
        let large = t.get_fee(Some(1_000_000_000_000)).await.unwrap();
        assert_eq!(small.fee, large.fee);

        // zero is treated as "no override"
        t.get_fee(Some(0)).await.unwrap();
        assert_eq!(t.amount(), 1_000_000_000_000);
    }

    #[tokio::test]
    async fn test_invalid_sender_checked_before_queries() {
        let client = basic_client(100, 700);
        let mut req = request(client.clone(), 500);
        req.sender_address = EVM_RECIPIENT.to_string();

        let t = SubstrateFungibleAssetTransfer::new(req, &config()).unwrap();
        let err = t.verify_balance().await.unwrap_err();
        assert!(matches!(err, TransferError::InvalidSenderAddress { .. }));
        assert_eq!(client.queries(), 0);
    }

    #[tokio::test]
    async fn test_zero_amount_rejected() {
        let client = basic_client(100, 700);
        assert!(matches!(
            SubstrateFungibleAssetTransfer::new(request(client.clone(), 0), &config()),
            Err(TransferError::InvalidAmount)
        ));

        let mut t = transfer(&client, 500);
        assert!(matches!(t.set_amount(0), Err(TransferError::InvalidAmount)));
        assert_eq!(t.amount(), 500);
        t.set_amount(600).unwrap();
        assert_eq!(t.amount(), 600);
    }

    #[tokio::test]
    async fn test_unknown_domain() {
        let client = basic_client(100, 700);
        let mut req = request(client, 500);
        req.destination_domain = Domainlike::ChainId(5);

        let err = SubstrateFungibleAssetTransfer::new(req, &config()).err().unwrap();
        assert!(matches!(
            err,
            TransferError::Config(ConfigError::DomainNotFound { .. })
        ));
        assert_eq!(err.to_string(), "Domain chain 5 not found");
    }

    #[tokio::test]
    async fn test_query_failure_propagates() {
        let client = Arc::new(InMemoryChainClient::new().failing("connection refused"));
        let t = transfer(&client, 500);
        let err = t.get_transfer_transaction().await.unwrap_err();
        assert!(matches!(err, TransferError::Client(ClientError::Rpc { .. })));
    }

    #[tokio::test]
    async fn test_full_resource_without_asset_id() {
        let client = basic_client(100, 700);
        let mut req = request(client.clone(), 500);
        req.resource = Resource {
            resource_id: sygma_core::ResourceId::new(PHA),
            resource_type: ResourceType::Fungible,
            address: None,
            symbol: Some("PHA".to_string()),
            decimals: Some(12),
            native: Some(true),
            asset_name: None,
            xcm_multi_asset_id: None,
            caip19: None,
        }
        .into();

        let mut t = SubstrateFungibleAssetTransfer::new(req, &config()).unwrap();
        let err = t.get_fee(None).await.unwrap_err();
        assert!(matches!(err, TransferError::MissingAssetId { .. }));
        assert_eq!(client.queries(), 0);
    }

    #[tokio::test]
    async fn test_preview() {
        let rate = PercentageFeeRate {
            rate_bps: 100,
            min_fee: Some(500),
            max_fee: None,
        };
        let t = transfer(&percentage_client(rate, 0), 10_000)
            .with_fee_policy(FeePolicy::DeductFromAmount);

        let preview = t.preview().await.unwrap();
        assert_eq!(preview.fee, "500");
        assert_eq!(preview.total_cost, "10000");
        assert_eq!(preview.receiving_amount, "9500");
        assert_eq!(preview.source_domain, "rococo-phala");
        assert_eq!(preview.destination_domain, "sepolia");

        let json = serde_json::to_value(&preview).unwrap();
        assert_eq!(json["feeHandler"], "percentage");
        assert_eq!(json["feePolicy"], "deductFromAmount");
    }

    #[tokio::test]
    async fn test_create_from_published_config() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/shared-config-test.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(SHARED_CONFIG))
            .mount(&server)
            .await;
        let url = format!("{}/shared-config-test.json", server.uri());

        let client = basic_client(100, 700);
        let t = create_substrate_fungible_asset_transfer_from_url(request(client.clone(), 500), &url)
            .await
            .unwrap();
        assert_eq!(t.source_domain().name, "rococo-phala");
        assert_eq!(t.destination_domain().id, DomainId(1));
        assert_eq!(t.resource().symbol.as_deref(), Some("PHA"));
        t.verify_balance().await.unwrap();

        let missing = format!("{}/missing.json", server.uri());
        let err = create_substrate_fungible_asset_transfer_from_url(request(client, 500), &missing)
            .await
            .err()
            .unwrap();
        assert_eq!(err.error_code(), "config_fetch_failed");
    }
}
