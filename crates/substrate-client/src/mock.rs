//! In-memory chain client for tests
//!
//! Holds fee-handler routes, fee configs and balances in maps and counts every
//! query so tests can assert which reads happened.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use sygma_core::{Balance, ClientError, DomainId, XcmMultiAssetId};

use crate::fee::{FeeHandlerKind, PercentageFeeRate};
use crate::{AccountData, ChainClient, Result};

type RouteKey = (DomainId, String);

fn route_key(domain: DomainId, asset: &XcmMultiAssetId) -> RouteKey {
    (domain, asset.to_string())
}

#[derive(Debug, Default)]
pub struct InMemoryChainClient {
    fee_handlers: HashMap<RouteKey, FeeHandlerKind>,
    basic_fees: HashMap<RouteKey, Balance>,
    percentage_rates: HashMap<RouteKey, PercentageFeeRate>,
    accounts: HashMap<String, AccountData>,
    failure: Option<String>,
    queries: AtomicUsize,
    account_reads: AtomicUsize,
}

impl InMemoryChainClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fee_handler(
        mut self,
        domain: DomainId,
        asset: &XcmMultiAssetId,
        kind: FeeHandlerKind,
    ) -> Self {
        self.fee_handlers.insert(route_key(domain, asset), kind);
        self
    }

    /// Route the pair to the basic handler with a flat fee.
    pub fn with_basic_fee(mut self, domain: DomainId, asset: &XcmMultiAssetId, fee: Balance) -> Self {
        self.basic_fees.insert(route_key(domain, asset), fee);
        self.with_fee_handler(domain, asset, FeeHandlerKind::Basic)
    }

    /// Route the pair to the percentage handler with a rate.
    pub fn with_percentage_rate(
        mut self,
        domain: DomainId,
        asset: &XcmMultiAssetId,
        rate: PercentageFeeRate,
    ) -> Self {
        self.percentage_rates.insert(route_key(domain, asset), rate);
        self.with_fee_handler(domain, asset, FeeHandlerKind::Percentage)
    }

    pub fn with_free_balance(mut self, address: &str, free: Balance) -> Self {
        self.accounts
            .insert(address.to_string(), AccountData::with_free(free));
        self
    }

    /// Make every query fail with an RPC error.
    pub fn failing(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    /// Total number of chain queries made
    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    /// Number of `system.account` reads made
    pub fn account_reads(&self) -> usize {
        self.account_reads.load(Ordering::SeqCst)
    }

    fn record_query(&self) -> Result<()> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(message) => Err(ClientError::Rpc {
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ChainClient for InMemoryChainClient {
    async fn fee_handler(
        &self,
        destination_domain_id: DomainId,
        asset: &XcmMultiAssetId,
    ) -> Result<Option<FeeHandlerKind>> {
        self.record_query()?;
        Ok(self
            .fee_handlers
            .get(&route_key(destination_domain_id, asset))
            .copied())
    }

    async fn basic_fee(
        &self,
        destination_domain_id: DomainId,
        asset: &XcmMultiAssetId,
    ) -> Result<Option<Balance>> {
        self.record_query()?;
        Ok(self
            .basic_fees
            .get(&route_key(destination_domain_id, asset))
            .copied())
    }

    async fn percentage_fee_rate(
        &self,
        destination_domain_id: DomainId,
        asset: &XcmMultiAssetId,
    ) -> Result<Option<PercentageFeeRate>> {
        self.record_query()?;
        Ok(self
            .percentage_rates
            .get(&route_key(destination_domain_id, asset))
            .copied())
    }

    async fn account(&self, address: &str) -> Result<AccountData> {
        self.account_reads.fetch_add(1, Ordering::SeqCst);
        self.record_query()?;
        Ok(self.accounts.get(address).copied().unwrap_or_default())
    }
}
