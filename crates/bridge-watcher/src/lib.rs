//! Bridge transfer watcher
//!
//! Follows a transfer across the bridge by polling: the deposit event on the
//! source chain, then the proposal execution on the destination chain. Also
//! provides the fixed-count "has the destination value changed yet" loop used
//! for generic message transfers.
//!
//! Every loop sleeps first, then checks, and gives up after `max_attempts`
//! further checks. There is no cancellation; a query error ends the loop.

use std::collections::HashSet;
use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sygma_core::{ClientError, DomainId, ResourceId};

/// Default delay between polls
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(15);

/// Default number of re-checks before giving up
pub const DEFAULT_MAX_ATTEMPTS: u32 = 8;

// ─── Types ───────────────────────────────────────────────────────────────────

/// Polling schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// `Deposit` event emitted by the source bridge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositEvent {
    pub destination_domain_id: DomainId,
    pub resource_id: ResourceId,
    pub deposit_nonce: u64,
    pub sender: String,
    pub tx_hash: Option<String>,
}

/// `ProposalExecution` event emitted by the destination bridge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalExecutionEvent {
    pub origin_domain_id: DomainId,
    pub deposit_nonce: u64,
    pub data_hash: Option<String>,
    pub tx_hash: Option<String>,
}

/// Result of a bounded watch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchOutcome<T> {
    Observed(T),
    TimedOut,
}

/// Result of [`wait_until_bridged`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeOutcome {
    Bridged,
    TimedOut,
}

/// Where a tracked transfer got to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferStatus {
    /// No new deposit from the sender appeared on the source chain
    DepositNotObserved,
    /// Deposited, but no proposal execution seen on the destination yet
    Deposited(DepositEvent),
    /// Funds released on the destination chain
    Executed {
        deposit: DepositEvent,
        execution: ProposalExecutionEvent,
    },
}

/// Bridge events readable from one chain
#[async_trait]
pub trait BridgeEventSource: Send + Sync {
    /// Deposits made by `sender` on this chain's bridge
    async fn deposits_by_sender(&self, sender: &str) -> Result<Vec<DepositEvent>, ClientError>;

    /// Proposal execution for a deposit that originated on `origin_domain_id`
    async fn proposal_execution(
        &self,
        origin_domain_id: DomainId,
        deposit_nonce: u64,
    ) -> Result<Option<ProposalExecutionEvent>, ClientError>;
}

// ─── Polling ─────────────────────────────────────────────────────────────────

/// Poll `check` until it yields a value or the attempts run out.
pub async fn poll_until<T, E, F, Fut>(poll: &PollConfig, mut check: F) -> Result<WatchOutcome<T>, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>, E>>,
{
    let mut attempts = 0u32;
    loop {
        tokio::time::sleep(poll.interval).await;

        if let Some(value) = check().await? {
            return Ok(WatchOutcome::Observed(value));
        }

        attempts += 1;
        if attempts > poll.max_attempts {
            return Ok(WatchOutcome::TimedOut);
        }
    }
}

/// Wait until `fetch` returns something different from `before`.
pub async fn wait_until_bridged<T, E, F, Fut>(
    mut fetch: F,
    before: &T,
    poll: &PollConfig,
) -> Result<BridgeOutcome, E>
where
    T: PartialEq,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let outcome = poll_until(poll, move || {
        let next = fetch();
        async move {
            let value = next.await?;
            Ok::<_, E>((value != *before).then_some(()))
        }
    })
    .await?;

    match outcome {
        WatchOutcome::Observed(()) => {
            tracing::info!("Transaction successfully bridged");
            Ok(BridgeOutcome::Bridged)
        }
        WatchOutcome::TimedOut => {
            tracing::warn!(
                attempts = poll.max_attempts,
                "Transaction is taking too much time to bridge"
            );
            Ok(BridgeOutcome::TimedOut)
        }
    }
}

/// Wait for a new deposit from `sender`.
///
/// Deposits that already exist when the watch starts are ignored.
pub async fn watch_deposit(
    source: &dyn BridgeEventSource,
    sender: &str,
    poll: &PollConfig,
) -> Result<WatchOutcome<DepositEvent>, ClientError> {
    let seen: HashSet<u64> = source
        .deposits_by_sender(sender)
        .await?
        .into_iter()
        .map(|d| d.deposit_nonce)
        .collect();
    let seen = &seen;

    let outcome = poll_until(poll, move || async move {
        let deposits = source.deposits_by_sender(sender).await?;
        Ok::<_, ClientError>(
            deposits
                .into_iter()
                .find(|d| !seen.contains(&d.deposit_nonce)),
        )
    })
    .await?;

    if let WatchOutcome::Observed(deposit) = &outcome {
        tracing::info!(
            resource_id = %deposit.resource_id,
            destination_domain_id = %deposit.destination_domain_id,
            deposit_nonce = deposit.deposit_nonce,
            "Received deposit"
        );
    }
    Ok(outcome)
}

/// Wait for the destination bridge to execute the proposal for a deposit.
pub async fn watch_proposal_execution(
    destination: &dyn BridgeEventSource,
    origin_domain_id: DomainId,
    deposit_nonce: u64,
    poll: &PollConfig,
) -> Result<WatchOutcome<ProposalExecutionEvent>, ClientError> {
    let outcome = poll_until(poll, move || {
        destination.proposal_execution(origin_domain_id, deposit_nonce)
    })
    .await?;

    match &outcome {
        WatchOutcome::Observed(execution) => tracing::info!(
            origin_domain_id = %execution.origin_domain_id,
            deposit_nonce = execution.deposit_nonce,
            "Proposal execution observed"
        ),
        WatchOutcome::TimedOut => tracing::warn!(
            origin_domain_id = %origin_domain_id,
            deposit_nonce,
            "No proposal execution before timeout"
        ),
    }
    Ok(outcome)
}

/// Follow a transfer from deposit on `source` to execution on `destination`.
pub async fn track_transfer(
    source: &dyn BridgeEventSource,
    destination: &dyn BridgeEventSource,
    sender: &str,
    origin_domain_id: DomainId,
    poll: &PollConfig,
) -> Result<TransferStatus, ClientError> {
    let deposit = match watch_deposit(source, sender, poll).await? {
        WatchOutcome::Observed(deposit) => deposit,
        WatchOutcome::TimedOut => return Ok(TransferStatus::DepositNotObserved),
    };

    match watch_proposal_execution(destination, origin_domain_id, deposit.deposit_nonce, poll)
        .await?
    {
        WatchOutcome::Observed(execution) => Ok(TransferStatus::Executed { deposit, execution }),
        WatchOutcome::TimedOut => Ok(TransferStatus::Deposited(deposit)),
    }
}
