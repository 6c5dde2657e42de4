use chrono::{DateTime, Utc};
use keel_core::IntentError;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::call::CallDescriptor;
use crate::client::{ChainClient, ChainClientError};

/// Lifecycle of one action instance's submission slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitState {
    Idle,
    Validating,
    Submitting,
    AwaitingConfirmation,
    Confirmed,
    Failed,
}

impl SubmitState {
    /// True while an attempt is somewhere between first input check and
    /// provider verdict.
    pub fn is_in_flight(self) -> bool {
        matches!(
            self,
            Self::Validating | Self::Submitting | Self::AwaitingConfirmation
        )
    }

    /// True once the attempt has settled and [`TransactionSubmitter::finish`]
    /// may recycle the slot.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Confirmed | Self::Failed)
    }
}

/// Status a [`TransactionHandle`] reports to the display layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandleStatus {
    Submitted,
    Confirmed,
    Failed,
}

/// Record of one submission attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionHandle {
    pub id: Uuid,
    pub status: HandleStatus,
    /// Provider-assigned hash, present once the provider accepted.
    pub transaction_id: Option<String>,
    /// Why the attempt failed, when it did.
    pub error: Option<IntentError>,
    pub created_at: DateTime<Utc>,
}

impl TransactionHandle {
    fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            status: HandleStatus::Submitted,
            transaction_id: None,
            error: None,
            created_at: Utc::now(),
        }
    }

    fn confirm(&mut self, transaction_id: String) {
        self.status = HandleStatus::Confirmed;
        self.transaction_id = Some(transaction_id);
    }

    fn fail(&mut self, error: IntentError) {
        self.status = HandleStatus::Failed;
        self.error = Some(error);
    }
}

/// Owns the chain client and enforces one submission at a time per action
/// instance.
///
/// The state lock is never held across an await. A second caller arriving
/// while an attempt is anywhere between `Validating` and a settled verdict
/// gets [`IntentError::AlreadyInFlight`] without the client being touched.
pub struct TransactionSubmitter<C> {
    client: C,
    state: Mutex<SubmitState>,
}

impl<C: ChainClient> TransactionSubmitter<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            state: Mutex::new(SubmitState::Idle),
        }
    }

    /// The underlying client, for reads that accompany a submission
    /// (allowance checks and the like).
    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn state(&self) -> SubmitState {
        *self.state.lock()
    }

    /// Claim the slot for a new attempt. Fails with `AlreadyInFlight` unless
    /// the slot is idle.
    pub fn begin_validation(&self) -> Result<(), IntentError> {
        let mut state = self.state.lock();
        if *state != SubmitState::Idle {
            return Err(IntentError::AlreadyInFlight);
        }
        *state = SubmitState::Validating;
        Ok(())
    }

    /// Release the slot after validation failed. Nothing reached the chain,
    /// so the slot goes straight back to idle.
    pub fn abort_validation(&self) {
        let mut state = self.state.lock();
        if *state == SubmitState::Validating {
            *state = SubmitState::Idle;
        }
    }

    /// Send a validated call to the signer and wait for the provider's
    /// verdict.
    ///
    /// Wallet rejections and provider failures are not `Err` here: they are
    /// settled attempts, reported as a `Failed` handle carrying the message
    /// verbatim. `Err` is reserved for `AlreadyInFlight`, where no attempt
    /// was started at all.
    pub async fn submit(&self, call: &CallDescriptor) -> Result<TransactionHandle, IntentError> {
        {
            let mut state = self.state.lock();
            match *state {
                SubmitState::Idle | SubmitState::Validating => {
                    *state = SubmitState::Submitting;
                }
                _ => return Err(IntentError::AlreadyInFlight),
            }
        }

        let mut handle = TransactionHandle::new();
        info!(
            handle_id = %handle.id,
            function = call.function(),
            target = %call.target(),
            "submitting transaction"
        );

        *self.state.lock() = SubmitState::AwaitingConfirmation;
        match self.client.submit_transaction(call).await {
            Ok(receipt) => {
                *self.state.lock() = SubmitState::Confirmed;
                info!(
                    handle_id = %handle.id,
                    transaction_id = %receipt.transaction_id,
                    "submission accepted"
                );
                handle.confirm(receipt.transaction_id);
            }
            Err(ChainClientError::Rejected(message)) => {
                *self.state.lock() = SubmitState::Failed;
                warn!(handle_id = %handle.id, %message, "submission rejected by signer");
                handle.fail(IntentError::SubmissionRejected(message));
            }
            Err(ChainClientError::Rpc(message)) => {
                *self.state.lock() = SubmitState::Failed;
                warn!(handle_id = %handle.id, %message, "submission failed");
                handle.fail(IntentError::SubmissionFailed(message));
            }
        }
        Ok(handle)
    }

    /// Recycle a settled slot so the next attempt can start. No-op while an
    /// attempt is still in flight.
    pub fn finish(&self) {
        let mut state = self.state.lock();
        if state.is_terminal() {
            *state = SubmitState::Idle;
        }
    }
}
