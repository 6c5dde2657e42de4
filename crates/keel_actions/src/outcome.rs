use keel_chain::{HandleStatus, TransactionHandle};
use keel_core::IntentError;
use serde::{Deserialize, Serialize};

/// What an action reports back to the display layer. Exactly one of these
/// comes out of every invocation; nothing is dropped silently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActionOutcome {
    /// The provider accepted the transaction.
    Success { message: String },
    /// Validation, the signer, or the provider said no. `message` is ready
    /// to show the user and keeps provider text verbatim.
    Error { message: String },
    /// A previous invocation of this action instance has not settled yet.
    Busy,
}

impl ActionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Busy)
    }

    /// The user-facing text, if this outcome carries one.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success { message } | Self::Error { message } => Some(message),
            Self::Busy => None,
        }
    }

    pub(crate) fn from_intent_error(err: &IntentError) -> Self {
        match err {
            IntentError::AlreadyInFlight => Self::Busy,
            other => Self::Error {
                message: other.to_string(),
            },
        }
    }

    pub(crate) fn from_handle(handle: &TransactionHandle, explorer_url: Option<&str>) -> Self {
        match handle.status {
            HandleStatus::Confirmed => {
                let transaction_id = handle.transaction_id.as_deref().unwrap_or("unknown");
                let message = match explorer_url {
                    Some(base) => format!(
                        "Transaction {transaction_id} submitted ({}/tx/{transaction_id}).",
                        base.trim_end_matches('/')
                    ),
                    None => format!("Transaction {transaction_id} submitted."),
                };
                Self::Success { message }
            }
            HandleStatus::Failed => Self::Error {
                message: handle
                    .error
                    .as_ref()
                    .map(|err| err.to_string())
                    .unwrap_or_else(|| "transaction failed".to_string()),
            },
            HandleStatus::Submitted => Self::Success {
                message: "Transaction submitted; awaiting confirmation.".into(),
            },
        }
    }
}
