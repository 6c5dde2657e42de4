use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Everything that can stop a user intent on its way to the chain.
///
/// Every variant carries enough text to show the user as-is; the display
/// layer never has to inspect message contents to decide what happened.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum IntentError {
    #[error("required field `{0}` is empty")]
    MissingField(String),

    #[error("amount must be greater than zero")]
    NonPositiveAmount,

    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("another submission for this action is still in flight")]
    AlreadyInFlight,

    #[error("transaction rejected: {0}")]
    SubmissionRejected(String),

    #[error("transaction failed: {0}")]
    SubmissionFailed(String),
}

/// Which stage of the intent pipeline produced the error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorStage {
    /// Caught before anything left the process; the form can be corrected
    /// and resubmitted immediately.
    Validation,
    /// A previous submission for the same action has not settled yet.
    Busy,
    /// The wallet or provider turned the transaction down.
    Submission,
}

impl IntentError {
    /// Returns the pipeline stage the error belongs to, for routing and
    /// display purposes.
    pub fn stage(&self) -> ErrorStage {
        match self {
            Self::MissingField(_)
            | Self::NonPositiveAmount
            | Self::InvalidIdentifier(_)
            | Self::InvalidAmount(_) => ErrorStage::Validation,
            Self::AlreadyInFlight => ErrorStage::Busy,
            Self::SubmissionRejected(_) | Self::SubmissionFailed(_) => ErrorStage::Submission,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_validation_for_input_errors() {
        assert_eq!(
            IntentError::MissingField("title".into()).stage(),
            ErrorStage::Validation
        );
        assert_eq!(IntentError::NonPositiveAmount.stage(), ErrorStage::Validation);
        assert_eq!(
            IntentError::InvalidIdentifier("abc".into()).stage(),
            ErrorStage::Validation
        );
        assert_eq!(
            IntentError::InvalidAmount("1.2.3".into()).stage(),
            ErrorStage::Validation
        );
    }

    #[test]
    fn test_stage_busy_and_submission() {
        assert_eq!(IntentError::AlreadyInFlight.stage(), ErrorStage::Busy);
        assert_eq!(
            IntentError::SubmissionRejected("user declined".into()).stage(),
            ErrorStage::Submission
        );
        assert_eq!(
            IntentError::SubmissionFailed("nonce too low".into()).stage(),
            ErrorStage::Submission
        );
    }

    #[test]
    fn test_display_keeps_provider_message_verbatim() {
        let err = IntentError::SubmissionRejected("User denied transaction signature.".into());
        assert!(err.to_string().contains("User denied transaction signature."));
    }

    #[test]
    fn test_display_names_the_missing_field() {
        let err = IntentError::MissingField("beneficiary".into());
        assert_eq!(err.to_string(), "required field `beneficiary` is empty");
    }

    #[test]
    fn test_serde_round_trip_is_tagged() {
        let err = IntentError::SubmissionFailed("RPC unreachable".into());
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("\"kind\":\"submission_failed\""));
        let back: IntentError = serde_json::from_str(&json).unwrap();
        assert_eq!(back, err);
    }

    #[test]
    fn test_serde_round_trip_unit_variant() {
        let err = IntentError::AlreadyInFlight;
        let json = serde_json::to_string(&err).unwrap();
        let back: IntentError = serde_json::from_str(&json).unwrap();
        assert_eq!(back, err);
    }
}
