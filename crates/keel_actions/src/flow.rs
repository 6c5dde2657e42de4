use keel_chain::{CallDescriptor, ChainClient, TransactionSubmitter};
use keel_core::IntentError;
use tracing::debug;

use crate::outcome::ActionOutcome;

/// The submission sequence every action shares: claim the slot, build the
/// call, submit, report, release. Validation failures release the slot
/// without touching the chain.
pub(crate) async fn run_submission<C: ChainClient>(
    submitter: &TransactionSubmitter<C>,
    explorer_url: Option<&str>,
    build: impl FnOnce() -> Result<CallDescriptor, IntentError>,
) -> ActionOutcome {
    if let Err(err) = submitter.begin_validation() {
        debug!("action refused; a submission is already in flight");
        return ActionOutcome::from_intent_error(&err);
    }
    let call = match build() {
        Ok(call) => call,
        Err(err) => {
            submitter.abort_validation();
            debug!(error = %err, "validation failed; nothing submitted");
            return ActionOutcome::from_intent_error(&err);
        }
    };
    let outcome = match submitter.submit(&call).await {
        Ok(handle) => ActionOutcome::from_handle(&handle, explorer_url),
        Err(err) => ActionOutcome::from_intent_error(&err),
    };
    submitter.finish();
    outcome
}
