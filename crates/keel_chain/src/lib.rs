pub mod allowance;
pub mod call;
pub mod client;
pub mod submitter;
pub mod vesting;

// Re-export primary types for convenient access.
pub use allowance::{AllowanceState, FN_ALLOWANCE, check_allowance, evaluate_allowance};
pub use call::{CallArg, CallDescriptor, ReadQuery};
pub use client::{ChainClient, ChainClientError, SubmissionReceipt};
pub use submitter::{HandleStatus, SubmitState, TransactionHandle, TransactionSubmitter};
pub use vesting::{
    FN_RELEASED, FN_TOTAL_ALLOCATION, FN_VESTED_AMOUNT, VestingQuery, VestingSnapshot,
    VestingState, VestingStateReconciler, reconcile,
};
