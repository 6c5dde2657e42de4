pub mod crowdfund;
mod flow;
pub mod outcome;
pub mod vesting;

// Re-export primary types for convenient access.
pub use crowdfund::{
    ContributeController, ContributeInput, CreateCampaignController, CreateCampaignInput,
    FN_CONTRIBUTE, FN_CREATE_CAMPAIGN, FN_REFUND, FN_WITHDRAW, RefundController, RefundInput,
    WithdrawController, WithdrawInput,
};
pub use outcome::ActionOutcome;
pub use vesting::{
    AddVestingScheduleController, AddVestingScheduleInput, ApproveAllowanceController,
    ApproveAllowanceInput, ClaimVestedController, ClaimVestedInput, FN_ADD_VESTING_SCHEDULE,
    FN_APPROVE, FN_CLAIM,
};
