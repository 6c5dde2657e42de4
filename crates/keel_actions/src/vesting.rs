use keel_chain::{
    AllowanceState, CallArg, CallDescriptor, ChainClient, SubmitState, TransactionSubmitter,
    VestingState, check_allowance,
};
use keel_core::{
    Address, IntentError, VestingConfig, from_base_units, to_base_units, validate_address,
    validate_duration_secs, validate_positive_amount, validate_required,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::flow::run_submission;
use crate::outcome::ActionOutcome;

/// Write-side function names on the token and vesting contracts.
pub const FN_APPROVE: &str = "approve";
pub const FN_ADD_VESTING_SCHEDULE: &str = "addVestingSchedule";
pub const FN_CLAIM: &str = "claim";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApproveAllowanceInput {
    /// Approval amount in whole tokens, as typed.
    pub amount: String,
}

/// Builds and submits `approve(spender, amount)` on the token; the spender
/// is always the vesting contract.
pub struct ApproveAllowanceController<C> {
    config: VestingConfig,
    submitter: TransactionSubmitter<C>,
}

impl<C: ChainClient> ApproveAllowanceController<C> {
    pub fn new(config: VestingConfig, client: C) -> Self {
        Self {
            config,
            submitter: TransactionSubmitter::new(client),
        }
    }

    pub fn state(&self) -> SubmitState {
        self.submitter.state()
    }

    pub async fn execute(&self, input: &ApproveAllowanceInput) -> ActionOutcome {
        run_submission(&self.submitter, self.config.explorer_url.as_deref(), || {
            self.build(input)
        })
        .await
    }

    fn build(&self, input: &ApproveAllowanceInput) -> Result<CallDescriptor, IntentError> {
        validate_required(&[("amount", &input.amount)])?;
        validate_positive_amount(&input.amount)?;
        let amount = to_base_units(&input.amount, self.config.token_decimals)?;
        Ok(CallDescriptor::new(
            self.config.token_contract.clone(),
            FN_APPROVE,
            vec![
                CallArg::Addr(self.config.vesting_contract.clone()),
                CallArg::Uint(amount),
            ],
        ))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddVestingScheduleInput {
    pub beneficiary: String,
    /// Allocation in whole tokens, as typed.
    pub amount: String,
    pub cliff_secs: String,
    pub duration_secs: String,
}

/// A schedule request once every field has parsed.
#[derive(Debug)]
struct ScheduleParams {
    beneficiary: Address,
    amount: u128,
    cliff_secs: u64,
    duration_secs: u64,
}

/// Builds and submits `addVestingSchedule(beneficiary, amount, cliff,
/// duration)`, but only after confirming the operator's live token
/// allowance covers the allocation.
pub struct AddVestingScheduleController<C> {
    config: VestingConfig,
    submitter: TransactionSubmitter<C>,
}

impl<C: ChainClient> AddVestingScheduleController<C> {
    pub fn new(config: VestingConfig, client: C) -> Self {
        Self {
            config,
            submitter: TransactionSubmitter::new(client),
        }
    }

    pub fn state(&self) -> SubmitState {
        self.submitter.state()
    }

    pub async fn execute(&self, input: &AddVestingScheduleInput) -> ActionOutcome {
        if let Err(err) = self.submitter.begin_validation() {
            debug!("action refused; a submission is already in flight");
            return ActionOutcome::from_intent_error(&err);
        }
        let params = match self.validate(input) {
            Ok(params) => params,
            Err(err) => {
                self.submitter.abort_validation();
                debug!(error = %err, "validation failed; nothing submitted");
                return ActionOutcome::from_intent_error(&err);
            }
        };

        // The schedule is funded out of the operator's token allowance;
        // no descriptor is built until coverage is confirmed.
        match check_allowance(
            self.submitter.client(),
            &self.config.token_contract,
            &self.config.operator,
            &self.config.vesting_contract,
            params.amount,
        )
        .await
        {
            Ok(AllowanceState::Approved { .. }) => {}
            Ok(AllowanceState::NotApproved {
                allowance,
                required,
            }) => {
                self.submitter.abort_validation();
                warn!(allowance, required, "schedule blocked by short allowance");
                return ActionOutcome::Error {
                    message: format!(
                        "Token allowance {} is below the required {}. Approve the vesting contract first.",
                        self.display_amount(allowance),
                        self.display_amount(required),
                    ),
                };
            }
            Err(err) => {
                self.submitter.abort_validation();
                warn!(error = %err, "allowance read failed; schedule not submitted");
                return ActionOutcome::Error {
                    message: format!("Could not verify token allowance: {err}"),
                };
            }
        }

        let call = self.descriptor(&params);
        let outcome = match self.submitter.submit(&call).await {
            Ok(handle) => ActionOutcome::from_handle(&handle, self.config.explorer_url.as_deref()),
            Err(err) => ActionOutcome::from_intent_error(&err),
        };
        self.submitter.finish();
        outcome
    }

    fn display_amount(&self, base_units: u128) -> String {
        from_base_units(base_units, self.config.token_decimals)
            .unwrap_or_else(|_| base_units.to_string())
    }

    fn validate(&self, input: &AddVestingScheduleInput) -> Result<ScheduleParams, IntentError> {
        validate_required(&[
            ("beneficiary", &input.beneficiary),
            ("amount", &input.amount),
            ("cliff", &input.cliff_secs),
            ("duration", &input.duration_secs),
        ])?;
        let beneficiary = validate_address(&input.beneficiary)?;
        validate_positive_amount(&input.amount)?;
        let amount = to_base_units(&input.amount, self.config.token_decimals)?;
        let cliff_secs = validate_duration_secs("cliff", &input.cliff_secs)?;
        let duration_secs = validate_duration_secs("duration", &input.duration_secs)?;
        Ok(ScheduleParams {
            beneficiary,
            amount,
            cliff_secs,
            duration_secs,
        })
    }

    fn descriptor(&self, params: &ScheduleParams) -> CallDescriptor {
        CallDescriptor::new(
            self.config.vesting_contract.clone(),
            FN_ADD_VESTING_SCHEDULE,
            vec![
                CallArg::Addr(params.beneficiary.clone()),
                CallArg::Uint(params.amount),
                CallArg::Uint(u128::from(params.cliff_secs)),
                CallArg::Uint(u128::from(params.duration_secs)),
            ],
        )
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClaimVestedInput {
    pub beneficiary: String,
}

/// Builds and submits `claim(beneficiary)` when the reconciled vesting state
/// says there is something to claim.
pub struct ClaimVestedController<C> {
    config: VestingConfig,
    submitter: TransactionSubmitter<C>,
}

impl<C: ChainClient> ClaimVestedController<C> {
    pub fn new(config: VestingConfig, client: C) -> Self {
        Self {
            config,
            submitter: TransactionSubmitter::new(client),
        }
    }

    pub fn state(&self) -> SubmitState {
        self.submitter.state()
    }

    /// `vesting` is the dashboard's latest reconciled state; the claim is
    /// refused while it shows nothing claimable.
    pub async fn execute(&self, input: &ClaimVestedInput, vesting: &VestingState) -> ActionOutcome {
        if !vesting.claim_enabled() {
            return ActionOutcome::Error {
                message: claim_blocked_message(vesting).to_string(),
            };
        }
        run_submission(&self.submitter, self.config.explorer_url.as_deref(), || {
            self.build(input)
        })
        .await
    }

    fn build(&self, input: &ClaimVestedInput) -> Result<CallDescriptor, IntentError> {
        validate_required(&[("beneficiary", &input.beneficiary)])?;
        let beneficiary = validate_address(&input.beneficiary)?;
        Ok(CallDescriptor::new(
            self.config.vesting_contract.clone(),
            FN_CLAIM,
            vec![CallArg::Addr(beneficiary)],
        ))
    }
}

fn claim_blocked_message(state: &VestingState) -> &'static str {
    match state {
        VestingState::NotReady => "Vesting data is still loading.",
        VestingState::NoSchedule => "No vesting schedule found for this account.",
        VestingState::Ready(_) => "Nothing to claim yet.",
    }
}
