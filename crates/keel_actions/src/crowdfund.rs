use keel_chain::{CallArg, CallDescriptor, ChainClient, SubmitState, TransactionSubmitter};
use keel_core::{
    CrowdfundConfig, IntentError, to_base_units, validate_campaign_id, validate_positive_amount,
    validate_required,
};
use serde::{Deserialize, Serialize};

use crate::flow::run_submission;
use crate::outcome::ActionOutcome;

/// Write-side function names on the crowdfunding contract.
pub const FN_CREATE_CAMPAIGN: &str = "createCampaign";
pub const FN_CONTRIBUTE: &str = "contribute";
pub const FN_WITHDRAW: &str = "withdraw";
pub const FN_REFUND: &str = "refund";

/// Raw form fields for a new campaign.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateCampaignInput {
    pub title: String,
    /// Funding goal in whole coins, as typed.
    pub goal: String,
}

/// Builds and submits `createCampaign(title, goal)`.
pub struct CreateCampaignController<C> {
    config: CrowdfundConfig,
    submitter: TransactionSubmitter<C>,
}

impl<C: ChainClient> CreateCampaignController<C> {
    pub fn new(config: CrowdfundConfig, client: C) -> Self {
        Self {
            config,
            submitter: TransactionSubmitter::new(client),
        }
    }

    /// Submission slot state, for enabling and disabling the form.
    pub fn state(&self) -> SubmitState {
        self.submitter.state()
    }

    pub async fn execute(&self, input: &CreateCampaignInput) -> ActionOutcome {
        run_submission(&self.submitter, self.config.explorer_url.as_deref(), || {
            self.build(input)
        })
        .await
    }

    fn build(&self, input: &CreateCampaignInput) -> Result<CallDescriptor, IntentError> {
        validate_required(&[("title", &input.title), ("goal", &input.goal)])?;
        validate_positive_amount(&input.goal)?;
        let goal = to_base_units(&input.goal, self.config.value_decimals)?;
        Ok(CallDescriptor::new(
            self.config.contract.clone(),
            FN_CREATE_CAMPAIGN,
            vec![
                CallArg::Text(input.title.trim().to_string()),
                CallArg::Uint(goal),
            ],
        ))
    }
}

/// Raw form fields for a contribution.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContributeInput {
    pub campaign_id: String,
    /// Contribution in whole coins, as typed; sent as native value.
    pub amount: String,
}

/// Builds and submits `contribute(id)` carrying the amount as value.
pub struct ContributeController<C> {
    config: CrowdfundConfig,
    submitter: TransactionSubmitter<C>,
}

impl<C: ChainClient> ContributeController<C> {
    pub fn new(config: CrowdfundConfig, client: C) -> Self {
        Self {
            config,
            submitter: TransactionSubmitter::new(client),
        }
    }

    pub fn state(&self) -> SubmitState {
        self.submitter.state()
    }

    pub async fn execute(&self, input: &ContributeInput) -> ActionOutcome {
        run_submission(&self.submitter, self.config.explorer_url.as_deref(), || {
            self.build(input)
        })
        .await
    }

    fn build(&self, input: &ContributeInput) -> Result<CallDescriptor, IntentError> {
        validate_required(&[
            ("campaign id", &input.campaign_id),
            ("amount", &input.amount),
        ])?;
        let campaign_id = validate_campaign_id(&input.campaign_id)?;
        validate_positive_amount(&input.amount)?;
        let value = to_base_units(&input.amount, self.config.value_decimals)?;
        Ok(CallDescriptor::new(
            self.config.contract.clone(),
            FN_CONTRIBUTE,
            vec![CallArg::Uint(u128::from(campaign_id))],
        )
        .with_value(value))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WithdrawInput {
    pub campaign_id: String,
}

/// Builds and submits `withdraw(id)` for a campaign owner.
pub struct WithdrawController<C> {
    config: CrowdfundConfig,
    submitter: TransactionSubmitter<C>,
}

impl<C: ChainClient> WithdrawController<C> {
    pub fn new(config: CrowdfundConfig, client: C) -> Self {
        Self {
            config,
            submitter: TransactionSubmitter::new(client),
        }
    }

    pub fn state(&self) -> SubmitState {
        self.submitter.state()
    }

    pub async fn execute(&self, input: &WithdrawInput) -> ActionOutcome {
        run_submission(&self.submitter, self.config.explorer_url.as_deref(), || {
            self.build(input)
        })
        .await
    }

    fn build(&self, input: &WithdrawInput) -> Result<CallDescriptor, IntentError> {
        validate_required(&[("campaign id", &input.campaign_id)])?;
        let campaign_id = validate_campaign_id(&input.campaign_id)?;
        Ok(CallDescriptor::new(
            self.config.contract.clone(),
            FN_WITHDRAW,
            vec![CallArg::Uint(u128::from(campaign_id))],
        ))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RefundInput {
    pub campaign_id: String,
}

/// Builds and submits `refund(id)` for a backer of a failed campaign.
pub struct RefundController<C> {
    config: CrowdfundConfig,
    submitter: TransactionSubmitter<C>,
}

impl<C: ChainClient> RefundController<C> {
    pub fn new(config: CrowdfundConfig, client: C) -> Self {
        Self {
            config,
            submitter: TransactionSubmitter::new(client),
        }
    }

    pub fn state(&self) -> SubmitState {
        self.submitter.state()
    }

    pub async fn execute(&self, input: &RefundInput) -> ActionOutcome {
        run_submission(&self.submitter, self.config.explorer_url.as_deref(), || {
            self.build(input)
        })
        .await
    }

    fn build(&self, input: &RefundInput) -> Result<CallDescriptor, IntentError> {
        validate_required(&[("campaign id", &input.campaign_id)])?;
        let campaign_id = validate_campaign_id(&input.campaign_id)?;
        Ok(CallDescriptor::new(
            self.config.contract.clone(),
            FN_REFUND,
            vec![CallArg::Uint(u128::from(campaign_id))],
        ))
    }
}
