use keel_core::Address;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::call::{CallArg, ReadQuery};
use crate::client::{ChainClient, ChainClientError};

/// ERC-20 allowance read.
pub const FN_ALLOWANCE: &str = "allowance";

/// Whether an owner's standing token approval covers a required amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AllowanceState {
    /// The approval falls short; both figures are kept so the message can
    /// name them.
    NotApproved { allowance: u128, required: u128 },
    Approved { allowance: u128 },
}

impl AllowanceState {
    pub fn is_approved(&self) -> bool {
        matches!(self, Self::Approved { .. })
    }
}

/// Pure comparison half of the gate, for callers that already hold the read.
pub fn evaluate_allowance(allowance: u128, required: u128) -> AllowanceState {
    if allowance >= required {
        AllowanceState::Approved { allowance }
    } else {
        AllowanceState::NotApproved {
            allowance,
            required,
        }
    }
}

/// Read `allowance(owner, spender)` on the token and compare it against
/// `required`.
pub async fn check_allowance<C: ChainClient>(
    client: &C,
    token: &Address,
    owner: &Address,
    spender: &Address,
    required: u128,
) -> Result<AllowanceState, ChainClientError> {
    let query = ReadQuery::new(
        token.clone(),
        FN_ALLOWANCE,
        vec![CallArg::Addr(owner.clone()), CallArg::Addr(spender.clone())],
    );
    let allowance = client.read_contract_value(&query).await?;
    let state = evaluate_allowance(allowance, required);
    debug!(
        %owner,
        %spender,
        allowance,
        required,
        approved = state.is_approved(),
        "allowance checked"
    );
    Ok(state)
}
