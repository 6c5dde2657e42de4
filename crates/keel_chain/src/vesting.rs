use keel_core::Address;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::call::{CallArg, ReadQuery};
use crate::client::ChainClient;

/// Read-side function names on the vesting contract.
pub const FN_TOTAL_ALLOCATION: &str = "totalAllocation";
pub const FN_RELEASED: &str = "released";
pub const FN_VESTED_AMOUNT: &str = "vestedAmount";

/// One consistent view of a beneficiary's schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VestingSnapshot {
    pub total_allocated: u128,
    pub released: u128,
    pub vested: u128,
    /// `vested` minus `released`, floored at zero.
    pub claimable: u128,
    /// False when `released` could not be read and zero was assumed. The
    /// claimable figure is then an upper bound, and the dashboard should say
    /// so instead of presenting it as settled fact.
    pub released_loaded: bool,
}

/// What the dashboard knows about a schedule right now.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum VestingState {
    /// The core reads have not answered yet; render as loading, not as an
    /// empty schedule.
    #[default]
    NotReady,
    /// The contract answered: no allocation exists for this account.
    NoSchedule,
    /// A schedule exists; the snapshot carries the derived figures.
    Ready(VestingSnapshot),
}

impl VestingState {
    pub fn snapshot(&self) -> Option<&VestingSnapshot> {
        match self {
            Self::Ready(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    /// The claim action is enabled only when something is actually claimable.
    pub fn claim_enabled(&self) -> bool {
        matches!(self, Self::Ready(snapshot) if snapshot.claimable > 0)
    }
}

/// Fold raw read results into display state.
///
/// `released` is the one read tolerated missing: the token contracts this
/// dashboard has to work with expose it inconsistently, so a missing value
/// counts as zero rather than blocking the page. The snapshot records that
/// the value was assumed.
pub fn reconcile(
    total_allocated: Option<u128>,
    released: Option<u128>,
    vested: Option<u128>,
) -> VestingState {
    let Some(total_allocated) = total_allocated else {
        return VestingState::NotReady;
    };
    if total_allocated == 0 {
        return VestingState::NoSchedule;
    }
    let Some(vested) = vested else {
        return VestingState::NotReady;
    };

    let released_loaded = released.is_some();
    if !released_loaded {
        warn!("released amount unavailable; computing claimable as if nothing was released");
    }
    let released = released.unwrap_or(0);
    VestingState::Ready(VestingSnapshot {
        total_allocated,
        released,
        vested,
        claimable: vested.saturating_sub(released),
        released_loaded,
    })
}

/// Which contract and beneficiary the reconciler is following.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VestingQuery {
    pub contract: Address,
    pub beneficiary: Address,
}

impl VestingQuery {
    fn read(&self, function: &str) -> ReadQuery {
        ReadQuery::new(
            self.contract.clone(),
            function,
            vec![CallArg::Addr(self.beneficiary.clone())],
        )
    }
}

/// Accumulates the three contract reads and keeps the derived state current.
///
/// Reads may land in any order and individual reads may fail; the state is
/// recomputed after every recorded value, and a failed refresh keeps the
/// previous value for that slot instead of blanking the page.
#[derive(Debug, Default)]
pub struct VestingStateReconciler {
    total_allocated: Option<u128>,
    released: Option<u128>,
    vested: Option<u128>,
    state: VestingState,
}

impl VestingStateReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &VestingState {
        &self.state
    }

    pub fn record_total_allocated(&mut self, value: u128) {
        self.total_allocated = Some(value);
        self.recompute();
    }

    pub fn record_released(&mut self, value: u128) {
        self.released = Some(value);
        self.recompute();
    }

    pub fn record_vested(&mut self, value: u128) {
        self.vested = Some(value);
        self.recompute();
    }

    fn recompute(&mut self) {
        self.state = reconcile(self.total_allocated, self.released, self.vested);
    }

    /// Re-read all three values for `query` and recompute.
    pub async fn refresh<C: ChainClient>(
        &mut self,
        client: &C,
        query: &VestingQuery,
    ) -> &VestingState {
        self.total_allocated =
            read_or_keep(client, query, FN_TOTAL_ALLOCATION, self.total_allocated).await;
        self.released = read_or_keep(client, query, FN_RELEASED, self.released).await;
        self.vested = read_or_keep(client, query, FN_VESTED_AMOUNT, self.vested).await;
        self.recompute();
        self.state()
    }
}

async fn read_or_keep<C: ChainClient>(
    client: &C,
    query: &VestingQuery,
    function: &str,
    previous: Option<u128>,
) -> Option<u128> {
    match client.read_contract_value(&query.read(function)).await {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(
                function,
                beneficiary = %query.beneficiary,
                error = %err,
                "vesting read failed; keeping previous value"
            );
            previous
        }
    }
}
