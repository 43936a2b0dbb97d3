multiversx_sc::imports!();
multiversx_sc::derive_imports!();

// ============================================================
// Configuration
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, PartialEq, Debug)]
pub struct GaugeConfig<M: ManagedTypeApi> {
    pub admin: ManagedAddress<M>,
    pub lp_token: TokenIdentifier<M>,
    pub governance_token: TokenIdentifier<M>,
    pub gauge_controller: ManagedAddress<M>,
    pub voting_escrow: ManagedAddress<M>,
    pub reward_policy: ManagedAddress<M>,
    pub point_proportion: BigUint<M>,
}

// ============================================================
// Gauge-wide state
// ============================================================

/// Governance-token emission integral. `integral` is emission units per unit
/// of working balance, scaled by `PRECISION`.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, PartialEq, Debug)]
pub struct EmissionStream<M: ManagedTypeApi> {
    pub integral: BigUint<M>,
    pub integral_timestamp: u64,
}

/// Point bonus stream. The cached rate belongs to `rate_epoch` and is
/// refreshed from the epoch schedule the first time a later epoch is crossed.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, PartialEq, Debug)]
pub struct PointStream<M: ManagedTypeApi> {
    /// Fraction of deposits (scaled by `PRECISION`) streamed as points per week.
    pub proportion: BigUint<M>,
    pub rate_cache: BigUint<M>,
    pub rate_epoch: u64,
    pub integral: BigUint<M>,
    pub integral_timestamp: u64,
    /// Sum of every account's outstanding point fraction.
    pub total_points: BigUint<M>,
}

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, PartialEq, Debug)]
pub struct GaugeState<M: ManagedTypeApi> {
    pub total_deposited: BigUint<M>,
    pub total_working: BigUint<M>,
    pub emission: EmissionStream<M>,
    pub point: PointStream<M>,
}

// ============================================================
// Reward token streams
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, PartialEq, Debug)]
pub struct RewardStream<M: ManagedTypeApi> {
    pub token: TokenIdentifier<M>,
    /// Token units released per second while funded.
    pub rate: BigUint<M>,
    /// Reward units per unit of working balance, scaled by `PRECISION`.
    pub integral: BigUint<M>,
    pub integral_timestamp: u64,
    /// Gauge balance of the token as last observed, net of payouts.
    pub stored_balance: BigUint<M>,
    /// Observed funding not yet released into the integral.
    pub unstreamed: BigUint<M>,
}

// ============================================================
// Per-account records
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, PartialEq, Debug)]
pub struct UserCheckpoint<M: ManagedTypeApi> {
    pub raw_balance: BigUint<M>,
    pub working_balance: BigUint<M>,
    /// Voting power the current working balance was computed with.
    pub voting_power_used: BigUint<M>,
    pub working_balance_timestamp: u64,
    pub emission_integral_snapshot: BigUint<M>,
    /// Emission owed since inception, independent of what was settled.
    pub integrate_fraction: BigUint<M>,
    pub minted: BigUint<M>,
    pub point_integral_snapshot: BigUint<M>,
    pub point_fraction: BigUint<M>,
}

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, PartialEq, Debug)]
pub struct UserReward<M: ManagedTypeApi> {
    pub integral_snapshot: BigUint<M>,
    pub claimable_accrued: BigUint<M>,
    pub claimed_total: BigUint<M>,
}

impl<M: ManagedTypeApi> EmissionStream<M> {
    pub fn new(start: u64) -> Self {
        EmissionStream {
            integral: BigUint::zero(),
            integral_timestamp: start,
        }
    }
}

impl<M: ManagedTypeApi> PointStream<M> {
    pub fn new(start: u64, initial_rate: BigUint<M>, proportion: BigUint<M>) -> Self {
        PointStream {
            proportion,
            rate_cache: initial_rate,
            rate_epoch: crate::ledger::epoch::epoch_of(start),
            integral: BigUint::zero(),
            integral_timestamp: start,
            total_points: BigUint::zero(),
        }
    }
}

impl<M: ManagedTypeApi> GaugeState<M> {
    pub fn new(start: u64, point_rate: BigUint<M>, point_proportion: BigUint<M>) -> Self {
        GaugeState {
            total_deposited: BigUint::zero(),
            total_working: BigUint::zero(),
            emission: EmissionStream::new(start),
            point: PointStream::new(start, point_rate, point_proportion),
        }
    }
}

impl<M: ManagedTypeApi> RewardStream<M> {
    /// A stream registered at `now` adopts whatever balance the gauge already
    /// holds as its initial funding.
    pub fn new(token: TokenIdentifier<M>, rate: BigUint<M>, now: u64, observed: BigUint<M>) -> Self {
        RewardStream {
            token,
            rate,
            integral: BigUint::zero(),
            integral_timestamp: now,
            stored_balance: observed.clone(),
            unstreamed: observed,
        }
    }
}

impl<M: ManagedTypeApi> Default for UserCheckpoint<M> {
    fn default() -> Self {
        UserCheckpoint {
            raw_balance: BigUint::zero(),
            working_balance: BigUint::zero(),
            voting_power_used: BigUint::zero(),
            working_balance_timestamp: 0,
            emission_integral_snapshot: BigUint::zero(),
            integrate_fraction: BigUint::zero(),
            minted: BigUint::zero(),
            point_integral_snapshot: BigUint::zero(),
            point_fraction: BigUint::zero(),
        }
    }
}

impl<M: ManagedTypeApi> Default for UserReward<M> {
    fn default() -> Self {
        UserReward {
            integral_snapshot: BigUint::zero(),
            claimable_accrued: BigUint::zero(),
            claimed_total: BigUint::zero(),
        }
    }
}

/// What a claim pays out; the contract performs the transfers.
#[derive(Clone)]
pub struct ClaimOutcome<M: ManagedTypeApi> {
    pub receiver: ManagedAddress<M>,
    pub rewards: ManagedVec<M, EsdtTokenPayment<M>>,
    pub emission: BigUint<M>,
}
