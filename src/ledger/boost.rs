use multiversx_sc::{api::ManagedTypeApi, types::BigUint};

/// Percentage of the raw balance that counts without any voting power.
pub const TOKENLESS_PRODUCTION: u64 = 40;

/// Boosted stake of an account:
/// `min(raw * 40% + total_deposited * vp / total_vp * 60%, raw)`.
/// With no voting power in the system at all the raw balance counts in full.
pub fn working_balance<M: ManagedTypeApi>(
    raw: &BigUint<M>,
    total_deposited: &BigUint<M>,
    voting_power: &BigUint<M>,
    total_voting_power: &BigUint<M>,
) -> BigUint<M> {
    if *total_voting_power == 0u64 {
        return raw.clone();
    }
    let floor = raw * TOKENLESS_PRODUCTION / 100u64;
    let boost = total_deposited * voting_power / total_voting_power
        * (100 - TOKENLESS_PRODUCTION)
        / 100u64;
    min_biguint(floor + boost, raw)
}

fn min_biguint<M: ManagedTypeApi>(a: BigUint<M>, b: &BigUint<M>) -> BigUint<M> {
    if a <= *b {
        a
    } else {
        b.clone()
    }
}
