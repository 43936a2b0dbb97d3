use multiversx_sc::{api::ManagedTypeApi, types::BigUint};

use super::{epoch, EpochRateSchedule, InflationSchedule, WeightOracle, PRECISION};
use crate::types::{EmissionStream, PointStream, UserCheckpoint};

/// Share of an integral advance owed to `balance`, truncated.
pub fn share_of<M: ManagedTypeApi>(
    balance: &BigUint<M>,
    integral: &BigUint<M>,
    snapshot: &BigUint<M>,
) -> BigUint<M> {
    if integral <= snapshot || *balance == 0u64 {
        return BigUint::zero();
    }
    let delta = integral - snapshot;
    balance * &delta / PRECISION
}

impl<M: ManagedTypeApi> EmissionStream<M> {
    /// Integrates the governance emission up to `now`, one week slice at a
    /// time. Each slice uses the inflation rate at its start and the gauge
    /// weight sampled at the start of its week.
    pub fn advance<O>(&mut self, now: u64, total_working: &BigUint<M>, oracle: &O)
    where
        O: WeightOracle<M> + InflationSchedule<M> + ?Sized,
    {
        if now <= self.integral_timestamp {
            return;
        }
        if *total_working > 0u64 {
            for slice in epoch::slices(self.integral_timestamp, now) {
                let weight = oracle.relative_weight(slice.week_start());
                let rate = oracle.inflation_rate(slice.start);
                self.integral += rate * weight * slice.duration() / total_working;
            }
        }
        self.integral_timestamp = now;
    }
}

impl<M: ManagedTypeApi> PointStream<M> {
    /// Integrates the point stream up to `now`. The cached rate is scaled by
    /// `PRECISION` and refreshed the first time a slice lands in a new epoch.
    pub fn advance<R>(
        &mut self,
        now: u64,
        total_deposited: &BigUint<M>,
        total_working: &BigUint<M>,
        schedule: &R,
    ) where
        R: EpochRateSchedule<M> + ?Sized,
    {
        if now <= self.integral_timestamp {
            return;
        }
        for slice in epoch::slices(self.integral_timestamp, now) {
            let current_epoch = slice.epoch();
            if current_epoch != self.rate_epoch {
                self.rate_cache =
                    schedule.rate_for_epoch(current_epoch, total_deposited, &self.proportion);
                self.rate_epoch = current_epoch;
            }
            if *total_working > 0u64 {
                self.integral += &self.rate_cache * slice.duration() / total_working;
            }
        }
        self.integral_timestamp = now;
    }
}

impl<M: ManagedTypeApi> UserCheckpoint<M> {
    /// Credits the emission accrued by the current working balance.
    pub fn sync_emission(&mut self, stream: &EmissionStream<M>) {
        self.integrate_fraction += share_of(
            &self.working_balance,
            &stream.integral,
            &self.emission_integral_snapshot,
        );
        self.emission_integral_snapshot = stream.integral.clone();
    }

    /// Credits the points accrued by the current working balance and returns
    /// them so the gauge total can follow.
    pub fn sync_points(&mut self, stream: &PointStream<M>) -> BigUint<M> {
        let earned = share_of(
            &self.working_balance,
            &stream.integral,
            &self.point_integral_snapshot,
        );
        self.point_fraction += &earned;
        self.point_integral_snapshot = stream.integral.clone();
        earned
    }

    /// Burns points pro rata to `amount` leaving the raw balance. Must run
    /// before the raw balance is reduced.
    pub fn burn_points(&mut self, amount: &BigUint<M>) -> BigUint<M> {
        if self.raw_balance == 0u64 || self.point_fraction == 0u64 {
            return BigUint::zero();
        }
        let remaining = &self.raw_balance - amount;
        let kept = &self.point_fraction * &remaining / &self.raw_balance;
        let burned = &self.point_fraction - &kept;
        self.point_fraction = kept;
        burned
    }

    pub fn point_balance(&self) -> BigUint<M> {
        &self.raw_balance + &self.point_fraction
    }

    pub fn claimable_emission(&self) -> BigUint<M> {
        if self.integrate_fraction <= self.minted {
            return BigUint::zero();
        }
        &self.integrate_fraction - &self.minted
    }
}
