use multiversx_sc::{api::ManagedTypeApi, types::BigUint};

use super::{emission::share_of, PRECISION};
use crate::types::{RewardStream, UserReward};

pub const MAX_REWARD_TOKENS: usize = 8;

impl<M: ManagedTypeApi> RewardStream<M> {
    /// Any growth of the gauge balance since the last observation is new
    /// funding waiting to be streamed.
    pub fn observe_funding(&mut self, observed: &BigUint<M>) {
        if *observed > self.stored_balance {
            let funded = observed - &self.stored_balance;
            self.unstreamed += &funded;
            self.stored_balance = observed.clone();
        }
    }

    /// Releases `min(rate * elapsed, unstreamed)` into the integral. Nothing
    /// is released while there is no working balance to receive it, so the
    /// funding waits for the next depositor.
    pub fn advance(&mut self, now: u64, total_working: &BigUint<M>, observed: &BigUint<M>) {
        self.observe_funding(observed);
        if now <= self.integral_timestamp {
            return;
        }
        let elapsed = now - self.integral_timestamp;
        self.integral_timestamp = now;
        if *total_working == 0u64 {
            return;
        }

        let due = &self.rate * elapsed;
        let released = if due < self.unstreamed {
            due
        } else {
            self.unstreamed.clone()
        };
        if released == 0u64 {
            return;
        }
        self.integral += &released * PRECISION / total_working;
        self.unstreamed -= &released;
    }

    /// Books a payout leaving the gauge.
    pub fn record_payout(&mut self, amount: &BigUint<M>) {
        if self.stored_balance >= *amount {
            self.stored_balance -= amount;
        } else {
            self.stored_balance = BigUint::zero();
        }
    }
}

impl<M: ManagedTypeApi> UserReward<M> {
    pub fn accrue(&mut self, working_balance: &BigUint<M>, integral: &BigUint<M>) {
        self.claimable_accrued += share_of(working_balance, integral, &self.integral_snapshot);
        self.integral_snapshot = integral.clone();
    }

    /// Moves everything claimable into the claimed total and returns it.
    pub fn take_claimable(&mut self) -> BigUint<M> {
        let amount = core::mem::replace(&mut self.claimable_accrued, BigUint::zero());
        self.claimed_total += &amount;
        amount
    }
}
