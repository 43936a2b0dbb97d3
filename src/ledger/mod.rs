//! Checkpoint-based accounting for one gauge.
//!
//! The ledger holds no chain state of its own. It reads and writes records
//! through [`LedgerStore`] and pulls weights, voting power, inflation and
//! reward balances from [`GaugeEnv`], so the same code runs against contract
//! storage and against in-memory fakes.

pub mod boost;
pub mod emission;
pub mod epoch;
pub mod rewards;

use core::marker::PhantomData;

use multiversx_sc::{
    api::ManagedTypeApi,
    types::{BigUint, EsdtTokenPayment, ManagedAddress, ManagedVec, TokenIdentifier},
};

use crate::errors::GaugeError;
use crate::types::{ClaimOutcome, GaugeState, RewardStream, UserCheckpoint, UserReward};

/// Fixed-point scale of every integral and fraction.
pub const PRECISION: u64 = 1_000_000_000_000_000_000;

// ============================================================
// Collaborators
// ============================================================

pub trait WeightOracle<M: ManagedTypeApi> {
    /// Gauge share of the global emission at `timestamp`, scaled by `PRECISION`.
    fn relative_weight(&self, timestamp: u64) -> BigUint<M>;
}

pub trait InflationSchedule<M: ManagedTypeApi> {
    /// Global governance emission per second at `timestamp`.
    fn inflation_rate(&self, timestamp: u64) -> BigUint<M>;
}

pub trait BoostOracle<M: ManagedTypeApi> {
    fn voting_power(&self, account: &ManagedAddress<M>, timestamp: u64) -> BigUint<M>;

    fn total_voting_power(&self, timestamp: u64) -> BigUint<M>;
}

pub trait EpochRateSchedule<M: ManagedTypeApi> {
    /// Point rate for `epoch`, scaled by `PRECISION`, given the gauge deposits
    /// and point proportion at the time the epoch is first crossed.
    fn rate_for_epoch(
        &self,
        epoch: u64,
        total_deposited: &BigUint<M>,
        proportion: &BigUint<M>,
    ) -> BigUint<M>;
}

pub trait RewardFunding<M: ManagedTypeApi> {
    /// Balance of `token` currently held by the gauge.
    fn observed_balance(&self, token: &TokenIdentifier<M>) -> BigUint<M>;
}

pub trait GaugeEnv<M: ManagedTypeApi>:
    WeightOracle<M> + InflationSchedule<M> + BoostOracle<M> + EpochRateSchedule<M> + RewardFunding<M>
{
    fn block_timestamp(&self) -> u64;
}

pub trait ClaimSettlement<M: ManagedTypeApi> {
    /// Delivers `amount` of governance token to `account`. Returns whether
    /// anything was delivered.
    fn settle(&mut self, account: &ManagedAddress<M>, amount: &BigUint<M>) -> bool;
}

pub trait LedgerStore<M: ManagedTypeApi> {
    fn admin(&self) -> ManagedAddress<M>;

    fn gauge(&self) -> GaugeState<M>;

    fn save_gauge(&mut self, gauge: &GaugeState<M>);

    fn user(&self, account: &ManagedAddress<M>) -> UserCheckpoint<M>;

    fn save_user(&mut self, account: &ManagedAddress<M>, user: &UserCheckpoint<M>);

    fn reward_token_count(&self) -> usize;

    /// Zero-based, in registration order.
    fn reward_token(&self, index: usize) -> TokenIdentifier<M>;

    fn has_reward_token(&self, token: &TokenIdentifier<M>) -> bool;

    fn reward_stream(&self, token: &TokenIdentifier<M>) -> RewardStream<M>;

    fn save_reward_stream(&mut self, stream: &RewardStream<M>);

    /// Appends a token to the registration order and stores its stream.
    fn register_reward_token(&mut self, stream: &RewardStream<M>);

    fn user_reward(&self, account: &ManagedAddress<M>, token: &TokenIdentifier<M>) -> UserReward<M>;

    fn save_user_reward(
        &mut self,
        account: &ManagedAddress<M>,
        token: &TokenIdentifier<M>,
        reward: &UserReward<M>,
    );

    fn is_claim_approved(&self, account: &ManagedAddress<M>, helper: &ManagedAddress<M>) -> bool;

    fn set_claim_approval(
        &mut self,
        account: &ManagedAddress<M>,
        helper: &ManagedAddress<M>,
        approved: bool,
    );
}

/// Point rate after the deploy epoch: a fixed proportion of the deposits is
/// streamed as points over each week.
pub fn proportional_point_rate<M: ManagedTypeApi>(
    total_deposited: &BigUint<M>,
    proportion: &BigUint<M>,
) -> BigUint<M> {
    total_deposited * proportion / epoch::WEEK
}

// ============================================================
// Ledger
// ============================================================

pub struct Ledger<'a, M, S, E>
where
    M: ManagedTypeApi,
    S: LedgerStore<M> + ?Sized,
    E: GaugeEnv<M> + ?Sized,
{
    store: &'a mut S,
    env: &'a E,
    _api: PhantomData<M>,
}

impl<'a, M, S, E> Ledger<'a, M, S, E>
where
    M: ManagedTypeApi,
    S: LedgerStore<M> + ?Sized,
    E: GaugeEnv<M> + ?Sized,
{
    pub fn new(store: &'a mut S, env: &'a E) -> Self {
        Ledger {
            store,
            env,
            _api: PhantomData,
        }
    }

    // ── Balance mutations ──

    pub fn deposit(&mut self, account: &ManagedAddress<M>, amount: &BigUint<M>) -> Result<(), GaugeError> {
        if *amount == 0u64 {
            return Err(GaugeError::ZeroAmount);
        }

        let now = self.env.block_timestamp();
        let mut gauge = self.advanced_gauge(now);
        let mut user = self.checkpoint_account(&mut gauge, account, now);

        user.raw_balance += amount;
        gauge.total_deposited += amount;
        self.update_liquidity_limit(&mut gauge, &mut user, account, now);

        self.store.save_user(account, &user);
        self.store.save_gauge(&gauge);
        Ok(())
    }

    pub fn withdraw(&mut self, account: &ManagedAddress<M>, amount: &BigUint<M>) -> Result<(), GaugeError> {
        if *amount == 0u64 {
            return Err(GaugeError::ZeroAmount);
        }
        if self.store.user(account).raw_balance < *amount {
            return Err(GaugeError::InsufficientBalance);
        }

        let now = self.env.block_timestamp();
        let mut gauge = self.advanced_gauge(now);
        let mut user = self.checkpoint_account(&mut gauge, account, now);

        let burned = user.burn_points(amount);
        gauge.point.total_points -= &burned;
        user.raw_balance -= amount;
        gauge.total_deposited -= amount;
        self.update_liquidity_limit(&mut gauge, &mut user, account, now);

        self.store.save_user(account, &user);
        self.store.save_gauge(&gauge);
        Ok(())
    }

    /// Moves raw balance between accounts. The sender's points are burned pro
    /// rata; the receiver gains stake but no points.
    pub fn transfer(
        &mut self,
        from: &ManagedAddress<M>,
        to: &ManagedAddress<M>,
        amount: &BigUint<M>,
    ) -> Result<(), GaugeError> {
        if *amount == 0u64 {
            return Err(GaugeError::ZeroAmount);
        }
        if self.store.user(from).raw_balance < *amount {
            return Err(GaugeError::InsufficientBalance);
        }

        let now = self.env.block_timestamp();
        let mut gauge = self.advanced_gauge(now);
        let mut sender = self.checkpoint_account(&mut gauge, from, now);
        if from == to {
            self.store.save_user(from, &sender);
            self.store.save_gauge(&gauge);
            return Ok(());
        }
        let mut receiver = self.checkpoint_account(&mut gauge, to, now);

        let burned = sender.burn_points(amount);
        gauge.point.total_points -= &burned;
        sender.raw_balance -= amount;
        receiver.raw_balance += amount;
        self.update_liquidity_limit(&mut gauge, &mut sender, from, now);
        self.update_liquidity_limit(&mut gauge, &mut receiver, to, now);

        self.store.save_user(from, &sender);
        self.store.save_user(to, &receiver);
        self.store.save_gauge(&gauge);
        Ok(())
    }

    /// Brings every stream and `account` up to now. Only the account itself
    /// gets its working balance recomputed; everyone else has to `kick`.
    pub fn user_checkpoint(&mut self, caller: &ManagedAddress<M>, account: &ManagedAddress<M>) {
        let now = self.env.block_timestamp();
        let mut gauge = self.advanced_gauge(now);
        let mut user = self.checkpoint_account(&mut gauge, account, now);
        if caller == account {
            self.update_liquidity_limit(&mut gauge, &mut user, account, now);
        }
        self.store.save_user(account, &user);
        self.store.save_gauge(&gauge);
    }

    /// Re-syncs the working balance of an account whose voting power decayed
    /// to zero while its boost was still counted.
    pub fn kick(&mut self, account: &ManagedAddress<M>) -> Result<(), GaugeError> {
        let now = self.env.block_timestamp();
        if self.env.voting_power(account, now) != 0u64 {
            return Err(GaugeError::KickNotAllowed);
        }
        if self.store.user(account).voting_power_used == 0u64 {
            return Err(GaugeError::KickNotNeeded);
        }

        let mut gauge = self.advanced_gauge(now);
        let mut user = self.checkpoint_account(&mut gauge, account, now);
        self.update_liquidity_limit(&mut gauge, &mut user, account, now);

        self.store.save_user(account, &user);
        self.store.save_gauge(&gauge);
        Ok(())
    }

    // ── Claims ──

    /// Pays out every reward token accrued by `account` and settles its
    /// emission. Rewards go to `receiver` (the account itself when absent);
    /// only the account may redirect them. Emission always goes to the
    /// account and is settled for a third-party caller only if the account
    /// approved it, otherwise it is silently skipped.
    pub fn claim_rewards<C>(
        &mut self,
        caller: &ManagedAddress<M>,
        account: &ManagedAddress<M>,
        receiver: Option<ManagedAddress<M>>,
        settlement: &mut C,
    ) -> Result<ClaimOutcome<M>, GaugeError>
    where
        C: ClaimSettlement<M> + ?Sized,
    {
        let receiver = match receiver {
            Some(receiver) if receiver != *account => {
                if caller != account {
                    return Err(GaugeError::RedirectNotAllowedForOthers);
                }
                receiver
            },
            _ => account.clone(),
        };

        let now = self.env.block_timestamp();
        let mut gauge = self.advanced_gauge(now);
        let mut user = self.checkpoint_account(&mut gauge, account, now);
        if caller == account {
            self.update_liquidity_limit(&mut gauge, &mut user, account, now);
        }

        let mut rewards = ManagedVec::new();
        for index in 0..self.store.reward_token_count() {
            let token = self.store.reward_token(index);
            let mut reward = self.store.user_reward(account, &token);
            if reward.claimable_accrued == 0u64 {
                continue;
            }
            let amount = reward.take_claimable();
            let mut stream = self.store.reward_stream(&token);
            stream.record_payout(&amount);
            self.store.save_reward_stream(&stream);
            self.store.save_user_reward(account, &token, &reward);
            rewards.push(EsdtTokenPayment::new(token, 0, amount));
        }

        let mut emission = BigUint::zero();
        if caller == account || self.store.is_claim_approved(account, caller) {
            let owed = user.claimable_emission();
            if owed > 0u64 && settlement.settle(account, &owed) {
                user.minted += &owed;
                emission = owed;
            }
        }

        self.store.save_user(account, &user);
        self.store.save_gauge(&gauge);
        Ok(ClaimOutcome {
            receiver,
            rewards,
            emission,
        })
    }

    /// Flips whether `helper` may settle emission on behalf of `account` on
    /// this gauge only; a helper sweeping several gauges needs an approval on
    /// each of them. Returns the new state.
    pub fn toggle_claim_approval(&mut self, account: &ManagedAddress<M>, helper: &ManagedAddress<M>) -> bool {
        let approved = !self.store.is_claim_approved(account, helper);
        self.store.set_claim_approval(account, helper, approved);
        approved
    }

    // ── Previews ──

    pub fn claimable_reward(
        &self,
        account: &ManagedAddress<M>,
        token: &TokenIdentifier<M>,
    ) -> Result<BigUint<M>, GaugeError> {
        if !self.store.has_reward_token(token) {
            return Err(GaugeError::UnknownRewardToken);
        }
        let now = self.env.block_timestamp();
        let gauge = self.store.gauge();
        let user = self.store.user(account);

        let mut stream = self.store.reward_stream(token);
        stream.advance(now, &gauge.total_working, &self.env.observed_balance(token));
        let mut reward = self.store.user_reward(account, token);
        reward.accrue(&user.working_balance, &stream.integral);
        Ok(reward.claimable_accrued)
    }

    pub fn claimable_emission(&self, account: &ManagedAddress<M>) -> BigUint<M> {
        let now = self.env.block_timestamp();
        let gauge = self.advanced_gauge(now);
        let mut user = self.store.user(account);
        user.sync_emission(&gauge.emission);
        user.claimable_emission()
    }

    /// Raw balance plus the points credited at the account's last checkpoint.
    /// Reads stored state only, so the balances of all accounts always sum to
    /// `point_total_supply`.
    pub fn point_balance_of(&self, account: &ManagedAddress<M>) -> BigUint<M> {
        self.store.user(account).point_balance()
    }

    pub fn point_total_supply(&self) -> BigUint<M> {
        let gauge = self.store.gauge();
        &gauge.total_deposited + &gauge.point.total_points
    }

    // ── Administration ──

    pub fn add_reward_token(
        &mut self,
        caller: &ManagedAddress<M>,
        token: &TokenIdentifier<M>,
        rate: &BigUint<M>,
    ) -> Result<(), GaugeError> {
        self.require_admin(caller)?;
        if self.store.has_reward_token(token) {
            return Err(GaugeError::DuplicateRewardToken);
        }
        if self.store.reward_token_count() >= rewards::MAX_REWARD_TOKENS {
            return Err(GaugeError::TooManyRewardTokens);
        }

        let now = self.env.block_timestamp();
        let observed = self.env.observed_balance(token);
        let stream = RewardStream::new(token.clone(), rate.clone(), now, observed);
        self.store.register_reward_token(&stream);
        Ok(())
    }

    /// Streams the old rate up to now before switching to the new one.
    pub fn set_reward_rate(
        &mut self,
        caller: &ManagedAddress<M>,
        token: &TokenIdentifier<M>,
        rate: &BigUint<M>,
    ) -> Result<(), GaugeError> {
        self.require_admin(caller)?;
        if !self.store.has_reward_token(token) {
            return Err(GaugeError::UnknownRewardToken);
        }

        let now = self.env.block_timestamp();
        let total_working = self.store.gauge().total_working;
        let mut stream = self.store.reward_stream(token);
        stream.advance(now, &total_working, &self.env.observed_balance(token));
        stream.rate = rate.clone();
        self.store.save_reward_stream(&stream);
        Ok(())
    }

    /// Takes effect from the next epoch whose point rate has not been read yet.
    pub fn set_point_proportion(
        &mut self,
        caller: &ManagedAddress<M>,
        proportion: &BigUint<M>,
    ) -> Result<(), GaugeError> {
        self.require_admin(caller)?;
        if *proportion > PRECISION {
            return Err(GaugeError::ProportionOutOfRange);
        }

        let now = self.env.block_timestamp();
        let mut gauge = self.advanced_gauge(now);
        gauge.point.proportion = proportion.clone();
        self.store.save_gauge(&gauge);
        Ok(())
    }

    // ── Internals ──

    fn require_admin(&self, caller: &ManagedAddress<M>) -> Result<(), GaugeError> {
        if *caller != self.store.admin() {
            return Err(GaugeError::AdminOnly);
        }
        Ok(())
    }

    /// Gauge record with the emission and point integrals advanced to `now`.
    fn advanced_gauge(&self, now: u64) -> GaugeState<M> {
        let mut gauge = self.store.gauge();
        gauge.emission.advance(now, &gauge.total_working, self.env);
        gauge
            .point
            .advance(now, &gauge.total_deposited, &gauge.total_working, self.env);
        gauge
    }

    /// Credits `account` with everything accrued by its current working
    /// balance and advances every reward stream to `now`.
    fn checkpoint_account(
        &mut self,
        gauge: &mut GaugeState<M>,
        account: &ManagedAddress<M>,
        now: u64,
    ) -> UserCheckpoint<M> {
        let mut user = self.store.user(account);
        let earned_points = user.sync_points(&gauge.point);
        gauge.point.total_points += &earned_points;
        user.sync_emission(&gauge.emission);

        for index in 0..self.store.reward_token_count() {
            let token = self.store.reward_token(index);
            let mut stream = self.store.reward_stream(&token);
            stream.advance(now, &gauge.total_working, &self.env.observed_balance(&token));
            self.store.save_reward_stream(&stream);

            let mut reward = self.store.user_reward(account, &token);
            reward.accrue(&user.working_balance, &stream.integral);
            self.store.save_user_reward(account, &token, &reward);
        }
        user
    }

    /// Recomputes the boosted stake of `account` from its current raw balance
    /// and voting power, keeping `total_working` in step.
    fn update_liquidity_limit(
        &self,
        gauge: &mut GaugeState<M>,
        user: &mut UserCheckpoint<M>,
        account: &ManagedAddress<M>,
        now: u64,
    ) {
        let voting_power = self.env.voting_power(account, now);
        let total_voting_power = self.env.total_voting_power(now);
        let working = boost::working_balance(
            &user.raw_balance,
            &gauge.total_deposited,
            &voting_power,
            &total_voting_power,
        );

        gauge.total_working += &working;
        gauge.total_working -= &user.working_balance;
        user.working_balance = working;
        user.voting_power_used = voting_power;
        user.working_balance_timestamp = now;
    }
}
