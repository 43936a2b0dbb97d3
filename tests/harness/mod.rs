#![allow(dead_code)]

use std::cell::{Cell, RefCell};

use liquidity_gauge::errors::GaugeError;
use liquidity_gauge::ledger::{
    proportional_point_rate, BoostOracle, ClaimSettlement, EpochRateSchedule, GaugeEnv,
    InflationSchedule, Ledger, LedgerStore, RewardFunding, WeightOracle,
};
use liquidity_gauge::types::{ClaimOutcome, GaugeState, RewardStream, UserCheckpoint, UserReward};
use multiversx_sc::types::{BigUint, ManagedAddress, TokenIdentifier};
use multiversx_sc_scenario::api::StaticApi;

pub use liquidity_gauge::ledger::epoch::WEEK;

pub type Big = BigUint<StaticApi>;
pub type Address = ManagedAddress<StaticApi>;
pub type Token = TokenIdentifier<StaticApi>;

pub fn address(id: u8) -> Address {
    let mut bytes = [0u8; 32];
    bytes[0] = 0xaa;
    bytes[31] = id;
    ManagedAddress::new_from_bytes(&bytes)
}

pub fn token(ticker: &str) -> Token {
    TokenIdentifier::from(ticker)
}

pub fn big(value: u64) -> Big {
    BigUint::from(value)
}

pub fn exp10(power: u32) -> Big {
    let mut value = big(1);
    for _ in 0..power {
        value = value * 10u64;
    }
    value
}

/// `a * 10^power`
pub fn scaled(a: u64, power: u32) -> Big {
    exp10(power) * a
}

/// Passes when `|actual - expected| <= expected * tol_num / tol_den`.
pub fn assert_close(actual: &Big, expected: &Big, tol_num: u64, tol_den: u64) {
    let diff = if actual > expected {
        actual - expected
    } else {
        expected - actual
    };
    assert!(
        diff * tol_den <= expected * tol_num,
        "{actual:?} is not within {tol_num}/{tol_den} of {expected:?}"
    );
}

// ============================================================
// In-memory ledger records
// ============================================================

#[derive(Clone, PartialEq)]
pub struct MemoryStore {
    pub admin: Address,
    pub gauge: GaugeState<StaticApi>,
    pub users: Vec<(Address, UserCheckpoint<StaticApi>)>,
    pub tokens: Vec<Token>,
    pub streams: Vec<RewardStream<StaticApi>>,
    pub rewards: Vec<(Address, Token, UserReward<StaticApi>)>,
    pub approvals: Vec<(Address, Address)>,
}

impl MemoryStore {
    pub fn new(admin: Address, gauge: GaugeState<StaticApi>) -> Self {
        MemoryStore {
            admin,
            gauge,
            users: Vec::new(),
            tokens: Vec::new(),
            streams: Vec::new(),
            rewards: Vec::new(),
            approvals: Vec::new(),
        }
    }

    pub fn sum_raw(&self) -> Big {
        self.users
            .iter()
            .fold(big(0), |acc, (_, user)| acc + &user.raw_balance)
    }

    pub fn sum_working(&self) -> Big {
        self.users
            .iter()
            .fold(big(0), |acc, (_, user)| acc + &user.working_balance)
    }

    pub fn sum_points(&self) -> Big {
        self.users
            .iter()
            .fold(big(0), |acc, (_, user)| acc + &user.point_fraction)
    }
}

impl LedgerStore<StaticApi> for MemoryStore {
    fn admin(&self) -> Address {
        self.admin.clone()
    }

    fn gauge(&self) -> GaugeState<StaticApi> {
        self.gauge.clone()
    }

    fn save_gauge(&mut self, gauge: &GaugeState<StaticApi>) {
        self.gauge = gauge.clone();
    }

    fn user(&self, account: &Address) -> UserCheckpoint<StaticApi> {
        self.users
            .iter()
            .find(|(address, _)| address == account)
            .map(|(_, user)| user.clone())
            .unwrap_or_default()
    }

    fn save_user(&mut self, account: &Address, user: &UserCheckpoint<StaticApi>) {
        match self.users.iter_mut().find(|(address, _)| address == account) {
            Some((_, stored)) => *stored = user.clone(),
            None => self.users.push((account.clone(), user.clone())),
        }
    }

    fn reward_token_count(&self) -> usize {
        self.tokens.len()
    }

    fn reward_token(&self, index: usize) -> Token {
        self.tokens[index].clone()
    }

    fn has_reward_token(&self, token: &Token) -> bool {
        self.tokens.contains(token)
    }

    fn reward_stream(&self, token: &Token) -> RewardStream<StaticApi> {
        self.streams
            .iter()
            .find(|stream| stream.token == *token)
            .cloned()
            .expect("unknown reward stream")
    }

    fn save_reward_stream(&mut self, stream: &RewardStream<StaticApi>) {
        let stored = self
            .streams
            .iter_mut()
            .find(|stored| stored.token == stream.token)
            .expect("unknown reward stream");
        *stored = stream.clone();
    }

    fn register_reward_token(&mut self, stream: &RewardStream<StaticApi>) {
        self.tokens.push(stream.token.clone());
        self.streams.push(stream.clone());
    }

    fn user_reward(&self, account: &Address, token: &Token) -> UserReward<StaticApi> {
        self.rewards
            .iter()
            .find(|(address, id, _)| address == account && id == token)
            .map(|(_, _, reward)| reward.clone())
            .unwrap_or_default()
    }

    fn save_user_reward(&mut self, account: &Address, token: &Token, reward: &UserReward<StaticApi>) {
        match self
            .rewards
            .iter_mut()
            .find(|(address, id, _)| address == account && id == token)
        {
            Some((_, _, stored)) => *stored = reward.clone(),
            None => self
                .rewards
                .push((account.clone(), token.clone(), reward.clone())),
        }
    }

    fn is_claim_approved(&self, account: &Address, helper: &Address) -> bool {
        self.approvals
            .iter()
            .any(|(owner, approved)| owner == account && approved == helper)
    }

    fn set_claim_approval(&mut self, account: &Address, helper: &Address, approved: bool) {
        self.approvals
            .retain(|(owner, approved)| !(owner == account && approved == helper));
        if approved {
            self.approvals.push((account.clone(), helper.clone()));
        }
    }
}

// ============================================================
// Collaborator fakes
// ============================================================

pub struct FakeEnv {
    pub now: Cell<u64>,
    pub weight: RefCell<Big>,
    pub inflation: RefCell<Big>,
    pub voting_powers: RefCell<Vec<(Address, Big)>>,
    pub total_voting_power: RefCell<Big>,
    pub balances: RefCell<Vec<(Token, Big)>>,
    pub weight_queries: RefCell<Vec<u64>>,
    /// Fixed point rate per epoch; the proportional schedule applies when absent.
    pub point_rates: RefCell<Vec<(u64, Big)>>,
}

impl FakeEnv {
    pub fn new(now: u64) -> Self {
        FakeEnv {
            now: Cell::new(now),
            weight: RefCell::new(exp10(18)),
            inflation: RefCell::new(big(0)),
            voting_powers: RefCell::new(Vec::new()),
            total_voting_power: RefCell::new(big(0)),
            balances: RefCell::new(Vec::new()),
            weight_queries: RefCell::new(Vec::new()),
            point_rates: RefCell::new(Vec::new()),
        }
    }

    pub fn sleep(&self, seconds: u64) {
        self.now.set(self.now.get() + seconds);
    }

    pub fn set_voting_power(&self, account: &Address, power: Big) {
        let mut powers = self.voting_powers.borrow_mut();
        powers.retain(|(address, _)| address != account);
        powers.push((account.clone(), power));
    }

    pub fn set_total_voting_power(&self, power: Big) {
        *self.total_voting_power.borrow_mut() = power;
    }

    pub fn balance(&self, token: &Token) -> Big {
        self.balances
            .borrow()
            .iter()
            .find(|(id, _)| id == token)
            .map(|(_, amount)| amount.clone())
            .unwrap_or_else(|| big(0))
    }

    /// Sends `amount` of `token` to the gauge.
    pub fn fund(&self, token: &Token, amount: Big) {
        let updated = self.balance(token) + amount;
        let mut balances = self.balances.borrow_mut();
        balances.retain(|(id, _)| id != token);
        balances.push((token.clone(), updated));
    }

    /// Sends `amount` of `token` out of the gauge.
    pub fn pay_out(&self, token: &Token, amount: &Big) {
        let updated = self.balance(token) - amount;
        let mut balances = self.balances.borrow_mut();
        balances.retain(|(id, _)| id != token);
        balances.push((token.clone(), updated));
    }
}

impl WeightOracle<StaticApi> for FakeEnv {
    fn relative_weight(&self, timestamp: u64) -> Big {
        self.weight_queries.borrow_mut().push(timestamp);
        self.weight.borrow().clone()
    }
}

impl InflationSchedule<StaticApi> for FakeEnv {
    fn inflation_rate(&self, _timestamp: u64) -> Big {
        self.inflation.borrow().clone()
    }
}

impl BoostOracle<StaticApi> for FakeEnv {
    fn voting_power(&self, account: &Address, _timestamp: u64) -> Big {
        self.voting_powers
            .borrow()
            .iter()
            .find(|(address, _)| address == account)
            .map(|(_, power)| power.clone())
            .unwrap_or_else(|| big(0))
    }

    fn total_voting_power(&self, _timestamp: u64) -> Big {
        self.total_voting_power.borrow().clone()
    }
}

impl EpochRateSchedule<StaticApi> for FakeEnv {
    fn rate_for_epoch(&self, epoch: u64, total_deposited: &Big, proportion: &Big) -> Big {
        self.point_rates
            .borrow()
            .iter()
            .find(|(scheduled, _)| *scheduled == epoch)
            .map(|(_, rate)| rate.clone())
            .unwrap_or_else(|| proportional_point_rate(total_deposited, proportion))
    }
}

impl RewardFunding<StaticApi> for FakeEnv {
    fn observed_balance(&self, token: &Token) -> Big {
        self.balance(token)
    }
}

impl GaugeEnv<StaticApi> for FakeEnv {
    fn block_timestamp(&self) -> u64 {
        self.now.get()
    }
}

#[derive(Default)]
pub struct FakeSettlement {
    pub delivered: Vec<(Address, Big)>,
}

impl FakeSettlement {
    pub fn delivered_to(&self, account: &Address) -> Big {
        self.delivered
            .iter()
            .filter(|(address, _)| address == account)
            .fold(big(0), |acc, (_, amount)| acc + amount)
    }
}

impl ClaimSettlement<StaticApi> for FakeSettlement {
    fn settle(&mut self, account: &Address, amount: &Big) -> bool {
        self.delivered.push((account.clone(), amount.clone()));
        true
    }
}

// ============================================================
// Gauge fixture
// ============================================================

pub struct TestGauge {
    pub store: MemoryStore,
    pub env: FakeEnv,
    pub settlement: FakeSettlement,
}

impl TestGauge {
    /// Gauge deployed at `start` with no point stream.
    pub fn new(start: u64) -> Self {
        Self::with_points(start, big(0), big(0))
    }

    pub fn with_points(start: u64, point_rate: Big, point_proportion: Big) -> Self {
        TestGauge {
            store: MemoryStore::new(
                admin(),
                GaugeState::new(start, point_rate, point_proportion),
            ),
            env: FakeEnv::new(start),
            settlement: FakeSettlement::default(),
        }
    }

    pub fn ledger(&mut self) -> Ledger<'_, StaticApi, MemoryStore, FakeEnv> {
        Ledger::new(&mut self.store, &self.env)
    }

    pub fn user(&self, account: &Address) -> UserCheckpoint<StaticApi> {
        self.store.user(account)
    }

    pub fn user_reward(&self, account: &Address, token: &Token) -> UserReward<StaticApi> {
        self.store.user_reward(account, token)
    }

    pub fn deposit(&mut self, account: &Address, amount: Big) {
        self.ledger()
            .deposit(account, &amount)
            .expect("deposit failed");
    }

    pub fn withdraw(&mut self, account: &Address, amount: Big) {
        self.ledger()
            .withdraw(account, &amount)
            .expect("withdraw failed");
    }

    pub fn checkpoint(&mut self, account: &Address) {
        self.ledger().user_checkpoint(account, account);
    }

    pub fn add_reward_token(&mut self, token: &Token, rate: Big) {
        let admin = admin();
        self.ledger()
            .add_reward_token(&admin, token, &rate)
            .expect("add reward token failed");
    }

    /// Claims and moves the paid reward tokens out of the gauge balance.
    pub fn claim(
        &mut self,
        caller: &Address,
        account: &Address,
        receiver: Option<Address>,
    ) -> Result<ClaimOutcome<StaticApi>, GaugeError> {
        let outcome = {
            let mut ledger = Ledger::new(&mut self.store, &self.env);
            ledger.claim_rewards(caller, account, receiver, &mut self.settlement)?
        };
        for payment in outcome.rewards.iter() {
            self.env.pay_out(&payment.token_identifier, &payment.amount);
        }
        Ok(outcome)
    }

    /// Amount of `token` paid in `outcome`.
    pub fn paid(outcome: &ClaimOutcome<StaticApi>, token: &Token) -> Big {
        outcome
            .rewards
            .iter()
            .filter(|payment| payment.token_identifier == *token)
            .fold(big(0), |acc, payment| acc + &payment.amount)
    }

    pub fn assert_conservation(&self) {
        assert_eq!(self.store.gauge.total_deposited, self.store.sum_raw());
        assert_eq!(self.store.gauge.total_working, self.store.sum_working());
        assert_eq!(self.store.gauge.point.total_points, self.store.sum_points());
    }
}

pub fn admin() -> Address {
    address(0xad)
}
