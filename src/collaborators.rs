multiversx_sc::imports!();

use crate::gauge_controller_proxy::GaugeControllerProxy;
use crate::ledger::{
    proportional_point_rate, BoostOracle, ClaimSettlement, EpochRateSchedule, GaugeEnv,
    InflationSchedule, RewardFunding, WeightOracle,
};
use crate::reward_policy_proxy::RewardPolicyProxy;
use crate::voting_escrow_proxy::VotingEscrowProxy;
use crate::LiquidityGauge;

/// Chain view of the gauge: block time, own token balances, and read-only
/// queries to the gauge controller, voting escrow and reward policy.
pub struct ChainEnv<'a, Sc: ?Sized> {
    sc: &'a Sc,
}

impl<'a, Sc: ?Sized> ChainEnv<'a, Sc> {
    pub fn new(sc: &'a Sc) -> Self {
        ChainEnv { sc }
    }
}

impl<'a, Sc> WeightOracle<Sc::Api> for ChainEnv<'a, Sc>
where
    Sc: LiquidityGauge + ?Sized,
{
    fn relative_weight(&self, timestamp: u64) -> BigUint<Sc::Api> {
        let controller = self.sc.gauge_controller().get();
        self.sc
            .tx()
            .to(&controller)
            .typed(GaugeControllerProxy)
            .gauge_relative_weight(self.sc.blockchain().get_sc_address(), timestamp)
            .returns(ReturnsResult)
            .sync_call_readonly()
    }
}

impl<'a, Sc> InflationSchedule<Sc::Api> for ChainEnv<'a, Sc>
where
    Sc: LiquidityGauge + ?Sized,
{
    fn inflation_rate(&self, timestamp: u64) -> BigUint<Sc::Api> {
        let policy = self.sc.reward_policy().get();
        self.sc
            .tx()
            .to(&policy)
            .typed(RewardPolicyProxy)
            .rate_at(timestamp)
            .returns(ReturnsResult)
            .sync_call_readonly()
    }
}

impl<'a, Sc> BoostOracle<Sc::Api> for ChainEnv<'a, Sc>
where
    Sc: LiquidityGauge + ?Sized,
{
    fn voting_power(&self, account: &ManagedAddress<Sc::Api>, timestamp: u64) -> BigUint<Sc::Api> {
        let escrow = self.sc.voting_escrow().get();
        self.sc
            .tx()
            .to(&escrow)
            .typed(VotingEscrowProxy)
            .voting_power_at(account.clone(), timestamp)
            .returns(ReturnsResult)
            .sync_call_readonly()
    }

    fn total_voting_power(&self, timestamp: u64) -> BigUint<Sc::Api> {
        let escrow = self.sc.voting_escrow().get();
        self.sc
            .tx()
            .to(&escrow)
            .typed(VotingEscrowProxy)
            .total_voting_power_at(timestamp)
            .returns(ReturnsResult)
            .sync_call_readonly()
    }
}

impl<'a, Sc> EpochRateSchedule<Sc::Api> for ChainEnv<'a, Sc>
where
    Sc: LiquidityGauge + ?Sized,
{
    fn rate_for_epoch(
        &self,
        _epoch: u64,
        total_deposited: &BigUint<Sc::Api>,
        proportion: &BigUint<Sc::Api>,
    ) -> BigUint<Sc::Api> {
        proportional_point_rate(total_deposited, proportion)
    }
}

impl<'a, Sc> RewardFunding<Sc::Api> for ChainEnv<'a, Sc>
where
    Sc: LiquidityGauge + ?Sized,
{
    fn observed_balance(&self, token: &TokenIdentifier<Sc::Api>) -> BigUint<Sc::Api> {
        self.sc
            .blockchain()
            .get_sc_balance(&EgldOrEsdtTokenIdentifier::esdt(token.clone()), 0)
    }
}

impl<'a, Sc> GaugeEnv<Sc::Api> for ChainEnv<'a, Sc>
where
    Sc: LiquidityGauge + ?Sized,
{
    fn block_timestamp(&self) -> u64 {
        self.sc.blockchain().get_block_timestamp()
    }
}

/// Mints the governance token through the gauge's local-mint role and sends
/// it to the account.
pub struct MintSettlement<'a, Sc: ?Sized> {
    sc: &'a Sc,
}

impl<'a, Sc: ?Sized> MintSettlement<'a, Sc> {
    pub fn new(sc: &'a Sc) -> Self {
        MintSettlement { sc }
    }
}

impl<'a, Sc> ClaimSettlement<Sc::Api> for MintSettlement<'a, Sc>
where
    Sc: LiquidityGauge + ?Sized,
{
    fn settle(&mut self, account: &ManagedAddress<Sc::Api>, amount: &BigUint<Sc::Api>) -> bool {
        if *amount == 0u64 {
            return false;
        }
        let token = self.sc.governance_token().get();
        self.sc.send().esdt_local_mint(&token, 0, amount);
        self.sc.send().direct_esdt(account, &token, 0, amount);
        true
    }
}
