multiversx_sc::imports!();

use crate::ledger::LedgerStore;
use crate::types::{GaugeState, RewardStream, UserCheckpoint, UserReward};
use crate::LiquidityGauge;

/// Ledger records backed by the contract's storage mappers.
pub struct StorageLedger<'a, Sc: ?Sized> {
    sc: &'a Sc,
}

impl<'a, Sc: ?Sized> StorageLedger<'a, Sc> {
    pub fn new(sc: &'a Sc) -> Self {
        StorageLedger { sc }
    }
}

impl<'a, Sc> LedgerStore<Sc::Api> for StorageLedger<'a, Sc>
where
    Sc: LiquidityGauge + ?Sized,
{
    fn admin(&self) -> ManagedAddress<Sc::Api> {
        self.sc.admin().get()
    }

    fn gauge(&self) -> GaugeState<Sc::Api> {
        self.sc.gauge_state().get()
    }

    fn save_gauge(&mut self, gauge: &GaugeState<Sc::Api>) {
        self.sc.gauge_state().set(gauge);
    }

    fn user(&self, account: &ManagedAddress<Sc::Api>) -> UserCheckpoint<Sc::Api> {
        let mapper = self.sc.user_checkpoints(account);
        if mapper.is_empty() {
            UserCheckpoint::default()
        } else {
            mapper.get()
        }
    }

    fn save_user(&mut self, account: &ManagedAddress<Sc::Api>, user: &UserCheckpoint<Sc::Api>) {
        self.sc.user_checkpoints(account).set(user);
    }

    fn reward_token_count(&self) -> usize {
        self.sc.reward_tokens().len()
    }

    fn reward_token(&self, index: usize) -> TokenIdentifier<Sc::Api> {
        // VecMapper is 1-based
        self.sc.reward_tokens().get(index + 1)
    }

    fn has_reward_token(&self, token: &TokenIdentifier<Sc::Api>) -> bool {
        !self.sc.reward_streams(token).is_empty()
    }

    fn reward_stream(&self, token: &TokenIdentifier<Sc::Api>) -> RewardStream<Sc::Api> {
        self.sc.reward_streams(token).get()
    }

    fn save_reward_stream(&mut self, stream: &RewardStream<Sc::Api>) {
        self.sc.reward_streams(&stream.token).set(stream);
    }

    fn register_reward_token(&mut self, stream: &RewardStream<Sc::Api>) {
        self.sc.reward_tokens().push(&stream.token);
        self.sc.reward_streams(&stream.token).set(stream);
    }

    fn user_reward(
        &self,
        account: &ManagedAddress<Sc::Api>,
        token: &TokenIdentifier<Sc::Api>,
    ) -> UserReward<Sc::Api> {
        let mapper = self.sc.user_rewards(account, token);
        if mapper.is_empty() {
            UserReward::default()
        } else {
            mapper.get()
        }
    }

    fn save_user_reward(
        &mut self,
        account: &ManagedAddress<Sc::Api>,
        token: &TokenIdentifier<Sc::Api>,
        reward: &UserReward<Sc::Api>,
    ) {
        self.sc.user_rewards(account, token).set(reward);
    }

    fn is_claim_approved(
        &self,
        account: &ManagedAddress<Sc::Api>,
        helper: &ManagedAddress<Sc::Api>,
    ) -> bool {
        self.sc.claim_approved(account, helper).get()
    }

    fn set_claim_approval(
        &mut self,
        account: &ManagedAddress<Sc::Api>,
        helper: &ManagedAddress<Sc::Api>,
        approved: bool,
    ) {
        if approved {
            self.sc.claim_approved(account, helper).set(true);
        } else {
            self.sc.claim_approved(account, helper).clear();
        }
    }
}
