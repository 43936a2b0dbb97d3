#![no_std]

multiversx_sc::imports!();

pub mod collaborators;
pub mod errors;
pub mod gauge_controller_proxy;
pub mod ledger;
pub mod reward_policy_proxy;
pub mod storage;
pub mod types;
pub mod voting_escrow_proxy;

use collaborators::{ChainEnv, MintSettlement};
use errors::*;
use ledger::{Ledger, PRECISION};
use storage::StorageLedger;
use types::{GaugeConfig, GaugeState, RewardStream, UserCheckpoint, UserReward};

// ============================================================
// Contract
// ============================================================

/// Liquidity gauge: stakes one LP token and streams governance emission,
/// points and up to eight third-party reward tokens over boosted balances.
#[multiversx_sc::contract]
pub trait LiquidityGauge {
    // ========================================================
    // Init / Upgrade
    // ========================================================

    #[init]
    fn init(
        &self,
        lp_token: TokenIdentifier,
        governance_token: TokenIdentifier,
        admin: ManagedAddress,
        gauge_controller: ManagedAddress,
        voting_escrow: ManagedAddress,
        reward_policy: ManagedAddress,
        point_rate: BigUint,
        point_proportion: BigUint,
    ) {
        require!(lp_token.is_valid_esdt_identifier(), ERR_INVALID_TOKEN);
        require!(governance_token.is_valid_esdt_identifier(), ERR_INVALID_TOKEN);
        require!(!admin.is_zero(), ERR_INVALID_ADDRESS);
        require!(!gauge_controller.is_zero(), ERR_INVALID_ADDRESS);
        require!(!voting_escrow.is_zero(), ERR_INVALID_ADDRESS);
        require!(!reward_policy.is_zero(), ERR_INVALID_ADDRESS);
        require!(point_proportion <= PRECISION, ERR_PROPORTION_OUT_OF_RANGE);

        self.lp_token().set(&lp_token);
        self.governance_token().set(&governance_token);
        self.admin().set(&admin);
        self.gauge_controller().set(&gauge_controller);
        self.voting_escrow().set(&voting_escrow);
        self.reward_policy().set(&reward_policy);

        let now = self.blockchain().get_block_timestamp();
        self.gauge_state()
            .set(GaugeState::new(now, point_rate, point_proportion));
    }

    #[upgrade]
    fn upgrade(&self) {}

    // ========================================================
    // ENDPOINT: deposit
    // Stakes LP tokens for the caller or on behalf of `account`.
    // ========================================================

    #[endpoint(deposit)]
    #[payable("*")]
    fn deposit(&self, opt_account: OptionalValue<ManagedAddress>) {
        let payment = self.call_value().single_esdt();
        require!(
            payment.token_identifier == self.lp_token().get() && payment.token_nonce == 0,
            ERR_WRONG_TOKEN
        );
        let account = match opt_account {
            OptionalValue::Some(account) => account,
            OptionalValue::None => self.blockchain().get_caller(),
        };
        require!(!account.is_zero(), ERR_INVALID_ADDRESS);
        let amount = payment.amount.clone();

        let mut store = StorageLedger::new(self);
        let env = ChainEnv::new(self);
        if let Err(err) = Ledger::new(&mut store, &env).deposit(&account, &amount) {
            sc_panic!(err.message());
        }

        self.deposit_event(&account, &amount);
        self.emit_liquidity_update(&account);
    }

    // ========================================================
    // ENDPOINT: withdraw
    // ========================================================

    #[endpoint(withdraw)]
    fn withdraw(&self, amount: BigUint) {
        let caller = self.blockchain().get_caller();

        let mut store = StorageLedger::new(self);
        let env = ChainEnv::new(self);
        if let Err(err) = Ledger::new(&mut store, &env).withdraw(&caller, &amount) {
            sc_panic!(err.message());
        }

        let lp_token = self.lp_token().get();
        self.send().direct_esdt(&caller, &lp_token, 0, &amount);
        self.withdraw_event(&caller, &amount);
        self.emit_liquidity_update(&caller);
    }

    // ========================================================
    // ENDPOINT: transfer
    // Moves staked balance to another account without unstaking.
    // ========================================================

    #[endpoint(transfer)]
    fn transfer(&self, to: ManagedAddress, amount: BigUint) {
        require!(!to.is_zero(), ERR_INVALID_ADDRESS);
        let caller = self.blockchain().get_caller();

        let mut store = StorageLedger::new(self);
        let env = ChainEnv::new(self);
        if let Err(err) = Ledger::new(&mut store, &env).transfer(&caller, &to, &amount) {
            sc_panic!(err.message());
        }

        self.transfer_event(&caller, &to, &amount);
        self.emit_liquidity_update(&caller);
        self.emit_liquidity_update(&to);
    }

    // ========================================================
    // ENDPOINT: userCheckpoint
    // Anyone may checkpoint anyone; only a self-checkpoint re-syncs the boost.
    // ========================================================

    #[endpoint(userCheckpoint)]
    fn user_checkpoint(&self, account: ManagedAddress) {
        let caller = self.blockchain().get_caller();

        let mut store = StorageLedger::new(self);
        let env = ChainEnv::new(self);
        Ledger::new(&mut store, &env).user_checkpoint(&caller, &account);

        if caller == account {
            self.emit_liquidity_update(&account);
        }
    }

    // ========================================================
    // ENDPOINT: claimRewards
    // ========================================================

    #[endpoint(claimRewards)]
    fn claim_rewards(
        &self,
        opt_account: OptionalValue<ManagedAddress>,
        opt_receiver: OptionalValue<ManagedAddress>,
    ) {
        let caller = self.blockchain().get_caller();
        let account = match opt_account {
            OptionalValue::Some(account) => account,
            OptionalValue::None => caller.clone(),
        };
        let receiver = opt_receiver.into_option().filter(|receiver| !receiver.is_zero());

        let mut store = StorageLedger::new(self);
        let env = ChainEnv::new(self);
        let mut settlement = MintSettlement::new(self);
        let outcome = match Ledger::new(&mut store, &env).claim_rewards(
            &caller,
            &account,
            receiver,
            &mut settlement,
        ) {
            Ok(outcome) => outcome,
            Err(err) => sc_panic!(err.message()),
        };

        if !outcome.rewards.is_empty() {
            self.send().direct_multi(&outcome.receiver, &outcome.rewards);
            for payment in outcome.rewards.iter() {
                self.rewards_claimed_event(
                    &account,
                    &outcome.receiver,
                    &payment.token_identifier,
                    &payment.amount,
                );
            }
        }
        if outcome.emission > 0u64 {
            self.emission_settled_event(&account, &outcome.emission);
        }
    }

    // ========================================================
    // ENDPOINT: kick
    // ========================================================

    #[endpoint(kick)]
    fn kick(&self, account: ManagedAddress) {
        let mut store = StorageLedger::new(self);
        let env = ChainEnv::new(self);
        if let Err(err) = Ledger::new(&mut store, &env).kick(&account) {
            sc_panic!(err.message());
        }

        let working_balance = self.user_checkpoints(&account).get().working_balance;
        self.kick_event(&account, &working_balance);
        self.emit_liquidity_update(&account);
    }

    // ========================================================
    // ENDPOINT: toggleClaimApproval
    // Lets `helper` settle the caller's emission on their behalf. Approval
    // is kept per gauge: a helper sweeping several gauges must be approved
    // on each one.
    // ========================================================

    #[endpoint(toggleClaimApproval)]
    fn toggle_claim_approval(&self, helper: ManagedAddress) -> bool {
        let caller = self.blockchain().get_caller();

        let mut store = StorageLedger::new(self);
        let env = ChainEnv::new(self);
        let approved = Ledger::new(&mut store, &env).toggle_claim_approval(&caller, &helper);

        self.claim_approval_toggled_event(&caller, &helper, approved);
        approved
    }

    // ========================================================
    // ADMIN
    // ========================================================

    #[endpoint(addRewardToken)]
    fn add_reward_token(&self, token: TokenIdentifier, rate: BigUint) {
        require!(token.is_valid_esdt_identifier(), ERR_INVALID_TOKEN);
        require!(token != self.lp_token().get(), ERR_LP_TOKEN_AS_REWARD);
        let caller = self.blockchain().get_caller();

        let mut store = StorageLedger::new(self);
        let env = ChainEnv::new(self);
        if let Err(err) = Ledger::new(&mut store, &env).add_reward_token(&caller, &token, &rate) {
            sc_panic!(err.message());
        }

        self.reward_token_added_event(&token, &rate);
    }

    #[endpoint(setRewardRate)]
    fn set_reward_rate(&self, token: TokenIdentifier, rate: BigUint) {
        let caller = self.blockchain().get_caller();

        let mut store = StorageLedger::new(self);
        let env = ChainEnv::new(self);
        if let Err(err) = Ledger::new(&mut store, &env).set_reward_rate(&caller, &token, &rate) {
            sc_panic!(err.message());
        }

        self.reward_rate_set_event(&token, &rate);
    }

    #[endpoint(setPointProportion)]
    fn set_point_proportion(&self, proportion: BigUint) {
        let caller = self.blockchain().get_caller();

        let mut store = StorageLedger::new(self);
        let env = ChainEnv::new(self);
        if let Err(err) = Ledger::new(&mut store, &env).set_point_proportion(&caller, &proportion) {
            sc_panic!(err.message());
        }

        self.point_proportion_set_event(&proportion);
    }

    // ========================================================
    // INTERNAL
    // ========================================================

    fn emit_liquidity_update(&self, account: &ManagedAddress) {
        let user = self.user_checkpoints(account).get();
        let gauge = self.gauge_state().get();
        self.update_liquidity_limit_event(
            account,
            &user.raw_balance,
            &gauge.total_deposited,
            &user.working_balance,
            &gauge.total_working,
        );
    }

    // ========================================================
    // VIEWS
    // ========================================================

    #[view(getConfig)]
    fn get_config(&self) -> GaugeConfig<Self::Api> {
        GaugeConfig {
            admin: self.admin().get(),
            lp_token: self.lp_token().get(),
            governance_token: self.governance_token().get(),
            gauge_controller: self.gauge_controller().get(),
            voting_escrow: self.voting_escrow().get(),
            reward_policy: self.reward_policy().get(),
            point_proportion: self.gauge_state().get().point.proportion,
        }
    }

    #[view(getGaugeState)]
    fn get_gauge_state(&self) -> GaugeState<Self::Api> {
        self.gauge_state().get()
    }

    #[view(getUserCheckpoint)]
    fn get_user_checkpoint(&self, account: ManagedAddress) -> UserCheckpoint<Self::Api> {
        if self.user_checkpoints(&account).is_empty() {
            UserCheckpoint::default()
        } else {
            self.user_checkpoints(&account).get()
        }
    }

    #[view(getBalance)]
    fn get_balance(&self, account: ManagedAddress) -> BigUint {
        self.get_user_checkpoint(account).raw_balance
    }

    #[view(getTotalDeposited)]
    fn get_total_deposited(&self) -> BigUint {
        self.gauge_state().get().total_deposited
    }

    #[view(getWorkingBalance)]
    fn get_working_balance(&self, account: ManagedAddress) -> BigUint {
        self.get_user_checkpoint(account).working_balance
    }

    #[view(getWorkingSupply)]
    fn get_working_supply(&self) -> BigUint {
        self.gauge_state().get().total_working
    }

    #[view(getPointBalance)]
    fn get_point_balance(&self, account: ManagedAddress) -> BigUint {
        let mut store = StorageLedger::new(self);
        let env = ChainEnv::new(self);
        Ledger::new(&mut store, &env).point_balance_of(&account)
    }

    #[view(getPointTotalSupply)]
    fn get_point_total_supply(&self) -> BigUint {
        let mut store = StorageLedger::new(self);
        let env = ChainEnv::new(self);
        Ledger::new(&mut store, &env).point_total_supply()
    }

    #[view(getClaimableTokens)]
    fn get_claimable_tokens(&self, account: ManagedAddress) -> BigUint {
        let mut store = StorageLedger::new(self);
        let env = ChainEnv::new(self);
        Ledger::new(&mut store, &env).claimable_emission(&account)
    }

    #[view(getClaimableReward)]
    fn get_claimable_reward(&self, account: ManagedAddress, token: TokenIdentifier) -> BigUint {
        let mut store = StorageLedger::new(self);
        let env = ChainEnv::new(self);
        match Ledger::new(&mut store, &env).claimable_reward(&account, &token) {
            Ok(amount) => amount,
            Err(err) => sc_panic!(err.message()),
        }
    }

    #[view(getClaimedReward)]
    fn get_claimed_reward(&self, account: ManagedAddress, token: TokenIdentifier) -> BigUint {
        if self.user_rewards(&account, &token).is_empty() {
            return BigUint::zero();
        }
        self.user_rewards(&account, &token).get().claimed_total
    }

    #[view(getRewardTokens)]
    fn get_reward_tokens(&self) -> MultiValueEncoded<TokenIdentifier> {
        let mut result = MultiValueEncoded::new();
        for token in self.reward_tokens().iter() {
            result.push(token);
        }
        result
    }

    #[view(getRewardTokenLength)]
    fn get_reward_token_length(&self) -> usize {
        self.reward_tokens().len()
    }

    #[view(getRewardData)]
    fn get_reward_data(&self, token: TokenIdentifier) -> OptionalValue<RewardStream<Self::Api>> {
        if self.reward_streams(&token).is_empty() {
            OptionalValue::None
        } else {
            OptionalValue::Some(self.reward_streams(&token).get())
        }
    }

    #[view(isClaimApproved)]
    fn is_claim_approved(&self, account: ManagedAddress, helper: ManagedAddress) -> bool {
        self.claim_approved(&account, &helper).get()
    }

    // ========================================================
    // EVENTS
    // ========================================================

    #[event("deposit")]
    fn deposit_event(&self, #[indexed] account: &ManagedAddress, amount: &BigUint);

    #[event("withdraw")]
    fn withdraw_event(&self, #[indexed] account: &ManagedAddress, amount: &BigUint);

    #[event("transfer")]
    fn transfer_event(
        &self,
        #[indexed] from: &ManagedAddress,
        #[indexed] to: &ManagedAddress,
        amount: &BigUint,
    );

    #[event("updateLiquidityLimit")]
    fn update_liquidity_limit_event(
        &self,
        #[indexed] account: &ManagedAddress,
        #[indexed] raw_balance: &BigUint,
        #[indexed] total_deposited: &BigUint,
        #[indexed] working_balance: &BigUint,
        total_working: &BigUint,
    );

    #[event("rewardTokenAdded")]
    fn reward_token_added_event(&self, #[indexed] token: &TokenIdentifier, rate: &BigUint);

    #[event("rewardRateSet")]
    fn reward_rate_set_event(&self, #[indexed] token: &TokenIdentifier, rate: &BigUint);

    #[event("pointProportionSet")]
    fn point_proportion_set_event(&self, proportion: &BigUint);

    #[event("rewardsClaimed")]
    fn rewards_claimed_event(
        &self,
        #[indexed] account: &ManagedAddress,
        #[indexed] receiver: &ManagedAddress,
        #[indexed] token: &TokenIdentifier,
        amount: &BigUint,
    );

    #[event("emissionSettled")]
    fn emission_settled_event(&self, #[indexed] account: &ManagedAddress, amount: &BigUint);

    #[event("kick")]
    fn kick_event(&self, #[indexed] account: &ManagedAddress, working_balance: &BigUint);

    #[event("claimApprovalToggled")]
    fn claim_approval_toggled_event(
        &self,
        #[indexed] account: &ManagedAddress,
        #[indexed] helper: &ManagedAddress,
        approved: bool,
    );

    // ========================================================
    // STORAGE
    // ========================================================

    // ── Configuration ──

    #[storage_mapper("admin")]
    fn admin(&self) -> SingleValueMapper<ManagedAddress>;

    #[storage_mapper("lpToken")]
    fn lp_token(&self) -> SingleValueMapper<TokenIdentifier>;

    #[storage_mapper("governanceToken")]
    fn governance_token(&self) -> SingleValueMapper<TokenIdentifier>;

    #[storage_mapper("gaugeController")]
    fn gauge_controller(&self) -> SingleValueMapper<ManagedAddress>;

    #[storage_mapper("votingEscrow")]
    fn voting_escrow(&self) -> SingleValueMapper<ManagedAddress>;

    #[storage_mapper("rewardPolicy")]
    fn reward_policy(&self) -> SingleValueMapper<ManagedAddress>;

    // ── Gauge state ──

    #[storage_mapper("gaugeState")]
    fn gauge_state(&self) -> SingleValueMapper<GaugeState<Self::Api>>;

    #[storage_mapper("userCheckpoints")]
    fn user_checkpoints(&self, account: &ManagedAddress) -> SingleValueMapper<UserCheckpoint<Self::Api>>;

    // ── Reward tokens ──

    #[storage_mapper("rewardTokens")]
    fn reward_tokens(&self) -> VecMapper<TokenIdentifier>;

    #[storage_mapper("rewardStreams")]
    fn reward_streams(&self, token: &TokenIdentifier) -> SingleValueMapper<RewardStream<Self::Api>>;

    #[storage_mapper("userRewards")]
    fn user_rewards(
        &self,
        account: &ManagedAddress,
        token: &TokenIdentifier,
    ) -> SingleValueMapper<UserReward<Self::Api>>;

    // ── Delegated claims ──

    #[storage_mapper("claimApproved")]
    fn claim_approved(&self, account: &ManagedAddress, helper: &ManagedAddress) -> SingleValueMapper<bool>;
}
