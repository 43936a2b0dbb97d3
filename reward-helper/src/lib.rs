#![no_std]

multiversx_sc::imports!();

pub mod batch;
pub mod liquidity_gauge_proxy;

use liquidity_gauge_proxy::LiquidityGaugeProxy;

pub const ERR_UNAUTHORIZED: &str = "ERR_UNAUTHORIZED";
pub const ERR_INVALID_BATCH_SIZE: &str = "ERR_INVALID_BATCH_SIZE";
pub const ERR_TOO_MANY_GAUGES: &str = "ERR_TOO_MANY_GAUGES";
pub const ERR_INVALID_ADDRESS: &str = "ERR_INVALID_ADDRESS";

pub const DEFAULT_MAX_BATCH_SIZE: usize = 10;

/// Claims on several gauges for one account in a single transaction.
/// Reward tokens always go to the account; emission is only settled on gauges
/// where the account approved this helper.
#[multiversx_sc::contract]
pub trait RewardHelper {
    #[init]
    fn init(&self, opt_max_batch_size: OptionalValue<usize>) {
        let max_batch_size = match opt_max_batch_size {
            OptionalValue::Some(size) => size,
            OptionalValue::None => DEFAULT_MAX_BATCH_SIZE,
        };
        require!(max_batch_size > 0, ERR_INVALID_BATCH_SIZE);

        self.owner().set(self.blockchain().get_caller());
        self.max_batch_size().set(max_batch_size);
    }

    #[upgrade]
    fn upgrade(&self) {}

    // ========================================================
    // ENDPOINT: claimRewardsFor
    // Zero placeholders, non-contract addresses and repeats are skipped.
    // ========================================================

    #[endpoint(claimRewardsFor)]
    fn claim_rewards_for(&self, account: ManagedAddress, gauges: MultiValueEncoded<ManagedAddress>) {
        require!(!account.is_zero(), ERR_INVALID_ADDRESS);
        let max_batch_size = self.max_batch_size().get();

        let targets = match batch::batch_targets(gauges, max_batch_size, |gauge| {
            self.blockchain().is_smart_contract(gauge)
        }) {
            Ok(targets) => targets,
            Err(err) => sc_panic!(err),
        };

        let mut claimed = 0u64;
        for gauge in targets.iter() {
            self.tx()
                .to(&*gauge)
                .typed(LiquidityGaugeProxy)
                .claim_rewards(OptionalValue::Some(account.clone()), OptionalValue::<ManagedAddress>::None)
                .sync_call();
            claimed += 1;
        }

        self.batch_claimed_event(&account, claimed);
    }

    #[endpoint(setMaxBatchSize)]
    fn set_max_batch_size(&self, max_batch_size: usize) {
        self.require_owner();
        require!(max_batch_size > 0, ERR_INVALID_BATCH_SIZE);
        self.max_batch_size().set(max_batch_size);
    }

    fn require_owner(&self) {
        require!(self.blockchain().get_caller() == self.owner().get(), ERR_UNAUTHORIZED);
    }

    #[view(getMaxBatchSize)]
    fn get_max_batch_size(&self) -> usize {
        self.max_batch_size().get()
    }

    #[event("batchClaimed")]
    fn batch_claimed_event(&self, #[indexed] account: &ManagedAddress, gauges_claimed: u64);

    #[storage_mapper("owner")]
    fn owner(&self) -> SingleValueMapper<ManagedAddress>;

    #[storage_mapper("maxBatchSize")]
    fn max_batch_size(&self) -> SingleValueMapper<usize>;
}
