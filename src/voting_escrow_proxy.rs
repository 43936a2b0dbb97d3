use multiversx_sc::proxy_imports::*;

pub struct VotingEscrowProxy;

impl<Env, From, To, Gas> TxProxyTrait<Env, From, To, Gas> for VotingEscrowProxy
where
    Env: TxEnv,
    From: TxFrom<Env>,
    To: TxTo<Env>,
    Gas: TxGas<Env>,
{
    type TxProxyMethods = VotingEscrowProxyMethods<Env, From, To, Gas>;

    fn proxy_methods(self, tx: Tx<Env, From, To, (), Gas, (), ()>) -> Self::TxProxyMethods {
        VotingEscrowProxyMethods { wrapped_tx: tx }
    }
}

pub struct VotingEscrowProxyMethods<Env, From, To, Gas>
where
    Env: TxEnv,
    From: TxFrom<Env>,
    To: TxTo<Env>,
    Gas: TxGas<Env>,
{
    wrapped_tx: Tx<Env, From, To, (), Gas, (), ()>,
}

impl<Env, From, To, Gas> VotingEscrowProxyMethods<Env, From, To, Gas>
where
    Env: TxEnv,
    Env::Api: VMApi,
    From: TxFrom<Env>,
    To: TxTo<Env>,
    Gas: TxGas<Env>,
{
    pub fn voting_power_at<
        Arg0: ProxyArg<ManagedAddress<Env::Api>>,
        Arg1: ProxyArg<u64>,
    >(
        self,
        account: Arg0,
        timestamp: Arg1,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, BigUint<Env::Api>> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("votingPowerAt")
            .argument(&account)
            .argument(&timestamp)
            .original_result()
    }

    pub fn total_voting_power_at<Arg0: ProxyArg<u64>>(
        self,
        timestamp: Arg0,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, BigUint<Env::Api>> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("totalVotingPowerAt")
            .argument(&timestamp)
            .original_result()
    }
}
