use multiversx_sc::{
    api::ManagedTypeApi,
    types::{ManagedAddress, ManagedVec},
};

use crate::ERR_TOO_MANY_GAUGES;

/// Gauges a batch actually calls, in order. Zero placeholders, addresses that
/// are not contracts and repeated entries are dropped so that one bad entry
/// cannot revert the claims of the others. Placeholders still count against
/// `max_batch_size`.
pub fn batch_targets<M, I, F>(
    gauges: I,
    max_batch_size: usize,
    is_contract: F,
) -> Result<ManagedVec<M, ManagedAddress<M>>, &'static str>
where
    M: ManagedTypeApi,
    I: IntoIterator<Item = ManagedAddress<M>>,
    F: Fn(&ManagedAddress<M>) -> bool,
{
    let mut targets = ManagedVec::new();
    for (index, gauge) in gauges.into_iter().enumerate() {
        if index >= max_batch_size {
            return Err(ERR_TOO_MANY_GAUGES);
        }
        if gauge.is_zero() || !is_contract(&gauge) {
            continue;
        }
        if targets.iter().any(|target| *target == gauge) {
            continue;
        }
        targets.push(gauge);
    }
    Ok(targets)
}
