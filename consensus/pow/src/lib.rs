pub mod compact;
pub mod work;

use consensus_core::{ConsensusParams, Hash};

pub use compact::{CompactTarget, DecodedTarget};
pub use work::block_proof;

/// Checks that `hash` satisfies the compact target `bits`.
///
/// Malformed targets (negative, zero, overflowing or easier than the
/// network's `pow_limit`) are rejected like an insufficient hash: this is a
/// routine outcome for adversarial input, never a fault.
#[must_use]
pub fn check_proof_of_work(hash: &Hash, bits: u32, params: &ConsensusParams) -> bool {
    let target = CompactTarget(bits).decode();

    // Check range
    if !target.is_usable(params.pow_limit) {
        return false;
    }

    // The hash must be less or equal than the claimed target.
    hash.to_u256() <= target.value
}
