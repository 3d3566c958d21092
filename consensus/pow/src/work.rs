use primitive_types::U256;

use crate::compact::CompactTarget;

/// Expected number of hashes needed to find a block with target `bits`.
///
/// This is `2^256 / (target + 1)`, computed as `~target / (target + 1) + 1`
/// because 2^256 does not fit in 256 bits. Unusable targets carry no work.
pub fn block_proof(bits: CompactTarget) -> U256 {
    let decoded = bits.decode();
    if decoded.negative || decoded.overflow || decoded.value.is_zero() {
        return U256::zero();
    }
    let target = decoded.value;
    (!target / (target + U256::one())) + U256::one()
}
