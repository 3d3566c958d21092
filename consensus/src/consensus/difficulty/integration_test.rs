#[cfg(test)]
mod integration_tests {
    use super::super::*;
    use crate::consensus::storage::ChainIndex;
    use consensus_core::{BlockHeader, ConsensusParams, Hash, ZERO_HASH};
    use consensus_pow::CompactTarget;
    use primitive_types::U256;
    use std::sync::Arc;
    use tracing_subscriber::EnvFilter;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    fn dgw_manager() -> DifficultyManager {
        let params = ConsensusParams { pow_dgw_height: 0, ..ConsensusParams::mainnet() };
        DifficultyManager::new(Arc::new(params))
    }

    fn insert_chain(index: &mut ChainIndex, blocks: &[(i64, u32)]) -> Hash {
        let mut prev = ZERO_HASH;
        for (n, (timestamp, bits)) in blocks.iter().enumerate() {
            let hash = Hash::from_be_u64([0, 0, 20, n as u64]);
            index.insert(&BlockHeader::new(hash, prev, *timestamp, *bits)).unwrap();
            prev = hash;
        }
        prev
    }

    #[test]
    fn test_thirty_block_golden_vector() {
        init_tracing();
        let manager = dgw_manager();
        let mut index = ChainIndex::new();

        // 0x1e03ffff is a quarter of the mainnet limit.
        let quarter = (U256::MAX >> 20) / U256::from(4u64) >> 216 << 216;
        assert_eq!(CompactTarget(0x1e03_ffff).decode().value, quarter);

        let blocks: Vec<(i64, u32)> = (0..30).map(|n| (1_000_000 + n * 150, 0x1e03_ffff)).collect();
        let tip_hash = insert_chain(&mut index, &blocks);
        let tip = index.lookup(&tip_hash).unwrap();
        let candidate =
            BlockHeader::new(Hash::from_be_u64([9, 9, 9, 9]), tip_hash, tip.timestamp() + 150, 0);

        let bits = manager.next_required_target(&index, Some(tip), &candidate).unwrap();
        assert_eq!(bits, CompactTarget(0x1e03_d554));
    }

    #[test]
    fn test_matches_straightforward_recursive_average() {
        init_tracing();
        let manager = dgw_manager();
        let mut index = ChainIndex::new();

        // Irregular spacing and varying targets.
        let mut timestamp = 50_000;
        let blocks: Vec<(i64, u32)> = (0..40u32)
            .map(|n| {
                timestamp += 60 + (n as i64 * 37) % 290;
                (timestamp, 0x1c00_0000 | (0x0800 + n * 0x0123))
            })
            .collect();
        let tip_hash = insert_chain(&mut index, &blocks);
        let tip = index.lookup(&tip_hash).unwrap();

        // Same computation, written out over the raw block list.
        let newest = blocks.len() - 1;
        let mut average = U256::zero();
        for k in 1..=24usize {
            let target = CompactTarget(blocks[newest + 1 - k].1).decode().value;
            average = if k == 1 {
                target
            } else {
                (average * U256::from(k) + target) / U256::from(k + 1)
            };
        }
        let target_timespan = 24 * 150;
        let actual = (blocks[newest].0 - blocks[newest - 23].0)
            .clamp(target_timespan / 3, target_timespan * 3);
        let expected = CompactTarget::encode(
            average * U256::from(actual as u64) / U256::from(target_timespan as u64),
        );

        let candidate =
            BlockHeader::new(Hash::from_be_u64([9, 9, 9, 8]), tip_hash, tip.timestamp() + 150, 0);
        assert_eq!(manager.next_required_target(&index, Some(tip), &candidate).unwrap(), expected);
    }

    #[test]
    fn test_dispatch_switches_at_activation_height() {
        // Legacy interval of 8 blocks, weighted average from height 12.
        let params = Arc::new(ConsensusParams {
            pow_target_timespan: 8 * 150,
            pow_dgw_height: 12,
            ..ConsensusParams::mainnet()
        });
        let manager = DifficultyManager::new(params);
        let mut index = ChainIndex::new();

        // Blocks arrive twice as fast as they should.
        let blocks: Vec<(i64, u32)> = (0..11).map(|n| (n * 75, 0x1c0f_ffff)).collect();
        let tip_hash = insert_chain(&mut index, &blocks);
        let tip = index.lookup(&tip_hash).unwrap();
        let candidate =
            BlockHeader::new(Hash::from_be_u64([9, 9, 9, 7]), tip_hash, tip.timestamp() + 75, 0);

        // Height 11 is legacy and off the retarget boundary.
        let bits = manager.next_required_target(&index, Some(tip), &candidate).unwrap();
        assert_eq!(bits, CompactTarget(0x1c0f_ffff));

        // Height 12 is weighted-average but has too little history.
        let hash = Hash::from_be_u64([0, 0, 20, 11]);
        let next = BlockHeader::new(hash, tip_hash, tip.timestamp() + 75, 0x1c0f_ffff);
        index.insert(&next).unwrap();
        let tip = index.lookup(&next.hash).unwrap();
        let bits = manager.next_required_target(&index, Some(tip), &candidate).unwrap();
        assert_eq!(bits, manager.pow_limit_bits());
    }
}
