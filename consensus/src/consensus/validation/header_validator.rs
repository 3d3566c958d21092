//! Header validation for consensus
//!
//! This module validates block headers including:
//! - Proof of work validation
//! - Difficulty target validation against the retarget rules

use consensus_core::errors::ConsensusError;
use consensus_core::{BlockHeader, ConsensusParams};
use std::sync::Arc;
use tracing::warn;

use crate::consensus::difficulty::DifficultyManager;
use crate::consensus::storage::{ChainIndex, ChainIndexNode};

/// Header validator for the proof-of-work rules
#[derive(Clone, Debug)]
pub struct HeaderValidator {
    difficulty: DifficultyManager,
}

impl HeaderValidator {
    /// Create a new header validator for the given network
    pub fn new(params: Arc<ConsensusParams>) -> Self {
        Self { difficulty: DifficultyManager::new(params) }
    }

    pub fn difficulty(&self) -> &DifficultyManager {
        &self.difficulty
    }

    /// Check that the header hash meets the target the header claims
    pub fn check_proof_of_work(&self, header: &BlockHeader) -> Result<(), ConsensusError> {
        let params = self.difficulty.params();
        if !consensus_pow::check_proof_of_work(&header.hash, header.bits, params) {
            return Err(ConsensusError::InvalidProofOfWork);
        }
        Ok(())
    }

    /// Check that the header claims exactly the target required after `prev`.
    pub fn check_difficulty_bits(
        &self,
        index: &ChainIndex,
        prev: Option<&ChainIndexNode>,
        header: &BlockHeader,
    ) -> Result<(), ConsensusError> {
        let expected = self.difficulty.next_required_target(index, prev, header)?;
        if expected.bits() != header.bits {
            warn!(
                hash = %header.hash,
                expected = %expected,
                found = header.bits,
                "incorrect proof of work target"
            );
            return Err(ConsensusError::InvalidDifficultyTarget {
                expected: expected.bits(),
                found: header.bits,
            });
        }
        Ok(())
    }

    /// Validate a header against the index it is about to join.
    ///
    /// The cheap proof-of-work check runs first so that headers with bogus
    /// work never reach the retarget computation.
    pub fn validate_header(
        &self,
        index: &ChainIndex,
        header: &BlockHeader,
    ) -> Result<(), ConsensusError> {
        self.check_proof_of_work(header)?;

        let prev = if header.prev_hash.is_zero() && index.is_empty() {
            None
        } else {
            Some(index.lookup(&header.prev_hash).ok_or(ConsensusError::OrphanHeader(header.hash))?)
        };

        self.check_difficulty_bits(index, prev, header)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use consensus_core::{Hash, ZERO_HASH};
    use consensus_pow::CompactTarget;
    use primitive_types::U256;

    const LIMIT_BITS: u32 = 0x207f_ffff;

    fn validator() -> HeaderValidator {
        HeaderValidator::new(Arc::new(ConsensusParams::regtest()))
    }

    /// A hash that is at most half of the regtest limit, valid for any
    /// target at or above it.
    fn easy_hash(n: u64) -> Hash {
        Hash::from_be_u64([0, 0, 0, n])
    }

    #[test]
    fn test_regtest_limit_bits() {
        assert_eq!(validator().difficulty().pow_limit_bits(), CompactTarget(LIMIT_BITS));
    }

    #[test]
    fn test_check_proof_of_work() {
        let validator = validator();
        let header = BlockHeader::new(easy_hash(1), ZERO_HASH, 0, LIMIT_BITS);
        assert!(validator.check_proof_of_work(&header).is_ok());

        let hard = BlockHeader::new(Hash::from_u256(U256::MAX >> 8), ZERO_HASH, 0, 0x1d00_ffff);
        assert!(matches!(
            validator.check_proof_of_work(&hard),
            Err(ConsensusError::InvalidProofOfWork)
        ));

        let negative = BlockHeader::new(easy_hash(1), ZERO_HASH, 0, 0x0492_3456);
        assert!(matches!(
            validator.check_proof_of_work(&negative),
            Err(ConsensusError::InvalidProofOfWork)
        ));
    }

    #[test]
    fn test_validate_chain_of_headers() {
        let validator = validator();
        let mut index = ChainIndex::new();
        let mut prev = ZERO_HASH;
        for n in 0..5u64 {
            let header = BlockHeader::new(easy_hash(n + 1), prev, n as i64 * 150, LIMIT_BITS);
            validator.validate_header(&index, &header).unwrap();
            index.insert(&header).unwrap();
            prev = header.hash;
        }
        assert_eq!(index.len(), 5);
    }

    #[test]
    fn test_rejects_wrong_bits() {
        let validator = validator();
        let mut index = ChainIndex::new();
        let genesis = BlockHeader::new(easy_hash(1), ZERO_HASH, 0, LIMIT_BITS);
        index.insert(&genesis).unwrap();

        // Harder than required but still met by the hash.
        let header = BlockHeader::new(easy_hash(2), genesis.hash, 150, 0x2000_ffff);
        match validator.validate_header(&index, &header) {
            Err(ConsensusError::InvalidDifficultyTarget { expected, found }) => {
                assert_eq!(expected, LIMIT_BITS);
                assert_eq!(found, 0x2000_ffff);
            }
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn test_rejects_unknown_parent() {
        let validator = validator();
        let mut index = ChainIndex::new();
        index.insert(&BlockHeader::new(easy_hash(1), ZERO_HASH, 0, LIMIT_BITS)).unwrap();

        let unknown = Hash::from_be_u64([1, 2, 3, 4]);
        let orphan = BlockHeader::new(easy_hash(2), unknown, 150, LIMIT_BITS);
        assert!(matches!(
            validator.validate_header(&index, &orphan),
            Err(ConsensusError::OrphanHeader(_))
        ));
    }
}
