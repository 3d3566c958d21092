//! Difficulty manager for consensus
//!
//! This module computes the proof-of-work target required for the next
//! block. Heights at or above `pow_dgw_height` use the weighted-average
//! retarget over the last [`DGW_PAST_BLOCKS`] blocks, lower heights use the
//! fixed-interval rules in [`super::legacy`].

use consensus_core::constants::{
    DGW_PAST_BLOCKS, LATE_BLOCK_TARGET_MULTIPLIER, MIN_DIFFICULTY_STALL_SECONDS,
    TESTNET_MIN_DIFFICULTY_WORK, TESTNET_SMOOTH_RETARGET_WORK,
};
use consensus_core::errors::ConsensusError;
use consensus_core::{BlockHeader, ConsensusParams};
use consensus_pow::CompactTarget;
use primitive_types::U256;
use std::sync::Arc;
use tracing::{debug, trace};

use super::legacy;
use super::window::DifficultyWindow;
use crate::consensus::storage::{ChainIndex, ChainIndexNode};

/// Difficulty manager for consensus
#[derive(Clone, Debug)]
pub struct DifficultyManager {
    params: Arc<ConsensusParams>,
}

impl DifficultyManager {
    pub fn new(params: Arc<ConsensusParams>) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ConsensusParams {
        &self.params
    }

    /// Compact form of the network's easiest target
    pub fn pow_limit_bits(&self) -> CompactTarget {
        CompactTarget::encode(self.params.pow_limit)
    }

    /// Target the block `candidate` built on `tip` must claim.
    ///
    /// `tip` is `None` only for genesis. An `Err` means the chain index is
    /// corrupted; callers must abort rather than fall back to any target.
    pub fn next_required_target(
        &self,
        index: &ChainIndex,
        tip: Option<&ChainIndexNode>,
        candidate: &BlockHeader,
    ) -> Result<CompactTarget, ConsensusError> {
        let Some(tip) = tip else {
            return Ok(self.pow_limit_bits());
        };

        if tip.height() + 1 >= self.params.pow_dgw_height {
            self.dark_gravity_wave(index, tip, candidate)
        } else {
            legacy::next_work_required(&self.params, index, tip, candidate)
        }
    }

    fn dark_gravity_wave(
        &self,
        index: &ChainIndex,
        tip: &ChainIndexNode,
        candidate: &BlockHeader,
    ) -> Result<CompactTarget, ConsensusError> {
        let params = &self.params;

        // Need DGW_PAST_BLOCKS + 1 blocks of history.
        if tip.height() < DGW_PAST_BLOCKS {
            return Ok(self.pow_limit_bits());
        }

        if let Some(bits) = self.min_difficulty_override(tip, candidate) {
            return Ok(bits);
        }

        let window = DifficultyWindow::collect(index, tip, DGW_PAST_BLOCKS)?;
        let average = window.weighted_average_target();

        // The measured span covers DGW_PAST_BLOCKS - 1 intervals.
        let target_timespan = DGW_PAST_BLOCKS as i64 * params.pow_target_spacing;
        let mut actual_timespan = window.time_span();
        if actual_timespan < target_timespan / 3 {
            actual_timespan = target_timespan / 3;
        }
        if actual_timespan > target_timespan * 3 {
            actual_timespan = target_timespan * 3;
        }

        // Retarget
        let (scaled, _) = average.overflowing_mul(U256::from(actual_timespan as u64));
        let mut new_target = scaled / U256::from(target_timespan as u64);
        if new_target > params.pow_limit {
            new_target = params.pow_limit;
        }

        let bits = CompactTarget::encode(new_target);
        trace!(
            height = tip.height() + 1,
            actual_timespan,
            target_timespan,
            %bits,
            "weighted-average retarget"
        );
        Ok(bits)
    }

    /// Minimum-difficulty rules of the permissive networks.
    ///
    /// On testnet they apply once the chain has more work than the abandoned
    /// testnet chain had, on povnets they always apply.
    fn min_difficulty_override(
        &self,
        tip: &ChainIndexNode,
        candidate: &BlockHeader,
    ) -> Option<CompactTarget> {
        let params = &self.params;
        if !params.pow_allow_min_difficulty_blocks {
            return None;
        }
        let povnet = params.is_povnet();
        if !povnet && tip.chain_work() < TESTNET_MIN_DIFFICULTY_WORK {
            return None;
        }

        if povnet || tip.chain_work() >= TESTNET_SMOOTH_RETARGET_WORK {
            // Stalled for more than two hours
            if candidate.timestamp > tip.timestamp() + MIN_DIFFICULTY_STALL_SECONDS {
                debug!(height = tip.height() + 1, "chain stalled, allowing minimum difficulty");
                return Some(self.pow_limit_bits());
            }
            // More than four spacings late
            if candidate.timestamp > tip.timestamp() + params.pow_target_spacing * 4 {
                let multiplier = U256::from(LATE_BLOCK_TARGET_MULTIPLIER);
                let (relaxed, _) = tip.target().decode().value.overflowing_mul(multiplier);
                let relaxed = relaxed.min(params.pow_limit);
                debug!(height = tip.height() + 1, "late block, relaxing target");
                return Some(CompactTarget::encode(relaxed));
            }
        } else if candidate.timestamp > tip.timestamp() + params.pow_target_spacing * 2 {
            debug!(height = tip.height() + 1, "late block, allowing minimum difficulty");
            return Some(self.pow_limit_bits());
        }

        None
    }
}
