//! Fixed-interval retargeting used below the weighted-average activation
//! height.

use consensus_core::errors::ConsensusError;
use consensus_core::{BlockHeader, ConsensusParams};
use consensus_pow::CompactTarget;
use primitive_types::U256;
use tracing::{debug, error};

use crate::consensus::storage::{ChainIndex, ChainIndexNode};

/// Target for the block following `tip` under the fixed-interval rules.
pub fn next_work_required<'a>(
    params: &ConsensusParams,
    index: &'a ChainIndex,
    tip: &'a ChainIndexNode,
    candidate: &BlockHeader,
) -> Result<CompactTarget, ConsensusError> {
    let limit_bits = CompactTarget::encode(params.pow_limit);
    let interval = params.difficulty_adjustment_interval();

    // Only change once per interval
    if (tip.height() as i64 + 1) % interval != 0 {
        if !params.pow_allow_min_difficulty_blocks {
            return Ok(tip.target());
        }

        // A block more than two spacings late may use the minimum difficulty.
        if candidate.timestamp > tip.timestamp() + params.pow_target_spacing * 2 {
            debug!(height = tip.height() + 1, "late block, allowing minimum difficulty");
            return Ok(limit_bits);
        }

        // Otherwise keep the last target that was not a minimum-difficulty one.
        let mut node = tip;
        while let Some(prev) = index.prev(node) {
            if node.height() as i64 % interval == 0 || node.bits() != limit_bits.bits() {
                break;
            }
            node = prev;
        }
        return Ok(node.target());
    }

    if params.pow_no_retargeting {
        return Ok(tip.target());
    }

    // Go back by what we want to be one interval worth of blocks
    let depth = interval - 1;
    let first_height = tip.height() as i64 - depth;
    if first_height < 0 {
        error!(height = tip.height(), interval, "retarget boundary below a full interval");
        return Err(ConsensusError::InsufficientHistory {
            height: tip.height(),
            needed: depth as u64,
        });
    }
    let first = match index.ancestor(tip, first_height as u64) {
        Some(first) => first,
        None => {
            error!(
                height = tip.height(),
                first_height, "retarget ancestor missing from chain index"
            );
            return Err(ConsensusError::MissingAncestor {
                height: first_height as u64,
                depth: depth as u64,
            });
        }
    };

    Ok(calculate_next_work_required(params, tip, first.timestamp()))
}

/// Retargets `tip`'s target by the time the last interval actually took.
pub fn calculate_next_work_required(
    params: &ConsensusParams,
    tip: &ChainIndexNode,
    first_block_time: i64,
) -> CompactTarget {
    if params.pow_no_retargeting {
        return tip.target();
    }

    // Limit adjustment step
    let timespan = params.pow_target_timespan;
    let mut actual_timespan = tip.timestamp() - first_block_time;
    if actual_timespan < timespan / 4 {
        actual_timespan = timespan / 4;
    }
    if actual_timespan > timespan * 4 {
        actual_timespan = timespan * 4;
    }

    // Retarget
    let (scaled, _) =
        tip.target().decode().value.overflowing_mul(U256::from(actual_timespan as u64));
    let mut new_target = scaled / U256::from(timespan as u64);
    if new_target > params.pow_limit {
        new_target = params.pow_limit;
    }

    let bits = CompactTarget::encode(new_target);
    debug!(height = tip.height() + 1, actual_timespan, %bits, "legacy retarget");
    bits
}
