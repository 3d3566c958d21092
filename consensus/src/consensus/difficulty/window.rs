//! Difficulty window management
//!
//! This module collects the most recent blocks below a tip for the
//! weighted-average retarget.

use consensus_core::errors::ConsensusError;
use primitive_types::U256;
use tracing::error;

use crate::consensus::storage::{ChainIndex, ChainIndexNode};
use consensus_pow::CompactTarget;

/// The `size` most recent blocks ending at a tip, newest first.
#[derive(Clone, Debug)]
pub struct DifficultyWindow {
    blocks: Vec<(i64, CompactTarget)>, // (timestamp, bits)
}

impl DifficultyWindow {
    /// Walks back exactly `size` blocks from `tip` (the tip included).
    ///
    /// A predecessor missing before `size` blocks were visited means the
    /// index is corrupted, which aborts the retarget.
    pub fn collect(
        index: &ChainIndex,
        tip: &ChainIndexNode,
        size: u64,
    ) -> Result<Self, ConsensusError> {
        let mut blocks = Vec::with_capacity(size as usize);
        let mut current = tip;
        for visited in 1..=size {
            blocks.push((current.timestamp(), current.target()));
            if visited == size {
                break;
            }
            current = match index.prev(current) {
                Some(prev) => prev,
                None => {
                    error!(
                        height = current.height(),
                        tip = %tip.hash(),
                        visited, "difficulty window ran past genesis"
                    );
                    return Err(ConsensusError::InsufficientHistory {
                        height: tip.height(),
                        needed: size,
                    });
                }
            };
        }
        Ok(Self { blocks })
    }

    /// Get the number of blocks in the window
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Timestamp of the tip
    pub fn newest_timestamp(&self) -> Option<i64> {
        self.blocks.first().map(|(timestamp, _)| *timestamp)
    }

    /// Timestamp of the last block visited
    pub fn oldest_timestamp(&self) -> Option<i64> {
        self.blocks.last().map(|(timestamp, _)| *timestamp)
    }

    /// Seconds between the oldest and the newest block. May be negative
    /// since block times are not monotonic.
    pub fn time_span(&self) -> i64 {
        match (self.newest_timestamp(), self.oldest_timestamp()) {
            (Some(newest), Some(oldest)) => newest - oldest,
            _ => 0,
        }
    }

    /// Get bits from the window, newest first
    pub fn bits(&self) -> Vec<CompactTarget> {
        self.blocks.iter().map(|(_, bits)| *bits).collect()
    }

    /// Recursive average of the window's targets, biased toward the newest
    /// blocks: starting from the tip's target, the k-th block visited
    /// updates `average = (average * k + target_k) / (k + 1)`.
    ///
    /// This is not an arithmetic mean and must not become one: every node
    /// has to reproduce it bit for bit. Arithmetic wraps at 256 bits and
    /// sign or overflow flags of the stored targets are ignored.
    pub fn weighted_average_target(&self) -> U256 {
        let mut average = U256::zero();
        for (visited, (_, bits)) in self.blocks.iter().enumerate() {
            let count = visited as u64 + 1;
            let target = bits.decode().value;
            if count == 1 {
                average = target;
            } else {
                let (scaled, _) = average.overflowing_mul(U256::from(count));
                let (sum, _) = scaled.overflowing_add(target);
                average = sum / U256::from(count + 1);
            }
        }
        average
    }
}
