use primitive_types::U256;
use serde::{Deserialize, Serialize};

use crate::constants::{TARGET_BLOCK_SPACING, TARGET_TIMESPAN};
use crate::{BlockHeight, Hash};

/// Proof-of-work consensus parameters of one network.
///
/// Values are immutable once the owning [`super::NetworkRegistry`] is built
/// and are shared by reference with every consumer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusParams {
    /// Easiest target a block may claim
    pub pow_limit: U256,
    /// Seconds between blocks
    pub pow_target_spacing: i64,
    /// Length of the legacy retarget window in seconds
    pub pow_target_timespan: i64,
    /// Permissive networks may emit minimum-difficulty blocks after a gap
    pub pow_allow_min_difficulty_blocks: bool,
    /// Legacy retargets keep the previous target unchanged
    pub pow_no_retargeting: bool,
    /// First height retargeted by the weighted-average algorithm
    pub pow_dgw_height: BlockHeight,
    /// Height at which the DIP0001 rules become active
    pub dip0001_height: BlockHeight,
    /// Genesis of the povnet this chain runs on, `None` everywhere else
    pub povnet_genesis: Option<Hash>,
}

impl ConsensusParams {
    /// Number of blocks between legacy retargets.
    pub fn difficulty_adjustment_interval(&self) -> i64 {
        self.pow_target_timespan / self.pow_target_spacing
    }

    /// Whether these parameters belong to the secondary permissive network.
    pub fn is_povnet(&self) -> bool {
        self.povnet_genesis.is_some()
    }

    pub fn mainnet() -> Self {
        Self {
            pow_limit: U256::MAX >> 20,
            pow_target_spacing: TARGET_BLOCK_SPACING,
            pow_target_timespan: TARGET_TIMESPAN,
            pow_allow_min_difficulty_blocks: false,
            pow_no_retargeting: false,
            pow_dgw_height: 34_140,
            dip0001_height: 782_208,
            povnet_genesis: None,
        }
    }

    pub fn testnet() -> Self {
        Self {
            pow_limit: U256::MAX >> 20,
            pow_target_spacing: TARGET_BLOCK_SPACING,
            pow_target_timespan: TARGET_TIMESPAN,
            pow_allow_min_difficulty_blocks: true,
            pow_no_retargeting: false,
            pow_dgw_height: 4_002,
            dip0001_height: 5_500,
            povnet_genesis: None,
        }
    }

    pub fn povnet(genesis: Hash) -> Self {
        Self {
            pow_limit: U256::MAX >> 1,
            pow_target_spacing: TARGET_BLOCK_SPACING,
            pow_target_timespan: TARGET_TIMESPAN,
            pow_allow_min_difficulty_blocks: true,
            pow_no_retargeting: false,
            pow_dgw_height: 2,
            dip0001_height: 2,
            povnet_genesis: Some(genesis),
        }
    }

    pub fn regtest() -> Self {
        Self {
            pow_limit: U256::MAX >> 1,
            pow_target_spacing: TARGET_BLOCK_SPACING,
            pow_target_timespan: TARGET_TIMESPAN,
            pow_allow_min_difficulty_blocks: true,
            pow_no_retargeting: true,
            pow_dgw_height: 34_140,
            dip0001_height: 2_000,
            povnet_genesis: None,
        }
    }
}
