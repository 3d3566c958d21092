//! Chain activation snapshot
//!
//! Rule activation flags derived from the current tip, recomputed on every
//! tip update and read by whoever needs them.

use consensus_core::{ConsensusParams, Deployment, ThresholdState};
use serde::{Deserialize, Serialize};

use crate::consensus::storage::{ChainIndex, ChainIndexNode};

/// Answers version-bits deployment queries.
pub trait VersionBitsOracle: Send + Sync {
    /// State of `deployment` for the block built on `prev`.
    fn state(
        &self,
        prev: Option<&ChainIndexNode>,
        params: &ConsensusParams,
        deployment: Deployment,
    ) -> ThresholdState;

    /// State of `deployment` at the current tip.
    fn tip_state(&self, params: &ConsensusParams, deployment: Deployment) -> ThresholdState;
}

/// Which rule upgrades are active at the tip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainActivationSnapshot {
    pub dip0001_active: bool,
    pub aip0003_active: bool,
    pub auto_lock_active: bool,
}

impl ChainActivationSnapshot {
    pub fn compute(
        index: &ChainIndex,
        tip: &ChainIndexNode,
        params: &ConsensusParams,
        oracle: &dyn VersionBitsOracle,
    ) -> Self {
        Self {
            dip0001_active: tip.height() >= params.dip0001_height,
            aip0003_active: oracle.state(index.prev(tip), params, Deployment::Aip0003).is_active(),
            auto_lock_active: oracle
                .tip_state(params, Deployment::InstantSendAutoLocks)
                .is_active(),
        }
    }
}
