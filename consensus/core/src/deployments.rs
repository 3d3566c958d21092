use serde::{Deserialize, Serialize};

/// Version-bits deployments whose state feeds the chain activation flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Deployment {
    /// Secondary consensus upgrade signalled through version bits
    Aip0003,
    /// Automatic instant-settlement locking of simple transactions
    InstantSendAutoLocks,
}

/// State of a version-bits deployment at a given block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ThresholdState {
    #[default]
    Defined,
    Started,
    LockedIn,
    Active,
    Failed,
}

impl ThresholdState {
    pub fn is_active(&self) -> bool {
        *self == ThresholdState::Active
    }
}
