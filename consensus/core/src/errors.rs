use thiserror::Error;

use crate::{BlockHeight, Hash};

#[derive(Error, Debug)]
pub enum ConsensusError {
    /// An ancestor the chain index must contain is missing. The index is
    /// corrupted and the operation has to be aborted.
    #[error("Chain index corrupted: no ancestor at height {height} ({depth} blocks below the tip)")]
    MissingAncestor { height: BlockHeight, depth: u64 },

    /// The chain is shallower than the caller asserted it to be.
    #[error("Chain index corrupted: {needed} blocks of history expected below height {height}")]
    InsufficientHistory { height: BlockHeight, needed: u64 },

    #[error("Block {0} is already indexed")]
    DuplicateBlock(Hash),

    #[error("Header {0} does not connect to an indexed block")]
    OrphanHeader(Hash),

    #[error("Chain work of block {0} does not exceed its predecessor's")]
    NonIncreasingChainWork(Hash),

    #[error("Target of block {0} is negative, zero or overflowing")]
    UnusableTarget(Hash),

    #[error("Invalid proof of work")]
    InvalidProofOfWork,

    #[error("Invalid difficulty target: expected {expected:#010x}, found {found:#010x}")]
    InvalidDifficultyTarget { expected: u32, found: u32 },
}

impl ConsensusError {
    /// Whether the error means the local chain index cannot be trusted.
    pub fn is_index_corruption(&self) -> bool {
        matches!(
            self,
            ConsensusError::MissingAncestor { .. } | ConsensusError::InsufficientHistory { .. }
        )
    }
}

/// Errors raised while selecting a network or loading node configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unknown chain {0}")]
    UnknownChain(String),

    #[error("Only one of regtest, testnet or povnet can be used")]
    ConflictingChainSelection,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}
