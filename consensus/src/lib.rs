//! Consensus library for proof-of-work blockchain
//!
//! This library implements the consensus-critical core of the node: the
//! difficulty retargeting rules, header proof-of-work validation and the
//! propagation of chain tip changes to dependent subsystems.

pub mod consensus;
pub mod pipeline;

// Re-export key types for easier access
pub use consensus_core::{ConsensusParams, Hash};
pub use consensus::activation::{ChainActivationSnapshot, VersionBitsOracle};
pub use consensus::difficulty::{DifficultyManager, DifficultyWindow};
pub use consensus::storage::{BlockKey, ChainIndex, ChainIndexNode};
pub use consensus::validation::HeaderValidator;

// Re-export pipeline types
pub use pipeline::{ConnectionContext, ConnectionManager, FanOutStep, TipNotifier, TipSubscribers};
