//! Core consensus types shared by the proof-of-work crates
//!
//! This crate holds the primitive block types, the immutable consensus
//! parameters of every known network, node configuration and the error
//! taxonomy used across the consensus workspace.

pub mod config;
pub mod constants;
pub mod deployments;
pub mod errors;
pub mod hash;
pub mod header;
pub mod network;
pub mod tx;

pub use config::{
    BaseParams, ChainParams, ChainSelection, ConsensusParams, NetworkRegistry, NodeCapabilities,
    NodeConfig,
};
pub use deployments::{Deployment, ThresholdState};
pub use errors::{ConfigError, ConsensusError};
pub use hash::{Hash, ZERO_HASH};
pub use header::BlockHeader;
pub use network::NetworkType;
pub use tx::Transaction;

/// Height of a block in the best-known chain. Genesis is at height zero.
pub type BlockHeight = u64;
