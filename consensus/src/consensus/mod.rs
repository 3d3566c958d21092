//! Consensus module for proof-of-work blockchain
//!
//! This module implements the chain index, difficulty retargeting, header
//! validation and rule activation tracking.

pub mod activation;
pub mod difficulty;
pub mod storage;
pub mod validation;

pub use activation::{ChainActivationSnapshot, VersionBitsOracle};
pub use difficulty::{DifficultyManager, DifficultyWindow};
pub use storage::{BlockKey, ChainIndex, ChainIndexNode};
pub use validation::HeaderValidator;
