//! Storage module for consensus
//!
//! This module provides the in-memory index of accepted blocks.

pub mod chain_index;

pub use chain_index::{BlockKey, ChainIndex, ChainIndexNode};
