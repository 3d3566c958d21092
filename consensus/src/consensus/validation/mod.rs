//! Validation module for consensus
//!
//! This module checks block headers against the proof-of-work rules.

pub mod header_validator;

pub use header_validator::HeaderValidator;
