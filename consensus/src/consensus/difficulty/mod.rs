//! Difficulty adjustment module for consensus
//!
//! This module computes the target each block must meet, from the timestamps
//! and targets of the blocks below it.

pub mod legacy;
pub mod manager;
pub mod window;
#[cfg(test)]
mod integration_test;

pub use manager::DifficultyManager;
pub use window::DifficultyWindow;
