//! Tip-update pipeline for consensus
//!
//! This module propagates accepted chain tip changes to the node's
//! non-consensus subsystems in a fixed order.

pub mod notifications;
pub mod tip_notifier;

pub use notifications::{
    ConnectionContext, ConnectionManager, DeterministicRegistry, Governance, InstantLockTracker,
    NodeRegistry, PaymentQueue, PrivacyMixer, PrivacyMixerClient, SyncTracker, TipSubscribers,
};
pub use tip_notifier::{FanOutStep, TipNotifier};
