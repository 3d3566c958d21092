//!
//! # Transaction
//!
//! The tip-update fan-out only forwards transactions to the subsystems that
//! track them, so the consensus core treats them as opaque payloads keyed by
//! their id.
//!

use serde::{Deserialize, Serialize};

use crate::Hash;

/// A 32-byte transaction identifier.
pub type TransactionId = Hash;

/// An opaque transaction as seen by the notification layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    /// Serialized transaction bytes, interpreted by the subscribers only
    pub payload: Vec<u8>,
}

impl Transaction {
    pub fn new(id: TransactionId, payload: Vec<u8>) -> Self {
        Self { id, payload }
    }
}
