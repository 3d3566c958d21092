use serde::{Deserialize, Serialize};

use crate::Hash;

/// The part of a block header the proof-of-work rules look at.
///
/// Height is not stored here: it is derived from the header's position in
/// the chain index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockHeader {
    /// Hash of this header
    pub hash: Hash,
    /// Hash of the predecessor header
    pub prev_hash: Hash,
    /// Block time in seconds since the unix epoch
    pub timestamp: i64,
    /// Claimed proof-of-work target in compact form
    pub bits: u32,
}

impl BlockHeader {
    pub fn new(hash: Hash, prev_hash: Hash, timestamp: i64, bits: u32) -> Self {
        Self { hash, prev_hash, timestamp, bits }
    }
}
