//! Subsystems notified of chain tip changes
//!
//! Every subscriber is a non-consensus subsystem. Calls must not block the
//! caller for long and must be harmless when the subscriber is already up
//! to date. Failures are the subscriber's own business: nothing here returns
//! a `Result`.

use consensus_core::{Hash, NodeCapabilities, Transaction};
use std::sync::Arc;

use crate::consensus::storage::ChainIndexNode;

/// Handle used by subscribers to relay what a tip update produced.
pub trait ConnectionManager: Send + Sync {
    fn relay_inventory(&self, hash: Hash);
}

/// Connection manager plus the node capabilities that gate the fan-out.
#[derive(Clone)]
pub struct ConnectionContext {
    pub connman: Arc<dyn ConnectionManager>,
    pub capabilities: NodeCapabilities,
}

impl ConnectionContext {
    pub fn new(connman: Arc<dyn ConnectionManager>, capabilities: NodeCapabilities) -> Self {
        Self { connman, capabilities }
    }
}

/// Deterministic masternode list.
pub trait DeterministicRegistry: Send + Sync {
    fn updated_block_tip(&self, tip: &ChainIndexNode);
}

/// Tracks how far the node has synced its non-consensus state.
pub trait SyncTracker: Send + Sync {
    fn updated_block_tip(
        &self,
        tip: &ChainIndexNode,
        initial_download: bool,
        connman: &dyn ConnectionManager,
    );

    fn accepted_block_header(&self, _header: &ChainIndexNode) {}

    fn notify_header_tip(
        &self,
        _header: &ChainIndexNode,
        _initial_download: bool,
        _connman: &dyn ConnectionManager,
    ) {
    }
}

/// Masternode list housekeeping.
pub trait NodeRegistry: Send + Sync {
    fn updated_block_tip(&self, tip: &ChainIndexNode, connman: &dyn ConnectionManager);
}

/// Network-wide privacy-mixing service.
pub trait PrivacyMixer: Send + Sync {
    fn updated_block_tip(&self, tip: &ChainIndexNode);

    fn sync_transaction(
        &self,
        tx: &Transaction,
        block: Option<&ChainIndexNode>,
        position: Option<usize>,
    );
}

/// The local wallet's privacy-mixing client.
pub trait PrivacyMixerClient: Send + Sync {
    fn updated_block_tip(&self, tip: &ChainIndexNode);
}

/// Instant-settlement lock tracker.
pub trait InstantLockTracker: Send + Sync {
    fn updated_block_tip(&self, tip: &ChainIndexNode);

    fn sync_transaction(
        &self,
        tx: &Transaction,
        block: Option<&ChainIndexNode>,
        position: Option<usize>,
    );
}

/// Masternode payment queue.
pub trait PaymentQueue: Send + Sync {
    fn updated_block_tip(&self, tip: &ChainIndexNode, connman: &dyn ConnectionManager);
}

/// Governance objects and votes.
pub trait Governance: Send + Sync {
    fn updated_block_tip(&self, tip: &ChainIndexNode, connman: &dyn ConnectionManager);
}

/// Everything the tip notifier fans out to.
#[derive(Clone)]
pub struct TipSubscribers {
    pub deterministic_registry: Arc<dyn DeterministicRegistry>,
    pub sync_tracker: Arc<dyn SyncTracker>,
    pub node_registry: Arc<dyn NodeRegistry>,
    pub privacy_mixer: Arc<dyn PrivacyMixer>,
    /// Present only when the node runs a wallet
    pub privacy_mixer_client: Option<Arc<dyn PrivacyMixerClient>>,
    pub instant_locks: Arc<dyn InstantLockTracker>,
    pub payments: Arc<dyn PaymentQueue>,
    pub governance: Arc<dyn Governance>,
}
