//! Tip notifier
//!
//! Propagates each accepted change of the best-chain tip to the subsystems
//! that track it. The caller holds the chain-index lock for the whole call
//! and never runs two tip updates at once.

use consensus_core::{ConsensusParams, Transaction};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, trace};

use super::notifications::{ConnectionContext, TipSubscribers};
use crate::consensus::activation::{ChainActivationSnapshot, VersionBitsOracle};
use crate::consensus::storage::{ChainIndex, ChainIndexNode};

/// One step of the post-download fan-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FanOutStep {
    NodeRegistry,
    PrivacyMixer,
    PrivacyMixerClient,
    InstantLocks,
    Payments,
    Governance,
}

impl FanOutStep {
    /// Fan-out order
    pub const ORDER: [FanOutStep; 6] = [
        FanOutStep::NodeRegistry,
        FanOutStep::PrivacyMixer,
        FanOutStep::PrivacyMixerClient,
        FanOutStep::InstantLocks,
        FanOutStep::Payments,
        FanOutStep::Governance,
    ];

    pub fn requires_wallet(&self) -> bool {
        matches!(self, FanOutStep::PrivacyMixerClient)
    }
}

pub struct TipNotifier {
    params: Arc<ConsensusParams>,
    oracle: Arc<dyn VersionBitsOracle>,
    subscribers: TipSubscribers,
    context: ConnectionContext,
    activation: RwLock<ChainActivationSnapshot>,
}

impl TipNotifier {
    pub fn new(
        params: Arc<ConsensusParams>,
        oracle: Arc<dyn VersionBitsOracle>,
        subscribers: TipSubscribers,
        context: ConnectionContext,
    ) -> Self {
        Self {
            params,
            oracle,
            subscribers,
            context,
            activation: RwLock::new(ChainActivationSnapshot::default()),
        }
    }

    /// Activation flags as of the last tip update
    pub fn activation(&self) -> ChainActivationSnapshot {
        *self.activation.read()
    }

    /// Replays the current best tip, used once at startup.
    pub fn initialize_current_tip(&self, index: &ChainIndex, initial_download: bool) {
        if let Some(tip) = index.best_tip() {
            self.updated_block_tip(index, tip, None, initial_download);
        }
    }

    pub fn accepted_block_header(&self, header: &ChainIndexNode) {
        self.subscribers.sync_tracker.accepted_block_header(header);
    }

    pub fn notify_header_tip(&self, header: &ChainIndexNode, initial_download: bool) {
        let connman = self.context.connman.as_ref();
        self.subscribers.sync_tracker.notify_header_tip(header, initial_download, connman);
    }

    /// Handles a tip change from `fork_point` to `new_tip`.
    ///
    /// `new_tip == fork_point` means blocks were only disconnected and
    /// nothing is notified.
    pub fn updated_block_tip(
        &self,
        index: &ChainIndex,
        new_tip: &ChainIndexNode,
        fork_point: Option<&ChainIndexNode>,
        initial_download: bool,
    ) {
        if fork_point.is_some_and(|fork| fork.key() == new_tip.key()) {
            trace!(tip = %new_tip.hash(), "blocks disconnected without a new tip");
            return;
        }

        let connman = self.context.connman.as_ref();
        self.subscribers.deterministic_registry.updated_block_tip(new_tip);
        self.subscribers.sync_tracker.updated_block_tip(new_tip, initial_download, connman);

        let snapshot =
            ChainActivationSnapshot::compute(index, new_tip, &self.params, self.oracle.as_ref());
        *self.activation.write() = snapshot;
        debug!(
            height = new_tip.height(),
            tip = %new_tip.hash(),
            dip0001 = snapshot.dip0001_active,
            aip0003 = snapshot.aip0003_active,
            auto_lock = snapshot.auto_lock_active,
            "updated chain tip"
        );

        if initial_download {
            return;
        }
        if self.context.capabilities.lite_mode {
            return;
        }

        for step in FanOutStep::ORDER {
            if step.requires_wallet() && !self.context.capabilities.wallet {
                continue;
            }
            trace!(?step, height = new_tip.height(), "notifying tip subscriber");
            self.notify(step, new_tip);
        }
    }

    fn notify(&self, step: FanOutStep, tip: &ChainIndexNode) {
        let subscribers = &self.subscribers;
        let connman = self.context.connman.as_ref();
        match step {
            FanOutStep::NodeRegistry => subscribers.node_registry.updated_block_tip(tip, connman),
            FanOutStep::PrivacyMixer => subscribers.privacy_mixer.updated_block_tip(tip),
            FanOutStep::PrivacyMixerClient => {
                if let Some(client) = &subscribers.privacy_mixer_client {
                    client.updated_block_tip(tip);
                }
            }
            FanOutStep::InstantLocks => subscribers.instant_locks.updated_block_tip(tip),
            FanOutStep::Payments => subscribers.payments.updated_block_tip(tip, connman),
            FanOutStep::Governance => subscribers.governance.updated_block_tip(tip, connman),
        }
    }

    /// Forwards a transaction seen in a block or the mempool.
    pub fn sync_transaction(
        &self,
        tx: &Transaction,
        block: Option<&ChainIndexNode>,
        position: Option<usize>,
    ) {
        self.subscribers.instant_locks.sync_transaction(tx, block, position);
        self.subscribers.privacy_mixer.sync_transaction(tx, block, position);
    }
}
