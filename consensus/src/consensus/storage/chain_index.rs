//! Chain index
//!
//! An arena of block index nodes. Nodes refer to their predecessor through
//! a [`BlockKey`] into the arena rather than an owning link, so the index is
//! a backward-only tree rooted at genesis and the arena alone owns node
//! lifetimes.

use consensus_core::errors::ConsensusError;
use consensus_core::{BlockHeader, BlockHeight, Hash};
use consensus_pow::{block_proof, CompactTarget};
use primitive_types::U256;
use std::collections::HashMap;
use tracing::trace;

/// Stable position of a node in the [`ChainIndex`] arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockKey(usize);

/// One accepted block's position in the chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChainIndexNode {
    key: BlockKey,
    hash: Hash,
    prev: Option<BlockKey>,
    height: BlockHeight,
    bits: u32,
    timestamp: i64,
    chain_work: U256,
}

impl ChainIndexNode {
    pub fn key(&self) -> BlockKey {
        self.key
    }

    pub fn hash(&self) -> Hash {
        self.hash
    }

    /// Key of the predecessor, `None` for genesis
    pub fn prev_key(&self) -> Option<BlockKey> {
        self.prev
    }

    pub fn height(&self) -> BlockHeight {
        self.height
    }

    pub fn bits(&self) -> u32 {
        self.bits
    }

    pub fn target(&self) -> CompactTarget {
        CompactTarget(self.bits)
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Total work from genesis up to and including this block
    pub fn chain_work(&self) -> U256 {
        self.chain_work
    }
}

#[derive(Debug, Default)]
pub struct ChainIndex {
    nodes: Vec<ChainIndexNode>,
    by_hash: HashMap<Hash, BlockKey>,
    best: Option<BlockKey>,
}

impl ChainIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Indexes an accepted header. The first header of an empty index is
    /// genesis and must have a zero `prev_hash`.
    pub fn insert(&mut self, header: &BlockHeader) -> Result<BlockKey, ConsensusError> {
        let prev = self.link(header)?;
        let prev_work = prev.map(|key| self.nodes[key.0].chain_work).unwrap_or_default();
        let proof = block_proof(CompactTarget(header.bits));
        if proof.is_zero() {
            return Err(ConsensusError::UnusableTarget(header.hash));
        }
        Ok(self.push(header, prev, prev_work.saturating_add(proof)))
    }

    /// Re-indexes a header loaded from storage together with its recorded
    /// cumulative work.
    pub fn restore(
        &mut self,
        header: &BlockHeader,
        chain_work: U256,
    ) -> Result<BlockKey, ConsensusError> {
        let prev = self.link(header)?;
        if let Some(prev) = prev {
            if chain_work <= self.nodes[prev.0].chain_work {
                return Err(ConsensusError::NonIncreasingChainWork(header.hash));
            }
        }
        Ok(self.push(header, prev, chain_work))
    }

    fn link(&self, header: &BlockHeader) -> Result<Option<BlockKey>, ConsensusError> {
        if self.by_hash.contains_key(&header.hash) {
            return Err(ConsensusError::DuplicateBlock(header.hash));
        }
        if self.nodes.is_empty() && header.prev_hash.is_zero() {
            return Ok(None);
        }
        match self.by_hash.get(&header.prev_hash) {
            Some(key) => Ok(Some(*key)),
            None => Err(ConsensusError::OrphanHeader(header.hash)),
        }
    }

    fn push(&mut self, header: &BlockHeader, prev: Option<BlockKey>, chain_work: U256) -> BlockKey {
        let key = BlockKey(self.nodes.len());
        let height = prev.map(|p| self.nodes[p.0].height + 1).unwrap_or(0);
        self.nodes.push(ChainIndexNode {
            key,
            hash: header.hash,
            prev,
            height,
            bits: header.bits,
            timestamp: header.timestamp,
            chain_work,
        });
        self.by_hash.insert(header.hash, key);

        // First seen wins on equal work.
        let better = match self.best {
            Some(best) => chain_work > self.nodes[best.0].chain_work,
            None => true,
        };
        if better {
            self.best = Some(key);
        }

        trace!(hash = %header.hash, height, "indexed block");
        key
    }

    pub fn get(&self, key: BlockKey) -> Option<&ChainIndexNode> {
        self.nodes.get(key.0)
    }

    pub fn lookup(&self, hash: &Hash) -> Option<&ChainIndexNode> {
        self.by_hash.get(hash).and_then(|key| self.get(*key))
    }

    pub fn prev(&self, node: &ChainIndexNode) -> Option<&ChainIndexNode> {
        node.prev.and_then(|key| self.get(key))
    }

    /// The ancestor of `node` at `height`, or `node` itself at its own height.
    pub fn ancestor<'a>(
        &'a self,
        node: &'a ChainIndexNode,
        height: BlockHeight,
    ) -> Option<&'a ChainIndexNode> {
        if height > node.height {
            return None;
        }
        let mut current = node;
        while current.height > height {
            current = self.prev(current)?;
        }
        Some(current)
    }

    /// The node with the most cumulative work.
    pub fn best_tip(&self) -> Option<&ChainIndexNode> {
        self.best.and_then(|key| self.get(key))
    }
}
