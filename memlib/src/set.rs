use std::num::NonZeroUsize;
use crate::block::Block;
use crate::context::SimContext;
use crate::error::{Result, SimError};
use crate::replacement_policies::{Policy, ReplacementPolicy};

/// A fixed-capacity group of blocks competing for eviction under one policy
///
/// Blocks are kept in insertion order, which is also the iteration order the policies use to
/// break ties. The set never holds more than `capacity` blocks once an operation completes.
#[derive(Debug, Clone)]
pub struct Set {
    capacity: usize,
    policy: Policy,
    blocks: Vec<Block>,
}

impl Set {
    /// Creates an empty set, failing when `capacity` is zero
    pub fn new(capacity: usize, policy: Policy) -> Result<Self> {
        let capacity = NonZeroUsize::new(capacity)
            .ok_or_else(|| SimError::InvalidArgument("a set must hold at least one block".to_string()))?;
        Ok(Self::with_capacity(capacity, policy))
    }

    /// Creates an empty set whose capacity is already known to be positive
    pub fn with_capacity(capacity: NonZeroUsize, policy: Policy) -> Self {
        Self {
            capacity: capacity.get(),
            policy,
            blocks: Vec::with_capacity(capacity.get().min(64)),
        }
    }

    /// Looks up `tag`, returning true on a hit
    ///
    /// A hit moves the block's recency and frequency forward. A miss has no side effects at all,
    /// the logical clock included.
    pub fn touch(&mut self, tag: u64, ctx: &mut SimContext) -> bool {
        match self.blocks.iter_mut().find(|b| b.tag == tag) {
            Some(block) => {
                block.touch(ctx.tick());
                true
            }
            None => false,
        }
    }

    /// Makes `tag` resident, evicting a victim first if the set is full
    ///
    /// If `tag` is already resident this is exactly a [`Set::touch`]: its insertion time is left
    /// alone. Returns the evicted tag, if any.
    pub fn admit(&mut self, tag: u64, ctx: &mut SimContext) -> Option<u64> {
        if self.touch(tag, ctx) {
            return None;
        }
        let evicted = if self.blocks.len() >= self.capacity {
            let victim = self.policy.select_victim(&self.blocks, ctx.rng());
            // `remove` rather than `swap_remove`, the insertion order is the tie-break order
            Some(self.blocks.remove(victim).tag)
        } else {
            None
        };
        self.blocks.push(Block::new(tag, ctx.tick()));
        evicted
    }

    pub fn contains(&self, tag: u64) -> bool {
        self.blocks.iter().any(|b| b.tag == tag)
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }
}
