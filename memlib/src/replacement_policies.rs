use std::fmt;
use std::str::FromStr;
use rand::Rng;
use serde::{Deserialize, Serialize};
use crate::block::Block;
use crate::error::SimError;

/// A generic trait for replacement policies. A set asks its policy for a victim when it is full.
pub trait ReplacementPolicy {
    /// Picks the block to evict, returning its position in `blocks`
    ///
    /// `blocks` is never empty when this is called. When several blocks share the extremal value,
    /// the first one in iteration order is chosen, so victim selection is deterministic for every
    /// policy except [`RandomReplacement`], which draws from `rng`.
    ///
    /// # Arguments
    ///
    /// * `blocks`: The resident blocks of the set, in insertion order
    /// * `rng`: The engine's random source
    ///
    /// returns: usize
    fn select_victim<R: Rng + ?Sized>(&self, blocks: &[Block], rng: &mut R) -> usize;
}

/// Position of the first block minimising `key`
#[inline]
fn first_min_by<F: Fn(&Block) -> u64>(blocks: &[Block], key: F) -> usize {
    let mut min_value = u64::MAX;
    let mut min_index = 0;
    let mut index = 0;
    while index < blocks.len() {
        let value = key(&blocks[index]);
        if value < min_value {
            min_value = value;
            min_index = index;
        }
        index += 1;
    }
    min_index
}

/// Position of the first block maximising `key`. `Iterator::max_by_key` keeps the last one on ties.
#[inline]
fn first_max_by<F: Fn(&Block) -> u64>(blocks: &[Block], key: F) -> usize {
    let mut max_value = 0;
    let mut max_index = 0;
    let mut index = 0;
    while index < blocks.len() {
        let value = key(&blocks[index]);
        if index == 0 || value > max_value {
            max_value = value;
            max_index = index;
        }
        index += 1;
    }
    max_index
}

/// Evicts the block touched longest ago
#[derive(Debug, Default, Clone, Copy)]
pub struct LeastRecentlyUsed;

impl ReplacementPolicy for LeastRecentlyUsed {
    fn select_victim<R: Rng + ?Sized>(&self, blocks: &[Block], _rng: &mut R) -> usize {
        first_min_by(blocks, |b| b.last_access)
    }
}

/// Evicts the block touched most recently
#[derive(Debug, Default, Clone, Copy)]
pub struct MostRecentlyUsed;

impl ReplacementPolicy for MostRecentlyUsed {
    fn select_victim<R: Rng + ?Sized>(&self, blocks: &[Block], _rng: &mut R) -> usize {
        first_max_by(blocks, |b| b.last_access)
    }
}

/// Evicts the block with the fewest touches
#[derive(Debug, Default, Clone, Copy)]
pub struct LeastFrequentlyUsed;

impl ReplacementPolicy for LeastFrequentlyUsed {
    fn select_victim<R: Rng + ?Sized>(&self, blocks: &[Block], _rng: &mut R) -> usize {
        first_min_by(blocks, |b| b.access_count)
    }
}

/// Evicts the oldest resident block. Touches don't affect the order.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstInFirstOut;

impl ReplacementPolicy for FirstInFirstOut {
    fn select_victim<R: Rng + ?Sized>(&self, blocks: &[Block], _rng: &mut R) -> usize {
        first_min_by(blocks, |b| b.insertion_time)
    }
}

/// Evicts a uniformly chosen resident block
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomReplacement;

impl ReplacementPolicy for RandomReplacement {
    fn select_victim<R: Rng + ?Sized>(&self, blocks: &[Block], rng: &mut R) -> usize {
        rng.gen_range(0..blocks.len())
    }
}

/// Enum for the five policies provided by the library
///
/// Explicitly branching on every policy lets the compiler see the concrete types and inline the
/// victim search, which matters as it runs on every miss that fills a full set.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Policy {
    #[default]
    #[serde(rename = "LRU", alias = "lru")]
    Lru,
    #[serde(rename = "MRU", alias = "mru")]
    Mru,
    #[serde(rename = "LFU", alias = "lfu")]
    Lfu,
    #[serde(rename = "FIFO", alias = "fifo")]
    Fifo,
    #[serde(rename = "Random", alias = "random")]
    Random,
}

impl Policy {
    /// Every policy, in the order they are usually listed
    pub const ALL: [Policy; 5] = [Policy::Lru, Policy::Lfu, Policy::Fifo, Policy::Mru, Policy::Random];

    pub fn name(&self) -> &'static str {
        match self {
            Policy::Lru => "LRU",
            Policy::Mru => "MRU",
            Policy::Lfu => "LFU",
            Policy::Fifo => "FIFO",
            Policy::Random => "Random",
        }
    }
}

impl ReplacementPolicy for Policy {
    fn select_victim<R: Rng + ?Sized>(&self, blocks: &[Block], rng: &mut R) -> usize {
        match self {
            Policy::Lru => LeastRecentlyUsed.select_victim(blocks, rng),
            Policy::Mru => MostRecentlyUsed.select_victim(blocks, rng),
            Policy::Lfu => LeastFrequentlyUsed.select_victim(blocks, rng),
            Policy::Fifo => FirstInFirstOut.select_victim(blocks, rng),
            Policy::Random => RandomReplacement.select_victim(blocks, rng),
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Policy {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Policy::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| SimError::Configuration(format!("unknown replacement policy `{s}`")))
    }
}
