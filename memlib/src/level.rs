use std::collections::HashMap;
use std::num::NonZeroUsize;
use serde::Serialize;
use crate::config::{LevelConfig, FULLY_ASSOCIATIVE};
use crate::context::SimContext;
use crate::error::{Result, SimError};
use crate::replacement_policies::Policy;
use crate::set::Set;

/// The outcome of probing a level for an address
///
/// There are two kinds of miss. A probe reaching a set which exists but doesn't hold the tag is an
/// ordinary miss and is counted. A probe reaching a set index that has never been populated finds
/// no set at all; by default it is counted as neither a hit nor a miss. This keeps the reported
/// statistics compatible with the behaviour the model was built to reproduce, and is deliberate
/// rather than recommended. [`Level::count_absent_as_miss`] switches to counting it as a miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    Hit,
    Miss,
    /// No set has ever been created at the address's index
    Absent,
}

impl ProbeOutcome {
    pub fn is_hit(self) -> bool {
        self == ProbeOutcome::Hit
    }
}

/// Hit and miss counters of a level, with the derived rates as percentages
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LevelStats {
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
    pub miss_rate: f64,
}

/// One tier of the hierarchy
///
/// Sets are created lazily, only when the first block is admitted at their index, so large
/// levels like main memory and the terminal store cost nothing until they are used.
#[derive(Debug, Clone)]
pub struct Level {
    name: String,
    size_bytes: u64,
    block_size: u64,
    associativity: u64,
    access_time: u64,
    policy: Policy,
    num_sets: u64,
    set_capacity: NonZeroUsize,
    sets: HashMap<u64, Set>,
    hits: u64,
    misses: u64,
    absent_counts_as_miss: bool,
}

impl Level {
    /// Creates an empty level
    ///
    /// An associativity of [`FULLY_ASSOCIATIVE`] gives a single set holding every block of the
    /// level. Otherwise there are `size_bytes / (block_size * associativity)` sets, at least one.
    ///
    /// # Arguments
    ///
    /// * `name`: Reported in resolutions and statistics
    /// * `size_bytes`: Capacity of the level
    /// * `block_size`: Bytes per block, must be positive
    /// * `associativity`: Blocks per set, or [`FULLY_ASSOCIATIVE`]
    /// * `access_time`: Latency added whenever the level is consulted
    /// * `policy`: The eviction rule of every set in the level
    ///
    /// returns: Result<Level, SimError>
    pub fn new(name: impl Into<String>, size_bytes: u64, block_size: u64, associativity: u64, access_time: u64, policy: Policy) -> Result<Self> {
        let name = name.into();
        let (num_sets, associativity, set_capacity) = set_geometry(&name, size_bytes, block_size, associativity)?;
        Ok(Self {
            name,
            size_bytes,
            block_size,
            associativity,
            access_time,
            policy,
            num_sets,
            set_capacity,
            sets: HashMap::new(),
            hits: 0,
            misses: 0,
            absent_counts_as_miss: false,
        })
    }

    /// Creates a level from a validated configuration entry
    pub fn from_config(config: &LevelConfig, block_size: u64) -> Result<Self> {
        Self::new(config.name, config.size_bytes, block_size, config.associativity, config.access_time, config.policy)
    }

    /// Whether probes reaching a never-populated set index are counted as misses
    pub fn count_absent_as_miss(mut self, enabled: bool) -> Self {
        self.absent_counts_as_miss = enabled;
        self
    }

    /// Splits an address into a set index and a tag
    ///
    /// The block number is the address divided by the block size; its remainder modulo the
    /// number of sets selects the set and the quotient is the tag.
    ///
    /// returns: (index, tag)
    #[inline]
    pub fn decompose(&self, address: u64) -> (u64, u64) {
        let block_number = address / self.block_size;
        (block_number % self.num_sets, block_number / self.num_sets)
    }

    /// Looks the address up, updating the counters
    ///
    /// See [`ProbeOutcome`] for how a never-populated index is treated.
    pub fn probe(&mut self, address: u64, ctx: &mut SimContext) -> ProbeOutcome {
        let (index, tag) = self.decompose(address);
        let Some(set) = self.sets.get_mut(&index) else {
            if self.absent_counts_as_miss {
                self.misses += 1;
            }
            return ProbeOutcome::Absent;
        };
        if set.touch(tag, ctx) {
            self.hits += 1;
            ProbeOutcome::Hit
        } else {
            self.misses += 1;
            ProbeOutcome::Miss
        }
    }

    /// Makes the address resident, creating its set on first use
    ///
    /// Never touches the counters.
    pub fn warm(&mut self, address: u64, ctx: &mut SimContext) {
        let (index, tag) = self.decompose(address);
        let capacity = self.set_capacity;
        let policy = self.policy;
        let set = self.sets.entry(index).or_insert_with(|| Set::with_capacity(capacity, policy));
        if let Some(victim) = set.admit(tag, ctx) {
            tracing::trace!(level = %self.name, index, victim, %policy, "evicted block");
        }
    }

    /// Whether the address is resident, without touching any state
    pub fn contains(&self, address: u64) -> bool {
        let (index, tag) = self.decompose(address);
        self.sets.get(&index).map_or(false, |set| set.contains(tag))
    }

    pub fn stats(&self) -> LevelStats {
        let total = self.hits + self.misses;
        let (hit_rate, miss_rate) = if total > 0 {
            (self.hits as f64 / total as f64 * 100.0, self.misses as f64 / total as f64 * 100.0)
        } else {
            (0.0, 0.0)
        };
        LevelStats {
            hits: self.hits,
            misses: self.misses,
            hit_rate,
            miss_rate,
        }
    }

    /// Counts a request which reached this level and was served without a probe
    pub(crate) fn record_hit(&mut self) {
        self.hits += 1;
    }

    /// The set at an index, if one has been created
    pub fn set(&self, index: u64) -> Option<&Set> {
        self.sets.get(&index)
    }

    /// Number of set indices which have been populated
    pub fn populated_sets(&self) -> usize {
        self.sets.len()
    }

    /// Total number of resident blocks across all sets
    pub fn resident_blocks(&self) -> usize {
        self.sets.values().map(Set::len).sum()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    pub fn block_size(&self) -> u64 {
        self.block_size
    }

    /// The effective associativity, i.e. the capacity of each set
    pub fn associativity(&self) -> u64 {
        self.associativity
    }

    pub fn access_time(&self) -> u64 {
        self.access_time
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    pub fn num_sets(&self) -> u64 {
        self.num_sets
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}

/// Works out the number of sets and blocks per set of a level, rejecting geometries that can't
/// hold a block or whose set size overflows
///
/// returns: (number of sets, associativity, set capacity)
pub(crate) fn set_geometry(name: &str, size_bytes: u64, block_size: u64, associativity: u64) -> Result<(u64, u64, NonZeroUsize)> {
    if block_size == 0 {
        return Err(SimError::Configuration(format!("{name}: block size must be positive")));
    }
    let (num_sets, associativity) = if associativity == FULLY_ASSOCIATIVE {
        (1, size_bytes / block_size)
    } else {
        let set_bytes = block_size.checked_mul(associativity).ok_or_else(|| {
            SimError::Configuration(format!("{name}: associativity {associativity} overflows the set size"))
        })?;
        ((size_bytes / set_bytes).max(1), associativity)
    };
    if associativity == 0 {
        return Err(SimError::Configuration(format!(
            "{name}: {size_bytes} bytes can't hold a single {block_size} byte block"
        )));
    }
    let capacity = usize::try_from(associativity)
        .ok()
        .and_then(NonZeroUsize::new)
        .ok_or_else(|| SimError::Configuration(format!("{name}: associativity {associativity} is too large")))?;
    Ok((num_sets, associativity, capacity))
}
