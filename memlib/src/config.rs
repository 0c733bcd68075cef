use std::io::Read;
use serde::{Deserialize, Serialize};
use crate::error::{Result, SimError};
use crate::level::set_geometry;
use crate::replacement_policies::Policy;

/// Associativity value meaning "fully associative": one set holding every block of the level
pub const FULLY_ASSOCIATIVE: u64 = 0;

/// Associativity used for main memory, which is modelled as an ordinary level
pub const MAIN_MEMORY_ASSOCIATIVITY: u64 = 8;

const MIB: u64 = 1024 * 1024;
const GIB: u64 = 1024 * MIB;

/// The configuration record used to build a hierarchy
///
/// Field names match the JSON input. Missing fields fall back to [`HierarchyConfig::default`].
/// Sizes of the cache levels are in bytes, `ram_size` is in MiB and `disk_size` in GiB. Access
/// times are in nanoseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HierarchyConfig {
    /// Eviction rule for every cache level and main memory. The terminal store always uses FIFO
    pub policy: Policy,
    pub block_size: u64,

    pub l1_size: u64,
    pub l1_assoc: u64,
    pub l1_time: u64,

    pub l2_enabled: bool,
    pub l2_size: u64,
    pub l2_assoc: u64,
    pub l2_time: u64,

    pub l3_enabled: bool,
    pub l3_size: u64,
    pub l3_assoc: u64,
    pub l3_time: u64,

    pub ram_size: u64,
    pub ram_time: u64,

    pub disk_size: u64,
    pub disk_time: u64,

    /// Whether probing a set index which has never been populated counts as a miss.
    ///
    /// Off by default, which keeps such probes out of both counters. Turning it on changes the
    /// reported rates.
    pub absent_index_misses: bool,
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        Self {
            policy: Policy::default(),
            block_size: 64,
            l1_size: 32 * 1024,
            l1_assoc: 4,
            l1_time: 1,
            l2_enabled: true,
            l2_size: 256 * 1024,
            l2_assoc: 8,
            l2_time: 5,
            l3_enabled: true,
            l3_size: 2 * MIB,
            l3_assoc: 16,
            l3_time: 15,
            ram_size: 1024,
            ram_time: 100,
            disk_size: 500,
            disk_time: 10_000_000,
            absent_index_misses: false,
        }
    }
}

/// The geometry of one level after validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelConfig {
    pub name: &'static str,
    pub size_bytes: u64,
    pub associativity: u64,
    pub access_time: u64,
    pub policy: Policy,
}

impl HierarchyConfig {
    /// Parses and validates a JSON configuration
    pub fn from_json(input: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| SimError::Configuration(format!("couldn't parse the configuration: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a JSON configuration from a reader, usually a file
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let config: Self = serde_json::from_reader(reader)
            .map_err(|e| SimError::Configuration(format!("couldn't parse the configuration: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Main memory capacity in bytes
    pub fn ram_bytes(&self) -> Result<u64> {
        self.ram_size
            .checked_mul(MIB)
            .ok_or_else(|| SimError::Configuration(format!("ram_size of {} MiB overflows the address space", self.ram_size)))
    }

    /// Terminal store capacity in bytes
    pub fn disk_bytes(&self) -> Result<u64> {
        self.disk_size
            .checked_mul(GIB)
            .ok_or_else(|| SimError::Configuration(format!("disk_size of {} GiB overflows the address space", self.disk_size)))
    }

    /// Checks every field, failing on the first problem found
    pub fn validate(&self) -> Result<()> {
        self.levels()?;
        self.terminal_store()?;
        Ok(())
    }

    /// The validated geometry of every level, fast to slow, excluding the terminal store
    pub fn levels(&self) -> Result<Vec<LevelConfig>> {
        if self.block_size == 0 {
            return Err(SimError::Configuration("block_size must be positive".to_string()));
        }
        let mut levels = vec![LevelConfig {
            name: "L1 Cache",
            size_bytes: self.l1_size,
            associativity: self.l1_assoc,
            access_time: self.l1_time,
            policy: self.policy,
        }];
        if self.l2_enabled {
            levels.push(LevelConfig {
                name: "L2 Cache",
                size_bytes: self.l2_size,
                associativity: self.l2_assoc,
                access_time: self.l2_time,
                policy: self.policy,
            });
        }
        if self.l3_enabled {
            levels.push(LevelConfig {
                name: "L3 Cache",
                size_bytes: self.l3_size,
                associativity: self.l3_assoc,
                access_time: self.l3_time,
                policy: self.policy,
            });
        }
        levels.push(LevelConfig {
            name: "Main Memory (RAM)",
            size_bytes: self.ram_bytes()?,
            associativity: MAIN_MEMORY_ASSOCIATIVITY,
            access_time: self.ram_time,
            policy: self.policy,
        });
        for level in &levels {
            self.check_level(level)?;
        }
        // A request reaching the terminal store pays every level's latency
        levels
            .iter()
            .map(|level| level.access_time)
            .chain([self.disk_time])
            .try_fold(0u64, u64::checked_add)
            .ok_or_else(|| SimError::Configuration("the sum of access times overflows".to_string()))?;
        Ok(levels)
    }

    /// The validated geometry of the terminal store
    pub fn terminal_store(&self) -> Result<LevelConfig> {
        let store = LevelConfig {
            name: "Secondary Memory (Disk)",
            size_bytes: self.disk_bytes()?,
            associativity: 1,
            access_time: self.disk_time,
            policy: Policy::Fifo,
        };
        self.check_level(&store)?;
        Ok(store)
    }

    fn check_level(&self, level: &LevelConfig) -> Result<()> {
        if level.size_bytes < self.block_size {
            return Err(SimError::Configuration(format!(
                "{} holds {} bytes, less than one {} byte block",
                level.name, level.size_bytes, self.block_size
            )));
        }
        set_geometry(level.name, level.size_bytes, self.block_size, level.associativity)?;
        Ok(())
    }
}
