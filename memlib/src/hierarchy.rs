use rand::rngs::StdRng;
use crate::config::HierarchyConfig;
use crate::context::SimContext;
use crate::error::{Result, SimError};
use crate::level::Level;

/// Where a request was served from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Position of the level in fast to slow order
    Level(usize),
    TerminalStore,
}

/// The result of resolving one address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// Sum of the access times of every level consulted
    pub elapsed: u64,
    pub source: Source,
}

/// An ordered chain of levels backed by a terminal store
///
/// The terminal store is capacity-unbounded in effect and is modelled as never missing: every
/// request that reaches it succeeds.
#[derive(Debug, Clone)]
pub struct Hierarchy {
    levels: Vec<Level>,
    terminal_store: Level,
    ctx: SimContext,
}

impl Hierarchy {
    /// Builds a hierarchy from a configuration record
    ///
    /// The whole configuration is validated before any level is constructed.
    ///
    /// # Arguments
    ///
    /// * `config`: The configuration, usually parsed from JSON
    /// * `rng`: Random source for the random replacement policy
    ///
    /// returns: Result<Hierarchy, SimError>
    pub fn new(config: &HierarchyConfig, rng: StdRng) -> Result<Self> {
        let level_configs = config.levels()?;
        let store_config = config.terminal_store()?;
        let levels = level_configs
            .iter()
            .map(|c| Level::from_config(c, config.block_size).map(|l| l.count_absent_as_miss(config.absent_index_misses)))
            .collect::<Result<Vec<_>>>()?;
        let terminal_store = Level::from_config(&store_config, config.block_size)?;
        Self::from_levels(levels, terminal_store, SimContext::new(rng))
    }

    /// Builds a hierarchy from levels constructed by hand
    ///
    /// `levels` are ordered fast to slow and may be empty, in which case every request is
    /// served by the terminal store. The access times of all levels and the store together must
    /// fit in a `u64`, so a single resolution never overflows.
    pub fn from_levels(levels: Vec<Level>, terminal_store: Level, ctx: SimContext) -> Result<Self> {
        if let Some(level) = levels.iter().find(|l| l.block_size() != terminal_store.block_size()) {
            return Err(SimError::Configuration(format!(
                "{} uses {} byte blocks but the terminal store uses {}",
                level.name(),
                level.block_size(),
                terminal_store.block_size()
            )));
        }
        levels
            .iter()
            .chain(std::iter::once(&terminal_store))
            .try_fold(0u64, |total, level| total.checked_add(level.access_time()))
            .ok_or_else(|| SimError::Configuration("the sum of access times overflows".to_string()))?;
        for level in levels.iter().chain(std::iter::once(&terminal_store)) {
            tracing::debug!(
                level = level.name(),
                size_bytes = level.size_bytes(),
                block_size = level.block_size(),
                associativity = level.associativity(),
                num_sets = level.num_sets(),
                access_time = level.access_time(),
                policy = %level.policy(),
                "built level"
            );
        }
        Ok(Self {
            levels,
            terminal_store,
            ctx,
        })
    }

    /// Resolves one address, returning the elapsed latency and where it was served from
    ///
    /// Levels are probed fast to slow, each adding its access time. A hit at level `i` pulls the
    /// block into every level faster than `i`, but not into `i` itself. If no level hits, the
    /// terminal store serves the request and the block is pulled into the store and every level.
    pub fn resolve(&mut self, address: u64) -> Resolution {
        let mut elapsed = 0;
        for i in 0..self.levels.len() {
            elapsed += self.levels[i].access_time();
            if self.levels[i].probe(address, &mut self.ctx).is_hit() {
                for level in &mut self.levels[..i] {
                    level.warm(address, &mut self.ctx);
                }
                tracing::trace!(address, elapsed, level = self.levels[i].name(), "resolved");
                return Resolution {
                    elapsed,
                    source: Source::Level(i),
                };
            }
        }
        elapsed += self.terminal_store.access_time();
        self.terminal_store.record_hit();
        self.terminal_store.warm(address, &mut self.ctx);
        for level in &mut self.levels {
            level.warm(address, &mut self.ctx);
        }
        tracing::trace!(address, elapsed, level = self.terminal_store.name(), "resolved");
        Resolution {
            elapsed,
            source: Source::TerminalStore,
        }
    }

    /// Name of the level a request was served from
    pub fn source_name(&self, source: Source) -> &str {
        match source {
            Source::Level(i) => self.levels[i].name(),
            Source::TerminalStore => self.terminal_store.name(),
        }
    }

    /// The levels, fast to slow, excluding the terminal store
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    /// Mutable access to the levels, for probing them directly
    pub fn levels_mut(&mut self) -> (&mut [Level], &mut SimContext) {
        (&mut self.levels, &mut self.ctx)
    }

    pub fn terminal_store(&self) -> &Level {
        &self.terminal_store
    }

    /// Mutable access to the terminal store, for probing it directly
    pub fn terminal_store_mut(&mut self) -> (&mut Level, &mut SimContext) {
        (&mut self.terminal_store, &mut self.ctx)
    }

    /// Resident block counts, one per level, with the terminal store last
    pub fn resident_blocks(&self) -> Vec<(&str, usize)> {
        self.levels
            .iter()
            .chain(std::iter::once(&self.terminal_store))
            .map(|l| (l.name(), l.resident_blocks()))
            .collect()
    }

    pub fn context(&self) -> &SimContext {
        &self.ctx
    }
}
