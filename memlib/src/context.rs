use rand::rngs::StdRng;
use rand::SeedableRng;

/// State shared by every level of one engine: the logical clock and the eviction random source
///
/// The clock replaces wall-clock timestamps for recency and insertion ordering. It advances once
/// per touch or admission anywhere in the engine, so no two blocks ever share a timestamp.
///
/// The random source is only drawn from by the random replacement policy. It is owned here rather
/// than taken from a global so that a run can be reproduced from its seed.
#[derive(Debug, Clone)]
pub struct SimContext {
    time: u64,
    rng: StdRng,
}

impl SimContext {
    pub fn new(rng: StdRng) -> Self {
        Self { time: 0, rng }
    }

    /// Creates a context whose random source is seeded deterministically
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Advances the clock, returning the new logical time
    pub fn tick(&mut self) -> u64 {
        self.time += 1;
        self.time
    }

    /// The current logical time without advancing it
    pub fn now(&self) -> u64 {
        self.time
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}
