use std::fmt;
use std::str::FromStr;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use serde::{Deserialize, Serialize};
use crate::error::{Result, SimError};

/// Default distance between consecutive sequential addresses, one 32-bit word
pub const DEFAULT_STRIDE: u64 = 4;

/// Standard deviation, in bytes, of the locality pattern's offsets around its hotspot
pub const LOCALITY_SPREAD: f64 = 100.0;

/// Number of times the locality pattern moves its hotspot over a run
const HOTSPOT_MOVES: usize = 10;

/// The synthetic workloads the generator can produce
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pattern {
    Sequential,
    Random,
    #[default]
    #[serde(rename = "Locality (Real)", alias = "Locality")]
    Locality,
}

impl Pattern {
    pub const ALL: [Pattern; 3] = [Pattern::Locality, Pattern::Sequential, Pattern::Random];

    pub fn name(&self) -> &'static str {
        match self {
            Pattern::Sequential => "Sequential",
            Pattern::Random => "Random",
            Pattern::Locality => "Locality (Real)",
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Pattern {
    type Err = SimError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" => Ok(Pattern::Sequential),
            "random" => Ok(Pattern::Random),
            "locality (real)" | "locality" => Ok(Pattern::Locality),
            _ => Err(SimError::UnknownPattern(s.to_string())),
        }
    }
}

/// Produces address sequences over a bounded address space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternGenerator {
    max_address: u64,
}

impl PatternGenerator {
    /// Creates a generator over `[0, max_address]`. The address space must not be empty.
    pub fn new(max_address: u64) -> Result<Self> {
        if max_address == 0 {
            return Err(SimError::InvalidArgument("the address space must be positive".to_string()));
        }
        Ok(Self { max_address })
    }

    pub fn max_address(&self) -> u64 {
        self.max_address
    }

    /// Produces `n` addresses of a named pattern. Sequential uses [`DEFAULT_STRIDE`].
    pub fn generate<R: Rng + ?Sized>(&self, pattern: Pattern, n: usize, rng: &mut R) -> Vec<u64> {
        match pattern {
            Pattern::Sequential => self.sequential(n, DEFAULT_STRIDE),
            Pattern::Random => self.random(n, rng),
            Pattern::Locality => self.locality(n, rng),
        }
    }

    /// `n` addresses starting at 0, each `stride` bytes after the last, wrapping at the top of the
    /// address space
    pub fn sequential(&self, n: usize, stride: u64) -> Vec<u64> {
        let mut addresses = Vec::with_capacity(n);
        let mut current: u64 = 0;
        for _ in 0..n {
            addresses.push(current);
            // Widened so address spaces near u64::MAX can't overflow
            current = ((current as u128 + stride as u128) % self.max_address as u128) as u64;
        }
        addresses
    }

    /// `n` addresses drawn uniformly from `[0, max_address]`, bounds included
    pub fn random<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<u64> {
        (0..n).map(|_| rng.gen_range(0..=self.max_address)).collect()
    }

    /// `n` word-aligned addresses clustered around a hotspot which moves ten times over the run
    ///
    /// Each address is the hotspot plus a Gaussian offset, folded back into the address space and
    /// aligned down to 4 bytes. The hotspot is redrawn every `n / 10` requests, starting with the
    /// first; runs of fewer than ten requests redraw it every request.
    pub fn locality<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<u64> {
        let mut addresses = Vec::with_capacity(n);
        let chunk = (n / HOTSPOT_MOVES).max(1);
        let mut hotspot = rng.gen_range(0..=self.max_address);
        for i in 0..n {
            if i % chunk == 0 {
                hotspot = rng.gen_range(0..=self.max_address);
            }
            let z: f64 = StandardNormal.sample(rng);
            // Truncates toward zero
            let offset = (z * LOCALITY_SPREAD) as i64;
            let addr = (hotspot as i128 + offset as i128).unsigned_abs() % self.max_address as u128;
            let addr = addr as u64;
            addresses.push(addr - addr % 4);
        }
        addresses
    }
}
