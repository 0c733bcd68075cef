//! # MemLib
//!
//! Memlib is a library for simulating a multi-level memory hierarchy
//!
//! It models cache levels, main memory and a terminal secondary store as set-associative levels
//! with pluggable eviction policies, resolves addresses through them with inclusive warm-up, and
//! reports hit rates and the average memory access time of a run. Synthetic workloads are
//! provided by a pattern generator, and recorded traces can be replayed.
//!
//! The engine is single-threaded and does no I/O of its own. Its only nondeterminism is an
//! explicitly seeded random source, so every run can be reproduced.

/// Aggregated statistics of a completed run
pub mod analyzer;

/// Resident blocks and the metadata the replacement policies read
pub mod block;

/// Definitions for the JSON configuration record
pub mod config;

/// The logical clock and random source shared by one engine
pub mod context;

pub mod error;

/// The chain of levels and the resolution of single addresses
pub mod hierarchy;

/// Reading trace files
pub mod io;

/// A single tier of the hierarchy, with address decomposition and hit/miss counters
pub mod level;

/// Synthetic address sequences
pub mod patterns;

/// Contains the provided replacement policies, with a trait for implementing custom replacement
/// policies
pub mod replacement_policies;

/// A fixed-capacity set of blocks
pub mod set;

/// Contains the simulator used to drive a hierarchy with a sequence of addresses
pub mod simulator;

#[cfg(test)]
mod test;

/// Contains utilities for running tests and benchmarks.
pub mod util;

pub use error::{Result, SimError};
