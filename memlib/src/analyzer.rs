use std::fmt;
use serde::{Serialize, Serializer};
use crate::hierarchy::Hierarchy;

/// The miss column of a row. The terminal store never misses, so its count is not applicable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissCount {
    Counted(u64),
    NotApplicable,
}

impl fmt::Display for MissCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissCount::Counted(n) => write!(f, "{n}"),
            MissCount::NotApplicable => f.write_str("N/A"),
        }
    }
}

impl Serialize for MissCount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MissCount::Counted(n) => serializer.serialize_u64(*n),
            MissCount::NotApplicable => serializer.serialize_str("N/A"),
        }
    }
}

/// One line of the statistics table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    pub name: String,
    pub hits: u64,
    pub misses: MissCount,
    /// Percentage
    pub hit_rate: f64,
    /// Percentage
    pub miss_rate: f64,
    /// Nanoseconds
    pub access_time: u64,
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} hits, {} misses, {:.2}% hit rate, {:.2}% miss rate, {} ns",
            self.name, self.hits, self.misses, self.hit_rate, self.miss_rate, self.access_time
        )
    }
}

/// Summary of a run. Can be serialised to the output format.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// What drove the run, a pattern name or a trace path
    pub workload: String,
    pub requests: u64,
    pub total_time: u64,
    pub amat: f64,
    pub levels: Vec<Row>,
}

/// A read-only view over a completed run
#[derive(Debug, Clone, Copy)]
pub struct Analyzer<'a> {
    hierarchy: &'a Hierarchy,
    total_time: u64,
    num_requests: u64,
}

impl<'a> Analyzer<'a> {
    /// # Arguments
    ///
    /// * `hierarchy`: The hierarchy after the run
    /// * `total_time`: Sum of the elapsed time of every resolution
    /// * `num_requests`: Number of resolutions
    pub fn new(hierarchy: &'a Hierarchy, total_time: u64, num_requests: u64) -> Self {
        Self {
            hierarchy,
            total_time,
            num_requests,
        }
    }

    /// Average memory access time, 0 for an empty run
    pub fn amat(&self) -> f64 {
        if self.num_requests == 0 {
            0.0
        } else {
            self.total_time as f64 / self.num_requests as f64
        }
    }

    /// One row per level, fast to slow, then one for the terminal store
    pub fn tabular_rows(&self) -> Vec<Row> {
        let mut rows: Vec<Row> = self
            .hierarchy
            .levels()
            .iter()
            .map(|level| {
                let stats = level.stats();
                Row {
                    name: level.name().to_string(),
                    hits: stats.hits,
                    misses: MissCount::Counted(stats.misses),
                    hit_rate: stats.hit_rate,
                    miss_rate: stats.miss_rate,
                    access_time: level.access_time(),
                }
            })
            .collect();
        let store = self.hierarchy.terminal_store();
        rows.push(Row {
            name: store.name().to_string(),
            hits: store.hits(),
            misses: MissCount::NotApplicable,
            hit_rate: 100.0,
            miss_rate: 0.0,
            access_time: store.access_time(),
        });
        rows
    }

    pub fn report(&self, workload: impl Into<String>) -> Report {
        Report {
            workload: workload.into(),
            requests: self.num_requests,
            total_time: self.total_time,
            amat: self.amat(),
            levels: self.tabular_rows(),
        }
    }

    pub fn total_time(&self) -> u64 {
        self.total_time
    }

    pub fn num_requests(&self) -> u64 {
        self.num_requests
    }
}
