use std::time::{Duration, Instant};
use rand::rngs::StdRng;
use crate::analyzer::{Analyzer, Report};
use crate::config::HierarchyConfig;
use crate::error::Result;
use crate::hierarchy::Hierarchy;

/// The simulator feeds addresses to a hierarchy and accumulates the totals of the run.
///
/// It supports calling simulate multiple times, and will update the time taken to simulate and the
/// totals accordingly
#[derive(Debug)]
pub struct Simulator {
    hierarchy: Hierarchy,
    total_time: u64,
    num_requests: u64,
    simulation_time: Duration,
}

impl Simulator {
    /// Creates a new simulator for a given configuration
    ///
    /// # Arguments
    ///
    /// * `config`: A hierarchy configuration, usually resulting from parsing JSON
    /// * `rng`: Random source for the random replacement policy
    ///
    /// returns: Result<Simulator, SimError>
    pub fn new(config: &HierarchyConfig, rng: StdRng) -> Result<Self> {
        Ok(Self::from_hierarchy(Hierarchy::new(config, rng)?))
    }

    pub fn from_hierarchy(hierarchy: Hierarchy) -> Self {
        Self {
            hierarchy,
            total_time: 0,
            num_requests: 0,
            simulation_time: Duration::new(0, 0),
        }
    }

    /// Resolves every address in order, accumulating the elapsed latency
    ///
    /// The accumulated total saturates at `u64::MAX` rather than wrapping.
    ///
    /// returns: the analyzer over everything simulated so far
    pub fn simulate<I: IntoIterator<Item = u64>>(&mut self, addresses: I) -> Analyzer<'_> {
        let start = Instant::now();
        for address in addresses {
            self.total_time = self.total_time.saturating_add(self.hierarchy.resolve(address).elapsed);
            self.num_requests += 1;
        }
        self.simulation_time += start.elapsed();
        tracing::debug!(requests = self.num_requests, total_time = self.total_time, "simulation finished");
        self.analyzer()
    }

    pub fn analyzer(&self) -> Analyzer<'_> {
        Analyzer::new(&self.hierarchy, self.total_time, self.num_requests)
    }

    /// Summary of everything simulated so far
    pub fn report(&self, workload: impl Into<String>) -> Report {
        self.analyzer().report(workload)
    }

    /// Gets the wall-clock execution time for processing
    pub fn get_execution_time(&self) -> &Duration {
        &self.simulation_time
    }

    pub fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    pub fn total_time(&self) -> u64 {
        self.total_time
    }

    pub fn num_requests(&self) -> u64 {
        self.num_requests
    }
}
