use rand::rngs::StdRng;
use rand::SeedableRng;
use crate::config::HierarchyConfig;
use crate::error::Result;
use crate::patterns::{Pattern, PatternGenerator};
use crate::replacement_policies::Policy;

/// Requests per workload case, the default of the interactive front end
pub const CASE_REQUESTS: usize = 5000;

/// A policy and pattern combination, with its address trace generated up front
pub struct WorkloadCase {
    pub name: String,
    pub config: HierarchyConfig,
    pub addresses: Vec<u64>,
}

/// Every policy crossed with every pattern on the default hierarchy
///
/// Traces are generated from a fixed seed, so every call produces the same cases.
pub fn workload_cases(seed: u64) -> Result<Vec<WorkloadCase>> {
    let mut out = Vec::new();
    for policy in Policy::ALL {
        let config = HierarchyConfig {
            policy,
            ..HierarchyConfig::default()
        };
        let generator = PatternGenerator::new(config.ram_bytes()?)?;
        for pattern in Pattern::ALL {
            let mut rng = StdRng::seed_from_u64(seed);
            out.push(WorkloadCase {
                name: format!("{policy}/{pattern}"),
                config: config.clone(),
                addresses: generator.generate(pattern, CASE_REQUESTS, &mut rng),
            });
        }
    }
    Ok(out)
}
