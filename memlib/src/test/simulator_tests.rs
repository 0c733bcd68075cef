use std::error::Error;
use rand::rngs::StdRng;
use rand::SeedableRng;
use crate::config::HierarchyConfig;
use crate::patterns::{Pattern, PatternGenerator};
use crate::simulator::Simulator;
use crate::util::{workload_cases, CASE_REQUESTS};

#[test]
fn accumulates_across_calls() -> Result<(), Box<dyn Error>> {
    let config = HierarchyConfig::default();
    let mut simulator = Simulator::new(&config, StdRng::seed_from_u64(0))?;
    let generator = PatternGenerator::new(config.ram_bytes()?)?;
    let first = generator.sequential(100, 4);
    let (first_time, first_requests) = {
        let analyzer = simulator.simulate(first.iter().copied());
        (analyzer.total_time(), analyzer.num_requests())
    };
    assert_eq!(first_requests, 100);
    simulator.simulate(first.iter().copied());
    assert_eq!(simulator.num_requests(), 200);
    // The second pass over the same addresses only hits L1
    assert_eq!(simulator.total_time(), first_time + 100);
    Ok(())
}

#[test]
fn sequential_hits_within_each_block() -> Result<(), Box<dyn Error>> {
    let config = HierarchyConfig::default();
    let mut simulator = Simulator::new(&config, StdRng::seed_from_u64(0))?;
    let trace = PatternGenerator::new(config.ram_bytes()?)?.sequential(1000, 4);
    let report = simulator.simulate(trace).report(Pattern::Sequential.name());
    // 16 words per 64 byte block: one disk fetch then 15 L1 hits
    let l1 = &report.levels[0];
    assert_eq!(l1.hits, 1000 - 63);
    let disk = report.levels.last().ok_or("missing terminal store row")?;
    assert_eq!(disk.hits, 63);
    assert_eq!(report.requests, 1000);
    assert_eq!(report.workload, "Sequential");
    assert_eq!(report.amat, report.total_time as f64 / 1000.0);
    Ok(())
}

#[test]
fn every_workload_case_runs() -> Result<(), Box<dyn Error>> {
    let cases = workload_cases(0)?;
    assert_eq!(cases.len(), 15);
    for case in cases {
        assert_eq!(case.addresses.len(), CASE_REQUESTS);
        let mut simulator = Simulator::new(&case.config, StdRng::seed_from_u64(0))?;
        let report = simulator.simulate(case.addresses).report(case.name);
        assert_eq!(report.requests, CASE_REQUESTS as u64);
        let served: u64 = report.levels.iter().map(|r| r.hits).sum();
        // Every request is served by exactly one level
        assert_eq!(served, CASE_REQUESTS as u64);
    }
    Ok(())
}
