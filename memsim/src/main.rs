use std::fs::File;
use std::io::BufReader;
use std::time::Instant;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;
use memlib::config::HierarchyConfig;
use memlib::io::{get_reader, read_trace};
use memlib::patterns::{Pattern, PatternGenerator};
use memlib::simulator::Simulator;

#[cfg(debug_assertions)]
const DEBUG_DEFAULT: bool = true;

#[cfg(not(debug_assertions))]
const DEBUG_DEFAULT: bool = false;

#[derive(Parser, Debug)]
#[command(about = String::from("Memory hierarchy simulator: replacement policy and access pattern versus latency"))]
struct Args {
    /// JSON hierarchy configuration. Built-in defaults are used when omitted
    #[arg(short, long)]
    config: Option<String>,

    /// Synthetic workload: Sequential, Random or "Locality (Real)"
    #[arg(long, default_value_t = Pattern::Locality)]
    pattern: Pattern,

    /// Number of synthetic requests
    #[arg(short = 'n', long, default_value_t = 5000)]
    requests: usize,

    /// Byte distance between sequential requests
    #[arg(long, default_value_t = memlib::patterns::DEFAULT_STRIDE)]
    stride: u64,

    /// Seed for workload generation and random eviction
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// Replay a trace file, one address per line, instead of a synthetic pattern
    #[arg(short, long)]
    trace: Option<String>,

    #[arg(short, long)]
    performance: bool,

    #[arg(short, long, default_value_t = DEBUG_DEFAULT)]
    debug: bool,
}

fn init_logging(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), String> {
    let start = Instant::now();
    let args = Args::parse();
    init_logging(args.debug);
    let config = match &args.config {
        Some(path) => {
            let config_file = File::open(path).map_err(|e| format!("Couldn't open the config file at path {path}: {e}"))?;
            HierarchyConfig::from_reader(BufReader::new(config_file)).map_err(|e| format!("Couldn't parse the config file: {e}"))?
        }
        None => HierarchyConfig::default(),
    };
    let mut rng = StdRng::seed_from_u64(args.seed);
    let (workload, addresses) = match &args.trace {
        Some(path) => {
            let trace_file = File::open(path).map_err(|e| format!("Couldn't open the trace file at path {path}: {e}"))?;
            let trace_reader = get_reader(trace_file).map_err(|e| format!("Couldn't read the trace file: {e}"))?;
            (path.clone(), read_trace(trace_reader).map_err(|e| e.to_string())?)
        }
        None => {
            let max_address = config.ram_bytes().map_err(|e| e.to_string())?;
            let generator = PatternGenerator::new(max_address).map_err(|e| e.to_string())?;
            let addresses = match args.pattern {
                Pattern::Sequential => generator.sequential(args.requests, args.stride),
                pattern => generator.generate(pattern, args.requests, &mut rng),
            };
            (args.pattern.to_string(), addresses)
        }
    };
    tracing::info!(%workload, requests = addresses.len(), policy = %config.policy, "starting simulation");
    // The generator's random stream is independent of the one used for eviction
    let eviction_rng = StdRng::seed_from_u64(args.seed.wrapping_add(1));
    let mut simulator = Simulator::new(&config, eviction_rng).map_err(|e| e.to_string())?;
    simulator.simulate(addresses);
    let report = simulator.report(workload);
    println!("{}", serde_json::to_string_pretty(&report).map_err(|e| format!("Couldn't serialise the output {e}"))?);
    if args.performance {
        let end = Instant::now();
        let simulation_time = simulator.get_execution_time();
        let total_time = end - start;
        println!("Simulation time: {}s", simulation_time.as_nanos() as f64 / 1e9);
        println!("Total execution time (includes workload generation, configuration, and output): {}s", total_time.as_nanos() as f64 / 1e9)
    }
    if args.debug {
        #[cfg(debug_assertions)]
        println!("Running the debug binary, debug mode is enabled by default. If benchmarking, do not use this binary, re-compile with the --release argument when using cargo run");
        println!("Parsed input configuration: {config:?}");
        let resident = simulator.hierarchy().resident_blocks();
        let formatted = resident
            .iter()
            .map(|(name, count)| format!("{name}: {count}"))
            .collect::<Vec<_>>()
            .join(", ");
        println!("Resident blocks by level: ({formatted})");
        println!("Total resident blocks: {}", resident.iter().map(|(_, count)| count).sum::<usize>())
    }
    Ok(())
}
