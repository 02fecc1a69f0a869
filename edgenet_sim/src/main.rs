//! edgenet Simulator CLI
//!
//! Evolve nets over synthetic scenario images and report what they found.

use clap::Parser;
use edgenet_core::EvolutionConfig;
use edgenet_sim::scenarios::ScenarioId;
use edgenet_sim::{render_ascii, ScenarioResult, ScenarioRunner, SimError, SimExport};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

/// edgenet band-edge detection simulator
#[derive(Parser, Debug)]
#[command(name = "edgenet-sim")]
#[command(about = "Run band-edge detection scenarios for edgenet", long_about = None)]
struct Args {
    /// Master seed for determinism (0 = random from time)
    #[arg(short, long, default_value = "42")]
    seed: u64,

    /// Scenario to run (bands, step, uniform, gradient, noisy_bands, all)
    #[arg(short = 'S', long, default_value = "all")]
    scenario: String,

    /// Number of consecutive seeds to test (for CI mode)
    #[arg(long, default_value = "1")]
    seeds: usize,

    /// Image width in pixels
    #[arg(long, default_value = "64")]
    width: u32,

    /// Image height in pixels
    #[arg(long, default_value = "48")]
    height: u32,

    /// Number of generations (overrides the config file)
    #[arg(short, long)]
    generations: Option<u32>,

    /// Fraction of the height populated with nets, (0, 1)
    #[arg(long)]
    population_density: Option<f64>,

    /// Fraction of the width populated with nodes, (0, 1)
    #[arg(long)]
    node_density: Option<f64>,

    /// Fraction of new nets with a random resistance, [0, 1]
    #[arg(long)]
    mutation_rate: Option<f64>,

    /// Width of the selection band, [0, 1]
    #[arg(long)]
    selection_rate: Option<f64>,

    /// Reach of the resistance band below the strongest edge, [0, 1]
    #[arg(long)]
    sensitivity: Option<f64>,

    /// Vertical spread a net may have without penalty
    #[arg(long)]
    dispersion: Option<u32>,

    /// JSON file with an EvolutionConfig; flags override its values
    #[arg(short, long)]
    config: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// JSON output for CI parsing
    #[arg(long)]
    json: bool,

    /// Print each scenario image with the surviving nets drawn on it
    #[arg(long)]
    ascii: bool,

    /// Export per-generation data to a JSON file
    #[arg(long)]
    export: Option<String>,
}

/// Loads the config file, if any, and applies flag overrides.
fn load_config(args: &Args) -> Result<EvolutionConfig, SimError> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|e| SimError::io(path.as_str(), e))?;
            serde_json::from_str(&text).map_err(|source| SimError::Config {
                path: path.clone(),
                source,
            })?
        }
        None => EvolutionConfig::default(),
    };

    if let Some(generations) = args.generations {
        config.generation_count = generations;
    }
    if let Some(density) = args.population_density {
        config.population_density = density;
    }
    if let Some(density) = args.node_density {
        config.node_density = density;
    }
    if let Some(rate) = args.mutation_rate {
        config.mutation_rate = rate;
    }
    if let Some(rate) = args.selection_rate {
        config.selection_rate = rate;
    }
    if let Some(sensitivity) = args.sensitivity {
        config.sensitivity = sensitivity;
    }
    if let Some(dispersion) = args.dispersion {
        config.dispersion_allowed = dispersion;
    }

    config.validate()?;
    Ok(config)
}

fn parse_scenarios(name: &str) -> Result<Vec<ScenarioId>, SimError> {
    if name == "all" {
        return Ok(ScenarioId::all());
    }
    name.parse()
        .map(|scenario| vec![scenario])
        .map_err(SimError::UnknownScenario)
}

fn print_ascii(runner: &ScenarioRunner, result: &ScenarioResult) {
    let scene = runner.scenario_image(result.scenario);
    let nets = result.outcome.as_ref().map(|o| o.nets.as_slice()).unwrap_or(&[]);
    println!("{} (seed={}):", result.scenario.name(), result.seed);
    print!("{}", render_ascii(&scene.image, nets));
}

fn report(result: &ScenarioResult) {
    if result.passed {
        info!(
            "✓ {} (seed={}) PASSED | survivors={} best={:?} hits={}",
            result.scenario.name(),
            result.seed,
            result.survivors,
            result.best_fitness,
            result
                .boundary_hit_rate
                .map(|rate| format!("{:.0}%", rate * 100.0))
                .unwrap_or_else(|| "n/a".to_string())
        );
    } else {
        error!(
            "✗ {} (seed={}) FAILED: {}",
            result.scenario.name(),
            result.seed,
            result.failure_reason.as_deref().unwrap_or("unknown")
        );
    }
}

/// Runs the requested scenarios; returns whether all of them passed.
fn run(args: &Args) -> Result<bool, SimError> {
    let config = load_config(args)?;
    let scenarios = parse_scenarios(&args.scenario)?;

    // Determine base seed
    let base_seed = if args.seed == 0 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos() as u64)
            .unwrap_or(1)
    } else {
        args.seed
    };

    // Handle --export mode
    if let Some(export_path) = &args.export {
        if scenarios.len() > 1 || args.seeds > 1 {
            return Err(SimError::Usage(
                "--export only supports a single scenario and seed, not 'all'".to_string(),
            ));
        }

        let runner = ScenarioRunner::new(base_seed)
            .with_size(args.width, args.height)
            .with_config(config);
        let result = runner.run(scenarios[0]);
        SimExport::from_result(&result).write_to_file(export_path)?;
        info!("Exported {} generations to {}", result.reports.len(), export_path);

        report(&result);
        if args.ascii {
            print_ascii(&runner, &result);
        }
        return Ok(result.passed);
    }

    // Run simulations
    let mut all_results: Vec<ScenarioResult> = Vec::new();
    for seed_offset in 0..args.seeds {
        let seed = base_seed.wrapping_add(seed_offset as u64);
        let runner = ScenarioRunner::new(seed)
            .with_size(args.width, args.height)
            .with_config(config.clone());

        for scenario in &scenarios {
            let result = runner.run(*scenario);
            if !args.json {
                report(&result);
                if args.ascii {
                    print_ascii(&runner, &result);
                }
            }
            all_results.push(result);
        }
    }

    // Summary
    let total = all_results.len();
    let failed_count = all_results.iter().filter(|r| !r.passed).count();
    let passed = total - failed_count;

    if args.json {
        // JSON output for CI parsing
        let summary = serde_json::json!({
            "total": total,
            "passed": passed,
            "failed": failed_count,
            "results": all_results.iter().map(|r| {
                serde_json::json!({
                    "scenario": r.scenario.name(),
                    "seed": r.seed,
                    "passed": r.passed,
                    "generations": r.generations,
                    "survivors": r.survivors,
                    "best_fitness": r.best_fitness,
                    "boundary_hit_rate": r.boundary_hit_rate,
                    "failure_reason": r.failure_reason,
                })
            }).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        info!("");
        info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

        if failed_count == 0 {
            info!("✅ All {} scenario runs passed!", total);
        } else {
            error!("❌ {}/{} scenario runs failed!", failed_count, total);

            // List failed seeds
            for result in all_results.iter().filter(|r| !r.passed) {
                error!(
                    "  - {} seed={}: {}",
                    result.scenario.name(),
                    result.seed,
                    result.failure_reason.as_deref().unwrap_or("unknown")
                );
            }
        }
    }

    Ok(failed_count == 0)
}

fn main() {
    let args = Args::parse();

    // Initialize logging; stdout is reserved for the summary and --ascii
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("Warning: a tracing subscriber was already installed");
    }

    if !args.json {
        info!("edgenet Simulator v{}", env!("CARGO_PKG_VERSION"));
        info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    }

    // Exit with proper code for CI
    match run(&args) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    }
}
