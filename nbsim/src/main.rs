use nbsim::{bench_kernels, AnyScenario, LogSink, Scenario, ScenarioConfig};
use clap::Parser;
use anyhow::{Context, Result};
use log::{info, warn};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file, looked up in `scenarios/` unless it is an existing path
    #[arg(short, default_value = "sun_earth.yaml")]
    file_name: String,

    /// Time the force kernels instead of running a scenario
    #[arg(long)]
    bench: bool,

    /// Samples between progress lines
    #[arg(long, default_value_t = 50)]
    progress_every: usize,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let direct = PathBuf::from(file_name);
    let config_path = if direct.is_file() {
        direct
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
    };

    let file = File::open(&config_path)
        .with_context(|| format!("opening scenario {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg = ScenarioConfig::from_reader(reader)
        .with_context(|| format!("parsing scenario {}", config_path.display()))?;
    Ok(scenario_cfg)
}

fn simulate<const D: usize>(scenario: Scenario<D>, progress_every: usize) -> Result<()> {
    let p = &scenario.parameters;
    info!(
        "{}D scenario: {} bodies, stop_time = {:.6e} s, dt = {} s",
        D,
        scenario.system.body_count(),
        scenario.stop_time,
        p.dt
    );

    let p0 = scenario.system.total_momentum();
    let c0 = scenario.system.center_of_mass();
    let com_velocity = p0 / scenario.system.total_mass();
    let e0 = scenario.system.total_energy(p.g, p.eps2);

    let mut sink = LogSink::new(progress_every);
    let outcome = scenario.run(Some(&mut sink), None)?;

    for (i, b) in outcome.state.bodies.iter().enumerate() {
        info!(
            "body {}: x = {:?}, v = {:?}, {} samples",
            i,
            b.x.as_slice(),
            b.v.as_slice(),
            outcome.trajectories[i].len()
        );
    }

    let dp = (outcome.state.total_momentum() - p0).norm();
    let e1 = outcome.state.total_energy(p.g, p.eps2);
    info!("momentum drift |dp| = {:.3e}", dp);
    // centre of mass should move in a straight line at P / M
    let com_offset = outcome.state.center_of_mass() - (c0 + com_velocity * outcome.state.t);
    info!("centre of mass offset = {:.3e} m", com_offset.norm());
    info!("energy drift dE/E = {:.3e}", (e1 - e0) / e0.abs());

    if let Err(e) = outcome.ensure_finite() {
        warn!("{e}");
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if args.bench {
        bench_kernels();
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;

    match AnyScenario::from_config(&scenario_cfg)? {
        AnyScenario::Planar(scenario) => simulate(scenario, args.progress_every),
        AnyScenario::Spatial(scenario) => simulate(scenario, args.progress_every),
    }
}
