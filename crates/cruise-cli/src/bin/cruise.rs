use anyhow::{Context, Result};
use clap::Parser;
use cruise_cli::{telemetry, write_atomic, Config, Report};
use cruise_core::{random, CostModel, CostRandom, Cruise, CruiseParameters, SweepOutcome};
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON cost model; a random model is generated when omitted
    #[arg(long)]
    model: Option<PathBuf>,

    /// Number of waypoints of the random model
    #[arg(long, default_value_t = random::N_D)]
    n_d: usize,

    /// Number of heights of the random model
    #[arg(long, default_value_t = random::N_H)]
    n_h: usize,

    /// Number of speeds of the random model
    #[arg(long, default_value_t = random::N_S)]
    n_s: usize,

    /// Seed of the random model
    #[arg(long)]
    seed: Option<u64>,

    /// Speed-change lockout, in waypoints (default: $CRUISE_BACKOFF or 9)
    #[arg(long)]
    backoff: Option<usize>,

    /// Pareto points kept per state (default: $CRUISE_PARETO_MAX or 30)
    #[arg(long)]
    pareto_max: Option<usize>,

    /// Initial energy budget (default: $CRUISE_W0 or 26000)
    #[arg(long)]
    w0: Option<f64>,

    /// Initial time budget (default: $CRUISE_T0 or 26000)
    #[arg(long)]
    t0: Option<f64>,

    /// Write the JSON report here
    #[arg(long)]
    out: Option<PathBuf>,

    /// Write the cost model used as JSON here
    #[arg(long)]
    dump_model: Option<PathBuf>,

    /// Replace existing output files
    #[arg(long)]
    overwrite: bool,
}

fn load_model(args: &Args) -> Result<CostModel> {
    if let Some(path) = &args.model {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        return CostModel::from_json(&json).with_context(|| format!("loading {}", path.display()));
    }
    let mut builder = CostRandom::new().n_d(args.n_d).n_h(args.n_h).n_s(args.n_s);
    if let Some(seed) = args.seed {
        builder = builder.seed(seed);
    }
    Ok(builder.build()?)
}

fn main() -> Result<()> {
    telemetry::init();

    let args = Args::parse();
    let config = Config::from_env();
    let parameters = CruiseParameters {
        backoff: args.backoff.unwrap_or(config.backoff),
        pareto_max: args.pareto_max.unwrap_or(config.pareto_max),
    };
    let budget = (args.w0.unwrap_or(config.w0), args.t0.unwrap_or(config.t0));

    let model = load_model(&args)?;
    tracing::info!(
        "Cost model: {} waypoints, {} heights, {} speeds",
        model.n_d(),
        model.n_h(),
        model.n_s()
    );

    if let Some(path) = &args.dump_model {
        if path.exists() && !args.overwrite {
            println!(
                "File {} already exists! Use --overwrite to overwrite.",
                path.display()
            );
        } else {
            let json = model.to_json()?;
            write_atomic(path, |writer| Ok(writer.write_all(json.as_bytes())?))?;
        }
    }

    let cruise = Cruise::new(model, parameters)?;
    let outcome = cruise.compute_single(budget.0, budget.1)?;

    match &outcome {
        SweepOutcome::Feasible(trajectories) => {
            let (energy, time) = trajectories.front();
            println!("Pareto front: {} trajectories", trajectories.len());
            if let (Some(w), Some(t)) = (energy.first(), time.first()) {
                println!("Weight optimal: weight {w:.2}, time {t:.2}");
            }
            if let (Some(w), Some(t)) = (energy.last(), time.last()) {
                println!("Time optimal:   weight {w:.2}, time {t:.2}");
            }
        }
        SweepOutcome::Infeasible => {
            println!("No feasible trajectory for budget {:?}", budget);
        }
    }

    if let Some(path) = &args.out {
        let report = Report::new(cruise.model(), parameters, budget, &outcome);
        if report.save(path, args.overwrite)? {
            println!("Report written to {}", path.display());
        } else {
            println!(
                "File {} already exists! Use --overwrite to overwrite.",
                path.display()
            );
        }
    }

    Ok(())
}
