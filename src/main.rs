use clap::Parser;
use crtcompute::compute::{compute_design, DesignInput, Output};
use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "crtcompute")]
#[command(about = "Power, clusters per arm or cluster size for a two-endpoint cluster randomized trial")]
struct Cli {
    /// Quantity to solve for: power, K or m
    mode: Output,

    /// JSON design file; the example design is used when omitted
    design: Option<PathBuf>,

    /// Print the report as JSON instead of a table
    #[arg(long)]
    json: bool,
}

/// Reference design: K = 15 clusters of m = 300 subjects per arm, 80% power
fn example_design(output: Output) -> DesignInput {
    let design = DesignInput::new(
        0.1,   // beta1
        0.1,   // beta2
        0.23,  // varY1
        0.25,  // varY2
        0.025, // rho01
        0.025, // rho02
        0.01,  // rho1
        0.05,  // rho2
    );
    match output {
        Output::Power => design.with_k(15.0).with_m(300.0),
        Output::Clusters => design.with_power(0.8).with_m(300.0),
        Output::ClusterSize => design.with_power(0.8).with_k(15.0),
    }
}

fn read_design(path: &Path) -> Result<DesignInput, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("reading {}: {e}", path.display()))?;
    serde_json::from_str(&contents).map_err(|e| format!("parsing {}: {e}", path.display()))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let input = match &cli.design {
        Some(path) => match read_design(path) {
            Ok(input) => input,
            Err(e) => {
                eprintln!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => {
            info!("no design file given; using the example design");
            example_design(cli.mode)
        }
    };

    match compute_design(cli.mode, &input) {
        Ok(report) if cli.json => match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("serializing report: {e}");
                return ExitCode::FAILURE;
            }
        },
        Ok(report) => print!("{report}"),
        Err(e) => {
            error!(%e, "design computation failed");
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}
