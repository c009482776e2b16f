#[macro_use]
extern crate tracing;

use std::env;
use std::io::{self, Write as _};
use std::path::PathBuf;

use clap::Parser;
use kinetic::cli::{Cli, SimulateArgs, Sub};
use kinetic::simulate::{simulate, snap_curve, Simulation};
use kinetic_config::Config;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let directives = env::var("RUST_LOG").unwrap_or_else(|_| "kinetic=debug,info".to_owned());
    let env_filter = EnvFilter::builder().parse_lossy(directives);
    tracing_subscriber::fmt()
        .compact()
        .with_writer(io::stderr)
        .with_env_filter(env_filter)
        .init();

    let cli = Cli::parse();

    let _client = tracy_client::Client::start();

    let path = cli
        .config
        .or_else(|| env::var_os("KINETIC_CONFIG").map(PathBuf::from));

    let config = match &path {
        Some(path) => {
            debug!("loading config from {path:?}");
            // Debug formatting renders the full diagnostic with source snippets.
            Config::load(path).map_err(|err| format!("{err:?}"))?
        }
        None => Config::default(),
    };

    match cli.subcommand {
        Sub::Validate => {
            match path {
                Some(path) => info!("config at {path:?} is valid"),
                None => info!("no config file given, the built-in settings are valid"),
            }
            Ok(())
        }
        Sub::Simulate(args) => run_simulation(&config, args),
        Sub::SnapCurve { from, to, json } => {
            let curve = snap_curve(&config, from, to);

            let mut stdout = io::stdout().lock();
            if json {
                serde_json::to_writer(&mut stdout, &curve)?;
                writeln!(stdout)?;
            } else {
                for (ms, value) in curve.iter().enumerate() {
                    writeln!(stdout, "{ms:>5} {value:>12.4}")?;
                }
            }
            Ok(())
        }
    }
}

fn run_simulation(config: &Config, args: SimulateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let sim = Simulation {
        page: args.page,
        screen: args.screen,
        offset: args.offset,
        velocity: args.velocity,
    };
    let frames = simulate(config, &sim)?;

    let mut stdout = io::stdout().lock();
    if args.json {
        serde_json::to_writer_pretty(&mut stdout, &frames)?;
        writeln!(stdout)?;
        return Ok(());
    }

    for frame in &frames {
        writeln!(
            stdout,
            "{:>9.2} ms  x {:>10.2} {:<15}  y {:>10.2} {:<15}",
            frame.time_ms,
            frame.offset.x,
            format!("{:?}", frame.x),
            frame.offset.y,
            format!("{:?}", frame.y),
        )?;
    }

    Ok(())
}
