use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use euclid::{Point2D, Size2D};

use crate::geometry::{PagePoint, PageSize, PageSpace, PageVector, ScreenSize, ScreenSpace};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(subcommand_value_name = "SUBCOMMAND")]
#[command(subcommand_help_heading = "Subcommands")]
pub struct Cli {
    /// Path to config file (default: built-in settings).
    ///
    /// This can also be set with the `KINETIC_CONFIG` environment variable. If both are set, the
    /// command line argument takes precedence.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub subcommand: Sub,
}

#[derive(Subcommand)]
pub enum Sub {
    /// Fling a simulated viewport and print every frame until it comes to rest.
    Simulate(SimulateArgs),
    /// Validate the config file.
    Validate,
    /// Print the snap animation table, one value per millisecond.
    SnapCurve {
        /// Offset the snap starts from.
        #[arg(long, default_value_t = -50., allow_negative_numbers = true)]
        from: f64,
        /// Offset the snap ends at.
        #[arg(long, default_value_t = 0., allow_negative_numbers = true)]
        to: f64,
        /// Format output as JSON.
        #[arg(short, long)]
        json: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    /// Release velocity as X,Y, in page units per frame.
    #[arg(long, default_value = "0,30", value_parser = parse_vector, allow_hyphen_values = true)]
    pub velocity: PageVector,
    /// Page size as WIDTHxHEIGHT.
    #[arg(long, default_value = "1000x3000", value_parser = parse_size::<PageSpace>)]
    pub page: PageSize,
    /// Screen size as WIDTHxHEIGHT, in pixels.
    #[arg(long, default_value = "400x800", value_parser = parse_size::<ScreenSpace>)]
    pub screen: ScreenSize,
    /// Initial viewport origin as X,Y; may lie outside the page.
    #[arg(
        long,
        default_value = "0,0",
        value_parser = parse_point::<PageSpace>,
        allow_hyphen_values = true
    )]
    pub offset: PagePoint,
    /// Format output as JSON.
    #[arg(short, long)]
    pub json: bool,
}

fn parse_pair(s: &str, sep: char) -> Result<(f64, f64), String> {
    let (a, b) = s
        .split_once(sep)
        .ok_or_else(|| format!("expected two numbers separated by '{sep}'"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f64>()
            .map_err(|err| format!("invalid number {v:?}: {err}"))
            .and_then(|v| {
                if v.is_finite() {
                    Ok(v)
                } else {
                    Err(format!("{v} is not a finite number"))
                }
            })
    };
    Ok((parse(a)?, parse(b)?))
}

fn parse_point<U>(s: &str) -> Result<Point2D<f64, U>, String> {
    let (x, y) = parse_pair(s, ',')?;
    Ok(Point2D::new(x, y))
}

fn parse_vector(s: &str) -> Result<PageVector, String> {
    parse_point::<PageSpace>(s).map(|point| point.to_vector())
}

fn parse_size<U>(s: &str) -> Result<Size2D<f64, U>, String> {
    let (w, h) = parse_pair(s, 'x')?;
    if w < 0. || h < 0. {
        return Err(String::from("size cannot be negative"));
    }
    Ok(Size2D::new(w, h))
}
