//! Print the coefficient of `t^10` in the series of the built-in generating function,
//! or of a rational function given on the command line.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use genfunc::{
    domains::rational::Rational,
    extract::{
        SeriesCoefficientExtractor, DEFAULT_POWER, DEFAULT_VARIABLE, LITERAL_DENOMINATOR,
        LITERAL_NUMERATOR,
    },
};

/// Command-line arguments for genfunc
#[derive(Parser, Debug)]
#[command(name = "genfunc")]
#[command(about = "Exact coefficient of a power series of a rational generating function")]
#[command(version)]
struct Args {
    /// Numerator of the generating function
    #[arg(short, long, default_value = LITERAL_NUMERATOR, env = "GENFUNC_NUMERATOR")]
    numerator: String,

    /// Denominator of the generating function
    #[arg(short, long, default_value = LITERAL_DENOMINATOR, env = "GENFUNC_DENOMINATOR")]
    denominator: String,

    /// Expansion variable
    #[arg(short, long, default_value = DEFAULT_VARIABLE)]
    variable: String,

    /// Power of which the coefficient is printed
    #[arg(short = 'k', long, default_value_t = DEFAULT_POWER, env = "GENFUNC_POWER")]
    power: u32,

    /// Expansion point, an integer or fraction such as 1/2
    #[arg(short = 'a', long, default_value = "0", allow_hyphen_values = true)]
    point: Rational,

    /// Also print the truncated series
    #[arg(long)]
    show_series: bool,
}

fn main() -> ExitCode {
    // logs go to stderr so that stdout only holds the result
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    info!(
        "Expanding ({})/({}) in {} around {}",
        args.numerator, args.denominator, args.variable, args.point
    );

    let extractor =
        SeriesCoefficientExtractor::from_strings(&args.numerator, &args.denominator, &args.variable)
            .context("Failed to parse the generating function")?
            .with_point(args.point.clone())
            .with_power(args.power);

    let report = extractor
        .extract()
        .context("Failed to expand the generating function")?;
    println!("{}", report);

    if args.show_series {
        let series = extractor.series()?;
        println!("{}", series);
    }

    Ok(())
}
