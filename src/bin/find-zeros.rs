use std::{fs::File, io::BufWriter, path::PathBuf, process::ExitCode};

use anyhow::Context;
use clap::Parser;
use durand_kerner::{filter::calculate_gaussian_zeros, report::ZerosReport, Precision};
use log::LevelFilter;
use simple_logger::SimpleLogger;

/// Compute the zeros of a filter transfer function in arbitrary precision
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
struct Settings {
    /// Filter type, only "gauss" is supported
    filter_type: String,

    /// Number of taps, odd, required by gauss
    #[arg(allow_negative_numbers = true)]
    taps: Option<i64>,

    /// Standard deviation, required by gauss
    #[arg(allow_negative_numbers = true)]
    sigma: Option<f64>,

    /// Output JSON file
    #[arg(short, long, default_value = "zeros.json")]
    output: PathBuf,

    /// Precision in decimal digits
    #[arg(long, default_value_t = durand_kerner::DEFAULT_DPS)]
    dps: u32,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, thiserror::Error, PartialEq)]
enum UsageError {
    #[error("unsupported filter type: {0}")]
    FilterType(String),

    #[error("the gauss filter needs taps and sigma")]
    MissingArguments,

    #[error("the number of taps must be odd and positive, got {0}")]
    Taps(i64),

    #[error("sigma must be a positive number, got {0}")]
    Sigma(f64),
}

/// The validated parameters of a gauss filter
fn gauss_parameters(settings: &Settings) -> Result<(usize, f64), UsageError> {
    if settings.filter_type != "gauss" {
        return Err(UsageError::FilterType(settings.filter_type.clone()));
    }
    let (Some(taps), Some(sigma)) = (settings.taps, settings.sigma) else {
        return Err(UsageError::MissingArguments);
    };
    if taps % 2 == 0 || taps < 0 {
        return Err(UsageError::Taps(taps));
    }
    if !(sigma > 0.0 && sigma.is_finite()) {
        return Err(UsageError::Sigma(sigma));
    }
    let taps = usize::try_from(taps).map_err(|_| UsageError::Taps(taps))?;
    Ok((taps, sigma))
}

/// Scientific notation with 15 decimals and a signed exponent of at least
/// two digits, `-3.093177936983431e-02`.
fn scientific(x: f64) -> String {
    let formatted = format!("{x:.15e}");
    let Some((mantissa, exponent)) = formatted.split_once('e') else {
        return formatted;
    };
    let (sign, digits) = exponent
        .strip_prefix('-')
        .map_or(('+', exponent), |digits| ('-', digits));
    format!("{mantissa}e{sign}{digits:0>2}")
}

const fn level_filter(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let settings = Settings::parse();

    SimpleLogger::new()
        .with_level(level_filter(settings.verbose))
        .init()?;

    let (taps, sigma) = match gauss_parameters(&settings) {
        Ok(parameters) => parameters,
        Err(e) => {
            eprintln!("Error: {e}");
            return Ok(ExitCode::FAILURE);
        }
    };
    let dps = settings.dps;

    log::info!("computing zeros {{taps: {taps}, sigma: {sigma}, dps: {dps}}}");
    let zeros = calculate_gaussian_zeros(taps, sigma, Precision::arbitrary(dps));

    println!("Gaussian filter zeros (taps: {taps}, sigma: {sigma:?}, precision: {dps} digits)");
    println!("Number of zeros: {}", zeros.len());
    println!();
    println!("Zeros (real, imag):");
    for (i, z) in zeros.iter().enumerate() {
        println!("  {}: {}, {}", i + 1, scientific(z.re), scientific(z.im));
    }

    let report = ZerosReport::gauss(taps, sigma, dps, &zeros);
    let file = File::create(&settings.output)
        .with_context(|| format!("could not create {}", settings.output.display()))?;
    report
        .write_json(BufWriter::new(file))
        .with_context(|| format!("could not write {}", settings.output.display()))?;

    println!();
    println!("Saved results to {}", settings.output.display());
    Ok(ExitCode::SUCCESS)
}
