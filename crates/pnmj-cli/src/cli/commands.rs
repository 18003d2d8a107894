use super::CliError;
use super::helpers::*;
use pnmj_core::PnmjOrdering;
use pnmj_core::common::{BuildConfig, load_build_config};
use pnmj_core::numerics::NumericTolerance;
use pnmj_core::numerics::legendre::{coefficient_count, direct_legendre, j_to_k};
use pnmj_core::table::{
    OrderWindow, PnmjBuildInput, TableAccessError, coefficient_row, harmonic_from_series,
    legendre_from_series, verify_against_direct,
};
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;

#[derive(clap::Args)]
pub(super) struct BuildArgs {
    /// Maximum degree N to build
    #[arg(long, required_unless_present = "config", conflicts_with = "config")]
    max_degree: Option<usize>,

    /// Coefficient memory ordering (mnj or mjn)
    #[arg(long, default_value = "mnj", conflicts_with = "config")]
    ordering: PnmjOrdering,

    /// Restrict the build to an order window, e.g. 0..=12
    #[arg(long, value_parser = parse_order_window, conflicts_with = "config")]
    orders: Option<OrderWindow>,

    /// Allocate room for degrees up to this value (defaults to --max-degree)
    #[arg(long, conflicts_with = "config")]
    capacity: Option<usize>,

    /// JSON build configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the table as JSON to this path
    #[arg(long)]
    output: Option<PathBuf>,
}

impl BuildArgs {
    fn into_config(self) -> Result<(BuildConfig, Option<PathBuf>), CliError> {
        let config = match (self.config, self.max_degree) {
            (Some(path), _) => load_build_config(&path).map_err(CliError::compute)?,
            (None, Some(max_degree)) => {
                let config = BuildConfig {
                    max_degree,
                    ordering: self.ordering,
                    orders: self.orders,
                    capacity: self.capacity,
                };
                config.validate().map_err(CliError::compute)?;
                config
            }
            (None, None) => {
                return Err(CliError::Usage(
                    "build requires --max-degree or --config".to_string(),
                ));
            }
        };
        Ok((config, self.output))
    }
}

#[derive(clap::Args)]
pub(super) struct CoeffArgs {
    /// Degree n
    #[arg(short = 'n', long)]
    degree: usize,

    /// Order m
    #[arg(short = 'm', long)]
    order: usize,

    /// Print only coefficient j
    #[arg(short = 'j', long)]
    index: Option<usize>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(clap::Args)]
pub(super) struct EvalArgs {
    /// Degree n
    #[arg(short = 'n', long)]
    degree: usize,

    /// Order m
    #[arg(short = 'm', long)]
    order: usize,

    /// Colatitude theta in radians
    #[arg(long, allow_negative_numbers = true)]
    colatitude: f64,

    /// Longitude lambda in radians; also prints Y_nm
    #[arg(long, allow_negative_numbers = true)]
    longitude: Option<f64>,
}

#[derive(clap::Args)]
pub(super) struct VerifyArgs {
    /// Maximum degree N to check
    #[arg(long, default_value_t = 60)]
    max_degree: usize,

    /// Number of colatitude samples in (0, pi)
    #[arg(long, default_value_t = 16)]
    samples: usize,

    /// Absolute tolerance
    #[arg(long, default_value_t = NumericTolerance::default().abs_tol)]
    abs_tol: f64,

    /// Relative tolerance
    #[arg(long, default_value_t = NumericTolerance::default().rel_tol)]
    rel_tol: f64,

    /// Coefficient memory ordering (mnj or mjn)
    #[arg(long, default_value = "mnj")]
    ordering: PnmjOrdering,

    /// JSON report output path
    #[arg(long)]
    report: Option<PathBuf>,
}

pub(super) fn run_build_command(args: BuildArgs) -> Result<i32, CliError> {
    let (config, output) = args.into_config()?;
    debug!(?config, "resolved build configuration");

    let (table, summary) =
        build_table(config.capacity(), config.ordering, config.build_input())?;
    println!("{}", render_build_summary(&table, &summary));

    if let Some(path) = output {
        write_json_artifact(&path, &table.export())?;
        println!("JSON table: {}", path.display());
    }
    Ok(0)
}

#[derive(Debug, Serialize)]
struct CoefficientRow {
    j: usize,
    k: usize,
    value: f64,
}

// Single-row commands; memory stays linear in n.
pub(super) fn run_coeff_command(args: CoeffArgs) -> Result<i32, CliError> {
    let series = coefficient_row(args.degree, args.order).map_err(CliError::compute)?;

    let indices: Vec<usize> = match args.index {
        Some(index) if index >= coefficient_count(args.degree) => {
            return Err(CliError::compute(TableAccessError::IndexOutOfRange {
                index,
                degree: args.degree,
                max_index: coefficient_count(args.degree) - 1,
            }));
        }
        Some(index) => vec![index],
        None => (0..coefficient_count(args.degree)).collect(),
    };
    let rows: Vec<CoefficientRow> = indices
        .into_iter()
        .map(|j| CoefficientRow {
            j,
            k: j_to_k(args.degree, j),
            value: series[j],
        })
        .collect();

    let basis = if args.order % 2 == 0 { "cos" } else { "sin" };
    if args.json {
        let document = serde_json::json!({
            "degree": args.degree,
            "order": args.order,
            "basis": basis,
            "coefficients": rows,
        });
        let rendered = serde_json::to_string_pretty(&document).map_err(anyhow::Error::from)?;
        println!("{rendered}");
    } else {
        println!("P(n={}, m={}) {basis} series", args.degree, args.order);
        for row in &rows {
            println!("  j={:<4} k={:<5} {:+.17e}", row.j, row.k, row.value);
        }
    }
    Ok(0)
}

pub(super) fn run_eval_command(args: EvalArgs) -> Result<i32, CliError> {
    if args.order > args.degree {
        return Err(CliError::Usage(format!(
            "order {} cannot be larger than degree {}",
            args.order, args.degree
        )));
    }

    let series = coefficient_row(args.degree, args.order).map_err(CliError::compute)?;
    let fourier = legendre_from_series(args.degree, args.order, &series, args.colatitude);
    let direct = direct_legendre(args.degree, args.order, args.colatitude);

    println!(
        "Pbar(n={}, m={}, theta={}) fourier={:+.17e} direct={:+.17e} abs_diff={:.3e}",
        args.degree,
        args.order,
        args.colatitude,
        fourier,
        direct,
        (fourier - direct).abs()
    );

    if let Some(longitude) = args.longitude {
        let harmonic =
            harmonic_from_series(args.degree, args.order, &series, args.colatitude, longitude);
        println!(
            "Y(lambda={}) = {:+.17e} {:+.17e}i",
            longitude, harmonic.re, harmonic.im
        );
    }
    Ok(0)
}

pub(super) fn run_verify_command(args: VerifyArgs) -> Result<i32, CliError> {
    if args.samples == 0 {
        return Err(CliError::Usage("--samples must be at least 1".to_string()));
    }

    let (table, _) = build_table(
        args.max_degree,
        args.ordering,
        PnmjBuildInput::new(args.max_degree),
    )?;
    let tolerance = NumericTolerance::new(args.abs_tol, args.rel_tol);
    let report = verify_against_direct(&table, args.max_degree, args.samples, tolerance)
        .map_err(CliError::compute)?;

    println!(
        "Verification status: {}",
        if report.passed() { "PASS" } else { "FAIL" }
    );
    println!(
        "Checked {} values (maxDegree={}, samples={}), failures={}",
        report.checked, report.max_degree, report.samples, report.failures
    );
    if let Some(worst) = report.worst {
        println!(
            "Worst: n={} m={} theta={:.6} abs_diff={:.3e}",
            worst.degree,
            worst.order,
            worst.colatitude,
            worst.abs_diff()
        );
    }

    if let Some(path) = &args.report {
        write_json_artifact(path, &report)?;
        println!("JSON report: {}", path.display());
    }

    if report.passed() { Ok(0) } else { Ok(1) }
}
