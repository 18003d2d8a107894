mod commands;
mod helpers;

use clap::Parser;
use pnmj_core::domain::PnmjError;

pub fn run_from_env() -> i32 {
    let args: Vec<String> = std::env::args().skip(1).collect();

    match run(args) {
        Ok(code) => code,
        Err(error) => {
            let pnmj_error = error.as_pnmj_error();
            eprintln!("{}", pnmj_error.diagnostic_line());
            if let Some(summary_line) = pnmj_error.fatal_exit_line() {
                eprintln!("{}", summary_line);
            }
            pnmj_error.exit_code()
        }
    }
}

pub fn run<I, S>(args: I) -> Result<i32, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let full_args = std::iter::once("pnmj-rs".to_string())
        .chain(args.into_iter().map(Into::into))
        .collect::<Vec<_>>();
    parse_and_dispatch(full_args)
}

fn parse_and_dispatch(args: Vec<String>) -> Result<i32, CliError> {
    match Cli::try_parse_from(&args) {
        Ok(cli) => {
            helpers::init_tracing(cli.verbose);
            dispatch_parsed(cli.command)
        }
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                Ok(0)
            }
            _ => Err(CliError::Usage(err.to_string())),
        },
    }
}

#[derive(Parser)]
#[command(
    name = "pnmj-rs",
    version,
    about = "Fourier coefficients of fully-normalized associated Legendre functions"
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(clap::Subcommand)]
enum CliCommand {
    /// Build a coefficient table and optionally export it as JSON
    Build(commands::BuildArgs),
    /// Print the coefficients P_nmj of one (n, m) pair
    Coeff(commands::CoeffArgs),
    /// Evaluate Pbar_nm at a colatitude from its Fourier series
    Eval(commands::EvalArgs),
    /// Cross-check a table against the point-wise recursion
    Verify(commands::VerifyArgs),
}

fn dispatch_parsed(command: CliCommand) -> Result<i32, CliError> {
    match command {
        CliCommand::Build(args) => commands::run_build_command(args),
        CliCommand::Coeff(args) => commands::run_coeff_command(args),
        CliCommand::Eval(args) => commands::run_eval_command(args),
        CliCommand::Verify(args) => commands::run_verify_command(args),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Compute(PnmjError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CliError {
    pub(crate) fn compute(error: impl Into<PnmjError>) -> Self {
        Self::Compute(error.into())
    }

    fn as_pnmj_error(&self) -> PnmjError {
        match self {
            Self::Usage(message) => PnmjError::invalid_argument("INPUT.CLI_USAGE", message.clone()),
            Self::Compute(error) => error.clone(),
            Self::Internal(error) => PnmjError::io_system("IO.CLI", format!("{error:#}")),
        }
    }
}
