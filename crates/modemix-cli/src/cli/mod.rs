mod commands;
mod logging;

use clap::Parser;
use modemix_core::domain::ModeMixError;

pub fn run_from_env() -> i32 {
    let args: Vec<String> = std::env::args().collect();

    match parse_and_dispatch(args) {
        Ok(code) => code,
        Err(error) => {
            let compatibility_error = error.as_mode_mix_error();
            eprintln!("{}", compatibility_error.diagnostic_line());
            eprintln!("{}", compatibility_error.fatal_exit_line());
            compatibility_error.exit_code()
        }
    }
}

fn parse_and_dispatch(args: Vec<String>) -> Result<i32, CliError> {
    match Cli::try_parse_from(&args) {
        Ok(cli) => {
            logging::init(cli.args.quiet)?;
            commands::run_compute_command(cli.args)
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
    name = "modemix",
    version,
    about = "Compute the mode-mixing matrix of a masked power spectrum"
)]
struct Cli {
    #[command(flatten)]
    args: commands::ComputeArgs,
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Compute(ModeMixError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CliError {
    fn as_mode_mix_error(&self) -> ModeMixError {
        match self {
            Self::Usage(message) => {
                ModeMixError::input_validation("INPUT.CLI_USAGE", message.trim_end().to_string())
            }
            Self::Compute(error) => error.clone(),
            Self::Internal(error) => ModeMixError::io_system("IO.CLI", format!("{error:#}")),
        }
    }
}
