// yokscore - write published minimum admission scores into the program catalog
//
// With no arguments this performs the 2025 run: Tablo 4 and Tablo 3 from
// backend/data/, catalog backend/data/turkey-universities-enhanced.json.

mod exit_codes;
mod report;
mod update;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use yokscore_recon::ReconError;

use exit_codes::{recon_exit_code, EXIT_SUCCESS};

#[derive(Parser)]
#[command(name = "yokscore")]
#[command(about = "Update catalog minimum scores from published score tables")]
#[command(version)]
#[command(after_help = "\
Examples:
  yokscore
  yokscore --dry-run --json | jq .summary
  yokscore --config yok2026.toml --report update-report.json
  RUST_LOG=info yokscore")]
struct Cli {
    /// TOML config naming the score tables and the catalog (built-in 2025 paths when omitted)
    #[arg(long, env = "YOKSCORE_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Reconcile and report without writing the catalog
    #[arg(long)]
    dry_run: bool,

    /// Print the JSON report to stdout (human summary moves to stderr)
    #[arg(long)]
    json: bool,

    /// Also write the JSON report to a file
    #[arg(long, value_name = "PATH")]
    report: Option<PathBuf>,

    /// Suppress the human summary lines
    #[arg(long, short = 'q')]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    let options = update::UpdateOptions {
        config: cli.config,
        dry_run: cli.dry_run,
        json: cli.json,
        report: cli.report,
        quiet: cli.quiet,
    };

    match update::cmd_update(options) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn new(code: u8, msg: impl Into<String>) -> Self {
        Self { code, message: msg.into(), hint: None }
    }

    /// Wrap an engine error. `io_code` is used for plain IO failures.
    pub fn recon(err: ReconError, io_code: u8) -> Self {
        let hint = match &err {
            ReconError::MissingColumn { .. } | ReconError::MissingHeader { .. } => Some(
                "column names are read from `header_row` (row 3 by default); see [columns] in the config"
                    .to_string(),
            ),
            ReconError::Workbook { .. } | ReconError::Io(_) => {
                Some("pass --config to point at other score tables or catalog".to_string())
            }
            _ => None,
        };
        Self {
            code: recon_exit_code(&err, io_code),
            message: err.to_string(),
            hint,
        }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
