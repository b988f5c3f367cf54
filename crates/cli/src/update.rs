//! The update run: load tables and catalog, reconcile, write back.

use std::path::{Path, PathBuf};

use yokscore_io::catalog;
use yokscore_recon::{reconcile, MatchRules, ReconConfig};

use crate::exit_codes::{
    EXIT_CATALOG, EXIT_CONFIG, EXIT_ERROR, EXIT_TABLE, EXIT_USAGE, EXIT_WRITE,
};
use crate::report::{skipped_line, summary_line, RunReport};
use crate::CliError;

pub struct UpdateOptions {
    pub config: Option<PathBuf>,
    pub dry_run: bool,
    pub json: bool,
    pub report: Option<PathBuf>,
    pub quiet: bool,
}

impl UpdateOptions {
    /// Human lines go to stdout, or stderr when stdout carries JSON.
    fn say(&self, line: &str) {
        if self.quiet {
            return;
        }
        if self.json {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
    }
}

pub fn cmd_update(opts: UpdateOptions) -> Result<(), CliError> {
    let config = match &opts.config {
        Some(path) => ReconConfig::load(path).map_err(|e| {
            CliError::recon(e, EXIT_CONFIG).with_hint(format!("config file: {}", path.display()))
        })?,
        None => {
            let config = ReconConfig::default();
            config.validate().map_err(|e| CliError::recon(e, EXIT_CONFIG))?;
            config
        }
    };

    if let Some(report) = &opts.report {
        if same_file(report, &config.catalog) {
            return Err(CliError::new(
                EXIT_USAGE,
                format!("--report would overwrite the catalog {}", config.catalog.display()),
            )
            .with_hint("pick another path for the JSON report"));
        }
    }

    // Everything fatal happens before the catalog is touched.
    let table = yokscore_io::load_table(&config).map_err(|e| CliError::recon(e, EXIT_TABLE))?;
    let mut doc = catalog::load(&config.catalog).map_err(|e| CliError::recon(e, EXIT_CATALOG))?;
    log::info!(
        "{}: {} universities, {} programs",
        config.catalog.display(),
        doc.university_count(),
        doc.program_count()
    );

    opts.say(&format!(
        "matching on columns: \"{}\" and \"{}\"",
        config.columns.code, config.columns.score
    ));

    let result = reconcile(&mut doc, &table, &MatchRules::from(&config));

    if opts.dry_run {
        log::info!("dry run: {} not written", config.catalog.display());
    } else {
        catalog::save(&doc, &config.catalog).map_err(|e| CliError::recon(e, EXIT_WRITE))?;
    }

    if opts.json || opts.report.is_some() {
        let json = RunReport::new(&config, &result, opts.dry_run)
            .to_json()
            .map_err(|e| CliError::new(EXIT_ERROR, format!("JSON serialization error: {e}")))?;

        if let Some(path) = &opts.report {
            std::fs::write(path, &json).map_err(|e| {
                CliError::new(EXIT_WRITE, format!("cannot write report {}: {e}", path.display()))
            })?;
            log::info!("wrote report {}", path.display());
        }

        if opts.json {
            println!("{json}");
        }
    }

    let mut line = summary_line(&config, &result.summary);
    if opts.dry_run {
        line.push_str(" (dry run, catalog not written)");
    }
    opts.say(&line);
    if let Some(skipped) = skipped_line(&result.summary) {
        opts.say(&skipped);
    }

    Ok(())
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
