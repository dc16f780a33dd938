//! `paudit` — drive one place reconciliation run from the command line.
//!
//! Reads a batch of local place records from a JSON file, reconciles them
//! against the canonical store, prints the summary, and delivers the
//! report to the configured webhook.

mod config;
mod exit_codes;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use placeaudit_recon::{run, LocalRecord, ReportSink};
use placeaudit_store_client::{StoreClient, WebhookSink};

use config::RunConfig;
use exit_codes::{EXIT_DELIVERY, EXIT_INVALID_CONFIG, EXIT_RUNTIME, EXIT_SUCCESS};

#[derive(Parser)]
#[command(name = "paudit")]
#[command(about = "Reconcile local place records against the canonical store")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a reconciliation batch and deliver the report
    #[command(after_help = "\
Examples:
  paudit run batch.json --config paudit.toml
  paudit run batch.json --config paudit.toml --json
  paudit run batch.json -c paudit.toml --output report.json --no-deliver")]
    Run {
        /// JSON file holding the batch (array of local records)
        batch: PathBuf,

        /// Path to the TOML config file
        #[arg(long, short = 'c')]
        config: PathBuf,

        /// Print the full report JSON to stdout instead of the summary
        #[arg(long)]
        json: bool,

        /// Write the full report JSON to a file
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Skip webhook delivery (report is still printed/written)
        #[arg(long)]
        no_deliver: bool,
    },

    /// Validate a config file without running
    #[command(after_help = "\
Examples:
  paudit validate --config paudit.toml")]
    Validate {
        /// Path to the TOML config file
        #[arg(long, short = 'c')]
        config: PathBuf,
    },
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            batch,
            config,
            json,
            output,
            no_deliver,
        } => cmd_run(&batch, &config, json, output.as_deref(), no_deliver),
        Commands::Validate { config } => cmd_validate(&config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("error: {}", e.message);
            if let Some(hint) = e.hint {
                eprintln!("hint: {hint}");
            }
            ExitCode::from(e.code)
        }
    }
}

fn load_config(path: &Path) -> Result<RunConfig, CliError> {
    let raw = std::fs::read_to_string(path).map_err(|e| CliError {
        code: EXIT_INVALID_CONFIG,
        message: format!("cannot read {}: {e}", path.display()),
        hint: None,
    })?;
    RunConfig::from_toml(&raw).map_err(|e| CliError {
        code: EXIT_INVALID_CONFIG,
        message: e.to_string(),
        hint: None,
    })
}

fn load_batch(path: &Path) -> Result<Vec<LocalRecord>, CliError> {
    let raw = std::fs::read_to_string(path).map_err(|e| CliError {
        code: EXIT_RUNTIME,
        message: format!("cannot read {}: {e}", path.display()),
        hint: None,
    })?;
    serde_json::from_str(&raw).map_err(|e| CliError {
        code: EXIT_RUNTIME,
        message: format!("cannot parse batch {}: {e}", path.display()),
        hint: Some("expected a JSON array of place records".into()),
    })
}

fn cmd_validate(config_path: &Path) -> Result<(), CliError> {
    let config = load_config(config_path)?;
    println!(
        "config ok: store={} webhook={}",
        config.store.base_url, config.delivery.webhook_url
    );
    Ok(())
}

fn cmd_run(
    batch_path: &Path,
    config_path: &Path,
    json_output: bool,
    output_file: Option<&Path>,
    no_deliver: bool,
) -> Result<(), CliError> {
    let config = load_config(config_path)?;
    let token = config.resolve_token().map_err(|e| CliError {
        code: EXIT_INVALID_CONFIG,
        message: e.to_string(),
        hint: Some(format!("export {}=<token>", config.store.token_env)),
    })?;

    let batch = load_batch(batch_path)?;
    eprintln!(
        "checking {} records against {}",
        batch.len(),
        config.store.base_url
    );

    let store = StoreClient::new(&config.store.base_url, token);
    let result = run(&store, &batch, chrono::Utc::now().date_naive());
    let summary = result.summary();

    let report_json = serde_json::to_string_pretty(&result.report).map_err(|e| CliError {
        code: EXIT_RUNTIME,
        message: format!("cannot serialize report: {e}"),
        hint: None,
    })?;

    if let Some(path) = output_file {
        std::fs::write(path, &report_json).map_err(|e| CliError {
            code: EXIT_RUNTIME,
            message: format!("cannot write {}: {e}", path.display()),
            hint: None,
        })?;
    }

    if json_output {
        println!("{report_json}");
    } else {
        println!(
            "matched={} mismatched={} not_found={} skipped={}",
            summary.matched, summary.mismatched, summary.not_found, summary.skipped
        );
    }

    if !no_deliver {
        let sink = WebhookSink::new(&config.delivery.webhook_url);
        sink.deliver(&result.report).map_err(|e| CliError {
            code: EXIT_DELIVERY,
            message: format!("webhook delivery failed: {e}"),
            hint: None,
        })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn load_batch_parses_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("batch.json");
        std::fs::write(
            &path,
            json!([
                {"document_id": "d1", "key": "k1", "phone": "555-0100"},
                {"key": "orphan"}
            ])
            .to_string(),
        )
        .unwrap();

        let batch = load_batch(&path).unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].document_id.as_deref(), Some("d1"));
        assert!(batch[1].document_id.is_none());
    }

    #[test]
    fn load_batch_rejects_non_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("batch.json");
        std::fs::write(&path, "{\"not\": \"an array\"}").unwrap();

        let err = load_batch(&path).unwrap_err();
        assert_eq!(err.code, EXIT_RUNTIME);
    }

    #[test]
    fn load_config_missing_file_is_config_error() {
        let err = load_config(Path::new("/nonexistent/paudit.toml")).unwrap_err();
        assert_eq!(err.code, EXIT_INVALID_CONFIG);
    }
}
