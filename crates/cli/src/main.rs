// FreightLens CLI - batch freight-cost audit over invoice CSV exports

mod exit_codes;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use exit_codes::{
    audit_exit_code, EXIT_READ, EXIT_SUCCESS,
};
use freightlens_audit::config::AuditConfig;
use freightlens_audit::engine::{distinct_charge_types, load_charge_lines, run};
use freightlens_audit::output::{write_carrier_stats, write_shipments, write_worst};
use freightlens_audit::report;

#[derive(Parser)]
#[command(name = "flens")]
#[command(about = "Freight invoice classification and cost audit")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the audit: classify, aggregate, write the three report tables
    #[command(after_help = "\
Examples:
  flens audit invoices.csv
  flens audit invoices.csv --output-dir reports/
  flens audit invoices.csv --config audit.toml --json
  flens audit invoices.csv --quiet")]
    Audit {
        /// Input invoice CSV
        input: PathBuf,

        /// Audit config (TOML); defaults apply when omitted
        #[arg(long)]
        config: Option<PathBuf>,

        /// Directory for the three output tables (overrides config)
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Print the full result as JSON to stdout instead of the report
        #[arg(long)]
        json: bool,

        /// Suppress the console report
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// List distinct charge-type labels, one per line
    #[command(after_help = "\
Examples:
  flens charge-types invoices.csv
  flens charge-types invoices.csv --output charge_types.txt")]
    ChargeTypes {
        /// Input invoice CSV
        input: PathBuf,

        /// Write to file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Validate an audit config without running
    Validate {
        /// Path to the audit TOML config
        config: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Audit { input, config, output_dir, json, quiet } => {
            cmd_audit(input, config, output_dir, json, quiet)
        }
        Commands::ChargeTypes { input, output } => cmd_charge_types(input, output),
        Commands::Validate { config } => cmd_validate(config),
    };

    match result {
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
    fn read(msg: impl Into<String>) -> Self {
        Self { code: EXIT_READ, message: msg.into(), hint: None }
    }

    fn audit(err: freightlens_audit::AuditError) -> Self {
        let hint = match &err {
            freightlens_audit::AuditError::MissingColumn { .. } => {
                Some("map source headers with [source.columns] in the config".to_string())
            }
            _ => None,
        };
        Self { code: audit_exit_code(&err), message: err.to_string(), hint }
    }
}

fn load_config(path: Option<&Path>) -> Result<AuditConfig, CliError> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| CliError::read(format!("cannot read {}: {e}", path.display())))?;
            AuditConfig::from_toml(&text).map_err(CliError::audit)
        }
        None => Ok(AuditConfig::default()),
    }
}

// ============================================================================
// audit
// ============================================================================

fn cmd_audit(
    input: PathBuf,
    config_path: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    json: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let config = load_config(config_path.as_deref())?;

    let csv_data = std::fs::read_to_string(&input)
        .map_err(|e| CliError::read(format!("cannot read {}: {e}", input.display())))?;
    let lines = load_charge_lines(&csv_data, &config.source).map_err(CliError::audit)?;
    let result = run(&config, &lines).map_err(CliError::audit)?;

    let dir = output_dir.unwrap_or_else(|| PathBuf::from(&config.output.dir));
    std::fs::create_dir_all(&dir)
        .map_err(|e| CliError::read(format!("cannot create {}: {e}", dir.display())))?;

    let create = |file: &str| -> Result<(PathBuf, std::fs::File), CliError> {
        let path = dir.join(file);
        let out = std::fs::File::create(&path)
            .map_err(|e| CliError::read(format!("cannot write {}: {e}", path.display())))?;
        Ok((path, out))
    };

    let (path, out) = create(&config.output.shipments_file)?;
    write_shipments(out, &result.shipments).map_err(CliError::audit)?;
    eprintln!("wrote {}", path.display());

    let (path, out) = create(&config.output.carriers_file)?;
    write_carrier_stats(out, &result.carriers).map_err(CliError::audit)?;
    eprintln!("wrote {}", path.display());

    let (path, out) = create(&config.output.worst_file)?;
    write_worst(out, &result.worst.shipments).map_err(CliError::audit)?;
    eprintln!("wrote {}", path.display());

    if json {
        let json_str = serde_json::to_string_pretty(&result)
            .map_err(|e| CliError::read(format!("JSON serialization error: {e}")))?;
        println!("{json_str}");
    } else if !quiet {
        print!("{}", report::render(&result));
    }

    Ok(())
}

// ============================================================================
// charge-types
// ============================================================================

fn cmd_charge_types(input: PathBuf, output: Option<PathBuf>) -> Result<(), CliError> {
    let config = AuditConfig::default();
    let csv_data = std::fs::read_to_string(&input)
        .map_err(|e| CliError::read(format!("cannot read {}: {e}", input.display())))?;
    let types = distinct_charge_types(&csv_data, &config.source).map_err(CliError::audit)?;

    match output {
        Some(path) => {
            let mut text = types.join("\n");
            text.push('\n');
            std::fs::write(&path, text)
                .map_err(|e| CliError::read(format!("cannot write {}: {e}", path.display())))?;
            eprintln!("wrote {} charge types to {}", types.len(), path.display());
        }
        None => {
            for t in &types {
                println!("{t}");
            }
        }
    }

    Ok(())
}

// ============================================================================
// validate
// ============================================================================

fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config = load_config(Some(&config_path))?;
    eprintln!(
        "valid: audit '{}' (identifier column '{}', heavy-tail threshold {}%)",
        config.name, config.source.columns.shipment_id, config.risk.heavy_tail_share_pct,
    );
    Ok(())
}
