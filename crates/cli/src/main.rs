use clap::{Parser, Subcommand};
use intake_core::{
    default_record, read_extraction_file, reconcile, reconcile_with_report, AliasTable,
    IntakeResult, ReconcileReport, TargetField,
};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "intake")]
#[command(about = "Reconcile scanned report values into the eight-field measurement record")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile an extraction JSON file and print the record
    Reconcile {
        /// Extraction document: `{"extracted": {...}}` or a bare label/value object
        file: PathBuf,
        /// Include resolved, ignored and invalid entries plus coverage
        #[arg(long)]
        report: bool,
    },
    /// List target fields, labels and aliases
    Fields,
    /// Print the all-zero default record
    Reset,
}

#[derive(Serialize)]
struct ReportOutput {
    #[serde(flatten)]
    report: ReconcileReport,
    coverage: f64,
    alias_table_version: u32,
}

fn run(command: Commands) -> IntakeResult<String> {
    match command {
        Commands::Reconcile { file, report } => {
            let raw = read_extraction_file(&file)?;
            if report {
                let report = reconcile_with_report(&raw);
                let output = ReportOutput {
                    coverage: report.coverage(),
                    report,
                    alias_table_version: AliasTable::builtin().version(),
                };
                Ok(serde_json::to_string_pretty(&output)?)
            } else {
                Ok(serde_json::to_string_pretty(&reconcile(&raw))?)
            }
        }
        Commands::Fields => Ok(describe_fields(AliasTable::builtin())),
        Commands::Reset => Ok(serde_json::to_string_pretty(&default_record())?),
    }
}

fn describe_fields(table: &AliasTable) -> String {
    let mut lines = vec![format!("Alias table v{}", table.version())];
    for field in TargetField::ALL {
        lines.push(format!(
            "{:<26} {:<26} step {:<5} aliases: {}",
            field.key(),
            field.label(),
            field.step(),
            table.aliases_for(field).join(", ")
        ));
    }
    lines.join("\n")
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(command) => match run(command) {
            Ok(output) => println!("{}", output),
            Err(e) => {
                tracing::error!("intake command failed: {}", e);
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        None => {
            println!("Use 'intake --help' for commands");
        }
    }

    Ok(())
}
