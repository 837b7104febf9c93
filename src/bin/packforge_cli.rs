//! PackForge CLI - Bridge Interface for the Form Layer
//!
//! Commands: templates, validate, generate
//! Outputs JSON to stdout
//! Returns non-zero on validation failure

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use packforge_core::equipment::register_equipment;
use packforge_core::{GenerateRequest, GenerationPipeline, TemplateRegistry};

#[derive(Parser)]
#[command(name = "packforge-cli")]
#[command(about = "PackForge CLI - Datapack Composition Engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available templates
    Templates,

    /// Check required fields across a card forest
    Validate {
        /// JSON payload (GenerateRequest)
        #[arg(short, long)]
        payload: String,
    },

    /// Run a generation pass and print the manifest report
    Generate {
        /// JSON payload (GenerateRequest)
        #[arg(short, long)]
        payload: String,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut registry = TemplateRegistry::new();
    register_equipment(&mut registry);
    let pipeline = GenerationPipeline::new(registry);

    match cli.command {
        Commands::Templates => {
            let templates: Vec<_> = pipeline
                .registry()
                .list()
                .iter()
                .map(|t| {
                    serde_json::json!({
                        "id": t.id(),
                        "name": t.name(),
                        "fields": t.fields().len(),
                        "childOnly": t.child_only(),
                        "hasChildSlot": t.child_slot().is_some(),
                    })
                })
                .collect();
            match serde_json::to_string_pretty(&templates) {
                Ok(out) => {
                    println!("{out}");
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!(r#"{{"error": "{e}"}}"#);
                    ExitCode::FAILURE
                }
            }
        }

        Commands::Validate { payload } => {
            let request: GenerateRequest = match serde_json::from_str(&payload) {
                Ok(r) => r,
                Err(e) => {
                    println!(r#"{{"valid": false, "error": "Invalid payload: {e}"}}"#);
                    return ExitCode::FAILURE;
                }
            };

            let roots = match pipeline.instantiate_forest(&request.cards) {
                Ok(roots) => roots,
                Err(e) => {
                    println!(r#"{{"valid": false, "error": "{e}"}}"#);
                    return ExitCode::FAILURE;
                }
            };

            let report = pipeline.validate(&roots);
            match serde_json::to_string_pretty(&report) {
                Ok(out) => println!("{out}"),
                Err(e) => {
                    eprintln!(r#"{{"error": "{e}"}}"#);
                    return ExitCode::FAILURE;
                }
            }
            if report.valid {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(2) // Validation failure
            }
        }

        Commands::Generate { payload } => {
            let request: GenerateRequest = match serde_json::from_str(&payload) {
                Ok(r) => r,
                Err(e) => {
                    println!(r#"{{"success": false, "error": "Invalid payload: {e}"}}"#);
                    return ExitCode::FAILURE;
                }
            };

            let result = pipeline
                .instantiate_forest(&request.cards)
                .and_then(|roots| pipeline.generate(&roots, &request.settings));

            match result {
                Ok(report) => {
                    let output = serde_json::json!({
                        "success": true,
                        "report": report,
                    });
                    match serde_json::to_string_pretty(&output) {
                        Ok(out) => {
                            println!("{out}");
                            ExitCode::SUCCESS
                        }
                        Err(e) => {
                            eprintln!(r#"{{"error": "{e}"}}"#);
                            ExitCode::FAILURE
                        }
                    }
                }
                Err(e) => {
                    let output = serde_json::json!({
                        "success": false,
                        "error": e.to_string(),
                    });
                    println!("{}", serde_json::to_string(&output).unwrap_or_default());
                    ExitCode::from(2)
                }
            }
        }
    }
}
