//! roster-cli: command-line interface for the roster-core duty-roster solver.
//!
//! # Commands
//!
//! - `solve`: run the full-variant solver on a schedule request
//! - `solve-senior`: run the senior (MORNING/EVENING) variant
//! - `validate`: validate a request's structure without solving
//! - `schema`: print the JSON Schema for a request/response type

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use roster_core::model::ScheduleRequest;
use roster_core::senior::SeniorScheduleRequest;
use roster_core::{senior, solve, Settings};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "roster-cli")]
#[command(version = "0.1.0")]
#[command(about = "Duty-roster solver CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full-variant solver on a schedule request
    Solve {
        /// Input JSON file path (use --stdin to read from stdin)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,

        /// Read input from stdin instead of a file
        #[arg(long)]
        stdin: bool,

        /// Penalty-weight settings JSON file; defaults to `Settings::default()`
        #[arg(long)]
        settings: Option<PathBuf>,

        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Run the senior (MORNING/EVENING) variant solver
    SolveSenior {
        /// Input JSON file path (use --stdin to read from stdin)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,

        /// Read input from stdin instead of a file
        #[arg(long)]
        stdin: bool,

        /// Penalty-weight settings JSON file; defaults to `Settings::senior_defaults()`
        #[arg(long)]
        settings: Option<PathBuf>,

        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Validate a schedule request's structure without solving
    Validate {
        /// Input JSON file path
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,

        /// Read input from stdin instead of a file
        #[arg(long)]
        stdin: bool,

        /// Validate as a senior-variant request instead of the full variant
        #[arg(long)]
        senior: bool,
    },

    /// Print the JSON Schema for a request/response/settings type
    Schema {
        /// Which schema to print: request, response, senior-request, settings, or all
        #[arg(value_name = "TYPE", default_value = "all")]
        schema_type: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            input,
            stdin,
            settings,
            output,
            pretty,
        } => cmd_solve(input, stdin, settings, output, pretty),

        Commands::SolveSenior {
            input,
            stdin,
            settings,
            output,
            pretty,
        } => cmd_solve_senior(input, stdin, settings, output, pretty),

        Commands::Validate { input, stdin, senior } => cmd_validate(input, stdin, senior),

        Commands::Schema { schema_type } => cmd_schema(&schema_type),
    }
}

fn read_input(file: Option<PathBuf>, use_stdin: bool) -> Result<String> {
    if use_stdin {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer).context("Failed to read from stdin")?;
        Ok(buffer)
    } else if let Some(path) = file {
        fs::read_to_string(&path).with_context(|| format!("Failed to read file: {:?}", path))
    } else {
        anyhow::bail!("Either provide an input file or use --stdin")
    }
}

fn read_settings(path: Option<PathBuf>, default: Settings) -> Result<Settings> {
    match path {
        None => Ok(default),
        Some(path) => {
            let text = fs::read_to_string(&path).with_context(|| format!("Failed to read settings file: {:?}", path))?;
            serde_json::from_str(&text).context("Failed to parse settings JSON")
        }
    }
}

fn write_output(output_json: &str, output: Option<PathBuf>) -> Result<()> {
    if let Some(output_path) = output {
        fs::write(&output_path, output_json).with_context(|| format!("Failed to write output to {:?}", output_path))?;
        eprintln!("Result written to {:?}", output_path);
    } else {
        println!("{}", output_json);
    }
    Ok(())
}

fn cmd_solve(input: Option<PathBuf>, stdin: bool, settings: Option<PathBuf>, output: Option<PathBuf>, pretty: bool) -> Result<()> {
    let json_str = read_input(input, stdin)?;
    let request: ScheduleRequest = serde_json::from_str(&json_str).context("Failed to parse input JSON")?;
    let settings = read_settings(settings, Settings::default())?;

    eprintln!("Running solver...");
    let result = solve(&request, &settings).map_err(|e| anyhow::anyhow!("Solver error: {:?}", e))?;

    let output_json = if pretty { serde_json::to_string_pretty(&result)? } else { serde_json::to_string(&result)? };
    write_output(&output_json, output)
}

fn cmd_solve_senior(
    input: Option<PathBuf>,
    stdin: bool,
    settings: Option<PathBuf>,
    output: Option<PathBuf>,
    pretty: bool,
) -> Result<()> {
    let json_str = read_input(input, stdin)?;
    let request: SeniorScheduleRequest = serde_json::from_str(&json_str).context("Failed to parse input JSON")?;
    let settings = read_settings(settings, Settings::senior_defaults())?;

    eprintln!("Running senior-variant solver...");
    let result = senior::solve_senior(&request, &settings).map_err(|e| anyhow::anyhow!("Solver error: {:?}", e))?;

    let output_json = if pretty { serde_json::to_string_pretty(&result)? } else { serde_json::to_string(&result)? };
    write_output(&output_json, output)
}

fn cmd_validate(input: Option<PathBuf>, stdin: bool, senior: bool) -> Result<()> {
    let json_str = read_input(input, stdin)?;

    if senior {
        match serde_json::from_str::<SeniorScheduleRequest>(&json_str) {
            Ok(_) => println!("{{\"valid\": true}}"),
            Err(e) => println!("{{\"valid\": false, \"error\": \"{}\"}}", e.to_string().replace('"', "\\\"")),
        }
    } else {
        match serde_json::from_str::<ScheduleRequest>(&json_str) {
            Ok(_) => println!("{{\"valid\": true}}"),
            Err(e) => println!("{{\"valid\": false, \"error\": \"{}\"}}", e.to_string().replace('"', "\\\"")),
        }
    }
    Ok(())
}

fn cmd_schema(schema_type: &str) -> Result<()> {
    match schema_type {
        "request" => print_schema(&roster_contracts::schedule_request_schema()),
        "response" => print_schema(&roster_contracts::schedule_response_schema()),
        "senior-request" => print_schema(&roster_contracts::senior_schedule_request_schema()),
        "settings" => print_schema(&roster_contracts::settings_schema()),
        "all" => {
            println!("=== REQUEST SCHEMA ===\n");
            print_schema(&roster_contracts::schedule_request_schema())?;
            println!("\n=== RESPONSE SCHEMA ===\n");
            print_schema(&roster_contracts::schedule_response_schema())?;
            println!("\n=== SENIOR REQUEST SCHEMA ===\n");
            print_schema(&roster_contracts::senior_schedule_request_schema())?;
            println!("\n=== SETTINGS SCHEMA ===\n");
            print_schema(&roster_contracts::settings_schema())?;
            Ok(())
        }
        _ => anyhow::bail!(
            "Unknown schema type: {}. Use: request, response, senior-request, settings, or all",
            schema_type
        ),
    }
}

fn print_schema(schema: &schemars::schema::RootSchema) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(schema)?);
    Ok(())
}
