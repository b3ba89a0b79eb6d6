//! CLI command definitions and handlers

mod audit;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Cobaudit - heuristic audit for COBOL sources
#[derive(Parser, Debug)]
#[command(name = "cobaudit")]
#[command(
    version,
    about = "Audit COBOL sources for quality issues and score the result",
    long_about = "Cobaudit partitions a COBOL source file into its divisions, runs a \
battery of heuristic quality rules (GO TO usage, dead sections, unused \
variables, magic numbers, ...), and derives a weighted 0-100 score with a \
letter grade and recommendations.\n\n\
The rules operate on line text, not a full COBOL grammar; heuristic false \
positives are expected and accepted.",
    after_help = "\
Examples:
  cobaudit audit payroll.cbl                     Terminal report
  cobaudit audit payroll.cbl -f json             JSON for scripting
  cobaudit audit payroll.cbl -f markdown -o report.md
  cobaudit audit payroll.cbl -f sonarqube        SonarQube issue import payload
  cobaudit audit payroll.cbl --detailed -v       Everything, with summary table"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", env = "COBAUDIT_LOG",
          value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a COBOL file and generate an audit report
    Audit {
        /// Path to the COBOL source file
        file: PathBuf,

        /// Output format: text, markdown (or md), json, csv, sonarqube
        #[arg(long, short = 'f', default_value = "text",
              value_parser = ["text", "markdown", "md", "json", "csv", "sonarqube"])]
        format: String,

        /// Output file path (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Print a metrics/issues summary before the report
        #[arg(long, short = 'v')]
        verbose: bool,

        /// Include suggestion-level recommendations and metric commentary
        #[arg(long)]
        detailed: bool,
    },
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Audit {
            file,
            format,
            output,
            verbose,
            detailed,
        } => audit::run(&file, &format, output.as_deref(), verbose, detailed),
    }
}
