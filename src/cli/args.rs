// ABOUTME: Command line argument definitions and parsing using Clap
// ABOUTME: Defines the main CLI structure and subcommands for stackforge

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "stackforge")]
#[command(about = "Build typed CloudFormation templates from declarative stack definitions")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Path to configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Disable colored output")]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a stack template and emit it
    Build {
        #[arg(help = "Name of the stack definition to build")]
        stack: String,

        #[arg(short, long, value_enum, default_value_t, help = "Output format")]
        format: OutputFormat,

        #[arg(long, help = "Pretty-print JSON output")]
        pretty: bool,

        #[arg(short, long, help = "Output file (defaults to stdout)")]
        output: Option<PathBuf>,
    },

    /// Validate a stack template without emitting it
    Validate {
        #[arg(help = "Name of the stack definition to validate")]
        stack: String,

        #[arg(long, help = "Treat validation warnings as errors")]
        strict: bool,
    },

    /// Show the parameters a stack accepts at deploy time
    Params {
        #[arg(help = "Name of the stack definition to inspect")]
        stack: String,
    },

    /// List available stack definitions
    List,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
