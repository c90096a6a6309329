use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::colors::{ColorMode, ThemeMode};

#[derive(Parser, Debug)]
#[command(name = "disco-gen")]
#[command(author, version, about = "Typed model generator for API discovery documents")]
pub struct Cli {
  #[command(subcommand)]
  pub command: Commands,

  /// Control color output
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub color: ColorMode,

  /// Terminal theme (dark or light background)
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub theme: ThemeMode,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// List information from a discovery document
  List {
    #[command(subcommand)]
    list_command: ListCommands,
  },
  /// Generate ordered model definitions from a discovery document
  Generate(GenerateCommand),
}

#[derive(Args, Debug)]
pub struct GenerateCommand {
  /// Path or http(s) URL of the discovery document
  #[arg(short, long, value_name = "FILE_OR_URL")]
  pub input: String,

  /// Path where the ordered model definitions will be written
  #[arg(short, long, value_name = "FILE")]
  pub output: PathBuf,

  /// Pretty-print the emitted JSON
  #[arg(long, default_value_t = false)]
  pub pretty: bool,

  /// Enable verbose output with detailed progress information
  #[arg(short, long, default_value_t = false)]
  pub verbose: bool,

  /// Suppress non-essential output (errors only)
  #[arg(short, long, default_value_t = false)]
  pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum ListCommands {
  /// List every model in emission order with its kind and flags
  Models {
    /// Path or http(s) URL of the discovery document
    #[arg(short, long, value_name = "FILE_OR_URL")]
    input: String,
  },
}
