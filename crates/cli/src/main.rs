use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;
mod output;

/// tsbuild - clean, compile, and publish a TypeScript web project
#[derive(Parser)]
#[command(name = "tsbuild")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Path to the configuration file
  #[arg(short, long, global = true, default_value = "tsbuild.toml")]
  config: PathBuf,

  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Copy static assets even if the compiler fails
  #[arg(long)]
  keep_going: bool,

  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Remove the build output directory
  Clean,

  /// Run the external compiler only
  Compile,

  /// Copy the index file and resources into the build output directory
  Copy,

  /// Scaffold a starter configuration file
  Init {
    /// Directory to initialize (default: current directory)
    #[arg(default_value = ".")]
    path: PathBuf,
  },

  /// Show the resolved configuration and build output state
  Status,
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  // Initialize logging
  let filter = if cli.verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::from_default_env()
  };
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .without_time()
    .init();

  match cli.command {
    // No subcommand = run the full pipeline
    None => cmd::cmd_run(&cli.config, cli.keep_going),
    Some(Commands::Clean) => cmd::cmd_clean(&cli.config),
    Some(Commands::Compile) => cmd::cmd_compile(&cli.config),
    Some(Commands::Copy) => cmd::cmd_copy(&cli.config),
    Some(Commands::Init { path }) => cmd::cmd_init(&path),
    Some(Commands::Status) => cmd::cmd_status(&cli.config),
  }
}
