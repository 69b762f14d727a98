mod commands;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{edit, init, toolbar, tree, EditArgs, InitArgs, ToolbarArgs, TreeArgs};
use std::path::PathBuf;

/// Vellum CLI - inspect and edit resume documents
#[derive(Parser, Debug)]
#[command(name = "vellum")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding vellum.config.json (defaults to the document's directory)
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a starter resume and config
    Init(InitArgs),

    /// Print the document tree with node addresses
    Tree(TreeArgs),

    /// Print toolbar options for the node at an address
    Toolbar(ToolbarArgs),

    /// Apply an edit and write the document back
    Edit(EditArgs),
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_dir = cli.config_dir.as_deref();
    let result = match cli.command {
        Command::Init(args) => init(args),
        Command::Tree(args) => tree(args, config_dir),
        Command::Toolbar(args) => toolbar(args, config_dir),
        Command::Edit(args) => edit(args, config_dir),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
