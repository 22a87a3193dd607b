mod commands;
mod config;

use std::io;
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use commands::ast::cmd_ast;
use commands::check::cmd_check;
use commands::repl::{run_menu, run_repl};

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Robot control language checker.
#[derive(Parser)]
#[command(name = "robolang", version, about = "Robot control language checker")]
struct Cli {
    /// Output format (text or json); overrides the config file
    #[arg(long, global = true, value_enum)]
    output: Option<OutputFormat>,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Path to a robolang.toml (default: ./robolang.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Accept the robot's state names (myX, chipsHere, ...) as values
    #[arg(long, global = true)]
    robot_values: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a program file and print its verdict (si / no: ...)
    Check {
        /// Path to the program text file
        file: PathBuf,
    },

    /// Print the parsed program as JSON
    Ast {
        /// Path to the program text file
        file: PathBuf,
    },

    /// Enter a program line by line, printing a verdict after each line
    Repl,

    /// Interactive menu: manual entry or file path (the default)
    Menu,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config = match config::load_config(cli.config.as_deref(), &cwd) {
        Ok(c) => c,
        Err(msg) => {
            report_error(&msg, cli.output.unwrap_or(OutputFormat::Text), cli.quiet);
            process::exit(1);
        }
    };
    let settings = config.resolve(cli.output, cli.robot_values);

    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Check { file } => {
            cmd_check(&file, &settings, cli.quiet);
        }
        Commands::Ast { file } => {
            cmd_ast(&file, settings.output, cli.quiet);
        }
        Commands::Repl => {
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            match run_repl(stdin.lock(), &mut stdout, &settings) {
                Ok(verdict) if verdict.is_accepted() => {}
                Ok(_) => process::exit(1),
                Err(e) => {
                    report_error(&format!("i/o error: {}", e), settings.output, cli.quiet);
                    process::exit(1);
                }
            }
        }
        Commands::Menu => {
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            match run_menu(stdin.lock(), &mut stdout, &settings) {
                Ok(true) => {}
                Ok(false) => process::exit(1),
                Err(e) => {
                    report_error(&format!("i/o error: {}", e), settings.output, cli.quiet);
                    process::exit(1);
                }
            }
        }
    }
}

/// `-v` flags take precedence over `RUST_LOG`; with neither, only warnings
/// are shown.
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        }
    }
}
