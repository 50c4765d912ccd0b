mod check;
mod completions;
mod enhance;
mod generate;

use check::CheckCommand;
use clap::{Parser, Subcommand};
use completions::CompletionsCommand;
use enhance::EnhanceCommand;
use eyre::Result;
use generate::GenerateCommand;

/// Extension trait for exiting on load errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T, E> UnwrapOrExit<T> for std::result::Result<T, Box<E>>
where
    E: miette::Diagnostic + Send + Sync + 'static,
{
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "forge")]
#[command(version)]
#[command(about = "Compile architecture blueprints into runnable container projects")]
pub(crate) struct Cli {
    /// Show debug logs (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Check(cmd) => cmd.run(),
            Commands::Enhance(cmd) => cmd.run(),
            Commands::Generate(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a blueprint and print its score
    Check(CheckCommand),

    /// Fill in registry defaults and suggest missing services
    Enhance(EnhanceCommand),

    /// Generate the project archive for a blueprint
    Generate(GenerateCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
