use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sprout")]
#[command(about = "Inspect and call sprout template functions", long_about = None)]
pub struct Cli {
    /// Settings file (defaults to $SPROUT_CONFIG or config/sprout.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print every function the handler builds
    List,
    /// Call a function; each argument is parsed as JSON, falling back to a string
    Call(CallArgs),
    /// Print the effective settings as TOML
    Config,
}

#[derive(clap::Args, Debug)]
pub struct CallArgs {
    /// Function name
    pub name: String,
    /// Arguments passed to the function
    pub args: Vec<String>,
}
