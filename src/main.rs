mod cli;

use clap::Parser;
use cli::{CallArgs, Cli, Commands};
use sprout::config::Settings;
use sprout::function::Value;
use sprout::handlers::{self, Handler, with_settings};
use tracing_subscriber::EnvFilter;

type AnyError = Box<dyn std::error::Error + Send + Sync + 'static>;

fn main() -> Result<(), AnyError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let settings = match cli.config {
        Some(path) => Settings::load_from_path(path)?,
        None => Settings::load()?,
    };

    match cli.command {
        Commands::List => list(settings),
        Commands::Call(args) => call(settings, args)?,
        Commands::Config => print!("{}", toml::to_string_pretty(&settings)?),
    }

    Ok(())
}

fn list(settings: Settings) {
    let handler = handlers::new([with_settings(settings)]);
    for name in handler.build().keys() {
        println!("{name}");
    }
}

fn call(settings: Settings, args: CallArgs) -> Result<(), AnyError> {
    let handler = handlers::new([with_settings(settings)]);
    let functions = handler.build();
    let function = functions
        .get(&args.name)
        .ok_or_else(|| format!("unknown function: {}", args.name))?;

    let values: Vec<Value> = args.args.iter().map(|raw| parse_arg(raw)).collect();
    let result = function.call(&values)?;
    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}

fn parse_arg(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
