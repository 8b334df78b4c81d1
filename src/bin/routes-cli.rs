use clap::{Parser, Subcommand};
use serde_json::json;

use event_router::http::echo::echo_event_routes;

#[derive(Parser)]
#[command(name = "routes-cli")]
#[command(about = "Inspect the events route table offline", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List declared routes in match order
    List,
    /// Resolve a path (mount prefix already stripped) to a route
    Resolve {
        path: String,
    },
    /// Build the path of a named route
    Reverse {
        name: String,

        /// Route argument as key=value, repeatable
        #[arg(short, long = "arg", value_parser = parse_key_value)]
        args: Vec<(String, String)>,
    },
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got `{}`", raw))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let routes = echo_event_routes()?;

    let output = match cli.command {
        Commands::List => {
            let infos: Vec<_> = routes.routes().iter().map(|r| r.info()).collect();
            serde_json::to_value(infos)?
        }
        Commands::Resolve { path } => {
            let matched = routes.match_path(&path)?;
            json!({
                "route": matched.name(),
                "params": matched.params(),
            })
        }
        Commands::Reverse { name, args } => {
            let args: Vec<(&str, &str)> = args
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .collect();
            let path = routes.reverse(&name, &args)?;
            json!({ "route": name, "path": path })
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
