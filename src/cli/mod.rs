pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "diamantes")]
#[command(about = "Diamantes CLI - track diamond tools and send them for sharpening")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[arg(long, global = true, help = "Use an empty in-memory store instead of Supabase")]
    pub memory: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP service")]
    Serve {
        #[arg(long, help = "Port to listen on (overrides DIAMANTES_PORT)")]
        port: Option<u16>,
    },

    #[command(about = "List diamonds currently in use")]
    List,

    #[command(about = "Send a diamond for sharpening")]
    Devolver {
        #[arg(help = "Diamond id")]
        id: String,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let config = crate::config::config();
    let store = crate::server::build_store(config, cli.memory)?;

    match cli.command {
        Commands::Serve { port } => commands::serve::handle(config, store, port).await,
        Commands::List => commands::list::handle(store, output_format).await,
        Commands::Devolver { id } => commands::devolver::handle(store, &id, output_format).await,
    }
}
