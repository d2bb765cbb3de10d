pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "flaskr")]
#[command(about = "Flaskr - a minimal blog")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server")]
    Serve {
        #[arg(long, help = "Port to listen on (overrides FLASKR_PORT)")]
        port: Option<u16>,
    },

    #[command(name = "init-db", about = "Clear the existing data and create new tables")]
    InitDb,
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = crate::config::config().clone();

    match cli.command {
        Commands::Serve { port } => commands::serve::handle(config, port).await,
        Commands::InitDb => commands::init_db::handle(config).await,
    }
}
