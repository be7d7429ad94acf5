//! Bookmarks CLI - run the bookmark API server

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use bookmarks::config::{self, BookmarksConfig, ServerConfig};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "bookmarks")]
#[command(version)]
#[command(about = "A small CRUD HTTP API for saved URLs, backed by SQLite")]
#[command(long_about = r#"
Bookmarks serves a JSON API over a single SQLite table:
  POST   /bookmarks        create
  GET    /bookmarks        list
  GET    /bookmarks/{id}   fetch one
  PUT    /bookmarks/{id}   partial update
  DELETE /bookmarks/{id}   delete

Example usage:
  bookmarks serve --port 3000 --database ./bookmarks.db
  PORT=8080 DB_PATH=/var/lib/bookmarks.db bookmarks serve
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,

        /// Path to the database file
        #[arg(short, long, env = "DB_PATH")]
        database: Option<PathBuf>,
    },

    /// Write a config file with the resolved settings
    Init {
        /// Port to record in the config file
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,

        /// Database path to record in the config file
        #[arg(short, long, env = "DB_PATH")]
        database: Option<PathBuf>,

        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let file_config = config::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve { port, database } => {
            let resolved = ServerConfig::resolve(port, database, file_config.as_ref());
            bookmarks::server::start_server(resolved).await?;
        }

        Commands::Init { port, database, force } => {
            let resolved = ServerConfig::resolve(port, database, file_config.as_ref());
            let path = cli.config.unwrap_or_else(config::default_config_path);
            config::write_config(&path, &BookmarksConfig::from(&resolved), force)?;
            tracing::info!("Wrote config to {}", path.display());
        }
    }

    Ok(())
}
