//! CLI entry point for postpage-rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "postpage-rs")]
#[command(version)]
#[command(about = "Serves and generates blog post pages from a headless CMS", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the page server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,

        /// Skip loading known posts before accepting requests
        #[arg(long)]
        no_prerender: bool,
    },

    /// Write every post to the public folder
    #[command(alias = "g")]
    Generate,

    /// List the post paths the content store knows about
    Paths,

    /// Clean the public folder
    Clean,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "postpage_rs=debug,tower_http=debug,info"
    } else {
        "postpage_rs=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Server {
            port,
            ip,
            open,
            no_prerender,
        } => {
            let site = postpage_rs::Site::new(&base_dir)?;
            tracing::info!("Starting server at http://{}:{}", ip, port);
            postpage_rs::server::start(&site, &ip, port, !no_prerender, open).await?;
        }

        Commands::Generate => {
            let site = postpage_rs::Site::new(&base_dir)?;
            tracing::info!("Generating static files...");
            site.generate().await?;
            println!("Generated successfully!");
        }

        Commands::Paths => {
            let site = postpage_rs::Site::new(&base_dir)?;
            postpage_rs::commands::paths::run(&site).await?;
        }

        Commands::Clean => {
            // no store needed just to delete files
            let config = postpage_rs::config::SiteConfig::load_dir(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            postpage_rs::commands::clean::run(&base_dir.join(&config.public_dir))?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("postpage-rs version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
