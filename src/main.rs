mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use conneg::config::Config;
use conneg::negotiation::AcceptHeader;
use tracing_subscriber::EnvFilter;

type AnyError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), AnyError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Server(args) => {
            let config = match args.config {
                Some(path) => Config::load_from_path(path)?,
                None => Config::load()?,
            };
            conneg::api::run(config, args.address).await?
        }
        Commands::Rank(args) => rank(&args.header)?,
    }

    Ok(())
}

fn rank(header: &str) -> Result<(), AnyError> {
    let ranked = AcceptHeader::parse(header)?;
    for (position, value) in ranked.iter().enumerate() {
        println!("{}\t{}", position + 1, value);
    }
    Ok(())
}
