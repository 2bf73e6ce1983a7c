use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "conneg")]
#[command(about = "HTTP content negotiation CLI", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP server
    Server(ServerArgs),
    /// Parse an Accept header and print its values in preference order
    Rank(RankArgs),
}

#[derive(clap::Args, Debug)]
pub struct ServerArgs {
    /// Configuration file (defaults to $CONNEG_CONFIG or config/conneg.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Address to bind the HTTP server to (overrides server.bind_addr)
    #[arg(long)]
    pub address: Option<SocketAddr>,
}

#[derive(clap::Args, Debug)]
pub struct RankArgs {
    /// Raw Accept header value, e.g. "text/html, */*;q=0.8"
    pub header: String,
}
