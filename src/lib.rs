pub mod auth;
pub mod cli;
pub mod commands;
pub mod config;
pub mod contact;
pub mod db;
pub mod lightbox;
pub mod media;
pub mod notify;
pub mod resolver;
pub mod state;

use clap::Parser;

pub fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    cli::execute(cli::Cli::parse())
}
