use std::sync::Arc;

use clap::Parser;
use eyre::Result;
use log::info;

use ytscribe::cli::Cli;
use ytscribe::server::{self, AppState};
use ytscribe::store::TranscriptStore;
use ytscribe::youtube::YouTube;

fn setup_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let store = TranscriptStore::connect(&cli.database_url).await?;
    let source = Arc::new(YouTube::new(reqwest::Client::new()));

    let state = AppState {
        store,
        source,
        lang: cli.lang,
    };

    let addr = format!("0.0.0.0:{}", cli.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server started on http://{addr}");

    axum::serve(listener, server::router(state)).await?;

    Ok(())
}
