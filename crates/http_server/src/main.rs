use std::process::ExitCode;

use carbon_route_server::{
    HttpServer, HttpServerError,
    config::{Args, ServerConfig},
    router::Router,
    storage::DirectoryStorage,
};
use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Args::parse().into_config();
    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: ServerConfig) -> Result<(), HttpServerError> {
    config.validate()?;

    log::info!("serving files from {}", config.directory.display());
    let router = Router::new(DirectoryStorage::new(&config.directory)).with_policy(config.policy);
    let server = HttpServer::new(config.addr, router, config.limits);
    server.serve().await
}
