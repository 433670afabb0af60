use anyhow::Result;
use clap::Parser;
use config::Config;
use log::error;
use service::create_service_context;

mod config;
mod constants;
mod persistence;
mod service;
mod util;
mod web;

// MAIN
#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    // Parse command line arguments and env vars with clap
    let conf = Config::parse();

    let db = persistence::get_db_context(&conf).await?;
    let service_context = create_service_context(conf.clone(), db).await?;

    if let Err(e) = web::rocket_main(service_context).launch().await {
        error!("Web server stopped with error: {e}");
    }

    Ok(())
}
