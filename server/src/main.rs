use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use clap::Parser;
use std::path::{Path, PathBuf};

use interview_server::config::{Config, DEFAULT_CONFIG_FILE};
use interview_server::execution::ExecutionService;
use interview_server::handlers;
use interview_server::server::spawn_server;

#[derive(Parser, Debug)]
#[clap(name = "interview-server", about = "Collaborative code-interview backend")]
struct Cli {
    /// TOML configuration file. Defaults apply when the default file is absent.
    #[clap(long)]
    config: Option<PathBuf>,

    /// Address to listen on, overriding `server.bind_addr`.
    #[clap(long)]
    bind: Option<String>,

    /// Log filter used when RUST_LOG is unset.
    #[clap(long, default_value = "info")]
    log_level: String,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(Path::new(DEFAULT_CONFIG_FILE))?,
    };
    if let Some(bind) = cli.bind {
        config.server.bind_addr = bind;
    }

    let srv_tx = spawn_server();
    let execution = web::Data::new(ExecutionService::from_config(&config.execution));

    log::info!(
        "Listening on {} (javascript: {:?})",
        config.server.bind_addr,
        config.execution.javascript
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(srv_tx.clone()))
            .app_data(execution.clone())
            .configure(handlers::root)
    })
    .bind(&config.server.bind_addr)?
    .run()
    .await?;

    Ok(())
}
