use bazaar_server::core::{run, Config};
use bazaar_server::utils::logger;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    let _log_guard = logger::init();

    let config = Config::from_env();
    tracing::info!(
        environment = %config.environment,
        port = config.http_port,
        database = %config.database_path,
        "Starting server"
    );

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server exited with error");
        std::process::exit(1);
    }
}
