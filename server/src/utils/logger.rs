//! Logging setup
//!
//! Console output always; when `LOG_DIR` is set, JSON lines additionally go
//! to a daily-rolling file. The returned guard must be held for the process
//! lifetime or buffered file output is lost.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

pub fn init() -> Option<WorkerGuard> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match std::env::var("LOG_DIR") {
        Ok(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, "bazaar-server.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer())
                .with(fmt::layer().json().with_ansi(false).with_writer(non_blocking))
                .init();
            Some(guard)
        }
        Err(_) => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer())
                .init();
            None
        }
    }
}
