//! Server core: configuration, shared state and the HTTP server loop

mod config;
mod server;
mod state;

pub use config::Config;
pub use server::run;
pub use state::AppState;
