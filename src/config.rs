//! Server configuration.
//!
//! Every option can be given on the command line or through a `DISPOKV_*`
//! environment variable; the command line wins.

use crate::storage::CountMode;
use clap::Parser;

/// DispoKV - an in-memory store of disposable resources
#[derive(Parser, Debug, Clone)]
#[command(name = "dispokv")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Host to bind to
    #[arg(long, env = "DISPOKV_HOST", default_value = crate::DEFAULT_HOST)]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "DISPOKV_PORT", default_value_t = crate::DEFAULT_PORT)]
    pub port: u16,

    /// URL prefix placed in front of /api
    #[arg(long, env = "DISPOKV_PREFIX", default_value = "/")]
    pub prefix: String,

    /// How the category summary treats expired but unread resources (lazy, sweep)
    #[arg(long, env = "DISPOKV_COUNT_MODE", default_value_t = CountMode::Lazy)]
    pub count_mode: CountMode,

    /// Log level (trace, debug, info, warn, error), overridden by RUST_LOG
    #[arg(long, env = "DISPOKV_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Config {
    /// Returns the bind address as a string
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
