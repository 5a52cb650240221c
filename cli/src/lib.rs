pub mod commands;
pub mod context;
pub mod demo;
pub mod heartbeat;
pub mod logging;
pub mod repl;

pub use context::{CliContext, KillWriter};
pub use repl::readline;

/// Wall-clock time in Unix milliseconds
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
