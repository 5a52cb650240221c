mod background_tasks;
mod config;
mod error;
mod services;

pub use background_tasks::BackgroundTasks;
pub use config::{AppConfig, AppConfigExt, MessagesConfig};
pub use error::ConfigError;
pub use services::Services;
