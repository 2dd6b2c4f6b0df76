//! Configuration loading and ambient settings

mod file_loader;
pub mod hub;
mod logging_config;

pub use file_loader::load_evaluation_config;
pub use hub::HubSettings;
pub use logging_config::{LogFormat, LoggingConfig};
