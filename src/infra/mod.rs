pub mod config;

pub use config::{ConfigManager, UserConfig, DEFAULT_API_BASE_URL};
