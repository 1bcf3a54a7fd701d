//! Shared domain types and configuration for SocialSave.
//!
//! Holds the [`Post`] record produced by an analysis, the closed
//! [`Platform`] and [`MediaType`] enumerations, the URL-based platform
//! classifier, and env-driven application configuration.

mod app_config;
mod config;
pub mod platform;
pub mod post;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{
    build_app_config, build_data_dir, build_log_level, load_app_config, load_app_config_from_env,
    load_dotenv,
};
pub use platform::{detect_platform, Platform};
pub use post::{MediaType, Post};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
