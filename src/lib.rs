pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod models;
pub mod validation;

pub use client::{HttpUserApi, UserApi};
pub use config::Config;
pub use error::{Error, Result};
pub use form::UserForm;

/// Load configuration from environment variables
pub fn load_config() -> Result<Config> {
    Ok(Config::load()?)
}
