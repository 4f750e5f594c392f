use std::sync::OnceLock;

use color_eyre::eyre::{eyre, Result};

use crate::config::Config;

pub static CONFIG: OnceLock<Config> = OnceLock::new();
pub static REQWEST: OnceLock<reqwest::Client> = OnceLock::new();

pub fn get_config() -> Result<&'static Config> {
    CONFIG.get().ok_or(eyre!("Failed to get config"))
}

pub fn get_reqwest_client() -> Result<&'static reqwest::Client> {
    REQWEST.get().ok_or(eyre!("Failed to get reqwest client"))
}
