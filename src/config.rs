use std::{net::SocketAddr, path::PathBuf};

use color_eyre::eyre::{eyre, Result, WrapErr};

use crate::{overpass::DEFAULT_OVERPASS_URL, selector::SelectionPolicy};

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub overpass_url: String,
    pub data_dir: PathBuf,
    pub area_code: String,
    pub query_timeout_secs: u32,
    pub selection: SelectionPolicy,
    pub listen: SocketAddr,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads `TOUR_ROUTE_*` keys through `lookup`, falling back to defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let query_timeout_secs = get("TOUR_ROUTE_QUERY_TIMEOUT", "25")
            .parse()
            .wrap_err("TOUR_ROUTE_QUERY_TIMEOUT must be a number of seconds")?;
        let dedup = match get("TOUR_ROUTE_DEDUP", "true").to_lowercase().as_str() {
            "true" | "1" | "yes" => true,
            "false" | "0" | "no" => false,
            other => return Err(eyre!("TOUR_ROUTE_DEDUP must be a boolean, got {}", other)),
        };
        let listen = get("TOUR_ROUTE_LISTEN", "0.0.0.0:3000")
            .parse()
            .wrap_err("TOUR_ROUTE_LISTEN must be an address like 0.0.0.0:3000")?;

        Ok(Config {
            overpass_url: get("TOUR_ROUTE_OVERPASS_URL", DEFAULT_OVERPASS_URL),
            data_dir: PathBuf::from(get("TOUR_ROUTE_DATA_DIR", "data")),
            area_code: get("TOUR_ROUTE_AREA", "RU-ARK"),
            query_timeout_secs,
            selection: SelectionPolicy {
                dedup_across_categories: dedup,
            },
            listen,
        })
    }
}
