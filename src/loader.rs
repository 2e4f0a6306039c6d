//! Startup fetch of the group configuration table.
//!
//! One GET of a JSON array of group definitions. No retry, no caching;
//! a failure leaves the group list empty and is reported to the user by
//! the caller.

use dye_water_ratio::{parse_group_definitions, GroupDefinition};
use gloo_net::http::Request;
use log::{info, warn};
use std::fmt;

/// Why the configuration could not be loaded.
#[derive(Debug)]
pub enum LoadError {
    Network(String),
    Http(u16),
    Parse(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Network(e) => write!(f, "Network error: {}", e),
            LoadError::Http(status) => write!(f, "HTTP {} while fetching configuration", status),
            LoadError::Parse(e) => write!(f, "Invalid configuration document: {}", e),
        }
    }
}

impl std::error::Error for LoadError {}

/// Fetch and parse the group definitions from `url`.
pub async fn fetch_group_definitions(url: &str) -> Result<Vec<GroupDefinition>, LoadError> {
    info!("fetching group configuration from {}", url);

    let response = Request::get(url)
        .send()
        .await
        .map_err(|e| LoadError::Network(e.to_string()))?;

    if !response.ok() {
        warn!("configuration fetch returned HTTP {}", response.status());
        return Err(LoadError::Http(response.status()));
    }

    let body = response
        .text()
        .await
        .map_err(|e| LoadError::Network(e.to_string()))?;

    parse_group_definitions(&body).map_err(|e| LoadError::Parse(e.to_string()))
}
