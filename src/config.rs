//! Configuration
//!
//! Everything is read from the environment, a `.env` file is loaded first when present.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use url::Url;

use crate::utils::env_var_or_else;
use crate::utils::env_var_parsed_or;
use crate::view::DEFAULT_PAGE_SIZE;
use crate::view::PageSize;

const DEFAULT_ADDRESS: &str = "0.0.0.0:6000";
const DEFAULT_UPSTREAM_URL: &str = "https://jsonplaceholder.typicode.com";
const DEFAULT_UPSTREAM_TIMEOUT: u64 = 10;
const DEFAULT_ALIAS_DOMAIN: &str = "canary.com";
const DEFAULT_FETCH_LIMIT: usize = 30;

/// Configuration of Canary
#[derive(Clone, Debug)]
pub struct Config {
    /// Address to listen on
    pub address: SocketAddr,

    /// Base URL of the placeholder API
    pub upstream_url: Url,

    /// Timeout of a single upstream request
    pub upstream_timeout: Duration,

    /// Domain of the aliases made from upstream items
    pub alias_domain: String,

    /// Page size of the alias table
    pub page_size: PageSize,

    /// Number of upstream items turned into aliases
    pub fetch_limit: usize,
}

impl Config {
    /// Read the configuration from the environment
    ///
    /// # Errors
    ///
    /// Will return `Err` when a variable is set but does not parse
    pub fn from_env() -> Result<Self> {
        let mut address = env_var_or_else("ADDRESS", || String::from(DEFAULT_ADDRESS))
            .parse::<SocketAddr>()?;

        // optional override of just the port
        if let Ok(port) = std::env::var("PORT") {
            // only check non-empty strings
            if !port.is_empty() {
                let port = port.parse::<u16>()?;

                address.set_port(port);
            }
        }

        let upstream_url =
            env_var_or_else("UPSTREAM_URL", || String::from(DEFAULT_UPSTREAM_URL)).parse()?;

        Ok(Self {
            address,
            upstream_url,
            upstream_timeout: Duration::from_secs(env_var_parsed_or(
                "UPSTREAM_TIMEOUT",
                DEFAULT_UPSTREAM_TIMEOUT,
            )?),
            alias_domain: env_var_or_else("ALIAS_DOMAIN", || String::from(DEFAULT_ALIAS_DOMAIN)),
            page_size: PageSize::from_setting(env_var_parsed_or("PAGE_SIZE", DEFAULT_PAGE_SIZE)?),
            fetch_limit: env_var_parsed_or("FETCH_LIMIT", DEFAULT_FETCH_LIMIT)?,
        })
    }
}
