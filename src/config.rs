//! Settings for connecting the web front end to the ledger API.

use std::net::SocketAddr;

use reqwest::Url;

use crate::Error;

/// Where the ledger API lives and where the front end listens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// The base URL of the ledger API, e.g. `http://localhost:5000/api`.
    pub api_url: String,
    /// The address to serve the front end from.
    pub address: SocketAddr,
}

impl ClientConfig {
    /// Create a config that serves on `port` on all interfaces.
    ///
    /// # Errors
    /// Returns [Error::InvalidApiUrl] if `api_url` is not an absolute HTTP or
    /// HTTPS URL.
    pub fn new(api_url: &str, port: u16) -> Result<Self, Error> {
        let url = Url::parse(api_url)
            .map_err(|error| Error::InvalidApiUrl(api_url.to_owned(), error.to_string()))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::InvalidApiUrl(
                api_url.to_owned(),
                format!("unsupported scheme \"{}\"", url.scheme()),
            ));
        }

        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_owned(),
            address: SocketAddr::from(([0, 0, 0, 0], port)),
        })
    }
}
