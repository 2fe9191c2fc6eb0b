//! IP geolocation lookups against an ipinfo-style JSON API.

use serde_json::Value;
use std::net::IpAddr;
use std::time::Duration;

use crate::error::{Error, Result};

/// Client for `{base_url}/{ip}/json` geolocation endpoints.
pub struct GeoClient {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl GeoClient {
    /// Create a client for the given API base URL.
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self::with_client(base_url, client))
    }

    /// Create a client that sends requests through an existing HTTP client.
    pub fn with_client(base_url: &str, client: reqwest::blocking::Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Lookup URL for an address.
    pub fn url_for(&self, ip: IpAddr) -> String {
        format!("{}/{}/json", self.base_url, ip)
    }

    /// Fetch geolocation data for an address.
    ///
    /// Input that does not parse as an IP address is rejected without
    /// sending a request.
    pub fn try_lookup(&self, ip: &str) -> Result<Value> {
        let addr: IpAddr = ip
            .trim()
            .parse()
            .map_err(|_| Error::Geolocation(format!("'{}' is not an IP address", ip)))?;

        let response = self.client.get(self.url_for(addr)).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Geolocation(format!(
                "lookup for {} returned {}",
                addr, status
            )));
        }
        Ok(response.json()?)
    }

    /// Fetch geolocation data, logging failures and returning an empty object.
    pub fn lookup(&self, ip: &str) -> Value {
        match self.try_lookup(ip) {
            Ok(value) => value,
            Err(e) => {
                log::error!("Failed to get geolocation for IP {}: {}", ip, e);
                Value::Object(Default::default())
            }
        }
    }
}
