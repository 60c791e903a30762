//! Nominatim (OpenStreetMap) implementation of the geocoding capability.
//!
//! The engine is synchronous, so this client uses blocking reqwest. Each
//! engine attempt turns into one HTTP request per row; any request failure or
//! unresolvable address fails the whole attempt and leaves retrying to the
//! engine.

use anyhow::{anyhow, bail, Context, Result};
use geopipe_core::{GeocodeProvider, Position, ProviderRequest, ResolverConfig};
use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use serde::Deserialize;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

#[derive(Debug)]
pub struct NominatimProvider {
    client: Client,
    base_url: String,
}

/// One entry of a `/search` response; coordinates arrive as decimal strings.
#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
}

/// A `/reverse` response. Nominatim reports an unresolvable position as an
/// `error` field in an otherwise successful response.
#[derive(Debug, Deserialize)]
struct ReversePayload {
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl NominatimProvider {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Default for NominatimProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl GeocodeProvider for NominatimProvider {
    fn geocode(
        &self,
        addresses: &[String],
        request: &ProviderRequest<'_>,
    ) -> Result<Vec<Position>> {
        let mut positions = Vec::with_capacity(addresses.len());
        for address in addresses {
            debug!(%address, "querying nominatim search endpoint");
            let hits: Vec<SearchHit> = self
                .client
                .get(format!("{}/search", self.base_url))
                .query(&[
                    ("q", address.as_str()),
                    ("format", "jsonv2"),
                    ("limit", "1"),
                ])
                .header(USER_AGENT, request.user_agent)
                .timeout(request.timeout)
                .send()
                .with_context(|| format!("search request failed for '{address}'"))?
                .error_for_status()
                .with_context(|| format!("search request rejected for '{address}'"))?
                .json()
                .with_context(|| format!("malformed search response for '{address}'"))?;

            let hit = hits
                .into_iter()
                .next()
                .ok_or_else(|| anyhow!("no match for address '{address}'"))?;
            let x: f64 = hit
                .lon
                .parse()
                .with_context(|| format!("non-numeric longitude for '{address}'"))?;
            let y: f64 = hit
                .lat
                .parse()
                .with_context(|| format!("non-numeric latitude for '{address}'"))?;
            positions.push(Position::new(x, y));
        }
        Ok(positions)
    }

    fn reverse_geocode(
        &self,
        positions: &[Position],
        request: &ProviderRequest<'_>,
    ) -> Result<Vec<Option<String>>> {
        let mut addresses = Vec::with_capacity(positions.len());
        for position in positions {
            debug!(x = position.x, y = position.y, "querying nominatim reverse endpoint");
            let payload: ReversePayload = self
                .client
                .get(format!("{}/reverse", self.base_url))
                .query(&[
                    ("lat", position.y.to_string()),
                    ("lon", position.x.to_string()),
                    ("format", "jsonv2".to_string()),
                ])
                .header(USER_AGENT, request.user_agent)
                .timeout(request.timeout)
                .send()
                .with_context(|| {
                    format!("reverse request failed for ({}, {})", position.x, position.y)
                })?
                .error_for_status()
                .with_context(|| {
                    format!("reverse request rejected for ({}, {})", position.x, position.y)
                })?
                .json()
                .with_context(|| {
                    format!("malformed reverse response for ({}, {})", position.x, position.y)
                })?;

            if payload.error.is_some() {
                addresses.push(None);
            } else {
                addresses.push(payload.display_name);
            }
        }
        Ok(addresses)
    }
}

/// Builds the provider named by the configuration. Only `"nominatim"` is
/// recognized; the optional base URL override exists for testing against a
/// local service.
pub fn provider_for(
    config: &ResolverConfig,
    base_url: Option<&str>,
) -> Result<Box<dyn GeocodeProvider>> {
    match config.provider.to_ascii_lowercase().as_str() {
        "nominatim" => Ok(Box::new(match base_url {
            Some(url) => NominatimProvider::with_base_url(url),
            None => NominatimProvider::new(),
        })),
        other => bail!("unsupported geocoding provider '{other}'"),
    }
}
