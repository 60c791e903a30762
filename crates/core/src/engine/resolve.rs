// Resolution engine entry point.
//
// Schema validation always happens before the first provider call, so a
// malformed dataset never reaches the network. The provider is invoked once
// per attempt over the whole column, not once per row.

use std::time::Duration;

use anyhow::anyhow;
use polars::prelude::*;
use tracing::{debug, info};

use crate::config::ResolverConfig;
use crate::engine::error::ResolveError;
use crate::engine::provider::{GeocodeProvider, ProviderRequest};
use crate::engine::retry::{run_with_retries, Attempt};
use crate::model::{Direction, Position};

/// Transforms `data` according to `direction`, mutating it in place and
/// returning it. On any failure the dataset is dropped untouched.
pub fn resolve(
    data: DataFrame,
    direction: Direction,
    config: &ResolverConfig,
    provider: &dyn GeocodeProvider,
) -> Result<DataFrame, ResolveError> {
    match direction {
        Direction::Reverse => resolve_reverse(data, config, provider),
        Direction::Forward => resolve_forward(data, config, provider),
    }
}

/// Reverse direction: the `address` column produces `longitude`/`latitude`.
fn resolve_reverse(
    mut data: DataFrame,
    config: &ResolverConfig,
    provider: &dyn GeocodeProvider,
) -> Result<DataFrame, ResolveError> {
    let addresses = address_column(&data)?;
    let request = provider_request(config);

    let positions = attempt_all(config, |attempt| {
        debug!(attempt, rows = addresses.len(), "geocoding address column");
        match provider.geocode(&addresses, &request) {
            Ok(positions) if positions.len() == addresses.len() => Attempt::Success(positions),
            Ok(positions) => Attempt::Failure(anyhow!(
                "provider returned {} positions for {} rows",
                positions.len(),
                addresses.len()
            )),
            Err(error) => Attempt::Failure(error),
        }
    })?;

    let xs: Vec<f64> = positions.iter().map(|p| p.x).collect();
    let ys: Vec<f64> = positions.iter().map(|p| p.y).collect();
    data.with_column(Series::new("longitude".into(), xs))?;
    data.with_column(Series::new("latitude".into(), ys))?;

    info!(rows = data.height(), "reverse resolution complete");
    Ok(data)
}

/// Forward direction: `latitude`/`longitude` columns produce `address`.
fn resolve_forward(
    mut data: DataFrame,
    config: &ResolverConfig,
    provider: &dyn GeocodeProvider,
) -> Result<DataFrame, ResolveError> {
    let positions = position_column(&data)?;
    let request = provider_request(config);

    let addresses = attempt_all(config, |attempt| {
        debug!(
            attempt,
            rows = positions.len(),
            "reverse geocoding coordinate columns"
        );
        match provider.reverse_geocode(&positions, &request) {
            Ok(addresses) if addresses.len() == positions.len() => Attempt::Success(addresses),
            Ok(addresses) => Attempt::Failure(anyhow!(
                "provider returned {} addresses for {} rows",
                addresses.len(),
                positions.len()
            )),
            Err(error) => Attempt::Failure(error),
        }
    })?;

    // Unresolved entries stay null rather than collapsing to empty strings.
    data.with_column(Series::new("address".into(), addresses))?;

    info!(rows = data.height(), "forward resolution complete");
    Ok(data)
}

fn provider_request(config: &ResolverConfig) -> ProviderRequest<'_> {
    ProviderRequest {
        provider: &config.provider,
        user_agent: &config.user_agent,
        timeout: Duration::from_secs_f64(config.timeout),
    }
}

fn attempt_all<T>(
    config: &ResolverConfig,
    attempt: impl FnMut(u32) -> Attempt<T>,
) -> Result<T, ResolveError> {
    let delay = Duration::from_secs_f64(config.sleep);
    run_with_retries(config.retries, delay, attempt).map_err(|exhausted| {
        let source = exhausted.last_error.unwrap_or_else(|| {
            anyhow!("retry budget of {} permits no attempts", config.retries)
        });
        ResolveError::Provider {
            attempts: exhausted.attempts,
            source,
        }
    })
}

/// Reads the `address` column as strings; null cells become empty strings.
fn address_column(data: &DataFrame) -> Result<Vec<String>, ResolveError> {
    let series = data
        .column("address")
        .map_err(|_| ResolveError::missing_column("address"))?
        .as_materialized_series();
    let strings = series
        .str()
        .map_err(|_| ResolveError::missing_column("address"))?;
    Ok(strings
        .into_iter()
        .map(|cell| cell.unwrap_or_default().to_string())
        .collect())
}

/// Assembles one position per row from the coordinate columns.
fn position_column(data: &DataFrame) -> Result<Vec<Position>, ResolveError> {
    let lats = numeric_column(data, "latitude")?;
    let lons = numeric_column(data, "longitude")?;
    // Provider axis order is (x, y) = (longitude, latitude).
    Ok(lons
        .into_iter()
        .zip(lats)
        .map(|(lon, lat)| Position::new(lon, lat))
        .collect())
}

/// Reads a column as `f64`, rejecting it when it is absent, holds nulls, or
/// holds values that do not parse as numbers.
fn numeric_column(data: &DataFrame, name: &str) -> Result<Vec<f64>, ResolveError> {
    let series = data
        .column(name)
        .map_err(|_| ResolveError::missing_column(name))?
        .as_materialized_series();
    // A non-strict cast turns unparseable cells into nulls, which the null
    // check below then rejects alongside cells that were null to begin with.
    let casted = series
        .cast(&DataType::Float64)
        .map_err(|_| ResolveError::missing_column(name))?;
    if casted.null_count() > 0 {
        return Err(ResolveError::missing_column(name));
    }
    let values = casted
        .f64()
        .map_err(|_| ResolveError::missing_column(name))?;
    Ok(values.into_iter().map(|cell| cell.unwrap_or_default()).collect())
}
