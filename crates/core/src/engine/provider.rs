use std::time::Duration;

use anyhow::Result;

use crate::model::Position;

/// Per-call parameters forwarded to the provider.
#[derive(Debug, Clone)]
pub struct ProviderRequest<'a> {
    /// Provider identifier from the configuration.
    pub provider: &'a str,
    /// User agent the provider should present to the remote service.
    pub user_agent: &'a str,
    /// Timeout applied to each remote request.
    pub timeout: Duration,
}

/// Capability over an external geocoding service.
///
/// Both operations are batched over a whole column and must return exactly one
/// entry per input, in input order. The engine owns all retrying; an
/// implementation reports each failure immediately.
pub trait GeocodeProvider: std::fmt::Debug {
    /// Resolves addresses into positions.
    fn geocode(
        &self,
        addresses: &[String],
        request: &ProviderRequest<'_>,
    ) -> Result<Vec<Position>>;

    /// Resolves positions into addresses. Entries the service cannot resolve
    /// come back as `None`.
    fn reverse_geocode(
        &self,
        positions: &[Position],
        request: &ProviderRequest<'_>,
    ) -> Result<Vec<Option<String>>>;
}

impl<P: GeocodeProvider + ?Sized> GeocodeProvider for std::sync::Arc<P> {
    fn geocode(
        &self,
        addresses: &[String],
        request: &ProviderRequest<'_>,
    ) -> Result<Vec<Position>> {
        (**self).geocode(addresses, request)
    }

    fn reverse_geocode(
        &self,
        positions: &[Position],
        request: &ProviderRequest<'_>,
    ) -> Result<Vec<Option<String>>> {
        (**self).reverse_geocode(positions, request)
    }
}
