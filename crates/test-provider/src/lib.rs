//! Scripted geocoding providers for exercising the pipeline without network
//! access.
//!
//! A [`ScriptedProvider`] serves canned positions or addresses, optionally
//! failing a fixed number of leading calls, and records how often each
//! operation was invoked. Wrap it in an [`std::sync::Arc`] to keep a handle on
//! the counters after handing the provider to the pipeline.

use std::sync::atomic::{AtomicU32, Ordering};

use anyhow::{anyhow, Result};
use geopipe_core::{GeocodeProvider, Position, ProviderRequest};

#[derive(Debug)]
pub struct ScriptedProvider {
    failures_before_success: u32,
    positions: Vec<Position>,
    addresses: Vec<Option<String>>,
    geocode_calls: AtomicU32,
    reverse_calls: AtomicU32,
}

impl ScriptedProvider {
    /// Serves `positions` from every successful `geocode` call.
    pub fn returning_positions(positions: Vec<Position>) -> Self {
        Self {
            positions,
            ..Self::empty()
        }
    }

    /// Serves `addresses` from every successful `reverse_geocode` call.
    pub fn returning_addresses(addresses: Vec<Option<String>>) -> Self {
        Self {
            addresses,
            ..Self::empty()
        }
    }

    /// Fails every call.
    pub fn always_failing() -> Self {
        Self {
            failures_before_success: u32::MAX,
            ..Self::empty()
        }
    }

    /// Fails the first `failures` calls of each operation, then serves the
    /// scripted results.
    pub fn failing_first(mut self, failures: u32) -> Self {
        self.failures_before_success = failures;
        self
    }

    pub fn geocode_calls(&self) -> u32 {
        self.geocode_calls.load(Ordering::SeqCst)
    }

    pub fn reverse_calls(&self) -> u32 {
        self.reverse_calls.load(Ordering::SeqCst)
    }

    fn empty() -> Self {
        Self {
            failures_before_success: 0,
            positions: Vec::new(),
            addresses: Vec::new(),
            geocode_calls: AtomicU32::new(0),
            reverse_calls: AtomicU32::new(0),
        }
    }
}

impl GeocodeProvider for ScriptedProvider {
    fn geocode(
        &self,
        _addresses: &[String],
        _request: &ProviderRequest<'_>,
    ) -> Result<Vec<Position>> {
        let call = self.geocode_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call <= self.failures_before_success {
            return Err(anyhow!("scripted geocode outage on call {call}"));
        }
        Ok(self.positions.clone())
    }

    fn reverse_geocode(
        &self,
        _positions: &[Position],
        _request: &ProviderRequest<'_>,
    ) -> Result<Vec<Option<String>>> {
        let call = self.reverse_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call <= self.failures_before_success {
            return Err(anyhow!("scripted reverse geocode outage on call {call}"));
        }
        Ok(self.addresses.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn request() -> ProviderRequest<'static> {
        ProviderRequest {
            provider: "nominatim",
            user_agent: "test",
            timeout: Duration::from_secs(1),
        }
    }

    #[test]
    fn serves_scripted_positions_after_scripted_failures() {
        let provider =
            ScriptedProvider::returning_positions(vec![Position::new(1.0, 2.0)]).failing_first(1);

        assert!(provider.geocode(&["x".to_string()], &request()).is_err());
        let positions = provider.geocode(&["x".to_string()], &request()).unwrap();
        assert_eq!(positions, vec![Position::new(1.0, 2.0)]);
        assert_eq!(provider.geocode_calls(), 2);
    }

    #[test]
    fn operations_count_independently() {
        let provider = ScriptedProvider::returning_addresses(vec![None]);

        provider.reverse_geocode(&[], &request()).unwrap();
        assert_eq!(provider.reverse_calls(), 1);
        assert_eq!(provider.geocode_calls(), 0);
    }
}
