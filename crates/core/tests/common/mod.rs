use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use geopipe_core::{GeocodeProvider, Position, ProviderRequest, ResolverConfig};

/// Provider stub with scripted results, scripted failures, and invocation
/// counting, so tests can assert exactly how the engine drives the capability.
#[derive(Debug)]
pub struct CountingProvider {
    failures_before_success: u32,
    positions: Vec<Position>,
    addresses: Vec<Option<String>>,
    geocode_calls: AtomicU32,
    reverse_calls: AtomicU32,
    pub seen_addresses: Mutex<Vec<String>>,
    pub seen_positions: Mutex<Vec<Position>>,
}

impl CountingProvider {
    pub fn returning_positions(positions: Vec<Position>) -> Self {
        Self {
            positions,
            ..Self::empty()
        }
    }

    pub fn returning_addresses(addresses: Vec<Option<String>>) -> Self {
        Self {
            addresses,
            ..Self::empty()
        }
    }

    pub fn always_failing() -> Self {
        Self {
            failures_before_success: u32::MAX,
            ..Self::empty()
        }
    }

    /// Fails the first `failures` calls, then serves the scripted results.
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

    pub fn total_calls(&self) -> u32 {
        self.geocode_calls() + self.reverse_calls()
    }

    fn empty() -> Self {
        Self {
            failures_before_success: 0,
            positions: Vec::new(),
            addresses: Vec::new(),
            geocode_calls: AtomicU32::new(0),
            reverse_calls: AtomicU32::new(0),
            seen_addresses: Mutex::new(Vec::new()),
            seen_positions: Mutex::new(Vec::new()),
        }
    }
}

impl GeocodeProvider for CountingProvider {
    fn geocode(
        &self,
        addresses: &[String],
        _request: &ProviderRequest<'_>,
    ) -> Result<Vec<Position>> {
        let call = self.geocode_calls.fetch_add(1, Ordering::SeqCst) + 1;
        *self.seen_addresses.lock().unwrap() = addresses.to_vec();
        if call <= self.failures_before_success {
            return Err(anyhow!("scripted geocode failure on call {call}"));
        }
        Ok(self.positions.clone())
    }

    fn reverse_geocode(
        &self,
        positions: &[Position],
        _request: &ProviderRequest<'_>,
    ) -> Result<Vec<Option<String>>> {
        let call = self.reverse_calls.fetch_add(1, Ordering::SeqCst) + 1;
        *self.seen_positions.lock().unwrap() = positions.to_vec();
        if call <= self.failures_before_success {
            return Err(anyhow!("scripted reverse geocode failure on call {call}"));
        }
        Ok(self.addresses.clone())
    }
}

/// Config with a zero sleep so retry tests run instantly.
pub fn quick_config(retries: u32) -> ResolverConfig {
    ResolverConfig {
        retries,
        sleep: 0.0,
        ..ResolverConfig::default()
    }
}
