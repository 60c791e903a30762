//! Resolution engine.
//!
//! Validates the dataset schema for the requested direction, drives a bounded
//! retry loop against the geocoding provider, and merges provider results back
//! into the frame.

pub mod error;
pub mod provider;
pub mod resolve;
pub mod retry;

pub use error::ResolveError;
pub use provider::{GeocodeProvider, ProviderRequest};
pub use resolve::resolve;
