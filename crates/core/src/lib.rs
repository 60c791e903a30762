pub mod config;
pub mod engine;
pub mod error;
pub mod model;

pub use config::{resolve_config, ConfigEntry, ConfigError, ResolverConfig};
pub use engine::provider::{GeocodeProvider, ProviderRequest};
pub use engine::resolve::resolve;
pub use engine::ResolveError;
pub use error::{CoreError, Result};
pub use model::{Direction, Position};
