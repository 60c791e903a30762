use thiserror::Error;

use crate::config::ConfigError;
use crate::engine::ResolveError;

pub type Result<T> = std::result::Result<T, CoreError>;

/// Top-level failure of a pipeline invocation.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}
