use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolveError {
    /// The dataset lacks a column the requested direction needs, or the
    /// column's values cannot be read as the required type.
    #[error("address resolution requires a usable '{column}' column")]
    MissingColumn { column: String },
    /// Every attempt within the retry budget failed; wraps the last failure.
    #[error("provider failed after {attempts} attempt(s)")]
    Provider {
        attempts: u32,
        #[source]
        source: anyhow::Error,
    },
    #[error(transparent)]
    Frame(#[from] polars::error::PolarsError),
}

impl ResolveError {
    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
        }
    }
}
