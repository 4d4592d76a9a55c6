/// Errors surfaced by the uncertainty computation and file ingestion
///
/// All variants are local and non-fatal: the session state remains usable
/// after any error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A Type A estimate needs at least 2 observations
    #[error("at least 2 measurements are required for a sample standard deviation, got {count}")]
    InsufficientData { count: usize },

    /// A non-finite value was submitted for a measurement or a limit error
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A distribution wire code outside the enumerated set
    #[error("unknown distribution code {code}, expected 0 (uniform), 1 (normal95) or 2 (normal99)")]
    InvalidDistribution { code: u32 },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}
