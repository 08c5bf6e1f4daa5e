//! Error types for pagesim.

use thiserror::Error;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors raised by the simulation engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The reference stream is empty or has no valid page numbers.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The simulation configuration is unusable (e.g., zero frames).
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The requested policy name has no implementation.
    #[error("Unknown policy: {0}")]
    UnknownPolicy(String),

    /// A policy's internal bookkeeping became inconsistent.
    ///
    /// This indicates a bug in the policy, not bad input. It is fatal to
    /// the run that raised it.
    #[error("{policy} invariant violated: {detail}")]
    PolicyInvariant { policy: String, detail: String },
}

impl Error {
    /// Build a [`Error::PolicyInvariant`] from anything printable.
    pub fn invariant(policy: impl Into<String>, detail: impl Into<String>) -> Self {
        Error::PolicyInvariant {
            policy: policy.into(),
            detail: detail.into(),
        }
    }

    /// Attribute an invariant error to `policy`. Other variants pass through.
    pub fn in_policy(self, policy: &str) -> Self {
        match self {
            Error::PolicyInvariant { detail, .. } => Error::PolicyInvariant {
                policy: policy.to_string(),
                detail,
            },
            other => other,
        }
    }
}
