use num_bigint::BigUint;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SharingError {
    #[error("element {value} has no inverse modulo the field prime")]
    NonInvertibleElement { value: BigUint },
    #[error("degenerate input: {0}")]
    DegenerateInput(String),
    #[error("invalid threshold {threshold} for {share_count} shares (need 2 <= t <= n)")]
    InvalidThreshold { threshold: usize, share_count: usize },
    #[error("invalid secret: {0}")]
    InvalidSecret(String),
    #[error("invalid modulus: {0}")]
    InvalidModulus(String),
    #[error("malformed share bundle: {0}")]
    MalformedBundle(String),
    #[error("expected {expected} values per row, found {found}")]
    ShareCountMismatch { expected: usize, found: usize },
    #[error("share identifier {0} supplied more than once")]
    DuplicateIdentifier(u32),
    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SharingError>;
