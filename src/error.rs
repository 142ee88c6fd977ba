use thiserror::Error;

/// Errors raised for malformed inputs. Exhausting a range without a hit is
/// not an error; it is the `None` arm of a successful scan.
#[derive(Debug, Error)]
pub enum DlogError {
    #[error("malformed compressed public key: {0}")]
    MalformedKey(String),

    #[error("point is not on the curve: {0}")]
    InvalidPoint(String),

    #[error("invalid scan range: {start} - {end}")]
    InvalidRange { start: String, end: String },

    #[error("scalar {0} is not a valid private key for the curve order")]
    ScalarOutOfRange(String),
}

pub type Result<T> = std::result::Result<T, DlogError>;
