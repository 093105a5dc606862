use thiserror::Error;

/// Result type alias for half conversions.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while producing a half value.
///
/// Comparing vectors of different shapes is not an error; the distance
/// functions return `None` instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Malformed text, or junk after the number.
    #[error("invalid input syntax for type half: \"{0}\"")]
    InvalidTextSyntax(String),

    /// Text whose value lies outside the finite half range.
    #[error("\"{0}\" is out of range for type half")]
    OutOfRange(String),

    /// A finite value became infinite when narrowed.
    #[error("value out of range: overflow")]
    Overflow,

    /// A nonzero value became zero when narrowed.
    #[error("value out of range: underflow")]
    Underflow,

    /// Malformed binary input.
    #[error("invalid binary representation: {0}")]
    InvalidBinary(String),
}

impl Error {
    /// Returns the SQLSTATE code a database would report for this error.
    pub fn sqlstate(&self) -> &'static str {
        match self {
            Self::InvalidTextSyntax(_) => "22P02",
            Self::OutOfRange(_) | Self::Overflow | Self::Underflow => "22003",
            Self::InvalidBinary(_) => "22P03",
        }
    }
}
