use thiserror::Error;

/// Errors returned by the filtering and profiling routines.
///
/// Every precondition is checked before any computation starts, so an error
/// never leaves a partially built kernel or output behind.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Shorthand for `Err(Error::InvalidParameter(format!(...)))`.
macro_rules! invalid {
    ($($arg:tt)*) => {
        return Err($crate::error::Error::InvalidParameter(format!($($arg)*)))
    };
}

pub(crate) use invalid;
