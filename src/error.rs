use thiserror::Error;

// Unified error type for gmg3d

#[derive(Error, Debug)]
pub enum MgError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error in `{field}`: {token}")]
    Parse { field: &'static str, token: String },
    #[error("invalid mode {0} (expected 0 = linear, 1 = nonlinear, 2 = newton)")]
    InvalidMode(i64),
    #[error("invalid stencil: {0}")]
    InvalidStencil(String),
    #[error("invalid grid: {0}")]
    InvalidGrid(String),
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("factorization error: {0}")]
    FactorError(String),
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),
}
