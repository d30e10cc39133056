//! Error types for the kernel centroid estimator

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OneClassError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Degenerate kernel: k(x, x) = {0} for the first training sample")]
    DegenerateKernel(f64),

    #[error("Numerical error: {0}")]
    NumericalError(String),

    #[error("Invalid model: {0}")]
    InvalidModel(String),

    #[error("Empty dataset")]
    EmptyDataset,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type Result<T> = std::result::Result<T, OneClassError>;
