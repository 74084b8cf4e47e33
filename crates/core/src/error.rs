use std::result::Result as StdResult;

use thiserror::Error;

/// Errors raised while assembling the job configuration.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("missing environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = StdResult<T, CoreError>;
