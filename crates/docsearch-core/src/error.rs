use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid boost rules: {0}")]
    InvalidRules(String),
}

pub type Result<T> = std::result::Result<T, Error>;
