use thiserror::Error;

#[derive(Debug, Error)]
pub enum CartonError {
    #[error("invalid pallet label: {0}")]
    InvalidLabel(String),
}

pub type Result<T> = std::result::Result<T, CartonError>;
