use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("unknown action: {0}")]
    UnknownAction(String),
    #[error("reserved action dispatched from outside the store: {0}")]
    ReservedAction(String),
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
    #[error("inconsistent state: {0}")]
    InconsistentState(String),
}
