use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Unknown statement format: {0}")]
    UnknownFormat(String),

    #[error("No transactions could be parsed from the statement")]
    NoTransactions,
}

pub type Result<T> = std::result::Result<T, IngestError>;
