use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrimerError {
    #[error("Invalid CDS sequence: the provided sequence is empty.")]
    EmptySequence,

    #[error("Invalid base '{base}' at position {position}, only A, C, G and T are supported")]
    InvalidBase { base: char, position: usize },

    #[error("Invalid base '{base}' at position {position} of the restriction site")]
    InvalidSite { base: char, position: usize },

    #[error("Invalid design criteria: {0}")]
    InvalidCriteria(String),

    #[error("Failed to parse FASTA input: {0}")]
    Fasta(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PrimerError>;
