//! Error types for agenda.

use thiserror::Error;

/// Errors that can occur in agenda operations.
#[derive(Error, Debug)]
pub enum AgendaError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Event not found: {0}")]
    EventNotFound(String),

    #[error("Invalid input: {0}")]
    Invalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for agenda operations.
pub type AgendaResult<T> = Result<T, AgendaError>;

/// Why a save was refused.
///
/// These are expected outcomes of user input, not failures, so they are kept
/// apart from [`AgendaError`]. The store is never touched when one is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("Erro: A hora de fim deve ser posterior à hora de início.")]
    InvalidRange,

    #[error("Erro: Já existe um evento neste horário.")]
    Overlap { id: String, title: String },

    #[error("Erro: O campo '{0}' é obrigatório.")]
    EmptyField(&'static str),
}
