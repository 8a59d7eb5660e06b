use thiserror::Error;

use crate::domain::{BoardId, ColumnId, TaskId};

pub type Result<T> = std::result::Result<T, KanbanError>;

#[derive(Debug, Error)]
pub enum KanbanError {
    #[error("Board not found: {0}")]
    BoardNotFound(BoardId),

    #[error("Column not found: {0}")]
    ColumnNotFound(ColumnId),

    #[error("Task not found: {0}")]
    TaskNotFound(TaskId),

    #[error("Invalid identifier: {0}")]
    InvalidId(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl KanbanError {
    /// True for every error raised because an identifier did not resolve
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::BoardNotFound(_)
                | Self::ColumnNotFound(_)
                | Self::TaskNotFound(_)
                | Self::InvalidId(_)
        )
    }
}

impl<T> From<std::sync::PoisonError<T>> for KanbanError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        Self::StorageError("lock poisoned".to_string())
    }
}
