//! # Kanban Core
//!
//! Boards hold ordered columns, columns hold ordered tasks. This crate keeps
//! every sibling list's order keys contiguous from zero across task
//! creation, cross-column moves, and in-column reorders, and serves the
//! boards over a small JSON HTTP API.

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod server;
pub mod storage;

// Re-export commonly used types
pub use config::ServerConfig;
pub use domain::{Board, BoardId, Column, ColumnId, Task, TaskId};
pub use error::{KanbanError, Result};
pub use server::{build_router, start_server};
pub use storage::{MemoryStorage, Storage};
