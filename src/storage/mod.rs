use crate::{
    domain::{Board, BoardId, Column, ColumnId, Task, TaskId},
    error::Result,
};
use async_trait::async_trait;

mod assembler;
mod engine;
pub mod memory;

pub use memory::MemoryStorage;

/// Storage trait for boards, columns, and their ordered tasks
///
/// Every mutation either fully applies or leaves the store untouched, and
/// after every successful one each column's task order keys are `0..n`.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Creates an empty board; a missing name becomes "Untitled"
    async fn create_board(&self, name: Option<String>) -> Result<Board>;

    /// Appends a column to a board
    async fn create_column(&self, board_id: &BoardId, name: String) -> Result<Column>;

    /// Appends a task to the end of a column
    async fn create_task(&self, column_id: &ColumnId, title: String) -> Result<Task>;

    /// Lists a column's tasks by ascending order key
    async fn list_tasks(&self, column_id: &ColumnId) -> Result<Vec<Task>>;

    /// Moves a task into `target` at `new_order`, clamped to the end
    async fn move_task(&self, task_id: &TaskId, target: &ColumnId, new_order: i64)
        -> Result<Task>;

    /// Moves a task to `new_order` within its current column
    async fn reorder_task(&self, task_id: &TaskId, new_order: i64) -> Result<Task>;

    /// Assembles the full, sorted board view
    async fn view_board(&self, board_id: &BoardId) -> Result<Board>;
}
