pub mod board;
pub mod id;
pub mod ordering;
pub mod sorting;
pub mod task;

pub use board::{Board, Column};
pub use id::{BoardId, ColumnId, TaskId};
pub use ordering::{is_contiguous, Ordered};
pub use sorting::{sort_board, sort_by_order};
pub use task::Task;
