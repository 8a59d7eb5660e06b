use crate::{
    domain::{ordering, sort_by_order, Board, BoardId, Column, ColumnId, Task, TaskId},
    error::{KanbanError, Result},
    storage::Storage,
};
use async_trait::async_trait;
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, RwLock},
};
use tracing::{debug, info};

/// A column and the task list it owns
///
/// `tasks` is the per-column lock: every read or write of the list, and
/// every change to the back-reference of a task in it, happens under it.
pub(super) struct ColumnSlot {
    pub(super) id: ColumnId,
    pub(super) board_id: BoardId,
    pub(super) name: String,
    pub(super) order: usize,
    pub(super) tasks: Mutex<Vec<Task>>,
}

impl ColumnSlot {
    pub(super) fn snapshot_with(&self, tasks: &[Task]) -> Column {
        let mut tasks = tasks.to_vec();
        sort_by_order(&mut tasks);
        Column {
            id: self.id,
            name: self.name.clone(),
            order: self.order,
            tasks,
        }
    }

    pub(super) fn snapshot(&self) -> Result<Column> {
        let tasks = self.tasks.lock()?;
        Ok(self.snapshot_with(&tasks))
    }
}

pub(super) struct BoardRecord {
    pub(super) id: BoardId,
    pub(super) name: String,
    pub(super) columns: Vec<Arc<ColumnSlot>>,
}

/// In-memory entity store
///
/// Lock order: `boards` before `columns`; a column's task lock before
/// `owners`. No index lock is held while a column lock is acquired.
#[derive(Default)]
pub struct MemoryStorage {
    pub(super) boards: RwLock<HashMap<BoardId, BoardRecord>>,
    pub(super) columns: RwLock<HashMap<ColumnId, Arc<ColumnSlot>>>,
    /// Back-references from each task to the column holding it
    pub(super) owners: RwLock<HashMap<TaskId, ColumnId>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub(super) fn column_slot(&self, id: &ColumnId) -> Result<Arc<ColumnSlot>> {
        self.columns
            .read()?
            .get(id)
            .cloned()
            .ok_or(KanbanError::ColumnNotFound(*id))
    }

    pub(super) fn owner_of(&self, task_id: &TaskId) -> Result<ColumnId> {
        self.owners
            .read()?
            .get(task_id)
            .copied()
            .ok_or(KanbanError::TaskNotFound(*task_id))
    }

    /// Creates a board with no columns
    pub fn insert_board(&self, name: Option<String>) -> Result<Board> {
        let board = Board::new(name);
        self.boards.write()?.insert(
            board.id,
            BoardRecord {
                id: board.id,
                name: board.name.clone(),
                columns: Vec::new(),
            },
        );
        info!(board_id = %board.id, name = %board.name, "Created board");
        Ok(board)
    }

    /// Appends a column to a board; its order is the board's column count
    pub fn insert_column(&self, board_id: &BoardId, name: String) -> Result<Column> {
        let mut boards = self.boards.write()?;
        let record = boards
            .get_mut(board_id)
            .ok_or(KanbanError::BoardNotFound(*board_id))?;

        let slot = Arc::new(ColumnSlot {
            id: ColumnId::new(),
            board_id: record.id,
            name,
            order: record.columns.len(),
            tasks: Mutex::new(Vec::new()),
        });
        self.columns.write()?.insert(slot.id, Arc::clone(&slot));
        record.columns.push(Arc::clone(&slot));

        info!(board_id = %board_id, column_id = %slot.id, order = slot.order, "Created column");
        Ok(slot.snapshot_with(&[]))
    }

    /// Appends a task to the end of a column
    pub fn insert_task(&self, column_id: &ColumnId, title: String) -> Result<Task> {
        let slot = self.column_slot(column_id)?;
        let mut tasks = slot.tasks.lock()?;
        let mut owners = self.owners.write()?;

        let order = ordering::append(&mut *tasks, Task::new(title, 0));
        let task = tasks[order].clone();
        owners.insert(task.id, slot.id);
        drop(owners);

        info!(column_id = %column_id, task_id = %task.id, order, "Created task");
        Ok(task)
    }

    /// Looks up a board, assembled with its columns and tasks in order
    pub fn find_board(&self, board_id: &BoardId) -> Result<Board> {
        self.assemble_board(board_id)
    }

    pub fn find_column(&self, column_id: &ColumnId) -> Result<Column> {
        self.column_slot(column_id)?.snapshot()
    }

    pub fn find_task(&self, task_id: &TaskId) -> Result<Task> {
        loop {
            let slot = self.column_slot(&self.owner_of(task_id)?)?;
            let tasks = slot.tasks.lock()?;
            if let Some(task) = tasks.iter().find(|t| t.id == *task_id) {
                return Ok(task.clone());
            }
            debug!(task_id = %task_id, "Task moved during lookup, retrying");
        }
    }

    /// Returns the column currently holding a task
    pub fn column_owning(&self, task_id: &TaskId) -> Result<Column> {
        loop {
            let slot = self.column_slot(&self.owner_of(task_id)?)?;
            let tasks = slot.tasks.lock()?;
            if tasks.iter().any(|t| t.id == *task_id) {
                return Ok(slot.snapshot_with(&tasks));
            }
            debug!(task_id = %task_id, "Task moved during lookup, retrying");
        }
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn create_board(&self, name: Option<String>) -> Result<Board> {
        self.insert_board(name)
    }

    async fn create_column(&self, board_id: &BoardId, name: String) -> Result<Column> {
        self.insert_column(board_id, name)
    }

    async fn create_task(&self, column_id: &ColumnId, title: String) -> Result<Task> {
        self.insert_task(column_id, title)
    }

    async fn list_tasks(&self, column_id: &ColumnId) -> Result<Vec<Task>> {
        Ok(self.find_column(column_id)?.tasks)
    }

    async fn move_task(
        &self,
        task_id: &TaskId,
        target: &ColumnId,
        new_order: i64,
    ) -> Result<Task> {
        self.relocate_task(task_id, Some(target), new_order)
    }

    async fn reorder_task(&self, task_id: &TaskId, new_order: i64) -> Result<Task> {
        self.relocate_task(task_id, None, new_order)
    }

    async fn view_board(&self, board_id: &BoardId) -> Result<Board> {
        self.assemble_board(board_id)
    }
}
