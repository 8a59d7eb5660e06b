use serde::{Deserialize, Serialize};

use crate::domain::{
    id::{BoardId, ColumnId},
    ordering::Ordered,
    task::Task,
};

/// A column snapshot with its tasks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub name: String,
    pub order: usize,
    pub tasks: Vec<Task>,
}

impl Ordered for Column {
    fn order(&self) -> usize {
        self.order
    }

    fn set_order(&mut self, order: usize) {
        self.order = order;
    }
}

/// A board snapshot with its columns
///
/// Returned both on creation (no columns yet) and as the assembled board
/// view, where columns and tasks are sorted by `order`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub id: BoardId,
    pub name: String,
    pub columns: Vec<Column>,
}

impl Board {
    pub const DEFAULT_NAME: &'static str = "Untitled";

    /// Creates an empty board; a missing or empty name becomes the default
    pub fn new(name: Option<String>) -> Self {
        Self {
            id: BoardId::new(),
            name: name
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| Self::DEFAULT_NAME.to_string()),
            columns: Vec::new(),
        }
    }
}
