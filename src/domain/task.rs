use serde::{Deserialize, Serialize};

use crate::domain::{id::TaskId, ordering::Ordered};

/// A kanban task
///
/// `order` is the task's position among the tasks of the column that
/// currently owns it, contiguous from zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub order: usize,
}

impl Task {
    /// Creates a new task placed at `order`
    pub fn new(title: String, order: usize) -> Self {
        Self {
            id: TaskId::new(),
            title,
            order,
        }
    }
}

impl Ordered for Task {
    fn order(&self) -> usize {
        self.order
    }

    fn set_order(&mut self, order: usize) {
        self.order = order;
    }
}
