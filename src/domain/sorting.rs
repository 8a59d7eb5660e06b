use crate::domain::{board::Board, ordering::Ordered};

/// Stable ascending sort by order key
///
/// Only orders the slice; it does not repair duplicate or missing keys.
///
/// # Examples
/// ```
/// use kanban_core::domain::sorting::sort_by_order;
/// use kanban_core::domain::task::Task;
///
/// let mut tasks = vec![
///     Task::new("C".to_string(), 2),
///     Task::new("A".to_string(), 0),
///     Task::new("B".to_string(), 1),
/// ];
///
/// sort_by_order(&mut tasks);
/// assert_eq!(tasks[0].title, "A");
/// ```
pub fn sort_by_order<T: Ordered>(items: &mut [T]) {
    items.sort_by_key(Ordered::order);
}

/// Sorts a board's columns, and every column's tasks, by order key
pub fn sort_board(board: &mut Board) {
    sort_by_order(&mut board.columns);
    for column in &mut board.columns {
        sort_by_order(&mut column.tasks);
    }
}
