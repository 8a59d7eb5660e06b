//! Task move and reorder under per-column locks.

use crate::{
    domain::{
        ordering::{insert_at, requested_index, take_where},
        ColumnId, Task, TaskId,
    },
    error::Result,
    storage::memory::{ColumnSlot, MemoryStorage},
};
use std::sync::{Arc, MutexGuard};
use tracing::{debug, info};

type TaskList<'a> = MutexGuard<'a, Vec<Task>>;

/// Locks two distinct columns in ascending id order, returned as (a, b)
fn lock_pair<'a>(a: &'a ColumnSlot, b: &'a ColumnSlot) -> Result<(TaskList<'a>, TaskList<'a>)> {
    if a.id < b.id {
        let first = a.tasks.lock()?;
        let second = b.tasks.lock()?;
        Ok((first, second))
    } else {
        let first = b.tasks.lock()?;
        let second = a.tasks.lock()?;
        Ok((second, first))
    }
}

impl MemoryStorage {
    /// Moves a task to `new_order` in `target`, or in its own column if
    /// `target` is `None`
    ///
    /// All lookups and argument checks run before anything is touched. The
    /// source list is closed up, the task spliced into the target at the
    /// clamped index, and both lists renumbered while both locks are held.
    /// The back-reference map is write-locked before either list changes.
    pub fn relocate_task(
        &self,
        task_id: &TaskId,
        target: Option<&ColumnId>,
        new_order: i64,
    ) -> Result<Task> {
        let desired = requested_index(new_order)?;
        let target_slot = target.map(|id| self.column_slot(id)).transpose()?;

        loop {
            let source = self.column_slot(&self.owner_of(task_id)?)?;
            let target = target_slot.as_ref().map_or_else(|| Arc::clone(&source), Arc::clone);

            if source.id == target.id {
                let mut tasks = source.tasks.lock()?;
                let Some(task) = take_where(&mut *tasks, |t| t.id == *task_id) else {
                    debug!(task_id = %task_id, "Task moved before lock, retrying");
                    continue;
                };
                let index = insert_at(&mut *tasks, task, desired);

                debug!(task_id = %task_id, column_id = %source.id, order = index, "Reordered task");
                return Ok(tasks[index].clone());
            }

            let (mut from, mut to) = lock_pair(&source, &target)?;
            if !from.iter().any(|t| t.id == *task_id) {
                debug!(task_id = %task_id, "Task moved before lock, retrying");
                continue;
            }
            // Acquired before either list changes so a failure leaves both intact
            let mut owners = self.owners.write()?;
            let Some(task) = take_where(&mut *from, |t| t.id == *task_id) else {
                continue;
            };
            let index = insert_at(&mut *to, task, desired);
            owners.insert(*task_id, target.id);
            drop(owners);

            info!(
                board_id = %target.board_id,
                task_id = %task_id,
                from_column = %source.id,
                to_column = %target.id,
                order = index,
                "Moved task"
            );
            return Ok(to[index].clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        domain::{is_contiguous, Board, Column, ColumnId, Task, TaskId},
        error::KanbanError,
        storage::{MemoryStorage, Storage},
    };

    struct Fixture {
        storage: MemoryStorage,
        board: Board,
        todo: Column,
        doing: Column,
        a: Task,
        b: Task,
        c: Task,
    }

    async fn fixture() -> Fixture {
        let storage = MemoryStorage::new();
        let board = storage.create_board(Some("B".to_string())).await.unwrap();
        let todo = storage.create_column(&board.id, "Todo".to_string()).await.unwrap();
        let doing = storage.create_column(&board.id, "Doing".to_string()).await.unwrap();
        let a = storage.create_task(&todo.id, "A".to_string()).await.unwrap();
        let b = storage.create_task(&todo.id, "B".to_string()).await.unwrap();
        let c = storage.create_task(&todo.id, "C".to_string()).await.unwrap();
        Fixture {
            storage,
            board,
            todo,
            doing,
            a,
            b,
            c,
        }
    }

    async fn titles(storage: &MemoryStorage, column: &ColumnId) -> Vec<(String, usize)> {
        storage
            .list_tasks(column)
            .await
            .unwrap()
            .into_iter()
            .map(|t| (t.title, t.order))
            .collect()
    }

    fn expect(items: &[(&str, usize)]) -> Vec<(String, usize)> {
        items.iter().map(|(t, o)| (t.to_string(), *o)).collect()
    }

    #[tokio::test]
    async fn test_reorder_to_front() {
        let f = fixture().await;

        let moved = f.storage.reorder_task(&f.c.id, 0).await.unwrap();

        assert_eq!(moved.id, f.c.id);
        assert_eq!(moved.order, 0);
        assert_eq!(
            titles(&f.storage, &f.todo.id).await,
            expect(&[("C", 0), ("A", 1), ("B", 2)])
        );
    }

    #[tokio::test]
    async fn test_reorder_in_place_is_unchanged() {
        let f = fixture().await;

        let moved = f.storage.reorder_task(&f.a.id, 0).await.unwrap();

        assert_eq!(moved.order, 0);
        assert_eq!(
            titles(&f.storage, &f.todo.id).await,
            expect(&[("A", 0), ("B", 1), ("C", 2)])
        );
    }

    #[tokio::test]
    async fn test_reorder_past_end_places_last() {
        let f = fixture().await;

        let moved = f.storage.reorder_task(&f.a.id, 3).await.unwrap();
        assert_eq!(moved.order, 2);

        let moved = f.storage.reorder_task(&f.b.id, 1000).await.unwrap();
        assert_eq!(moved.order, 2);

        assert_eq!(
            titles(&f.storage, &f.todo.id).await,
            expect(&[("C", 0), ("A", 1), ("B", 2)])
        );
    }

    #[tokio::test]
    async fn test_move_across_columns() {
        let f = fixture().await;
        f.storage.reorder_task(&f.c.id, 0).await.unwrap();

        let moved = f.storage.move_task(&f.a.id, &f.doing.id, 0).await.unwrap();

        assert_eq!(moved.id, f.a.id);
        assert_eq!(moved.order, 0);
        assert_eq!(
            titles(&f.storage, &f.todo.id).await,
            expect(&[("C", 0), ("B", 1)])
        );
        assert_eq!(titles(&f.storage, &f.doing.id).await, expect(&[("A", 0)]));
        assert_eq!(f.storage.column_owning(&f.a.id).unwrap().id, f.doing.id);
    }

    #[tokio::test]
    async fn test_move_clamps_to_target_size() {
        let f = fixture().await;
        f.storage.move_task(&f.a.id, &f.doing.id, 0).await.unwrap();

        let moved = f.storage.move_task(&f.b.id, &f.doing.id, 1).await.unwrap();
        assert_eq!(moved.order, 1);

        let moved = f.storage.move_task(&f.c.id, &f.doing.id, 50).await.unwrap();
        assert_eq!(moved.order, 2);

        assert_eq!(
            titles(&f.storage, &f.doing.id).await,
            expect(&[("A", 0), ("B", 1), ("C", 2)])
        );
        assert!(f.storage.list_tasks(&f.todo.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_move_into_middle_shifts_occupant() {
        let f = fixture().await;
        let x = f.storage.create_task(&f.doing.id, "X".to_string()).await.unwrap();
        let y = f.storage.create_task(&f.doing.id, "Y".to_string()).await.unwrap();

        f.storage.move_task(&f.b.id, &f.doing.id, 1).await.unwrap();

        assert_eq!(
            titles(&f.storage, &f.doing.id).await,
            expect(&[("X", 0), ("B", 1), ("Y", 2)])
        );
        assert_eq!(f.storage.find_task(&x.id).unwrap().order, 0);
        assert_eq!(f.storage.find_task(&y.id).unwrap().order, 2);
        assert_eq!(
            titles(&f.storage, &f.todo.id).await,
            expect(&[("A", 0), ("C", 1)])
        );
    }

    #[tokio::test]
    async fn test_move_to_same_column_acts_as_reorder() {
        let f = fixture().await;

        let moved = f.storage.move_task(&f.a.id, &f.todo.id, 2).await.unwrap();

        assert_eq!(moved.order, 2);
        assert_eq!(
            titles(&f.storage, &f.todo.id).await,
            expect(&[("B", 0), ("C", 1), ("A", 2)])
        );
    }

    #[tokio::test]
    async fn test_move_unknown_target_leaves_state_untouched() {
        let f = fixture().await;
        let missing = ColumnId::new();

        let err = f.storage.move_task(&f.b.id, &missing, 0).await.unwrap_err();

        assert!(matches!(err, KanbanError::ColumnNotFound(id) if id == missing));
        assert_eq!(
            titles(&f.storage, &f.todo.id).await,
            expect(&[("A", 0), ("B", 1), ("C", 2)])
        );
        assert_eq!(f.storage.column_owning(&f.b.id).unwrap().id, f.todo.id);
    }

    #[tokio::test]
    async fn test_move_unknown_task() {
        let f = fixture().await;
        let missing = TaskId::new();

        let err = f.storage.move_task(&missing, &f.doing.id, 0).await.unwrap_err();
        assert!(matches!(err, KanbanError::TaskNotFound(id) if id == missing));

        let err = f.storage.reorder_task(&missing, 0).await.unwrap_err();
        assert!(matches!(err, KanbanError::TaskNotFound(_)));
    }

    #[tokio::test]
    async fn test_negative_index_is_rejected_without_mutation() {
        let f = fixture().await;

        let err = f.storage.reorder_task(&f.c.id, -1).await.unwrap_err();
        assert!(matches!(err, KanbanError::InvalidArgument(_)));

        let err = f.storage.move_task(&f.c.id, &f.doing.id, -5).await.unwrap_err();
        assert!(matches!(err, KanbanError::InvalidArgument(_)));

        assert_eq!(
            titles(&f.storage, &f.todo.id).await,
            expect(&[("A", 0), ("B", 1), ("C", 2)])
        );
        assert!(f.storage.list_tasks(&f.doing.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_back_reference_write_leaves_lists_intact() {
        let f = fixture().await;
        std::thread::scope(|s| {
            let poisoner = s.spawn(|| {
                let _guard = f.storage.owners.write().unwrap();
                panic!("poison the back-reference map");
            });
            assert!(poisoner.join().is_err());
        });

        let err = f.storage.move_task(&f.a.id, &f.doing.id, 0).await.unwrap_err();
        assert!(matches!(err, KanbanError::StorageError(_)));

        assert_eq!(
            titles(&f.storage, &f.todo.id).await,
            expect(&[("A", 0), ("B", 1), ("C", 2)])
        );
        assert!(f.storage.list_tasks(&f.doing.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invariants_hold_after_mixed_operations() {
        let f = fixture().await;
        let done = f
            .storage
            .create_column(&f.board.id, "Done".to_string())
            .await
            .unwrap();
        let columns = [f.todo.id, f.doing.id, done.id];
        let tasks = [f.a.id, f.b.id, f.c.id];

        for step in 0..60usize {
            let task = &tasks[step % tasks.len()];
            if step % 3 == 0 {
                f.storage.reorder_task(task, (step % 4) as i64).await.unwrap();
            } else {
                let target = &columns[(step / 2) % columns.len()];
                f.storage.move_task(task, target, (step % 5) as i64).await.unwrap();
            }

            let mut seen = Vec::new();
            for column in &columns {
                let listed = f.storage.list_tasks(column).await.unwrap();
                assert!(is_contiguous(&listed), "gap or duplicate after step {}", step);
                seen.extend(listed.into_iter().map(|t| t.id));
            }
            seen.sort();
            let mut expected = tasks.to_vec();
            expected.sort();
            assert_eq!(seen, expected, "ownership broken after step {}", step);
        }
    }
}
