use crate::{
    domain::{sort_board, Board, BoardId, Column},
    error::{KanbanError, Result},
    storage::memory::MemoryStorage,
};

impl MemoryStorage {
    /// Builds the sorted board view
    ///
    /// Takes every column lock of the board, in ascending id order, so the
    /// snapshot never shows a task mid-move. Stored order keys are trusted
    /// as-is; nothing is renumbered here.
    pub fn assemble_board(&self, board_id: &BoardId) -> Result<Board> {
        let (name, mut slots) = {
            let boards = self.boards.read()?;
            let record = boards
                .get(board_id)
                .ok_or(KanbanError::BoardNotFound(*board_id))?;
            (record.name.clone(), record.columns.clone())
        };

        slots.sort_by_key(|slot| slot.id);
        let guards = slots
            .iter()
            .map(|slot| slot.tasks.lock())
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let columns: Vec<Column> = slots
            .iter()
            .zip(guards.iter())
            .map(|(slot, tasks)| slot.snapshot_with(tasks))
            .collect();
        drop(guards);

        let mut board = Board {
            id: *board_id,
            name,
            columns,
        };
        sort_board(&mut board);
        Ok(board)
    }
}
