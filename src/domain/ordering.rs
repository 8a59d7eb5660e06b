//! Order-key maintenance for sibling lists.
//!
//! Every list of siblings (tasks in a column, columns in a board) carries
//! order keys that must equal `0..len` in list order. The functions here are
//! the only code that rewrites those keys.

use crate::error::{KanbanError, Result};

/// An entity positioned among its siblings by an integer order key
pub trait Ordered {
    fn order(&self) -> usize;
    fn set_order(&mut self, order: usize);
}

/// Rewrites every order key to its index in the list
pub fn renumber<T: Ordered>(items: &mut [T]) {
    for (index, item) in items.iter_mut().enumerate() {
        item.set_order(index);
    }
}

/// Validates a client-supplied position
///
/// Negative positions are rejected; anything else is accepted and clamped
/// later against the list it lands in.
pub fn requested_index(raw: i64) -> Result<usize> {
    if raw < 0 {
        return Err(KanbanError::InvalidArgument(format!(
            "position must be non-negative, got {}",
            raw
        )));
    }
    // Saturates on 32-bit targets, where large positions just clamp to the end
    Ok(usize::try_from(raw).unwrap_or(usize::MAX))
}

/// Clamps a requested position to `[0, len]`
pub fn clamp_index(desired: usize, len: usize) -> usize {
    desired.min(len)
}

/// Removes the first item matching `pred` and closes the gap it leaves
pub fn take_where<T, F>(items: &mut Vec<T>, pred: F) -> Option<T>
where
    T: Ordered,
    F: FnMut(&T) -> bool,
{
    let position = items.iter().position(pred)?;
    let item = items.remove(position);
    renumber(items);
    Some(item)
}

/// Splices `item` in at `desired` (clamped) and renumbers the whole list
///
/// Uses array-insert semantics: the item previously at the insertion index
/// and everything after it shift one place. Returns the index used.
pub fn insert_at<T: Ordered>(items: &mut Vec<T>, item: T, desired: usize) -> usize {
    let index = clamp_index(desired, items.len());
    items.insert(index, item);
    renumber(items);
    index
}

/// Appends `item` with the next free order key
pub fn append<T: Ordered>(items: &mut Vec<T>, mut item: T) -> usize {
    let order = items.len();
    item.set_order(order);
    items.push(item);
    order
}

/// True when the order keys are exactly `{0, .., len-1}`, in any list order
pub fn is_contiguous<T: Ordered>(items: &[T]) -> bool {
    let mut orders: Vec<usize> = items.iter().map(Ordered::order).collect();
    orders.sort_unstable();
    orders.iter().enumerate().all(|(index, order)| index == *order)
}
