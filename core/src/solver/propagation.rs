use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use super::constraint::{Deduction, evaluate};
use crate::*;

/// Coordinates waiting to be (re)examined, last in first out.
///
/// Duplicates are allowed, examining a resolved cell again is a no-op.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkQueue {
    pending: Vec<Coord2>,
}

impl WorkQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, coords: Coord2) {
        self.pending.push(coords);
    }

    /// Pushes the 3x3 block around `coords`, clipped to the board.
    pub fn push_neighborhood(&mut self, board: &Board, coords: Coord2) {
        self.pending.extend(board.iter_block(coords));
    }

    pub fn pop(&mut self) -> Option<Coord2> {
        self.pending.pop()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Requeues everything a deduction at `coords` may have unlocked.
    pub(crate) fn push_after_deduction(&mut self, board: &Board, coords: Coord2, marked: &[Coord2]) {
        self.push_neighborhood(board, coords);
        for &cell in marked {
            self.push_neighborhood(board, cell);
        }
    }
}

impl Extend<Coord2> for WorkQueue {
    fn extend<I: IntoIterator<Item = Coord2>>(&mut self, iter: I) {
        self.pending.extend(iter);
    }
}

/// Runs propagation until a proven safe cell is popped or the queue drains.
///
/// Stops at the first discovery, leaving the rest of the queue in place.
pub fn take_safe(board: &mut Board, queue: &mut WorkQueue) -> Option<Coord2> {
    while let Some(coords) = queue.pop() {
        if board.is_definitely_safe(coords) {
            return Some(coords);
        }

        if let Deduction::Changed(marked) = evaluate(board, coords) {
            queue.push_after_deduction(board, coords, &marked);
        }
    }
    None
}

/// Runs propagation to a fixed point, returning how many cells were newly proven.
pub fn settle(board: &mut Board, queue: &mut WorkQueue) -> usize {
    let mut proven = 0;
    while let Some(coords) = queue.pop() {
        if let Deduction::Changed(marked) = evaluate(board, coords) {
            proven += marked.len();
            queue.push_after_deduction(board, coords, &marked);
        }
    }
    proven
}

/// Seeds a queue with every visited cell of the board.
pub fn seed_visited(board: &Board) -> WorkQueue {
    let mut queue = WorkQueue::new();
    queue.extend(board.visited_cells());
    queue
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: &[&str]) -> Board {
        Board::from_snapshot(&Snapshot::from_rows(rows).unwrap())
    }

    #[test]
    fn zeros_around_hidden_centre_prove_it_safe() {
        let mut board = board(&["000", "0?0", "000"]);
        let mut queue = seed_visited(&board);

        assert_eq!(take_safe(&mut board, &mut queue), Some((1, 1)));
        assert!(board.is_definitely_safe((1, 1)));
    }

    #[test]
    fn strip_with_known_mine_frees_other_neighbour() {
        let mut board = board(&["?1?"]);
        board.set_mine((0, 0));
        let mut queue = seed_visited(&board);

        assert_eq!(take_safe(&mut board, &mut queue), Some((0, 2)));
        assert!(board.is_definitely_mine((0, 0)));
    }

    #[test]
    fn undetermined_strip_finds_nothing() {
        let mut board = board(&["?1?"]);
        let mut queue = seed_visited(&board);

        assert_eq!(take_safe(&mut board, &mut queue), None);
        assert_eq!(board.unknown_cells().len(), 2);
    }

    #[test]
    fn empty_queue_finds_nothing() {
        let mut board = board(&["1?"]);
        let mut queue = WorkQueue::new();

        assert_eq!(take_safe(&mut board, &mut queue), None);
        assert!(queue.is_empty());
    }

    #[test]
    fn deductions_chain_across_cells() {
        // the 0 frees the top right, which leaves the middle 1 a single candidate
        let mut board = board(&["???", "110"]);
        let mut queue = seed_visited(&board);

        let proven = settle(&mut board, &mut queue);

        assert!(board.is_definitely_safe((0, 1)));
        assert!(board.is_definitely_safe((0, 2)));
        assert!(board.is_definitely_mine((0, 0)));
        assert_eq!(proven, 3);
    }

    #[test]
    fn settle_is_idempotent() {
        let mut board = board(&["?1??", "?1??", "??11", "??1?"]);
        let mut queue = seed_visited(&board);
        settle(&mut board, &mut queue);
        let once = board.clone();

        let mut queue = seed_visited(&board);
        let proven = settle(&mut board, &mut queue);

        assert_eq!(proven, 0);
        assert_eq!(board, once);
    }

    #[test]
    fn neighborhood_is_clipped() {
        let board = board(&["??", "??"]);
        let mut queue = WorkQueue::new();
        queue.push_neighborhood(&board, (0, 0));

        assert_eq!(queue.len(), 4);
    }
}
