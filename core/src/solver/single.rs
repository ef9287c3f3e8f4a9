use alloc::vec::Vec;

use super::oracle::contradicts;
use super::propagation::{WorkQueue, take_safe};
use crate::*;

/// Result of scanning the frontier for cells that cannot be safe.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MineScan {
    /// Nothing new was proven.
    Exhausted,
    /// Mines were proven but propagation found no safe cell from them.
    MinesOnly(Vec<Coord2>),
    /// Mines were proven and propagation then found a safe cell.
    Safe(Coord2),
}

/// Finds the first frontier cell whose mine assumption breaks a count, and records it as safe.
pub fn prove_safe(board: &mut Board, frontier: &[Coord2]) -> Option<Coord2> {
    let coords = frontier
        .iter()
        .copied()
        .filter(|&coords| board.is_unknown(coords))
        .find(|&coords| contradicts(board, &[(coords, Polarity::Mine)]))?;

    board.set_safe(coords);
    log::debug!("assuming a mine at {coords:?} contradicts, so it is safe");
    Some(coords)
}

/// Proves every frontier cell that cannot be safe a mine, then propagates from them.
///
/// Each proof is recorded immediately so later candidates see it.
pub fn prove_mines(board: &mut Board, frontier: &[Coord2]) -> MineScan {
    let mut proven = Vec::new();
    for &coords in frontier {
        if board.is_unknown(coords) && contradicts(board, &[(coords, Polarity::Safe)]) {
            board.set_mine(coords);
            proven.push(coords);
        }
    }

    if proven.is_empty() {
        return MineScan::Exhausted;
    }
    log::debug!("proved {} mine(s) by contradiction: {proven:?}", proven.len());

    let mut queue = WorkQueue::new();
    for &coords in &proven {
        queue.push_neighborhood(board, coords);
    }
    match take_safe(board, &mut queue) {
        Some(coords) => MineScan::Safe(coords),
        None => MineScan::MinesOnly(proven),
    }
}

/// Alternates both scans over a freshly collected frontier while mines keep being proven.
pub fn search(board: &mut Board) -> Option<Decision> {
    loop {
        let frontier = board.frontier();
        if frontier.is_empty() {
            return None;
        }

        if let Some(coords) = prove_safe(board, &frontier) {
            return Some(Decision::new(coords, Strategy::SingleHypothesis));
        }

        match prove_mines(board, &frontier) {
            MineScan::Safe(coords) => {
                return Some(Decision::new(coords, Strategy::MineElimination));
            }
            MineScan::MinesOnly(_) => continue,
            MineScan::Exhausted => return None,
        }
    }
}
