use super::constraint::{Deduction, evaluate_speculative};
use crate::*;

/// Propagates `hypothesis` from whatever is queued and reports whether some revealed count breaks.
///
/// Deductions stay in the overlay. The queue is left empty either way.
pub fn find_contradiction(board: &Board, hypothesis: &mut Hypothesis, queue: &mut WorkQueue) -> bool {
    while let Some(coords) = queue.pop() {
        if !board.is_visited(coords) {
            continue;
        }

        match evaluate_speculative(board, hypothesis, coords) {
            Deduction::Contradiction => {
                queue.clear();
                return true;
            }
            Deduction::Changed(marked) => {
                for &cell in &marked {
                    queue.push_neighborhood(board, cell);
                }
            }
            Deduction::NoChange => {}
        }
    }
    false
}

/// Tests a set of assumptions against the board in a fresh overlay.
///
/// Assumptions about cells that are not unknown are ignored.
pub fn contradicts(board: &Board, assumptions: &[(Coord2, Polarity)]) -> bool {
    let mut hypothesis = Hypothesis::for_board(board);
    let mut queue = WorkQueue::new();

    for &(coords, polarity) in assumptions {
        if board.is_unknown(coords) {
            hypothesis.set_guess(coords, polarity);
            queue.push_neighborhood(board, coords);
        }
    }

    let found = find_contradiction(board, &mut hypothesis, &mut queue);
    log::trace!("hypothesis {assumptions:?} contradiction: {found}");
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: &[&str]) -> Board {
        Board::from_snapshot(&Snapshot::from_rows(rows).unwrap())
    }

    #[test]
    fn direct_excess_is_found() {
        let board = board(&["?1?"]);

        assert!(contradicts(
            &board,
            &[((0, 0), Polarity::Mine), ((0, 2), Polarity::Mine)]
        ));
        assert!(!contradicts(&board, &[((0, 0), Polarity::Mine)]));
    }

    #[test]
    fn deficit_is_found() {
        let board = board(&["?1?"]);

        assert!(contradicts(
            &board,
            &[((0, 0), Polarity::Safe), ((0, 2), Polarity::Safe)]
        ));
    }

    #[test]
    fn contradiction_through_propagation() {
        // assuming the top centre is a mine saturates both ones, starving the two
        let board = board(&["?????", "?121?"]);

        assert!(contradicts(&board, &[((0, 2), Polarity::Mine)]));
    }

    #[test]
    fn proven_cells_cannot_be_assumed() {
        let mut board = board(&["?1?"]);
        board.set_mine((0, 0));

        assert!(!contradicts(&board, &[((0, 0), Polarity::Safe)]));
        assert!(board.is_definitely_mine((0, 0)));
    }

    #[test]
    fn oracle_leaves_board_untouched() {
        let board = board(&["?1?", "???"]);
        let before = board.clone();

        contradicts(&board, &[((0, 0), Polarity::Mine)]);

        assert_eq!(board, before);
    }
}
