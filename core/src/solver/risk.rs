use super::constraint::Tally;
use crate::*;

/// Assumed mine probability of a cell no revealed count says anything about.
pub const DEFAULT_PRIOR: f64 = 0.2;

/// Worst-case local mine probability of an unknown cell.
///
/// Each visited neighbour spreads its unplaced mines evenly over its unknown neighbours; the cell takes
/// the largest such share, or `prior` when no visited cell touches it.
pub fn estimate(board: &Board, coords: Coord2, prior: f64) -> f64 {
    board
        .iter_neighbors(coords)
        .filter_map(|neighbor| Tally::of(board, neighbor))
        .filter_map(Tally::local_probability)
        .reduce(f64::max)
        .unwrap_or(prior)
}

/// Unknown cell with the lowest estimated risk, first in row-major order on ties.
pub fn least_risky(board: &Board, prior: f64) -> Option<(Coord2, f64)> {
    let mut best: Option<(Coord2, f64)> = None;
    for coords in board.unknown_cells() {
        let risk = estimate(board, coords, prior);
        if best.is_none_or(|(_, lowest)| risk < lowest) {
            best = Some((coords, risk));
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: &[&str]) -> Board {
        Board::from_snapshot(&Snapshot::from_rows(rows).unwrap())
    }

    #[test]
    fn corner_clue_spreads_over_its_three_neighbours() {
        let board = board(&["1??", "???", "???"]);

        for coords in [(0, 1), (1, 0), (1, 1)] {
            assert_eq!(estimate(&board, coords, DEFAULT_PRIOR), 1.0 / 3.0);
        }
        assert_eq!(estimate(&board, (2, 2), DEFAULT_PRIOR), DEFAULT_PRIOR);
        assert_eq!(least_risky(&board, DEFAULT_PRIOR), Some(((0, 2), DEFAULT_PRIOR)));
    }

    #[test]
    fn four_unknown_neighbours_tie_at_a_quarter() {
        let mut board = board(&["?1?", "???"]);
        board.set_safe((1, 1));

        for coords in [(0, 0), (0, 2), (1, 0), (1, 2)] {
            assert_eq!(estimate(&board, coords, DEFAULT_PRIOR), 0.25);
        }
        assert_eq!(least_risky(&board, DEFAULT_PRIOR), Some(((0, 0), 0.25)));
    }

    #[test]
    fn worst_neighbour_wins() {
        // (0, 1) is shared by a 1 over two unknowns and a 1 over four
        let board = board(&["1??", "?1?"]);

        assert_eq!(estimate(&board, (0, 1), DEFAULT_PRIOR), 0.5);
    }

    #[test]
    fn untouched_cells_use_the_prior() {
        let board = board(&["0??"]);

        assert_eq!(estimate(&board, (0, 1), DEFAULT_PRIOR), 0.0);
        assert_eq!(estimate(&board, (0, 2), DEFAULT_PRIOR), DEFAULT_PRIOR);
        assert_eq!(estimate(&board, (0, 2), 0.5), 0.5);
    }

    #[test]
    fn lowest_risk_wins() {
        let board = board(&["0??"]);

        assert_eq!(least_risky(&board, DEFAULT_PRIOR), Some(((0, 1), 0.0)));
    }

    #[test]
    fn no_unknown_cells_means_no_pick() {
        let board = board(&["01"]);
        assert_eq!(least_risky(&board, DEFAULT_PRIOR), None);
    }
}
