//! The single deductive rule of the solver, applied to one revealed cell.
//!
//! A revealed count is fully explained by known mines (everything else is safe), or it needs every
//! remaining unknown neighbour (everything left is a mine). Anything in between teaches nothing.

use smallvec::SmallVec;

use crate::*;

/// Cells marked by a single evaluation, at most the eight neighbours.
pub type Marked = SmallVec<[Coord2; 8]>;

/// Neighbourhood summary of a revealed cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Tally {
    pub declared: u8,
    pub mines: u8,
    pub unknowns: u8,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// No unknown neighbours left and the count adds up.
    Settled,
    /// The count cannot be satisfied.
    Violated,
    AllMines,
    AllSafe,
    Undetermined,
}

impl Tally {
    /// Tally against the persistent board, `None` unless `coords` is visited.
    pub fn of(board: &Board, coords: Coord2) -> Option<Self> {
        let declared = board.cell_at(coords).mine_count()?;
        Some(Self {
            declared,
            mines: board.count_neighbors(coords, Cell::is_definitely_mine),
            unknowns: board.count_neighbors(coords, Cell::is_unknown),
        })
    }

    /// Tally where assumed mines count as mines and assumed cells are no longer unknown.
    pub fn under(board: &Board, hypothesis: &Hypothesis, coords: Coord2) -> Option<Self> {
        let declared = board.cell_at(coords).mine_count()?;
        let mut tally = Self {
            declared,
            mines: 0,
            unknowns: 0,
        };
        for neighbor in board.iter_neighbors(coords) {
            if hypothesis.counts_as_mine(board, neighbor) {
                tally.mines += 1;
            } else if hypothesis.is_open(board, neighbor) {
                tally.unknowns += 1;
            }
        }
        Some(tally)
    }

    pub fn verdict(self) -> Verdict {
        let Self {
            declared,
            mines,
            unknowns,
        } = self;

        if unknowns == 0 {
            if declared == mines {
                Verdict::Settled
            } else {
                Verdict::Violated
            }
        } else if declared == mines + unknowns {
            Verdict::AllMines
        } else if declared == mines {
            Verdict::AllSafe
        } else if mines > declared || mines + unknowns < declared {
            Verdict::Violated
        } else {
            Verdict::Undetermined
        }
    }

    /// Share of the still unplaced mines per unknown neighbour.
    pub fn local_probability(self) -> Option<f64> {
        if self.unknowns == 0 {
            return None;
        }
        let remaining = self.declared.saturating_sub(self.mines);
        Some(f64::from(remaining) / f64::from(self.unknowns))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Deduction {
    NoChange,
    Changed(Marked),
    Contradiction,
}

impl Deduction {
    pub fn has_update(&self) -> bool {
        matches!(self, Self::Changed(_))
    }
}

/// Applies the rule at `coords`, recording proven cells on the board.
///
/// Never reports a contradiction: an inconsistent persistent board just yields no deduction.
pub fn evaluate(board: &mut Board, coords: Coord2) -> Deduction {
    let Some(tally) = Tally::of(board, coords) else {
        return Deduction::NoChange;
    };

    let polarity = match tally.verdict() {
        Verdict::AllMines => Polarity::Mine,
        Verdict::AllSafe => Polarity::Safe,
        Verdict::Settled | Verdict::Violated | Verdict::Undetermined => return Deduction::NoChange,
    };

    let mut marked = Marked::new();
    for neighbor in board.iter_neighbors(coords) {
        let outcome = match polarity {
            Polarity::Mine => board.set_mine(neighbor),
            Polarity::Safe => board.set_safe(neighbor),
        };
        if outcome.has_update() {
            marked.push(neighbor);
        }
    }
    Deduction::Changed(marked)
}

/// Applies the rule at `coords` under `hypothesis`, recording deductions as further assumptions.
pub fn evaluate_speculative(board: &Board, hypothesis: &mut Hypothesis, coords: Coord2) -> Deduction {
    let Some(tally) = Tally::under(board, hypothesis, coords) else {
        return Deduction::NoChange;
    };

    let polarity = match tally.verdict() {
        Verdict::Violated => return Deduction::Contradiction,
        Verdict::AllMines => Polarity::Mine,
        Verdict::AllSafe => Polarity::Safe,
        Verdict::Settled | Verdict::Undetermined => return Deduction::NoChange,
    };

    let mut marked = Marked::new();
    for neighbor in board.iter_neighbors(coords) {
        if hypothesis.is_open(board, neighbor) {
            hypothesis.set_guess(neighbor, polarity);
            marked.push(neighbor);
        }
    }
    Deduction::Changed(marked)
}
