//! Move selection from revealed counts alone.
//!
//! Strategies are tried from cheapest and surest to most speculative:
//! 1. deterministic propagation of the local count rule;
//! 2. single-cell hypotheses checked for contradictions;
//! 3. pairwise hypotheses closed over an implication graph, then the lone remainder;
//! 4. the least risky unknown cell.

use serde::{Deserialize, Serialize};

pub use constraint::{Deduction, Marked, Tally, Verdict, evaluate, evaluate_speculative};
pub use hypothesis::*;
pub use implication::{ImplicationGraph, Node};
pub use oracle::{contradicts, find_contradiction};
pub use propagation::{WorkQueue, seed_visited, settle, take_safe};
pub use risk::DEFAULT_PRIOR;
pub use single::MineScan;

use crate::*;

mod constraint;
mod hypothesis;
mod implication;
mod oracle;
pub mod pairwise;
mod propagation;
pub mod risk;
pub mod single;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Mine probability assumed for cells next to no revealed count.
    pub prior: f64,
    /// Whether to run the quadratic pairwise search at all.
    pub pairwise: bool,
    /// Skip the pairwise search when the frontier is larger than this; unlimited by default.
    pub pairwise_frontier_limit: Option<usize>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            prior: DEFAULT_PRIOR,
            pairwise: true,
            pairwise_frontier_limit: None,
        }
    }
}

/// How a move was chosen.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Strategy {
    Propagation,
    SingleHypothesis,
    MineElimination,
    Pairwise,
    LoneRemainder,
    Risk { risk: f64 },
}

impl Strategy {
    /// Whether the move is proven safe.
    pub const fn is_proven(self) -> bool {
        !matches!(self, Self::LoneRemainder | Self::Risk { .. })
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub coords: Coord2,
    pub strategy: Strategy,
}

impl Decision {
    pub const fn new(coords: Coord2, strategy: Strategy) -> Self {
        Self { coords, strategy }
    }
}

/// Keeps what has been proven between turns and picks the next cell to reveal.
#[derive(Clone, Debug)]
pub struct Solver {
    board: Board,
    queue: WorkQueue,
    config: SolverConfig,
}

impl Default for Solver {
    fn default() -> Self {
        Self::new(SolverConfig::default())
    }
}

impl Solver {
    pub fn new(config: SolverConfig) -> Self {
        Self::with_board(Board::new((0, 0)), config)
    }

    pub fn with_board(board: Board, config: SolverConfig) -> Self {
        Self {
            board,
            queue: WorkQueue::new(),
            config,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Syncs with `snapshot` and picks the next cell to reveal.
    pub fn decide(&mut self, snapshot: &Snapshot) -> Result<Option<Decision>> {
        snapshot.validate()?;
        self.board.sync(snapshot);
        Ok(self.decide_current())
    }

    /// Picks the next cell to reveal from the board as it stands.
    pub fn decide_current(&mut self) -> Option<Decision> {
        log::trace!("deciding on\n{}", self.board);
        if let Some(coords) = self.propagate() {
            return Some(Decision::new(coords, Strategy::Propagation));
        }

        log::debug!("propagation found nothing, trying single-cell hypotheses");
        if let Some(decision) = single::search(&mut self.board) {
            return Some(decision);
        }

        if let Some(decision) = self.search_pairs() {
            return Some(decision);
        }

        let (coords, risk) = risk::least_risky(&self.board, self.config.prior)?;
        log::info!("no provable move, taking {coords:?} with estimated risk {risk:.3}");
        Some(Decision::new(coords, Strategy::Risk { risk }))
    }

    /// Deterministic pass seeded with every revealed cell, pending safe cells popped first.
    fn propagate(&mut self) -> Option<Coord2> {
        self.queue.clear();
        self.queue.extend(self.board.visited_cells());
        self.queue.extend(self.board.pending_safe_cells());
        take_safe(&mut self.board, &mut self.queue)
    }

    fn search_pairs(&mut self) -> Option<Decision> {
        let frontier = self.board.frontier();
        let within_limit = self
            .config
            .pairwise_frontier_limit
            .is_none_or(|limit| frontier.len() <= limit);

        if self.config.pairwise && within_limit {
            log::debug!("trying pairwise hypotheses over {} cells", frontier.len());
            if let Some(coords) = pairwise::search(&mut self.board, &frontier) {
                return Some(Decision::new(coords, Strategy::Pairwise));
            }
        } else if self.config.pairwise {
            log::info!("frontier of {} cells is too large for pairwise search", frontier.len());
        }

        pairwise::lone_remainder(&self.board)
            .map(|coords| Decision::new(coords, Strategy::LoneRemainder))
    }
}
