use alloc::collections::{BTreeSet, VecDeque};
use alloc::string::String;
use core::num::Saturating;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EngineState {
    Ready,
    Active,
    Won,
    Lost,
}

impl EngineState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::Ready
    }
}

/// Reference game session: owns the mine layout and answers reveals.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayEngine {
    mine_layout: MineLayout,
    board: Array2<EngineCell>,
    visit_count: Saturating<CellCount>,
    step_count: Saturating<u32>,
    state: EngineState,
    triggered_mine: Option<Coord2>,
}

impl PlayEngine {
    pub fn new(mine_layout: MineLayout) -> Self {
        let size = mine_layout.size();
        Self {
            mine_layout,
            board: Array2::default(size.to_nd_index()),
            visit_count: Saturating(0),
            step_count: Saturating(0),
            state: Default::default(),
            triggered_mine: None,
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        self.mine_layout.size()
    }

    pub fn cell_at(&self, coords: Coord2) -> EngineCell {
        self.board[coords.to_nd_index()]
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn has_mine_at(&self, coords: Coord2) -> bool {
        self.mine_layout.contains_mine(coords)
    }

    /// Safe cells revealed so far.
    pub fn visit_count(&self) -> CellCount {
        self.visit_count.0
    }

    /// Reveal requests accepted so far, including repeats.
    pub fn step_count(&self) -> u32 {
        self.step_count.0
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.mine_layout.validate_coords(coords)?;
        self.check_not_finished()?;
        self.step_count += 1;

        if self.board[coords.to_nd_index()].is_hidden() {
            Ok(self.reveal_single_cell(coords))
        } else {
            Ok(RevealOutcome::NoChange)
        }
    }

    fn reveal_single_cell(&mut self, coords: Coord2) -> RevealOutcome {
        if self.mine_layout[coords] {
            self.board[coords.to_nd_index()] = EngineCell::Exploded;
            self.triggered_mine = Some(coords);
            self.end_game(false);
            return RevealOutcome::HitMine;
        }

        self.open(coords);
        if self.board[coords.to_nd_index()] == EngineCell::Revealed(0) {
            let mut visited = BTreeSet::from([coords]);
            let mut to_visit: VecDeque<_> = self.hidden_neighbors(coords).collect();

            while let Some(visit_coords) = to_visit.pop_front() {
                if !visited.insert(visit_coords) {
                    continue;
                }
                if !self.board[visit_coords.to_nd_index()].is_hidden() {
                    continue;
                }

                self.open(visit_coords);
                if self.board[visit_coords.to_nd_index()] == EngineCell::Revealed(0) {
                    to_visit.extend(
                        self.hidden_neighbors(visit_coords)
                            .filter(|pos| !visited.contains(pos)),
                    );
                }
            }
        }

        if self.visit_count == Saturating(self.mine_layout.safe_cell_count()) {
            self.end_game(true);
            RevealOutcome::Won
        } else {
            self.mark_started();
            RevealOutcome::Revealed
        }
    }

    fn open(&mut self, coords: Coord2) {
        let adjacent_mines = self.mine_layout.adjacent_mine_count(coords);
        self.board[coords.to_nd_index()] = EngineCell::Revealed(adjacent_mines);
        self.visit_count += 1;
    }

    fn hidden_neighbors(&self, coords: Coord2) -> impl Iterator<Item = Coord2> + '_ {
        self.mine_layout
            .iter_neighbors(coords)
            .filter(|&pos| self.board[pos.to_nd_index()].is_hidden())
    }

    fn mark_started(&mut self) {
        if matches!(self.state, EngineState::Ready) {
            self.state = EngineState::Active;
        }
    }

    fn end_game(&mut self, won: bool) {
        if self.state.is_finished() {
            return;
        }

        self.state = if won {
            EngineState::Won
        } else {
            EngineState::Lost
        };
        if won {
            self.triggered_mine = None;
        }
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }

    /// Text view of the board: digits, `X` for the triggered mine, `?` for hidden cells or `@` once won.
    pub fn render(&self) -> String {
        let (rows, columns) = self.size();
        let hidden = if self.state == EngineState::Won { '@' } else { '?' };
        let mut out = String::with_capacity(usize::from(rows) * (usize::from(columns) + 1));

        for row in 0..rows {
            for column in 0..columns {
                out.push(match self.cell_at((row, column)) {
                    EngineCell::Hidden => hidden,
                    EngineCell::Revealed(count) => char::from(b'0' + count),
                    EngineCell::Exploded => 'X',
                });
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(size: Coord2, mines: &[Coord2]) -> MineLayout {
        MineLayout::from_mine_coords(size, mines).unwrap()
    }

    #[test]
    fn reveal_hits_mine_and_sets_triggered_cell() {
        let mut engine = PlayEngine::new(layout((2, 2), &[(0, 0)]));

        let outcome = engine.reveal((0, 0)).unwrap();

        assert_eq!(outcome, RevealOutcome::HitMine);
        assert_eq!(engine.state(), EngineState::Lost);
        assert_eq!(engine.triggered_mine(), Some((0, 0)));
        assert_eq!(engine.reveal((1, 1)), Err(GameError::AlreadyEnded));
    }

    #[test]
    fn reveal_flood_fill_opens_zero_region() {
        let mut engine = PlayEngine::new(layout((3, 3), &[(2, 2)]));

        let outcome = engine.reveal((0, 0)).unwrap();

        assert_eq!(outcome, RevealOutcome::Won);
        assert_eq!(engine.cell_at((0, 0)), EngineCell::Revealed(0));
        assert_eq!(engine.cell_at((1, 1)), EngineCell::Revealed(1));
        assert_eq!(engine.cell_at((2, 2)), EngineCell::Hidden);
        assert_eq!(engine.visit_count(), 8);
        assert_eq!(engine.step_count(), 1);
    }

    #[test]
    fn repeated_reveal_counts_a_step_only() {
        let mut engine = PlayEngine::new(layout((1, 3), &[(0, 0)]));

        assert_eq!(engine.reveal((0, 1)).unwrap(), RevealOutcome::Revealed);
        assert_eq!(engine.reveal((0, 1)).unwrap(), RevealOutcome::NoChange);

        assert_eq!(engine.visit_count(), 1);
        assert_eq!(engine.step_count(), 2);
        assert_eq!(engine.state(), EngineState::Active);
    }

    #[test]
    fn out_of_bounds_reveal_is_rejected() {
        let mut engine = PlayEngine::new(layout((2, 2), &[]));

        assert_eq!(engine.reveal((2, 0)), Err(GameError::InvalidCoords));
        assert_eq!(engine.step_count(), 0);
    }

    #[test]
    fn render_matches_text_format() {
        // .X.
        // ...
        // ..X
        let mut engine = PlayEngine::new(layout((3, 3), &[(0, 1), (2, 2)]));

        engine.reveal((2, 0)).unwrap();
        assert_eq!(engine.render(), "???\n12?\n01?\n");

        engine.reveal((0, 1)).unwrap();
        assert_eq!(engine.render(), "?X?\n12?\n01?\n");
    }

    #[test]
    fn won_board_shows_mines_as_at_signs() {
        let mut engine = PlayEngine::new(layout((2, 1), &[(0, 0)]));

        assert_eq!(engine.reveal((1, 0)).unwrap(), RevealOutcome::Won);
        assert_eq!(engine.render(), "@\n1\n");
    }
}
