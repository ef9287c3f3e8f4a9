use alloc::vec::Vec;

use ndarray::Array2;

use crate::*;

/// Speculative overlay on top of a [`Board`].
///
/// Assumptions only ever cover cells that are unknown on the board. A fresh overlay is built for each
/// independent hypothesis so nothing carries over between tests.
#[derive(Clone, Debug)]
pub struct Hypothesis {
    assumed: Array2<Option<Polarity>>,
    touched: Vec<Coord2>,
}

impl Hypothesis {
    pub fn new(size: Coord2) -> Self {
        Self {
            assumed: Array2::from_elem(size.to_nd_index(), None),
            touched: Vec::new(),
        }
    }

    pub fn for_board(board: &Board) -> Self {
        Self::new(board.size())
    }

    pub fn assumption(&self, coords: Coord2) -> Option<Polarity> {
        self.assumed[coords.to_nd_index()]
    }

    pub fn set_guess(&mut self, coords: Coord2, polarity: Polarity) {
        let slot = &mut self.assumed[coords.to_nd_index()];
        if slot.is_none() {
            self.touched.push(coords);
        }
        *slot = Some(polarity);
    }

    pub fn set_guess_mine(&mut self, coords: Coord2) {
        self.set_guess(coords, Polarity::Mine);
    }

    pub fn set_guess_safe(&mut self, coords: Coord2) {
        self.set_guess(coords, Polarity::Safe);
    }

    pub fn is_guessed_mine(&self, coords: Coord2) -> bool {
        self.assumption(coords) == Some(Polarity::Mine)
    }

    pub fn is_guessed_safe(&self, coords: Coord2) -> bool {
        self.assumption(coords) == Some(Polarity::Safe)
    }

    /// Clears every assumption.
    pub fn reset_guess(&mut self) {
        for coords in self.touched.drain(..) {
            self.assumed[coords.to_nd_index()] = None;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.touched.is_empty()
    }

    /// Assumptions in the order they were made.
    pub fn iter(&self) -> impl Iterator<Item = (Coord2, Polarity)> + '_ {
        self.touched
            .iter()
            .filter_map(|&coords| self.assumption(coords).map(|polarity| (coords, polarity)))
    }

    /// Unknown on the board and not assumed either way.
    pub fn is_open(&self, board: &Board, coords: Coord2) -> bool {
        board.is_unknown(coords) && self.assumption(coords).is_none()
    }

    /// Proven or assumed mine.
    pub fn counts_as_mine(&self, board: &Board, coords: Coord2) -> bool {
        board.is_definitely_mine(coords) || self.is_guessed_mine(coords)
    }
}
