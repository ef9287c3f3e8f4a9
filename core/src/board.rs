use alloc::vec::Vec;
use core::fmt;
use core::ops::{Index, IndexMut};

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Persistent solver grid: revealed counts plus everything proven so far.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
}

impl Board {
    pub fn new(size: Coord2) -> Self {
        Self {
            cells: Array2::default(size.to_nd_index()),
        }
    }

    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let mut board = Self::new(snapshot.size);
        board.sync(snapshot);
        board
    }

    /// Brings the board in line with `snapshot`, keeping proofs about cells that are still hidden.
    ///
    /// Reveals never undo themselves within a game, so a visited cell showing up hidden again means a new game and
    /// every proof is dropped.
    pub fn sync(&mut self, snapshot: &Snapshot) {
        if self.size() != snapshot.size {
            *self = Self::new(snapshot.size);
        } else if iter_coords(snapshot.size)
            .any(|coords| self.is_visited(coords) && snapshot.revealed_at(coords).is_none())
        {
            log::debug!("revealed cells went hidden again, starting from a blank board");
            *self = Self::new(snapshot.size);
        }

        for coords in iter_coords(snapshot.size) {
            let cell = &mut self.cells[coords.to_nd_index()];
            match (snapshot.revealed_at(coords), *cell) {
                (Some(count), Cell::Mine) => {
                    log::warn!("Cell {coords:?} proven a mine was revealed with count {count}");
                    cell.set_visited(count);
                }
                (Some(count), _) => cell.set_visited(count),
                (None, Cell::Mine | Cell::Safe) => {}
                (None, _) => cell.set_unknown(),
            }
        }
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.cells.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self[coords]
    }

    pub fn set_visited(&mut self, coords: Coord2, count: u8) {
        self[coords].set_visited(count);
    }

    pub fn set_unknown(&mut self, coords: Coord2) {
        self[coords].set_unknown();
    }

    /// Records a proven mine; only unknown cells change.
    pub fn set_mine(&mut self, coords: Coord2) -> MarkOutcome {
        self.mark(coords, Cell::set_mine)
    }

    /// Records a proven safe cell; only unknown cells change.
    pub fn set_safe(&mut self, coords: Coord2) -> MarkOutcome {
        self.mark(coords, Cell::set_safe)
    }

    fn mark(&mut self, coords: Coord2, set: fn(&mut Cell)) -> MarkOutcome {
        let cell = &mut self[coords];
        if cell.is_unknown() {
            set(cell);
            MarkOutcome::Changed
        } else {
            MarkOutcome::NoChange
        }
    }

    pub fn is_visited(&self, coords: Coord2) -> bool {
        self[coords].is_visited()
    }

    pub fn is_unknown(&self, coords: Coord2) -> bool {
        self[coords].is_unknown()
    }

    pub fn is_definitely_mine(&self, coords: Coord2) -> bool {
        self[coords].is_definitely_mine()
    }

    pub fn is_definitely_safe(&self, coords: Coord2) -> bool {
        self[coords].is_definitely_safe()
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    /// The 3x3 block centred on `coords`, clipped to the board, centre first.
    pub fn iter_block(&self, coords: Coord2) -> impl Iterator<Item = Coord2> + use<> {
        let size = self.size();
        core::iter::once(coords).chain(NeighborIter::new(coords, size))
    }

    pub fn count_neighbors(&self, coords: Coord2, predicate: impl Fn(Cell) -> bool) -> u8 {
        self.cells
            .iter_neighbor_cells(coords)
            .filter(|&cell| predicate(cell))
            .count()
            .try_into()
            .unwrap()
    }

    /// Unknown cells touching at least one visited cell, row-major and without duplicates.
    pub fn frontier(&self) -> Vec<Coord2> {
        self.cells_where(|board, coords| {
            board.is_unknown(coords)
                && board
                    .iter_neighbors(coords)
                    .any(|neighbor| board.is_visited(neighbor))
        })
    }

    pub fn unknown_cells(&self) -> Vec<Coord2> {
        self.cells_where(|board, coords| board.is_unknown(coords))
    }

    pub fn visited_cells(&self) -> Vec<Coord2> {
        self.cells_where(|board, coords| board.is_visited(coords))
    }

    /// Cells proven safe that the session has not revealed yet.
    pub fn pending_safe_cells(&self) -> Vec<Coord2> {
        self.cells_where(|board, coords| board.is_definitely_safe(coords))
    }

    pub fn mine_cells(&self) -> Vec<Coord2> {
        self.cells_where(|board, coords| board.is_definitely_mine(coords))
    }

    fn cells_where(&self, predicate: impl Fn(&Self, Coord2) -> bool) -> Vec<Coord2> {
        iter_coords(self.size())
            .filter(|&coords| predicate(self, coords))
            .collect()
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for Board {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.cells[coords.to_nd_index()]
    }
}

/// One line per row: the count for visited cells, `?` unknown, `X` proven mine, `O` proven safe.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.rows() {
            for cell in row {
                match *cell {
                    Cell::Visited(count) => write!(f, "{count}")?,
                    Cell::Unknown => f.write_str("?")?,
                    Cell::Mine => f.write_str("X")?,
                    Cell::Safe => f.write_str("O")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
