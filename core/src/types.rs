//! Grid coordinates and the clipped 8-neighbourhood shared by every board in the crate.

use core::slice;

use ndarray::Array2;

/// One axis of a board position.
pub type Coord = u8;

/// Cell and mine totals; `MAX_EXTENT` squared fits comfortably.
pub type CellCount = u16;

/// Zero-based `(row, column)`.
pub type Coord2 = (Coord, Coord);

/// Largest supported extent along either axis.
pub const MAX_EXTENT: Coord = 64;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        let (row, column) = self;
        [usize::from(row), usize::from(column)]
    }
}

/// Number of cells on a `rows` by `columns` board.
pub const fn mult(rows: Coord, columns: Coord) -> CellCount {
    rows as CellCount * columns as CellCount
}

/// Row-major iterator over every coordinate of a `size` grid.
pub fn iter_coords((rows, columns): Coord2) -> impl Iterator<Item = Coord2> {
    (0..rows).flat_map(move |row| (0..columns).map(move |column| (row, column)))
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, center: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, center: Coord2) -> NeighborIter {
        let (rows, columns) = self.dim();
        let clamp = |extent: usize| Coord::try_from(extent).unwrap_or(Coord::MAX);
        NeighborIter::new(center, (clamp(rows), clamp(columns)))
    }
}

pub trait NeighborCellIterExt<T>: NeighborIterExt {
    fn iter_neighbor_cells(&self, center: Coord2) -> impl Iterator<Item = T>;
}

impl<T: Copy> NeighborCellIterExt<T> for Array2<T> {
    fn iter_neighbor_cells(&self, center: Coord2) -> impl Iterator<Item = T> {
        self.iter_neighbors(center)
            .map(|coords| self[coords.to_nd_index()])
    }
}

/// Row and column offsets of the eight neighbours, in row-major order.
const OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Neighbours of a cell that lie inside the board, row-major.
#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: Coord2,
    size: Coord2,
    offsets: slice::Iter<'static, (i8, i8)>,
}

impl NeighborIter {
    pub(crate) fn new(center: Coord2, size: Coord2) -> Self {
        Self {
            center,
            size,
            offsets: OFFSETS.iter(),
        }
    }

    fn shifted(&self, (row_offset, column_offset): (i8, i8)) -> Option<Coord2> {
        let (row, column) = self.center;
        let (rows, columns) = self.size;
        let row = row.checked_add_signed(row_offset).filter(|&row| row < rows)?;
        let column = column
            .checked_add_signed(column_offset)
            .filter(|&column| column < columns)?;
        Some((row, column))
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&offset) = self.offsets.next() {
            if let Some(coords) = self.shifted(offset) {
                return Some(coords);
            }
        }
        None
    }
}
