use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// What a player can see of the board: a digit for every revealed cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub size: Coord2,
    pub revealed: Array2<Option<u8>>,
}

impl Snapshot {
    pub fn new(size: Coord2, revealed: Array2<Option<u8>>) -> Result<Self> {
        let snapshot = Self { size, revealed };
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn from_engine(engine: &PlayEngine) -> Self {
        let size = engine.size();
        let mut revealed = Array2::from_elem(size.to_nd_index(), None);

        for coords in iter_coords(size) {
            revealed[coords.to_nd_index()] = engine.cell_at(coords).revealed_count();
        }

        Self { size, revealed }
    }

    /// Builds a snapshot from text rows where digits are revealed and anything else is hidden.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.as_ref().chars().count());
        if height > usize::from(MAX_EXTENT) || width > usize::from(MAX_EXTENT) {
            return Err(GameError::BoardTooLarge);
        }

        let mut revealed = Array2::from_elem([height, width], None);
        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            if line.chars().count() != width {
                return Err(GameError::InvalidBoardShape);
            }
            for (column, ch) in line.chars().enumerate() {
                revealed[[row, column]] = ch.to_digit(10).map(|digit| digit as u8);
            }
        }

        Self::new((height as Coord, width as Coord), revealed)
    }

    pub fn validate(&self) -> Result<()> {
        if self.size.0 > MAX_EXTENT || self.size.1 > MAX_EXTENT {
            return Err(GameError::BoardTooLarge);
        }

        let expected = (self.size.0 as usize, self.size.1 as usize);
        if self.revealed.dim() != expected {
            return Err(GameError::InvalidBoardShape);
        }

        for coords in iter_coords(self.size) {
            if let Some(count) = self.revealed[coords.to_nd_index()] {
                if count > 8 {
                    return Err(GameError::InvalidClue { coords, count });
                }
            }
        }

        Ok(())
    }

    pub fn revealed_at(&self, coords: Coord2) -> Option<u8> {
        self.revealed[coords.to_nd_index()]
    }

    pub fn hidden_count(&self) -> usize {
        self.revealed.iter().filter(|cell| cell.is_none()).count()
    }
}
