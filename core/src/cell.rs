use serde::{Deserialize, Serialize};

/// Persistent solver knowledge about a single cell.
///
/// Speculative assumptions never live here, see [`Hypothesis`](crate::Hypothesis).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    /// Revealed by the session, holding its adjacent mine count.
    Visited(u8),
    /// Hidden and not yet deduced.
    #[default]
    Unknown,
    /// Hidden and proven to be a mine.
    Mine,
    /// Hidden and proven to be safe.
    Safe,
}

impl Cell {
    pub fn set_visited(&mut self, count: u8) {
        *self = Self::Visited(count);
    }

    pub fn set_unknown(&mut self) {
        *self = Self::Unknown;
    }

    pub fn set_mine(&mut self) {
        *self = Self::Mine;
    }

    pub fn set_safe(&mut self) {
        *self = Self::Safe;
    }

    pub const fn is_visited(self) -> bool {
        matches!(self, Self::Visited(_))
    }

    pub const fn is_unknown(self) -> bool {
        matches!(self, Self::Unknown)
    }

    pub const fn is_definitely_mine(self) -> bool {
        matches!(self, Self::Mine)
    }

    pub const fn is_definitely_safe(self) -> bool {
        matches!(self, Self::Safe)
    }

    /// Declared adjacent mine count, only for visited cells.
    pub const fn mine_count(self) -> Option<u8> {
        match self {
            Self::Visited(count) => Some(count),
            _ => None,
        }
    }
}

/// Value of an assumption or of a proven fact about a hidden cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Polarity {
    Mine,
    Safe,
}

impl Polarity {
    pub const fn opposite(self) -> Self {
        match self {
            Self::Mine => Self::Safe,
            Self::Safe => Self::Mine,
        }
    }
}

impl core::ops::Not for Polarity {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.opposite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predicates_follow_state() {
        let mut cell = Cell::default();
        assert!(cell.is_unknown());

        cell.set_mine();
        assert!(cell.is_definitely_mine());
        assert_eq!(cell.mine_count(), None);

        cell.set_visited(3);
        assert!(cell.is_visited());
        assert_eq!(cell.mine_count(), Some(3));
    }

    #[test]
    fn polarity_negates() {
        assert_eq!(!Polarity::Mine, Polarity::Safe);
        assert_eq!(Polarity::Safe.opposite(), Polarity::Mine);
    }
}
