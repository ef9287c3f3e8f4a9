use crate::*;
pub use random::*;

mod random;

pub trait MineLayoutGenerator {
    fn generate(self, config: GameConfig) -> MineLayout;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StartTile {
    Random,
    SimpleSafe,
    AlwaysZero,
}
