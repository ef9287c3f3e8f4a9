use alloc::vec::Vec;

use ndarray::Array2;

use super::*;

/// Generation strategy that can optionally try to make the starting tile zero or at least safe, but other than that is
/// purely random.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomLayoutGenerator {
    seed: u64,
    start: Coord2,
    start_tile: StartTile,
}

impl RandomLayoutGenerator {
    pub fn new(seed: u64, start: Coord2, start_tile: StartTile) -> Self {
        Self {
            seed,
            start,
            start_tile,
        }
    }
}

impl MineLayoutGenerator for RandomLayoutGenerator {
    fn generate(self, config: GameConfig) -> MineLayout {
        use StartTile::*;
        use rand::prelude::*;

        let total_cells = config.total_cells();
        let start = (
            self.start.0.min(config.size.0.saturating_sub(1)),
            self.start.1.min(config.size.1.saturating_sub(1)),
        );

        // optimize for full boards
        if config.mines >= total_cells {
            if config.mines > total_cells {
                log::warn!(
                    "Board already full, generated anyway, requested {} but only fits {}",
                    config.mines,
                    total_cells
                );
            }
            return layout_from_mask(Array2::from_elem(config.size.to_nd_index(), true));
        }

        let block: Vec<Coord2> = core::iter::once(start)
            .chain(NeighborIter::new(start, config.size))
            .collect();
        let start_block = block.len() as CellCount;

        let actual_start_tile = match self.start_tile {
            Random => Random,
            SimpleSafe | AlwaysZero if config.mines + 1 > total_cells => {
                log::warn!("Cannot make start tile safe, fallback to random");
                Random
            }
            SimpleSafe => SimpleSafe,
            AlwaysZero if config.mines + start_block > total_cells => {
                log::warn!("Cannot make start tile zero, fallback to simple safe");
                SimpleSafe
            }
            AlwaysZero => AlwaysZero,
        };

        // reserved cells are temporarily marked as mines so placement skips them
        let mut mines: Array2<bool> = Array2::default(config.size.to_nd_index());
        let mut free_cells = match actual_start_tile {
            Random => total_cells,
            SimpleSafe => {
                mines[start.to_nd_index()] = true;
                total_cells - 1
            }
            AlwaysZero => {
                for &coords in &block {
                    mines[coords.to_nd_index()] = true;
                }
                total_cells - start_block
            }
        };
        let mut mines_placed = 0;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        for _ in 0..config.mines {
            if free_cells == 0 {
                break;
            }
            let place: CellCount = rng.random_range(0..free_cells);
            let target = iter_coords(config.size)
                .filter(|&coords| !mines[coords.to_nd_index()])
                .nth(place.into());
            if let Some(coords) = target {
                mines[coords.to_nd_index()] = true;
                mines_placed += 1;
                free_cells -= 1;
            }
        }

        // undo to make safe cells
        match actual_start_tile {
            Random => {}
            SimpleSafe => {
                mines[start.to_nd_index()] = false;
            }
            AlwaysZero => {
                for &coords in &block {
                    mines[coords.to_nd_index()] = false;
                }
            }
        }

        let layout = layout_from_mask(mines);
        if layout.mine_count() != config.mines || mines_placed != config.mines {
            log::warn!(
                "Generated layout count mismatch, actual: {}, requested: {}",
                layout.mine_count(),
                config.mines
            );
        }
        layout
    }
}

/// # Panics
///
/// If the configured size exceeds [`MAX_EXTENT`], which [`GameConfig::new`] rules out.
fn layout_from_mask(mask: Array2<bool>) -> MineLayout {
    MineLayout::from_mine_mask(mask).expect("generated board should fit the maximum extent")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requested_mine_count_is_placed() {
        let config = GameConfig::new((8, 8), 10);

        let layout = RandomLayoutGenerator::new(7, (0, 0), StartTile::Random).generate(config);

        assert_eq!(layout.size(), (8, 8));
        assert_eq!(layout.mine_count(), 10);
    }

    #[test]
    fn same_seed_same_layout() {
        let config = GameConfig::new((9, 9), 10);
        let generate = || RandomLayoutGenerator::new(42, (4, 4), StartTile::AlwaysZero).generate(config);

        assert_eq!(generate(), generate());
    }

    #[test]
    fn zero_start_clears_the_block() {
        let config = GameConfig::new((5, 5), 16);

        let layout = RandomLayoutGenerator::new(3, (2, 2), StartTile::AlwaysZero).generate(config);

        assert!(!layout.contains_mine((2, 2)));
        assert_eq!(layout.adjacent_mine_count((2, 2)), 0);
        assert_eq!(layout.mine_count(), 16);
    }

    #[test]
    fn crowded_board_falls_back_to_safe_start() {
        let config = GameConfig::new((3, 3), 8);

        let layout = RandomLayoutGenerator::new(1, (1, 1), StartTile::AlwaysZero).generate(config);

        assert!(!layout.contains_mine((1, 1)));
        assert_eq!(layout.mine_count(), 8);
    }
}
