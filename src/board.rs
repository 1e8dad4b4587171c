//! Board generation from a seeded stream.
//!
//! One draw per cell in row-major order, so a seed label and a configuration
//! fully determine the board.

use crate::config::GameConfig;
use crate::rng::SeedRng;
use crate::types::Board;

/// Fill a `width x height` board with strains drawn from `rng`.
pub fn generate(width: usize, height: usize, strains: u8, rng: &mut SeedRng) -> Board {
    let cells = (0..width * height).map(|_| rng.next_strain(strains)).collect();
    Board::from_cells(width, height, cells)
}

/// Generate the board a configuration and seed label stand for.
pub fn generate_from_seed(config: &GameConfig, seed: &str) -> Board {
    let mut rng = SeedRng::from_label(seed);
    generate(config.width, config.height, config.strains, &mut rng)
}
