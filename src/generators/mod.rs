use rand::{SeedableRng, rngs::StdRng};
use thiserror::Error;

mod eller;

use crate::maze::Maze;

/// Get a random number generator, optionally seeded for reproducibility.
fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// Parameters for [`generate_maze`].
#[derive(Debug, Clone, Copy)]
pub struct MazeConfig {
    /// Number of columns. Must be at least 1.
    pub width: u8,
    /// Number of rows. Must be at least 1.
    pub height: u8,
    /// Whether the outer perimeter starts fully walled.
    pub closed: bool,
    /// Seed for the random stream. `None` draws a fresh stream from the OS.
    pub seed: Option<u64>,
}

impl Default for MazeConfig {
    fn default() -> Self {
        MazeConfig {
            width: 8,
            height: 8,
            closed: true,
            seed: None,
        }
    }
}

impl MazeConfig {
    /// A square maze of the given size, perimeter walled, unseeded.
    pub fn square(size: u8) -> Self {
        MazeConfig {
            width: size,
            height: size,
            ..MazeConfig::default()
        }
    }

    /// Pins the random stream to `seed` for reproducible output.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Errors reported by [`generate_maze`] before any row processing begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GenerateError {
    /// Width or height is zero.
    #[error("maze dimensions must be positive, got {width}x{height}")]
    InvalidDimension { width: u8, height: u8 },
}

/// Generates a perfect maze: a single connected component with exactly one
/// path between any two cells.
///
/// Rows are carved top to bottom. Cells in the row under construction carry
/// disjoint set labels; adjacent sets are merged at random, every set opens
/// at least one exit into the row below, and the last row is merged
/// completely. Two calls with the same config and an explicit seed produce
/// identical mazes.
pub fn generate_maze(config: MazeConfig) -> Result<Maze, GenerateError> {
    let MazeConfig {
        width,
        height,
        closed,
        seed,
    } = config;
    if width == 0 || height == 0 {
        return Err(GenerateError::InvalidDimension { width, height });
    }

    tracing::debug!(
        "[gen] carving {}x{} maze (closed: {}, seeded: {})",
        width,
        height,
        closed,
        seed.is_some()
    );
    let mut rng = get_rng(seed);
    let mut maze = Maze::new(width, height, closed);
    eller::carve(&mut maze, &mut rng);

    // The labels are a construction artifact; callers only see wall flags.
    maze.clear_set_labels();
    Ok(maze)
}
