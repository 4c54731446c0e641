//! Row-by-row perfect maze generation for rectangular grids.
//!
//! The generator carves one row at a time: cells in the row under
//! construction carry disjoint set labels, adjacent sets are merged at
//! random, every set opens at least one exit into the row below, and the
//! last row is merged completely. The result is a single connected component
//! with exactly one path between any two cells.
//!
//! ```
//! use ellermaze::{MazeConfig, generate_maze};
//!
//! let maze = generate_maze(MazeConfig::square(8).with_seed(42))?;
//! for row in maze.rows() {
//!     for cell in row {
//!         // each cell exposes its position and its four wall flags
//!         let _ = (cell.x, cell.y, cell.top, cell.right, cell.bottom, cell.left);
//!     }
//! }
//! # Ok::<(), ellermaze::GenerateError>(())
//! ```

pub mod generators;
pub mod maze;

pub use generators::{GenerateError, MazeConfig, generate_maze};
pub use maze::{Cell, Maze, Orientation};
