/// One grid position with four independently toggled walls.
///
/// A flag of `true` means the wall is present and traversal across that edge
/// is blocked. Walls are only ever cleared in symmetric pairs through
/// [`Maze::open_passage_after`](super::Maze::open_passage_after), so the two
/// flags of a shared edge never disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Column of the cell, counted from the left edge.
    pub x: u8,
    /// Row of the cell, counted from the top edge.
    pub y: u8,
    /// Wall towards the row above.
    pub top: bool,
    /// Wall towards the next cell in the row.
    pub right: bool,
    /// Wall towards the row below.
    pub bottom: bool,
    /// Wall towards the previous cell in the row.
    pub left: bool,
    /// Disjoint-set label of the row under construction. Only meaningful
    /// while the cell's row is being carved; cleared before the maze is
    /// handed to the caller.
    pub(crate) set: Option<u8>,
}

impl Cell {
    /// Creates a cell at `(x, y)` with wall state seeded from `closed`.
    ///
    /// A closed cell starts as an isolated 1x1 room. Otherwise only interior
    /// walls start present, leaving the grid perimeter open.
    pub(crate) fn new(x: u8, y: u8, width: u8, height: u8, closed: bool) -> Self {
        Cell {
            x,
            y,
            top: closed || y > 0,
            right: closed || x < width - 1,
            bottom: closed || y < height - 1,
            left: closed || x > 0,
            set: None,
        }
    }
}
