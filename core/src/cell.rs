use serde::{Deserialize, Serialize};

/// Tag stored in a generated maze grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Wall,
    Passage,
    Exit,
}

impl Cell {
    /// Whether the player may stand on this cell.
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Passage | Self::Exit)
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::Wall
    }
}

/// Cell state in a derived fog-of-war view.
///
/// `Hidden` and `Player` never appear in the stored maze; they only exist in
/// the grids returned by [`crate::Session::view`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewCell {
    Hidden,
    Wall,
    Passage,
    Exit,
    Player,
}

impl From<Cell> for ViewCell {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Wall => Self::Wall,
            Cell::Passage => Self::Passage,
            Cell::Exit => Self::Exit,
        }
    }
}
