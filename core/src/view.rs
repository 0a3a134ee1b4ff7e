use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Base fog-of-war mode of a session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FogMode {
    /// Cells within the configured radius of the player are visible.
    Normal,
    /// Only the player's own cell is visible unless a reveal boost is active.
    Blind,
}

impl Default for FogMode {
    fn default() -> Self {
        Self::Normal
    }
}

/// Temporary reveal boost; consumed by the next accepted move.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reveal {
    Flash,
    GodEye,
}

/// How much of the maze the current session state exposes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Visibility {
    Full,
    Radius(Coord),
    SelfOnly,
}

impl Visibility {
    fn admits(self, player: Coord2, coords: Coord2) -> bool {
        match self {
            Self::Full => true,
            Self::SelfOnly => coords == player,
            Self::Radius(radius) => {
                dist_squared(player, coords) <= u32::from(radius) * u32::from(radius)
            }
        }
    }
}

/// Squared Euclidean distance; the radius test stays in integer arithmetic.
fn dist_squared((ax, ay): Coord2, (bx, by): Coord2) -> u32 {
    let dx = i32::from(ax) - i32::from(bx);
    let dy = i32::from(ay) - i32::from(by);
    (dx * dx + dy * dy) as u32
}

/// Derives the rendered grid: true cell values where visible, [`ViewCell::Hidden`]
/// elsewhere, and the player overlaid last on its own cell.
pub(crate) fn render(maze: &MazeLayout, player: Coord2, visibility: Visibility) -> Array2<ViewCell> {
    let mut view = Array2::from_elem(maze.cells().dim(), ViewCell::Hidden);

    for ((x, y), out) in view.indexed_iter_mut() {
        let coords = (x as Coord, y as Coord);
        if visibility.admits(player, coords) {
            *out = maze[coords].into();
        }
    }

    view[player.to_nd_index()] = ViewCell::Player;
    view
}
