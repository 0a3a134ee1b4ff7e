use ndarray::Array2;
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::*;

pub use backtracker::*;
pub use decoy::*;
pub use division::*;
pub use prim::*;
pub use wilson::*;

mod backtracker;
mod decoy;
mod division;
mod prim;
mod wilson;

/// Carving strategy producing a wall/passage grid over the shared representation.
///
/// A carver must leave the border walled and every room cell it relies on
/// reachable from its own carved region; start/exit stamping and the
/// connectivity check are applied afterwards by [`generate`].
pub trait MazeCarver {
    fn carve(&self, size: Coord, rng: &mut SmallRng) -> Array2<Cell>;
}

/// Tag selecting one of the interchangeable carving strategies.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Algorithm {
    /// Recursive division of an open field
    Division,
    /// Randomized depth-first backtracker
    Backtracker,
    /// Frontier growth in Prim's style
    Prim,
    /// Wilson's loop-erased random walk
    Wilson,
    /// Single solution path with decoy dead ends
    Decoy,
}

impl Algorithm {
    pub const ALL: [Algorithm; 5] = [
        Self::Division,
        Self::Backtracker,
        Self::Prim,
        Self::Wilson,
        Self::Decoy,
    ];

    fn carver(self) -> &'static dyn MazeCarver {
        match self {
            Self::Division => &DivisionCarver,
            Self::Backtracker => &BacktrackerCarver,
            Self::Prim => &PrimCarver,
            Self::Wilson => &WilsonCarver,
            Self::Decoy => &DecoyCarver,
        }
    }
}

/// Generates a maze for `config`.
///
/// With `config.seed` set, the grid is a pure function of
/// `(size, algorithm, seed)`; without it a seed is drawn from OS entropy and
/// recorded on the layout so the maze stays shareable.
pub fn generate(config: &GameConfig) -> Result<MazeLayout> {
    let size = normalize_size(config.size)?;
    let seed = config.seed.unwrap_or_else(|| rand::rng().random());
    let mut rng = SmallRng::seed_from_u64(seed);

    let mut cells = config.algorithm.carver().carve(size, &mut rng);
    stamp_endpoints(&mut cells, size);
    ensure_connected(&mut cells, size)?;

    log::debug!(
        "generated {}x{} maze with {:?}, seed {}",
        size,
        size,
        config.algorithm,
        seed
    );
    MazeLayout::from_cells(cells, seed)
}

fn stamp_endpoints(cells: &mut Array2<Cell>, size: Coord) {
    cells[START.to_nd_index()] = Cell::Passage;
    cells[exit_corner(size).to_nd_index()] = Cell::Exit;
}

pub(crate) const fn exit_corner(size: Coord) -> Coord2 {
    (size - 2, size - 2)
}

/// Mandatory post-generation repair pass: if the exit is not reachable from
/// the start, cut a deterministic x-then-y corridor from the reached cell
/// nearest the exit, then verify again and fail loudly rather than hand out
/// a broken maze.
fn ensure_connected(cells: &mut Array2<Cell>, size: Coord) -> Result<()> {
    let exit = exit_corner(size);

    let reached = flood_reachable(cells);
    if reached[exit.to_nd_index()] {
        return Ok(());
    }

    log::warn!("exit unreachable after carving, cutting a fallback corridor");
    let from = reached
        .indexed_iter()
        .filter(|&(_, &ok)| ok)
        .map(|((x, y), _)| (x as Coord, y as Coord))
        .min_by_key(|&coords| manhattan(coords, exit))
        .unwrap_or(START);
    carve_corridor(cells, from, exit);

    let reached = flood_reachable(cells);
    if reached[exit.to_nd_index()] {
        Ok(())
    } else {
        Err(GameError::ExitUnreachable)
    }
}

fn manhattan((ax, ay): Coord2, (bx, by): Coord2) -> u16 {
    u16::from(ax.abs_diff(bx)) + u16::from(ay.abs_diff(by))
}

fn carve_corridor(cells: &mut Array2<Cell>, from: Coord2, to: Coord2) {
    let (mut x, mut y) = from;
    while x != to.0 {
        x = if x < to.0 { x + 1 } else { x - 1 };
        open_cell(cells, (x, y));
    }
    while y != to.1 {
        y = if y < to.1 { y + 1 } else { y - 1 };
        open_cell(cells, (x, y));
    }
}

fn open_cell(cells: &mut Array2<Cell>, coords: Coord2) {
    if cells[coords.to_nd_index()] == Cell::Wall {
        cells[coords.to_nd_index()] = Cell::Passage;
    }
}

/// Breadth-first flood from the start cell over open cells.
pub(crate) fn flood_reachable(cells: &Array2<Cell>) -> Array2<bool> {
    let mut reached = Array2::from_elem(cells.dim(), false);
    if !cells[START.to_nd_index()].is_open() {
        return reached;
    }

    reached[START.to_nd_index()] = true;
    let mut to_visit = VecDeque::from([START]);
    while let Some(coords) = to_visit.pop_front() {
        for next in cells.iter_neighbors(coords) {
            if !reached[next.to_nd_index()] && cells[next.to_nd_index()].is_open() {
                reached[next.to_nd_index()] = true;
                to_visit.push_back(next);
            }
        }
    }
    reached
}

// Helpers shared by the carvers. Rooms are the odd-coordinate cells two
// units apart; the cell between two adjacent rooms is the wall to open.

pub(crate) fn walled_grid(size: Coord) -> Array2<Cell> {
    Array2::from_elem([size as usize; 2], Cell::Wall)
}

pub(crate) fn open_field(size: Coord) -> Array2<Cell> {
    let mut cells = walled_grid(size);
    for x in 1..=(size - 2) {
        for y in 1..=(size - 2) {
            cells[(x, y).to_nd_index()] = Cell::Passage;
        }
    }
    cells
}

pub(crate) fn rooms(size: Coord) -> impl Iterator<Item = Coord2> {
    (1..size - 1)
        .step_by(2)
        .flat_map(move |x| (1..size - 1).step_by(2).map(move |y| (x, y)))
}

const ROOM_STEPS: [(i16, i16); 4] = [(0, -2), (-2, 0), (2, 0), (0, 2)];

pub(crate) fn room_neighbors((x, y): Coord2, size: Coord) -> impl Iterator<Item = Coord2> {
    ROOM_STEPS.iter().filter_map(move |&(dx, dy)| {
        let nx = i16::from(x) + dx;
        let ny = i16::from(y) + dy;
        let max = i16::from(size) - 2;
        (nx >= 1 && ny >= 1 && nx <= max && ny <= max).then_some((nx as Coord, ny as Coord))
    })
}

pub(crate) fn wall_between((ax, ay): Coord2, (bx, by): Coord2) -> Coord2 {
    ((ax + bx) / 2, (ay + by) / 2)
}
