use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use types::*;
pub use view::*;

mod cell;
mod engine;
mod error;
mod generator;
mod types;
mod view;

/// Smallest accepted maze size; smaller requests are raised to this before rounding.
pub const MIN_SIZE: Coord = 10;

/// Largest accepted maze size.
pub const MAX_SIZE: Coord = 101;

/// Default fog-of-war radius in [`FogMode::Normal`].
pub const DEFAULT_VISIBLE_RADIUS: Coord = 4;

/// Default radius of a [`Reveal::Flash`] boost.
pub const DEFAULT_FLASH_RADIUS: Coord = 5;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord,
    pub algorithm: Algorithm,
    pub seed: Option<u64>,
    pub fog: FogMode,
    pub visible_radius: Coord,
    pub flash_radius: Coord,
}

impl GameConfig {
    /// Builds a config with the size normalization rule applied: sizes above
    /// [`MAX_SIZE`] are rejected, sizes below [`MIN_SIZE`] are raised to it,
    /// and even sizes round up to the next odd size.
    pub fn new(size: Coord, algorithm: Algorithm) -> Result<Self> {
        let size = normalize_size(size)?;
        Ok(Self {
            size,
            algorithm,
            seed: None,
            fog: FogMode::Normal,
            visible_radius: DEFAULT_VISIBLE_RADIUS,
            flash_radius: DEFAULT_FLASH_RADIUS,
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_fog(mut self, fog: FogMode) -> Self {
        self.fog = fog;
        self
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size, self.size)
    }
}

pub(crate) fn normalize_size(size: Coord) -> Result<Coord> {
    if size > MAX_SIZE {
        return Err(GameError::SizeOutOfRange(size));
    }

    let rounded = {
        let at_least = size.max(MIN_SIZE);
        if at_least % 2 == 0 { at_least + 1 } else { at_least }
    };
    if rounded != size {
        log::debug!("maze size {} rounded up to {}", size, rounded);
    }
    Ok(rounded)
}

/// An immutable generated maze plus the seed that produced it.
///
/// Invariants: the grid is square, the border is entirely [`Cell::Wall`],
/// the start cell `(1, 1)` is open, and exactly one cell carries the
/// [`Cell::Exit`] tag. Grids built by [`generate`] additionally guarantee
/// that the exit is reachable from the start by orthogonal steps.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MazeLayout {
    cells: Array2<Cell>,
    exit: Coord2,
    seed: u64,
}

impl MazeLayout {
    pub fn from_cells(cells: Array2<Cell>, seed: u64) -> Result<Self> {
        let (dim_x, dim_y) = cells.dim();
        if dim_x != dim_y || dim_x < 5 || dim_x > MAX_SIZE as usize {
            return Err(GameError::InvalidGrid);
        }
        let size = dim_x as Coord;

        for i in 0..size {
            let on_border = [(i, 0), (i, size - 1), (0, i), (size - 1, i)];
            if on_border.iter().any(|&c| cells[c.to_nd_index()] != Cell::Wall) {
                return Err(GameError::InvalidGrid);
            }
        }

        if !cells[START.to_nd_index()].is_open() {
            return Err(GameError::InvalidGrid);
        }

        let mut exits = cells
            .indexed_iter()
            .filter(|&(_, &cell)| cell == Cell::Exit)
            .map(|((x, y), _)| (x as Coord, y as Coord));
        let exit = exits.next().ok_or(GameError::InvalidGrid)?;
        if exits.next().is_some() || exit == START {
            return Err(GameError::InvalidGrid);
        }

        Ok(Self { cells, exit, seed })
    }

    pub fn size(&self) -> Coord {
        let dim = self.cells.dim();
        dim.0.try_into().unwrap()
    }

    /// Start cell, always `(1, 1)`.
    pub const fn start(&self) -> Coord2 {
        START
    }

    pub const fn exit(&self) -> Coord2 {
        self.exit
    }

    /// Seed the maze was generated from; sharing it reproduces the grid.
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.cells[coords.to_nd_index()]
    }

    pub fn is_open(&self, coords: Coord2) -> bool {
        self.cells[coords.to_nd_index()].is_open()
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size && coords.1 < size {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    /// Breadth-first reachability check of the connectivity invariant.
    pub fn exit_reachable(&self) -> bool {
        flood_reachable(&self.cells)[self.exit.to_nd_index()]
    }

    pub(crate) fn cells(&self) -> &Array2<Cell> {
        &self.cells
    }
}

impl Index<Coord2> for MazeLayout {
    type Output = Cell;

    fn index(&self, (x, y): Coord2) -> &Self::Output {
        &self.cells[(x as usize, y as usize)]
    }
}

pub(crate) const START: Coord2 = (1, 1);

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MoveOutcome {
    NoChange,
    Moved,
    Won,
}

impl MoveOutcome {
    pub const fn has_update(self) -> bool {
        use MoveOutcome::*;
        match self {
            NoChange => false,
            Moved => true,
            Won => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_rounds_small_and_even_sizes_up() {
        assert_eq!(GameConfig::new(9, Algorithm::Division).unwrap().size, 11);
        assert_eq!(GameConfig::new(10, Algorithm::Division).unwrap().size, 11);
        assert_eq!(GameConfig::new(20, Algorithm::Division).unwrap().size, 21);
        assert_eq!(GameConfig::new(33, Algorithm::Division).unwrap().size, 33);
        assert_eq!(GameConfig::new(101, Algorithm::Division).unwrap().size, 101);
    }

    #[test]
    fn config_rejects_oversized_grids() {
        assert_eq!(
            GameConfig::new(102, Algorithm::Division),
            Err(GameError::SizeOutOfRange(102))
        );
        assert_eq!(
            GameConfig::new(255, Algorithm::Wilson),
            Err(GameError::SizeOutOfRange(255))
        );
    }

    #[test]
    fn from_cells_rejects_broken_borders() {
        let mut cells = Array2::from_elem([7, 7], Cell::Wall);
        cells[[1, 1]] = Cell::Passage;
        cells[[5, 5]] = Cell::Exit;
        cells[[0, 3]] = Cell::Passage;

        assert_eq!(
            MazeLayout::from_cells(cells, 0),
            Err(GameError::InvalidGrid)
        );
    }

    #[test]
    fn from_cells_requires_exactly_one_exit() {
        let mut cells = Array2::from_elem([7, 7], Cell::Wall);
        cells[[1, 1]] = Cell::Passage;
        assert_eq!(
            MazeLayout::from_cells(cells.clone(), 0),
            Err(GameError::InvalidGrid)
        );

        cells[[5, 5]] = Cell::Exit;
        cells[[3, 3]] = Cell::Exit;
        assert_eq!(
            MazeLayout::from_cells(cells, 0),
            Err(GameError::InvalidGrid)
        );
    }

    #[test]
    fn from_cells_locates_the_exit() {
        let mut cells = Array2::from_elem([7, 7], Cell::Wall);
        cells[[1, 1]] = Cell::Passage;
        cells[[2, 1]] = Cell::Passage;
        cells[[3, 1]] = Cell::Exit;

        let layout = MazeLayout::from_cells(cells, 42).unwrap();

        assert_eq!(layout.exit(), (3, 1));
        assert_eq!(layout.seed(), 42);
        assert!(layout.exit_reachable());
    }
}
