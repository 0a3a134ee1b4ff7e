use super::*;

/// Randomized depth-first backtracker over the odd-coordinate room lattice.
///
/// From the start room, keep visiting a random uncarved neighbor room two
/// cells away, opening the wall cell in between; back up when a room has no
/// uncarved neighbors left. Carves a perfect maze. The walk uses an explicit
/// stack so large grids cannot exhaust the call stack.
pub struct BacktrackerCarver;

impl MazeCarver for BacktrackerCarver {
    fn carve(&self, size: Coord, rng: &mut SmallRng) -> Array2<Cell> {
        let mut cells = walled_grid(size);

        cells[START.to_nd_index()] = Cell::Passage;
        let mut stack = vec![START];
        while let Some(&current) = stack.last() {
            let uncarved: Vec<Coord2> = room_neighbors(current, size)
                .filter(|&room| cells[room.to_nd_index()] == Cell::Wall)
                .collect();

            match uncarved.choose(rng) {
                Some(&room) => {
                    cells[wall_between(current, room).to_nd_index()] = Cell::Passage;
                    cells[room.to_nd_index()] = Cell::Passage;
                    stack.push(room);
                }
                None => {
                    stack.pop();
                }
            }
        }

        cells
    }
}
