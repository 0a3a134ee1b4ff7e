use super::*;

/// Maximum decoy branch length, in rooms.
const BRANCH_DEPTH: usize = 5;

/// One guaranteed solution path plus misleading dead ends.
///
/// A randomized depth-first search fixes a single room path from start to
/// exit and carves it. Short branches then grow from rooms along that path;
/// a branch step is only taken into a room whose other neighbors are all
/// still walls, so no branch ever reconnects and the carved path stays the
/// only solution.
pub struct DecoyCarver;

impl MazeCarver for DecoyCarver {
    fn carve(&self, size: Coord, rng: &mut SmallRng) -> Array2<Cell> {
        let mut cells = walled_grid(size);

        let main_path = self.find_main_path(size, rng);
        for pair in main_path.windows(2) {
            cells[pair[0].to_nd_index()] = Cell::Passage;
            cells[wall_between(pair[0], pair[1]).to_nd_index()] = Cell::Passage;
        }
        if let Some(&last) = main_path.last() {
            cells[last.to_nd_index()] = Cell::Passage;
        }

        for &room in &main_path {
            self.grow_branch(&mut cells, room, size, rng);
        }

        cells
    }
}

impl DecoyCarver {
    /// Randomized DFS over the room lattice; the returned stack is the
    /// room path from start to exit.
    fn find_main_path(&self, size: Coord, rng: &mut SmallRng) -> Vec<Coord2> {
        let mut visited = Array2::from_elem([size as usize; 2], false);
        visited[START.to_nd_index()] = true;

        let mut stack = vec![START];
        while let Some(&current) = stack.last() {
            if current == exit_corner(size) {
                break;
            }

            let unvisited: Vec<Coord2> = room_neighbors(current, size)
                .filter(|&room| !visited[room.to_nd_index()])
                .collect();
            match unvisited.choose(rng) {
                Some(&room) => {
                    visited[room.to_nd_index()] = true;
                    stack.push(room);
                }
                None => {
                    stack.pop();
                }
            }
        }

        stack
    }

    fn grow_branch(
        &self,
        cells: &mut Array2<Cell>,
        from: Coord2,
        size: Coord,
        rng: &mut SmallRng,
    ) {
        let depth = rng.random_range(1..=BRANCH_DEPTH);
        let mut current = from;

        for _ in 0..depth {
            let candidates: Vec<Coord2> = room_neighbors(current, size)
                .filter(|&room| dead_end_step(cells, room, current, size))
                .collect();
            let Some(&next) = candidates.choose(rng) else {
                break;
            };

            cells[wall_between(current, next).to_nd_index()] = Cell::Passage;
            cells[next.to_nd_index()] = Cell::Passage;
            current = next;
        }
    }
}

/// A branch may only enter a wall room whose other neighbors are all still
/// walls; that keeps every decoy a dead end.
fn dead_end_step(cells: &Array2<Cell>, room: Coord2, from: Coord2, size: Coord) -> bool {
    cells[room.to_nd_index()] == Cell::Wall
        && room_neighbors(room, size)
            .all(|next| next == from || !cells[next.to_nd_index()].is_open())
}
