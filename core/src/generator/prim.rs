use super::*;

/// Frontier growth in Prim's style.
///
/// A single region grows from the start room. The frontier holds wall rooms
/// adjacent to the region; each step pulls a random frontier room, joins it
/// to exactly one already-carved neighbor (which is what keeps the maze free
/// of loops), and re-seeds the frontier from the newly carved room.
pub struct PrimCarver;

impl MazeCarver for PrimCarver {
    fn carve(&self, size: Coord, rng: &mut SmallRng) -> Array2<Cell> {
        let mut cells = walled_grid(size);
        let mut in_frontier = Array2::from_elem(cells.dim(), false);

        cells[START.to_nd_index()] = Cell::Passage;
        let mut frontier: Vec<Coord2> = Vec::new();
        for room in room_neighbors(START, size) {
            in_frontier[room.to_nd_index()] = true;
            frontier.push(room);
        }

        while !frontier.is_empty() {
            let room = frontier.swap_remove(rng.random_range(0..frontier.len()));

            let carved: Vec<Coord2> = room_neighbors(room, size)
                .filter(|&next| cells[next.to_nd_index()].is_open())
                .collect();
            let Some(&link) = carved.choose(rng) else {
                continue;
            };

            cells[wall_between(room, link).to_nd_index()] = Cell::Passage;
            cells[room.to_nd_index()] = Cell::Passage;

            for next in room_neighbors(room, size) {
                if cells[next.to_nd_index()] == Cell::Wall && !in_frontier[next.to_nd_index()] {
                    in_frontier[next.to_nd_index()] = true;
                    frontier.push(next);
                }
            }
        }

        cells
    }
}
