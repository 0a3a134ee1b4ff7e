use std::collections::HashMap;

use super::*;

/// Wilson's algorithm: loop-erased random walks.
///
/// The exit room seeds the visited set. Each round starts a random walk from
/// an unvisited room; whenever the walk revisits one of its own rooms the
/// recorded path is truncated back to that point, and once the walk touches
/// the visited set the loop-erased path is carved and marked visited. The
/// resulting maze is uniformly distributed over all spanning trees of the
/// room lattice.
pub struct WilsonCarver;

impl MazeCarver for WilsonCarver {
    fn carve(&self, size: Coord, rng: &mut SmallRng) -> Array2<Cell> {
        let mut cells = walled_grid(size);

        cells[exit_corner(size).to_nd_index()] = Cell::Passage;
        let mut unvisited: Vec<Coord2> = rooms(size)
            .filter(|&room| room != exit_corner(size))
            .collect();

        while !unvisited.is_empty() {
            let walk_start = unvisited[rng.random_range(0..unvisited.len())];
            let joined = self.loop_erased_walk(&mut cells, walk_start, size, rng);
            log::trace!("walk from {:?} joined the tree at {:?}", walk_start, joined);

            unvisited.retain(|&room| !cells[room.to_nd_index()].is_open());
        }

        cells
    }
}

impl WilsonCarver {
    /// Walks from `walk_start` until the carved tree is hit, erasing loops
    /// on the way, then carves the surviving path. Returns the tree room the
    /// walk attached to.
    fn loop_erased_walk(
        &self,
        cells: &mut Array2<Cell>,
        walk_start: Coord2,
        size: Coord,
        rng: &mut SmallRng,
    ) -> Coord2 {
        let mut path = vec![walk_start];
        let mut index_of = HashMap::from([(walk_start, 0usize)]);

        loop {
            let current = *path.last().expect("walk path never drains fully");
            let candidates: Vec<Coord2> = room_neighbors(current, size).collect();
            let next = *candidates.choose(rng).expect("rooms have neighbors");

            if cells[next.to_nd_index()].is_open() {
                for pair in path.windows(2) {
                    cells[pair[0].to_nd_index()] = Cell::Passage;
                    cells[wall_between(pair[0], pair[1]).to_nd_index()] = Cell::Passage;
                }
                let last = *path.last().expect("walk path never drains fully");
                cells[last.to_nd_index()] = Cell::Passage;
                cells[wall_between(last, next).to_nd_index()] = Cell::Passage;
                return next;
            }

            if let Some(&revisit) = index_of.get(&next) {
                for dropped in path.drain(revisit + 1..) {
                    index_of.remove(&dropped);
                }
            } else {
                index_of.insert(next, path.len());
                path.push(next);
            }
        }
    }
}
