use super::*;

/// Recursive division: start from an open field and repeatedly split it with
/// a full-length wall, leaving one gap per wall.
///
/// Walls land on even coordinates and gaps on odd ones, which keeps the room
/// lattice aligned with the carving strategies that advance two cells at a
/// time. Regions are processed from an explicit stack so grid size never
/// translates into call depth.
pub struct DivisionCarver;

impl MazeCarver for DivisionCarver {
    fn carve(&self, size: Coord, rng: &mut SmallRng) -> Array2<Cell> {
        let mut cells = open_field(size);

        // regions span odd coordinates inclusively
        let mut regions = vec![(1, 1, size - 2, size - 2)];
        while let Some((x0, y0, x1, y1)) = regions.pop() {
            let width = x1 - x0 + 1;
            let height = y1 - y0 + 1;
            if width < 3 || height < 3 {
                continue;
            }

            // split the longer axis
            let horizontal = if height != width {
                height > width
            } else {
                rng.random()
            };

            if horizontal {
                let wall_y = even_pick(rng, y0 + 1, y1 - 1);
                let gap_x = odd_pick(rng, x0, x1);
                for x in x0..=x1 {
                    if x != gap_x {
                        cells[(x, wall_y).to_nd_index()] = Cell::Wall;
                    }
                }
                regions.push((x0, y0, x1, wall_y - 1));
                regions.push((x0, wall_y + 1, x1, y1));
            } else {
                let wall_x = even_pick(rng, x0 + 1, x1 - 1);
                let gap_y = odd_pick(rng, y0, y1);
                for y in y0..=y1 {
                    if y != gap_y {
                        cells[(wall_x, y).to_nd_index()] = Cell::Wall;
                    }
                }
                regions.push((x0, y0, wall_x - 1, y1));
                regions.push((wall_x + 1, y0, x1, y1));
            }
        }

        cells
    }
}

/// Uniform pick among the even coordinates in `lo..=hi`; `lo` must be even.
fn even_pick(rng: &mut SmallRng, lo: Coord, hi: Coord) -> Coord {
    debug_assert!(lo % 2 == 0 && lo <= hi);
    lo + 2 * rng.random_range(0..(hi - lo) / 2 + 1)
}

/// Uniform pick among the odd coordinates in `lo..=hi`; `lo` must be odd.
fn odd_pick(rng: &mut SmallRng, lo: Coord, hi: Coord) -> Coord {
    debug_assert!(lo % 2 == 1 && lo <= hi);
    lo + 2 * rng.random_range(0..(hi - lo) / 2 + 1)
}
