use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::grid::{Grid, Pos};
use crate::path::reachable;

pub const START: Pos = Pos { x: 1, y: 1 };

/// Generates a maze on a `size` x `size` grid.
///
/// Passages are carved by recursive backtracking over the odd-coordinate
/// rooms starting at (1,1), then `size * difficulty / 10` random interior
/// cells are opened as shortcuts. Start is pinned at (1,1) and the goal at
/// (size-2, size-2), or at the nearest open cell before it when that corner
/// is still a wall. If the chosen goal cannot be reached from the start it
/// is moved to the nearest cell that can.
pub fn generate_maze(rng: &mut impl Rng, size: usize, difficulty: u32) -> Grid {
    assert!(size >= 4, "maze size {size} too small");
    assert!(difficulty >= 1, "difficulty must be at least 1");

    let mut grid = Grid::new(size);
    carve_passages(&mut grid, START, rng);
    open_shortcuts(&mut grid, shortcut_count(size, difficulty), rng);

    let goal = place_start_and_goal(&mut grid);

    debug!(
        size,
        difficulty,
        open = grid.open_cells(),
        goal = ?goal,
        "maze generated"
    );
    grid
}

/// Pins the start at (1,1) and the goal on a carved cell reachable from it.
fn place_start_and_goal(grid: &mut Grid) -> Pos {
    let size = grid.size();
    grid.set_start(START);
    let corner = Pos::new(size - 2, size - 2);
    let mut goal = if grid.cell(corner).wall {
        nearest_open(grid, |_| true).unwrap_or(START)
    } else {
        corner
    };
    grid.set_goal(goal);

    let reach = reachable(grid, START);
    if !reach[goal.y][goal.x] {
        let repaired = nearest_open(grid, |p| reach[p.y][p.x]).unwrap_or(START);
        debug!(from = ?goal, to = ?repaired, "goal unreachable, moved");
        grid.clear_goal(goal);
        goal = repaired;
        grid.set_goal(goal);
    }
    goal
}

pub fn shortcut_count(size: usize, difficulty: u32) -> usize {
    size * difficulty as usize / 10
}

fn carve_passages(grid: &mut Grid, start: Pos, rng: &mut impl Rng) {
    grid.carve(start);
    let first = unvisited_rooms(grid, start, rng);
    let mut stack = vec![(start, first)];

    loop {
        let (room, next) = match stack.last_mut() {
            Some((room, pending)) => (*room, pending.pop()),
            None => break,
        };
        let Some(next) = next else {
            stack.pop();
            continue;
        };
        // Rooms queued earlier may have been reached through another branch.
        if !grid.cell(next).wall {
            continue;
        }
        grid.carve(Pos::new((room.x + next.x) / 2, (room.y + next.y) / 2));
        grid.carve(next);
        let pending = unvisited_rooms(grid, next, rng);
        stack.push((next, pending));
    }
}

/// Rooms two steps away that are still walls, in uniformly random order.
fn unvisited_rooms(grid: &Grid, room: Pos, rng: &mut impl Rng) -> Vec<Pos> {
    let mut rooms = Vec::with_capacity(4);
    for (dx, dy) in [(0isize, -2isize), (2, 0), (0, 2), (-2, 0)] {
        let (Some(nx), Some(ny)) = (
            room.x.checked_add_signed(dx),
            room.y.checked_add_signed(dy),
        ) else {
            continue;
        };
        let next = Pos::new(nx, ny);
        if grid.in_bounds(next) && grid.cell(next).wall {
            rooms.push(next);
        }
    }
    rooms.shuffle(rng);
    rooms
}

fn open_shortcuts(grid: &mut Grid, count: usize, rng: &mut impl Rng) {
    let size = grid.size();
    for _ in 0..count {
        let x = rng.gen_range(1..size - 1);
        let y = rng.gen_range(1..size - 1);
        grid.carve(Pos::new(x, y));
    }
}

/// Scans rows then columns backward from (size-2, size-2) for the first
/// carved cell other than the start that satisfies `accept`.
fn nearest_open(grid: &Grid, accept: impl Fn(Pos) -> bool) -> Option<Pos> {
    let size = grid.size();
    for y in (1..=size - 2).rev() {
        for x in (1..=size - 2).rev() {
            let pos = Pos::new(x, y);
            if pos != START && grid.cell(pos).path && accept(pos) {
                return Some(pos);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::find_shortest_path;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn count_flags(grid: &Grid) -> (usize, usize) {
        let starts = grid.positions().filter(|p| grid.cell(*p).start).count();
        let goals = grid.positions().filter(|p| grid.cell(*p).goal).count();
        (starts, goals)
    }

    #[test]
    fn shortcut_count_scales_with_size_and_difficulty() {
        assert_eq!(shortcut_count(6, 1), 0);
        assert_eq!(shortcut_count(6, 2), 1);
        assert_eq!(shortcut_count(10, 1), 1);
        assert_eq!(shortcut_count(12, 4), 4);
    }

    #[test]
    fn every_level_has_one_start_and_one_reachable_goal() {
        let mut rng = StdRng::seed_from_u64(7);
        for size in [6, 8, 10, 12] {
            for difficulty in 1..=4 {
                for _ in 0..25 {
                    let grid = generate_maze(&mut rng, size, difficulty);
                    assert_eq!(count_flags(&grid), (1, 1));
                    let start = grid.start().unwrap();
                    let goal = grid.goal().unwrap();
                    assert_eq!(start, START);
                    assert!(!grid.cell(start).wall);
                    assert!(!grid.cell(goal).wall);
                    assert_ne!(start, goal);
                    assert!(!find_shortest_path(&grid, start, goal).is_empty());
                }
            }
        }
    }

    #[test]
    fn small_maze_sanity_bound() {
        let mut rng = StdRng::seed_from_u64(42);
        let size = 6;
        let grid = generate_maze(&mut rng, size, 1);
        assert!(grid.is_open(Pos::new(1, 1)));
        assert!(grid.open_cells() > 2 * (size / 2 - 1));
    }

    #[test]
    fn cells_are_never_wall_and_path() {
        let mut rng = StdRng::seed_from_u64(3);
        let grid = generate_maze(&mut rng, 12, 4);
        for p in grid.positions() {
            let c = grid.cell(p);
            assert_ne!(c.wall, c.path, "{p:?}");
            assert!(!c.visited);
        }
    }

    #[test]
    fn backtracking_reaches_every_room() {
        let mut rng = StdRng::seed_from_u64(11);
        let size = 10;
        let mut grid = Grid::new(size);
        carve_passages(&mut grid, START, &mut rng);
        for y in (1..size).step_by(2) {
            for x in (1..size).step_by(2) {
                assert!(grid.is_open(Pos::new(x, y)), "room ({x},{y}) not carved");
            }
        }
        // A spanning tree over r rooms carves r rooms plus r-1 connectors.
        let rooms = (size / 2) * (size / 2);
        assert_eq!(grid.open_cells(), 2 * rooms - 1);
    }

    #[test]
    fn same_seed_same_maze() {
        let a = generate_maze(&mut StdRng::seed_from_u64(99), 10, 3);
        let b = generate_maze(&mut StdRng::seed_from_u64(99), 10, 3);
        assert_eq!(a, b);
    }

    #[test]
    fn unreachable_goal_is_moved() {
        // Corner (4,4) is open but sealed off from the start.
        let mut grid = Grid::from_rows(&[
            "######", //
            "#...##", //
            "#.####", //
            "#.####", //
            "####.#", //
            "######",
        ]);
        let goal = place_start_and_goal(&mut grid);
        assert_eq!(goal, Pos::new(1, 3));
        assert_eq!(count_flags(&grid), (1, 1));
        assert_eq!(grid.goal(), Some(goal));
        assert!(!grid.cell(Pos::new(4, 4)).goal);
        assert!(!find_shortest_path(&grid, START, goal).is_empty());
    }

    #[test]
    fn reachable_corner_stays_goal() {
        let mut grid = Grid::from_rows(&[
            "######", //
            "#....#", //
            "####.#", //
            "####.#", //
            "####.#", //
            "######",
        ]);
        let goal = place_start_and_goal(&mut grid);
        assert_eq!(goal, Pos::new(4, 4));
        assert_eq!(count_flags(&grid), (1, 1));
    }

    #[test]
    #[should_panic]
    fn tiny_size_panics() {
        generate_maze(&mut StdRng::seed_from_u64(0), 2, 1);
    }

    proptest! {
        #[test]
        fn generated_mazes_are_solvable(
            seed in any::<u64>(),
            size in prop::sample::select(vec![6usize, 8, 10, 12]),
            difficulty in 1u32..=4,
        ) {
            let grid = generate_maze(&mut StdRng::seed_from_u64(seed), size, difficulty);
            prop_assert_eq!(count_flags(&grid), (1, 1));
            let start = grid.start().unwrap();
            let goal = grid.goal().unwrap();
            let path = find_shortest_path(&grid, start, goal);
            prop_assert!(path.len() >= 2);
            prop_assert!(path.iter().all(|p| grid.is_open(*p)));
            for p in grid.positions() {
                let c = grid.cell(p);
                prop_assert_ne!(c.wall, c.path);
            }
        }
    }
}
