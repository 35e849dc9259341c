use std::collections::VecDeque;

use crate::grid::{Dir, Grid, Pos};

/// Number of leading steps of the shortest path shown as a hint.
pub const HINT_TRAIL_LEN: usize = 5;

/// Shortest orthogonal path from `from` to `to`, both ends included.
///
/// Neighbors are expanded in `Dir::ALL` order, so among equally short paths
/// the same one is returned every time. Returns an empty path when the grid
/// is empty or `to` cannot be reached. Out-of-bounds endpoints and a walled
/// `from` are caller bugs and panic.
pub fn find_shortest_path(grid: &Grid, from: Pos, to: Pos) -> Vec<Pos> {
    if grid.is_empty() {
        return Vec::new();
    }
    assert!(grid.in_bounds(from), "path source {from:?} outside grid");
    assert!(grid.in_bounds(to), "path target {to:?} outside grid");
    assert!(!grid.cell(from).wall, "path source {from:?} is a wall");

    let size = grid.size();
    let mut prev: Vec<Vec<Option<Pos>>> = vec![vec![None; size]; size];
    let mut seen = vec![vec![false; size]; size];
    let mut q = VecDeque::new();
    seen[from.y][from.x] = true;
    q.push_back(from);

    while let Some(pos) = q.pop_front() {
        if pos == to {
            return walk_back(&prev, from, to);
        }
        for dir in Dir::ALL {
            let Some(next) = grid.neighbor(pos, dir) else {
                continue;
            };
            if seen[next.y][next.x] || grid.cell(next).wall {
                continue;
            }
            seen[next.y][next.x] = true;
            prev[next.y][next.x] = Some(pos);
            q.push_back(next);
        }
    }
    Vec::new()
}

fn walk_back(prev: &[Vec<Option<Pos>>], from: Pos, to: Pos) -> Vec<Pos> {
    let mut path = vec![to];
    let mut cur = to;
    while cur != from {
        match prev[cur.y][cur.x] {
            Some(p) => {
                path.push(p);
                cur = p;
            }
            None => break,
        }
    }
    path.reverse();
    path
}

/// Cells reachable from `start` through open cells.
pub fn reachable(grid: &Grid, start: Pos) -> Vec<Vec<bool>> {
    let size = grid.size();
    let mut seen = vec![vec![false; size]; size];
    if !grid.is_open(start) {
        return seen;
    }
    let mut q = VecDeque::new();
    seen[start.y][start.x] = true;
    q.push_back(start);
    while let Some(pos) = q.pop_front() {
        for dir in Dir::ALL {
            if let Some(next) = grid.neighbor(pos, dir) {
                if !seen[next.y][next.x] && !grid.cell(next).wall {
                    seen[next.y][next.x] = true;
                    q.push_back(next);
                }
            }
        }
    }
    seen
}

pub fn hint_trail(path: &[Pos]) -> &[Pos] {
    &path[..path.len().min(HINT_TRAIL_LEN)]
}
