#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}

impl Pos {
    pub const fn new(x: usize, y: usize) -> Self {
        Pos { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dir {
    Up,
    Right,
    Down,
    Left,
}

impl Dir {
    /// Neighbor enumeration order. Pathfinding depends on it being fixed.
    pub const ALL: [Dir; 4] = [Dir::Up, Dir::Right, Dir::Down, Dir::Left];

    pub fn delta(self) -> (isize, isize) {
        match self {
            Dir::Up => (0, -1),
            Dir::Right => (1, 0),
            Dir::Down => (0, 1),
            Dir::Left => (-1, 0),
        }
    }
}

/// One square of the maze. A fresh cell is an uncarved wall.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub wall: bool,
    pub path: bool,
    pub start: bool,
    pub goal: bool,
    pub visited: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Cell {
            wall: true,
            path: false,
            start: false,
            goal: false,
            visited: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<Vec<Cell>>,
}

impl Grid {
    pub fn new(size: usize) -> Self {
        Grid {
            size,
            cells: vec![vec![Cell::default(); size]; size],
        }
    }

    /// Grid with every cell carved; handy for tests and hand-built layouts.
    pub fn open(size: usize) -> Self {
        let mut grid = Grid::new(size);
        for y in 0..size {
            for x in 0..size {
                grid.carve(Pos { x, y });
            }
        }
        grid
    }

    /// Builds a grid from rows of `#` (wall) and anything else (path).
    /// Rows must all have the same length as the number of rows.
    pub fn from_rows(rows: &[&str]) -> Self {
        let size = rows.len();
        let mut grid = Grid::new(size);
        for (y, row) in rows.iter().enumerate() {
            assert_eq!(row.chars().count(), size, "row {y} is not {size} wide");
            for (x, ch) in row.chars().enumerate() {
                if ch != '#' {
                    grid.carve(Pos { x, y });
                }
            }
        }
        grid
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x < self.size && pos.y < self.size
    }

    pub fn cell(&self, pos: Pos) -> &Cell {
        &self.cells[pos.y][pos.x]
    }

    fn cell_mut(&mut self, pos: Pos) -> &mut Cell {
        &mut self.cells[pos.y][pos.x]
    }

    pub fn is_open(&self, pos: Pos) -> bool {
        self.in_bounds(pos) && !self.cell(pos).wall
    }

    pub fn carve(&mut self, pos: Pos) {
        let cell = self.cell_mut(pos);
        cell.wall = false;
        cell.path = true;
    }

    pub fn set_start(&mut self, pos: Pos) {
        self.carve(pos);
        self.cell_mut(pos).start = true;
    }

    pub fn set_goal(&mut self, pos: Pos) {
        self.carve(pos);
        self.cell_mut(pos).goal = true;
    }

    pub fn clear_goal(&mut self, pos: Pos) {
        self.cell_mut(pos).goal = false;
    }

    pub fn mark_visited(&mut self, pos: Pos) {
        self.cell_mut(pos).visited = true;
    }

    /// One step in `dir`, or `None` when that leaves the grid.
    pub fn neighbor(&self, pos: Pos, dir: Dir) -> Option<Pos> {
        let (dx, dy) = dir.delta();
        let nx = pos.x.checked_add_signed(dx)?;
        let ny = pos.y.checked_add_signed(dy)?;
        let next = Pos { x: nx, y: ny };
        self.in_bounds(next).then_some(next)
    }

    pub fn start(&self) -> Option<Pos> {
        self.find(|c| c.start)
    }

    pub fn goal(&self) -> Option<Pos> {
        self.find(|c| c.goal)
    }

    fn find(&self, pred: impl Fn(&Cell) -> bool) -> Option<Pos> {
        self.positions().find(|p| pred(self.cell(*p)))
    }

    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.size).flat_map(move |y| (0..self.size).map(move |x| Pos { x, y }))
    }

    pub fn open_cells(&self) -> usize {
        self.positions().filter(|p| !self.cell(*p).wall).count()
    }
}
