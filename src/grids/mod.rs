pub mod block_grid;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    pub rows: usize,
    pub columns: usize,
}

/// The four ways out of a junction. Discriminants follow the order the
/// generator draws them in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Right = 0,
    Down = 1,
    Left = 2,
    Up = 3,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::Up,
    ];
}

impl From<usize> for Direction {
    fn from(dir: usize) -> Self {
        Direction::ALL[dir % 4]
    }
}

/// Directions not yet attempted from a junction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionSet {
    untried: [bool; 4],
}

impl DirectionSet {
    pub fn full() -> Self {
        Self { untried: [true; 4] }
    }

    pub fn empty() -> Self {
        Self { untried: [false; 4] }
    }

    pub fn contains(&self, dir: Direction) -> bool {
        self.untried[dir as usize]
    }

    /// returns true if `dir` was still present
    pub fn remove(&mut self, dir: Direction) -> bool {
        std::mem::replace(&mut self.untried[dir as usize], false)
    }

    pub fn is_empty(&self) -> bool {
        !self.untried.contains(&true)
    }
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub enum CellKind {
    Empty,
    Wall,
}

impl From<CellKind> for char {
    fn from(kind: CellKind) -> Self {
        match kind {
            CellKind::Empty => ' ',
            CellKind::Wall => '#',
        }
    }
}
