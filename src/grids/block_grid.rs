use std::fmt::{Display, Formatter};

use crate::error::MazeError;
use crate::grids::{CellKind, Dimensions, Direction, DirectionSet};

pub struct Cell {
    pub x: usize,
    pub y: usize,
    pub kind: CellKind,
    /// index of the junction this one was first reached from, the root points at itself
    pub parent: Option<usize>,
    pub unexplored: DirectionSet,
}

impl Cell {
    fn new(x: usize, y: usize) -> Self {
        if is_junction(x, y) {
            Self {
                x,
                y,
                kind: CellKind::Empty,
                parent: None,
                unexplored: DirectionSet::full(),
            }
        } else {
            Self {
                x,
                y,
                kind: CellKind::Wall,
                parent: None,
                unexplored: DirectionSet::empty(),
            }
        }
    }
}

/// Junctions sit where both coordinates are odd; every other position is a
/// wall, some of which get carved into passages.
#[inline(always)]
pub fn is_junction(x: usize, y: usize) -> bool {
    x % 2 == 1 && y % 2 == 1
}

pub struct BlockGrid {
    pub dims: Dimensions,

    pub cells: Vec<Cell>,
}

impl BlockGrid {
    pub fn with_dims(width: usize, height: usize) -> Result<Self, MazeError> {
        let alloc_err = MazeError::Allocation { width, height };
        let len = width.checked_mul(height).ok_or_else(|| alloc_err.clone())?;

        let mut cells = Vec::new();
        cells.try_reserve_exact(len).map_err(|_| alloc_err)?;
        for y in 0..height {
            for x in 0..width {
                cells.push(Cell::new(x, y));
            }
        }

        Ok(Self {
            dims: Dimensions {
                rows: height,
                columns: width,
            },
            cells,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.dims.columns
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.dims.rows
    }

    #[inline]
    pub fn index_of(&self, x: usize, y: usize) -> usize {
        x + y * self.dims.columns
    }

    #[inline]
    pub fn get_cell(&self, x: usize, y: usize) -> &Cell {
        &self.cells[self.index_of(x, y)]
    }

    /// The junction two steps from `index` in `direction`.
    pub fn neighbor_in_direction(
        &self,
        index: usize,
        direction: Direction,
    ) -> Result<(usize, usize), MazeError> {
        let Cell { x, y, .. } = self.cells[index];

        let neighbor = match direction {
            Direction::Right if x + 2 < self.width() => Some((x + 2, y)),
            Direction::Down if y + 2 < self.height() => Some((x, y + 2)),
            Direction::Left if x >= 2 => Some((x - 2, y)),
            Direction::Up if y >= 2 => Some((x, y - 2)),
            _ => None,
        };

        neighbor.ok_or(MazeError::OutOfBounds { x, y, direction })
    }

    /// Whether a junction may be linked into the tree. Every junction starts
    /// open, so this only rejects something if a grid is built differently.
    #[inline]
    pub fn is_open(&self, index: usize) -> bool {
        self.cells[index].kind != CellKind::Wall
    }

    #[inline]
    pub fn has_parent(&self, index: usize) -> bool {
        self.cells[index].parent.is_some()
    }

    #[inline]
    pub fn claim(&mut self, child: usize, parent: usize) {
        self.cells[child].parent = Some(parent);
    }

    /// Opens the wall cell halfway between two junctions two steps apart.
    pub fn carve_between(&mut self, a: usize, b: usize) {
        let (ax, ay) = (self.cells[a].x, self.cells[a].y);
        let (bx, by) = (self.cells[b].x, self.cells[b].y);
        debug_assert!(ax.max(bx) - ax.min(bx) + ay.max(by) - ay.min(by) == 2);

        let mid = self.index_of((ax + bx) / 2, (ay + by) / 2);
        self.cells[mid].kind = CellKind::Empty;
    }

    pub fn render(&self) -> Vec<String> {
        self.cells
            .chunks(self.dims.columns.max(1))
            .take(self.dims.rows)
            .map(|row| row.iter().map(|cell| char::from(cell.kind)).collect())
            .collect()
    }

    pub fn junction_count(&self) -> usize {
        self.cells.iter().filter(|c| is_junction(c.x, c.y)).count()
    }

    /// Carved wall cells, i.e. edges of the spanning tree.
    pub fn passage_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| c.kind == CellKind::Empty && !is_junction(c.x, c.y))
            .count()
    }
}

impl Display for BlockGrid {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for row in self.render() {
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}
