use crate::generators::{DirectionSource, Generator};
use crate::grids::block_grid::BlockGrid;
use log::{debug, trace, warn};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GenerationState {
    AtRoot,
    Descending,
    Backtracking,
    Done,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GenerationStats {
    pub forward_steps: usize,
    pub backtracks: usize,
    pub draws: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Step {
    Forward(usize),
    Back(Option<usize>),
}

/// Randomized depth-first search. The `parent` link of each claimed junction
/// doubles as the way back, so there is no separate stack.
pub struct Backtracker<'g, D: DirectionSource> {
    grid: &'g mut BlockGrid,
    directions: D,
    start: usize,
    current: usize,
    state: GenerationState,
    stats: GenerationStats,
}

impl<'g, D: DirectionSource> Backtracker<'g, D> {
    /// Roots the tree at the junction (1, 1). A grid too small to have it has
    /// nothing to carve and starts out done.
    pub fn new(grid: &'g mut BlockGrid, directions: D) -> Self {
        let has_root = grid.width() >= 3 && grid.height() >= 3;
        let start = if has_root { grid.index_of(1, 1) } else { 0 };
        let state = if has_root {
            grid.claim(start, start);
            GenerationState::AtRoot
        } else {
            GenerationState::Done
        };

        Self {
            grid,
            directions,
            start,
            current: start,
            state,
            stats: GenerationStats::default(),
        }
    }

    pub fn stats(&self) -> GenerationStats {
        self.stats
    }

    fn advance_or_backtrack(&mut self, current: usize) -> Step {
        while !self.grid.cells[current].unexplored.is_empty() {
            // drawn from all four, repeats are thrown away
            let dir = self.directions.next_direction();
            self.stats.draws += 1;

            if !self.grid.cells[current].unexplored.remove(dir) {
                continue;
            }

            let (x, y) = match self.grid.neighbor_in_direction(current, dir) {
                Ok(coords) => coords,
                Err(_) => continue,
            };

            let dest = self.grid.index_of(x, y);
            if !self.grid.is_open(dest) || self.grid.has_parent(dest) {
                continue;
            }

            self.grid.claim(dest, current);
            self.grid.carve_between(current, dest);
            return Step::Forward(dest);
        }

        Step::Back(self.grid.cells[current].parent)
    }
}

impl<'g, D: DirectionSource> Generator for Backtracker<'g, D> {
    fn step_generation(&mut self) {
        if self.state == GenerationState::Done {
            return;
        }

        match self.advance_or_backtrack(self.current) {
            Step::Forward(next) => {
                trace!("carved {} -> {}", self.current, next);
                self.stats.forward_steps += 1;
                self.current = next;
                self.state = GenerationState::Descending;
            }
            // only the root is its own parent
            Step::Back(Some(parent)) if parent == self.current => {
                self.stats.backtracks += 1;
                self.state = GenerationState::Done;
            }
            Step::Back(Some(parent)) => {
                trace!("backtracked {} -> {}", self.current, parent);
                self.stats.backtracks += 1;
                self.current = parent;
                self.state = if parent == self.start {
                    GenerationState::AtRoot
                } else {
                    GenerationState::Backtracking
                };
            }
            Step::Back(None) => {
                warn!("cell {} was never linked into the maze", self.current);
                self.state = GenerationState::Done;
            }
        }
    }

    fn generate_maze(&mut self) -> &BlockGrid {
        while !self.is_done() {
            self.step_generation();
        }
        debug!(
            "maze done: {} passages, {} backtracks, {} direction draws",
            self.stats.forward_steps, self.stats.backtracks, self.stats.draws
        );

        &*self.grid
    }

    fn is_done(&self) -> bool {
        self.state == GenerationState::Done
    }
}

#[cfg(test)]
mod test_backtracker {
    use super::*;
    use crate::generators::RngDirections;
    use crate::grids::block_grid::is_junction;
    use crate::grids::{CellKind, Direction};
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::VecDeque;

    /// Replays a fixed list of directions forever.
    struct Scripted {
        script: Vec<Direction>,
        next: usize,
    }

    impl Scripted {
        fn new(script: &[Direction]) -> Self {
            Self {
                script: script.to_vec(),
                next: 0,
            }
        }
    }

    impl DirectionSource for Scripted {
        fn next_direction(&mut self) -> Direction {
            let dir = self.script[self.next % self.script.len()];
            self.next += 1;
            dir
        }
    }

    const CYCLE: [Direction; 4] = [
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::Up,
    ];

    fn seeded(width: usize, height: usize, seed: u64) -> BlockGrid {
        let mut grid = BlockGrid::with_dims(width, height).unwrap();
        Backtracker::new(&mut grid, RngDirections(StdRng::seed_from_u64(seed))).generate_maze();
        grid
    }

    fn assert_perfect(grid: &BlockGrid) {
        let junctions = grid.junction_count();
        if junctions == 0 {
            assert_eq!(grid.passage_count(), 0);
            return;
        }

        assert_eq!(grid.passage_count(), junctions - 1);

        let root = grid.index_of(1, 1);
        assert_eq!(grid.cells[root].parent, Some(root));
        for (index, cell) in grid.cells.iter().enumerate() {
            let on_border = cell.x == 0
                || cell.y == 0
                || cell.x == grid.width() - 1
                || cell.y == grid.height() - 1;
            if on_border {
                assert_eq!(cell.kind, CellKind::Wall);
            }
            if !is_junction(cell.x, cell.y) || index == root {
                continue;
            }

            let parent = &grid.cells[cell.parent.expect("unreached junction")];
            let (mx, my) = ((cell.x + parent.x) / 2, (cell.y + parent.y) / 2);
            assert_eq!(
                cell.x.max(parent.x) - cell.x.min(parent.x) + cell.y.max(parent.y)
                    - cell.y.min(parent.y),
                2
            );
            assert_eq!(grid.get_cell(mx, my).kind, CellKind::Empty);
        }

        // connected + n - 1 edges = tree
        let mut seen = vec![false; grid.cells.len()];
        let mut queue = VecDeque::from(vec![(1, 1)]);
        seen[root] = true;
        let mut reached = 0;
        while let Some((x, y)) = queue.pop_front() {
            if is_junction(x, y) {
                reached += 1;
            }
            let around = [(x + 1, y), (x, y + 1), (x - 1, y), (x, y - 1)];
            for &(nx, ny) in around.iter() {
                let index = grid.index_of(nx, ny);
                if grid.cells[index].kind == CellKind::Empty && !seen[index] {
                    seen[index] = true;
                    queue.push_back((nx, ny));
                }
            }
        }
        assert_eq!(reached, junctions);
    }

    #[test]
    fn scripted_corridor() {
        let mut grid = BlockGrid::with_dims(5, 3).unwrap();
        let mut gen = Backtracker::new(&mut grid, Scripted::new(&CYCLE));

        assert_eq!(gen.state, GenerationState::AtRoot);
        gen.step_generation();
        assert_eq!(gen.state, GenerationState::Descending);
        gen.step_generation();
        assert_eq!(gen.state, GenerationState::AtRoot);
        gen.step_generation();
        assert!(gen.is_done());

        assert_eq!(grid.render(), vec!["#####", "#   #", "#####"]);
    }

    #[test]
    fn scripted_square_is_reproduced_exactly() {
        let mut grid = BlockGrid::with_dims(5, 5).unwrap();
        let mut gen = Backtracker::new(&mut grid, Scripted::new(&CYCLE));
        gen.generate_maze();

        assert_eq!(
            gen.stats(),
            GenerationStats {
                forward_steps: 3,
                backtracks: 4,
                draws: 16,
            }
        );
        assert_eq!(
            grid.render(),
            vec!["#####", "#   #", "### #", "#   #", "#####"]
        );
        assert_perfect(&grid);
    }

    #[test]
    fn repeated_draws_do_not_use_up_directions() {
        let mut grid = BlockGrid::with_dims(3, 3).unwrap();
        let script = [
            Direction::Right,
            Direction::Right,
            Direction::Down,
            Direction::Down,
            Direction::Left,
            Direction::Up,
        ];
        let mut gen = Backtracker::new(&mut grid, Scripted::new(&script));
        gen.generate_maze();

        assert_eq!(
            gen.stats(),
            GenerationStats {
                forward_steps: 0,
                backtracks: 1,
                draws: 6,
            }
        );
    }

    #[test]
    fn three_by_three_has_one_open_cell() {
        let grid = seeded(3, 3, 7);

        assert_eq!(grid.render(), vec!["###", "# #", "###"]);
        assert_perfect(&grid);
    }

    #[test]
    fn grids_without_junctions_finish_immediately() {
        for &(w, h) in [(1, 1), (1, 5), (7, 1)].iter() {
            let mut grid = BlockGrid::with_dims(w, h).unwrap();
            let mut gen = Backtracker::new(&mut grid, Scripted::new(&CYCLE));
            assert!(gen.is_done());
            gen.generate_maze();
            assert_eq!(gen.stats(), GenerationStats::default());

            assert!(grid.render().iter().all(|row| row.chars().all(|c| c == '#')));
        }
        assert_eq!(seeded(1, 1, 0).render(), vec!["#"]);
    }

    #[test]
    fn large_maze_is_perfect() {
        assert_perfect(&seeded(101, 61, 42));
    }

    fn odd() -> impl Strategy<Value = usize> {
        (0usize..=20).prop_map(|n| 2 * n + 1)
    }

    proptest! {
        #[test]
        fn every_maze_is_a_spanning_tree(width in odd(), height in odd(), seed in any::<u64>()) {
            let grid = seeded(width, height, seed);
            prop_assert_eq!(grid.render().len(), height);
            prop_assert!(grid.render().iter().all(|row| row.len() == width));
            assert_perfect(&grid);
        }

        #[test]
        fn same_seed_same_maze(width in odd(), height in odd(), seed in any::<u64>()) {
            prop_assert_eq!(seeded(width, height, seed).render(), seeded(width, height, seed).render());
        }

        #[test]
        fn neighbors_never_leave_the_grid(width in odd(), height in odd()) {
            let grid = BlockGrid::with_dims(width, height).unwrap();
            for index in 0..grid.cells.len() {
                for dir in Direction::ALL.iter() {
                    if let Ok((x, y)) = grid.neighbor_in_direction(index, *dir) {
                        prop_assert!(x < width && y < height);
                    }
                }
            }
        }
    }
}
