pub mod backtracker;

use crate::grids::block_grid::BlockGrid;
use crate::grids::Direction;
use rand::Rng;

pub trait Generator {
    fn step_generation(&mut self);
    fn generate_maze(&mut self) -> &BlockGrid;
    fn is_done(&self) -> bool;
}

/// Where a generator gets its random directions from.
pub trait DirectionSource {
    fn next_direction(&mut self) -> Direction;
}

/// Uniform draws over all four directions from any `rand` generator.
pub struct RngDirections<R: Rng>(pub R);

impl<R: Rng> DirectionSource for RngDirections<R> {
    fn next_direction(&mut self) -> Direction {
        Direction::from(self.0.gen_range(0..4usize))
    }
}
