use std::convert::TryFrom;

use clap::Parser;

use crate::error::MazeError;

/// Prints a perfect maze of '#' walls and ' ' passages
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Maze width in characters, odd and greater than 0
    #[arg(allow_negative_numbers = true)]
    pub width: i64,

    /// Maze height in characters, odd and greater than 0
    #[arg(allow_negative_numbers = true)]
    pub height: i64,

    /// Random seed, picked at random when left out
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MazeConfig {
    pub width: usize,
    pub height: usize,
    pub seed: Option<u64>,
}

impl Args {
    pub fn validate(&self) -> Result<MazeConfig, MazeError> {
        if self.width % 2 == 0 || self.height % 2 == 0 {
            return Err(invalid("dimensions must be odd!"));
        }
        if self.width <= 0 || self.height <= 0 {
            return Err(invalid("dimensions must be greater than 0!"));
        }

        let width = usize::try_from(self.width).map_err(|_| invalid("invalid maze size value!"))?;
        let height =
            usize::try_from(self.height).map_err(|_| invalid("invalid maze size value!"))?;

        Ok(MazeConfig {
            width,
            height,
            seed: self.seed,
        })
    }
}

fn invalid(reason: &str) -> MazeError {
    MazeError::InvalidArgument {
        reason: reason.to_string(),
    }
}
