use std::fmt;

use crate::drive::{Fault, Phase};
use crate::plan::PlanError;
use crate::{Cell, Game, Tile};

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (cell, tile) in self.grid.cells() {
            if cell.0 == 0 && cell.1 != 0 {
                "\n".fmt(f)?;
            }
            if cell == self.state.agent {
                "p".fmt(f)?;
            } else if cell == self.state.block {
                if cell == self.config.target {
                    "B".fmt(f)?;
                } else {
                    "b".fmt(f)?;
                }
            } else if cell == self.config.target {
                "_".fmt(f)?;
            } else {
                tile.fmt(f)?;
            }
        }
        "\n".fmt(f)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tile::Floor => ".".fmt(f),
            Tile::Wall => "#".fmt(f),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.0, self.1)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Plan => "planning".fmt(f),
            Phase::Execute => "executing".fmt(f),
            Phase::SeekBlock => "seeking block".fmt(f),
            Phase::PushBlock => "pushing block".fmt(f),
            Phase::Won => "solved".fmt(f),
        }
    }
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanError::NoBlockPath => "no path for the block to reach the target".fmt(f),
            PlanError::NoPushPath => "the agent cannot reach a push position".fmt(f),
        }
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fault::Planning(err) => write!(f, "no solution: {err}"),
            Fault::SeekBlocked => "the agent cannot reach the block".fmt(f),
            Fault::OriginBlocked => "the agent cannot get behind the block".fmt(f),
            Fault::PushBlocked => "the block cannot be pushed toward the target".fmt(f),
        }
    }
}
