use std::ops::Index;

use arrayvec::ArrayVec;

pub mod drive;
mod fmt;
mod parse;
pub mod plan;
pub mod search;

use plan::PlanStep;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell(pub u8, pub u8);

impl Cell {
    pub fn manhattan(self, other: Cell) -> u32 {
        u32::from(self.0.abs_diff(other.0)) + u32::from(self.1.abs_diff(other.1))
    }

    pub fn is_adjacent(self, other: Cell) -> bool {
        self.manhattan(other) == 1
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tile {
    #[default]
    Floor,
    Wall,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    height: u8,
    width: u8,
    tiles: Box<[Tile]>,
}

impl Index<Cell> for Grid {
    type Output = Tile;
    fn index(&self, cell: Cell) -> &Self::Output {
        let idx = cell.1 as usize * self.width as usize + cell.0 as usize;
        &self.tiles[idx]
    }
}

impl Grid {
    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn cells(&self) -> impl Iterator<Item = (Cell, Tile)> + '_ {
        let idx_iter = std::iter::successors(Some(Cell(0, 0)), |&Cell(x, y)| {
            Some(if x + 1 < self.width {
                Cell(x + 1, y)
            } else {
                Cell(0, y + 1)
            })
        });
        idx_iter.zip(self.tiles.iter().copied())
    }

    pub fn sibling(&self, cell: Cell, dir: Direction) -> Option<Cell> {
        const DELTAS: [(i8, i8); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];
        let x = cell.0.checked_add_signed(DELTAS[dir as usize].0)?;
        let y = cell.1.checked_add_signed(DELTAS[dir as usize].1)?;
        if self.width <= x || self.height <= y {
            return None;
        }
        Some(Cell(x, y))
    }

    pub fn neighbors(&self, cell: Cell) -> ArrayVec<Cell, 4> {
        Direction::ALL
            .iter()
            .filter_map(|&dir| self.sibling(cell, dir))
            .collect()
    }

    pub fn is_floor(&self, cell: Cell) -> bool {
        self[cell] == Tile::Floor
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Right = 0,
    Down,
    Left,
    Up,
}

impl Direction {
    pub const ALL: [Self; 4] = [Self::Right, Self::Down, Self::Left, Self::Up];

    pub fn reversed(self) -> Self {
        match self {
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Up => Direction::Down,
        }
    }

    /// Direction of the unit step from `a` to `b`, if there is one.
    pub fn between(a: Cell, b: Cell) -> Option<Self> {
        let dx = i16::from(b.0) - i16::from(a.0);
        let dy = i16::from(b.1) - i16::from(a.1);
        Some(match (dx, dy) {
            (1, 0) => Direction::Right,
            (0, 1) => Direction::Down,
            (-1, 0) => Direction::Left,
            (0, -1) => Direction::Up,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub target: Cell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct State {
    pub agent: Cell,
    pub block: Cell,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub grid: Grid,
    pub config: Config,
    pub state: State,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GoError {
    OutOfBounds,
    Blocked,
    BlockStuck,
    Diverged,
}

impl Game {
    pub fn is_success(&self) -> bool {
        self.state.block == self.config.target
    }

    /// Step the agent one cell. Stepping into the block pushes it; the push
    /// fails if the cell behind the block is not free. Returns whether a
    /// push happened.
    pub fn go(&mut self, dir: Direction) -> Result<bool, GoError> {
        let dest = self
            .grid
            .sibling(self.state.agent, dir)
            .ok_or(GoError::OutOfBounds)?;
        if !self.grid.is_floor(dest) {
            return Err(GoError::Blocked);
        }
        if dest == self.state.block {
            let onto = self.grid.sibling(dest, dir).ok_or(GoError::BlockStuck)?;
            if !self.grid.is_floor(onto) {
                return Err(GoError::BlockStuck);
            }
            self.state.block = onto;
            self.state.agent = dest;
            Ok(true)
        } else {
            self.state.agent = dest;
            Ok(false)
        }
    }

    /// Apply one planned step, re-validating it against the live state.
    /// A step planned against a world that has since changed is rejected
    /// with `Diverged` rather than applied.
    pub fn apply(&mut self, step: &PlanStep) -> Result<bool, GoError> {
        match step.push {
            Some(dir) => {
                let origin = self
                    .grid
                    .sibling(step.dest, dir.reversed())
                    .ok_or(GoError::Diverged)?;
                if step.dest != self.state.block || origin != self.state.agent {
                    return Err(GoError::Diverged);
                }
                self.go(dir)
            }
            None => {
                if step.dest == self.state.block {
                    return Err(GoError::Diverged);
                }
                let dir =
                    Direction::between(self.state.agent, step.dest).ok_or(GoError::Diverged)?;
                self.go(dir)
            }
        }
    }
}
