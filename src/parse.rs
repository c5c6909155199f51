use std::str::FromStr;

use anyhow::{bail, ensure, Context, Result};

use crate::{Cell, Config, Game, Grid, State, Tile};

impl FromStr for Game {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines = s.lines().map(|line| line.trim_end()).filter(|line| !line.is_empty());

        let first = lines.next().context("Empty map")?;
        let width = first.chars().count();
        ensure!(width <= u8::MAX as usize, "Map too wide: {width}");

        let mut tiles = Vec::new();
        let mut agent = None;
        let mut block = None;
        let mut target = None;

        let mut parse_line = |y: usize, line: &str| -> Result<_> {
            for (x, ch) in line.chars().enumerate() {
                let cell = Cell(x as _, y as _);
                let tile = match ch {
                    '.' | ' ' => Tile::Floor,
                    '#' => Tile::Wall,
                    'p' => {
                        ensure!(agent.is_none(), "Multiple agents");
                        agent = Some(cell);
                        Tile::Floor
                    }
                    'b' => {
                        ensure!(block.is_none(), "Multiple blocks");
                        block = Some(cell);
                        Tile::Floor
                    }
                    '_' => {
                        ensure!(target.is_none(), "Multiple targets");
                        target = Some(cell);
                        Tile::Floor
                    }
                    'B' => {
                        ensure!(block.is_none(), "Multiple blocks");
                        ensure!(target.is_none(), "Multiple targets");
                        block = Some(cell);
                        target = Some(cell);
                        Tile::Floor
                    }
                    _ => bail!("Invalid cell: {ch:?}"),
                };
                tiles.push(tile);
            }
            Ok(())
        };

        parse_line(0, first)?;
        let mut height = 1;
        for line in lines {
            ensure!(height < u8::MAX as usize, "Map too tall");
            ensure!(
                line.chars().count() == width,
                "Width mismatch at line {height}, expecting width {width}",
            );
            parse_line(height, line)?;
            height += 1;
        }

        let grid = Grid {
            height: height as _,
            width: width as _,
            tiles: tiles.into(),
        };
        let agent = agent.context("Missing agent")?;
        let block = block.context("Missing block")?;
        ensure!(agent != block, "Agent and block overlap");

        Ok(Game {
            grid,
            config: Config {
                target: target.context("Missing target")?,
            },
            state: State { agent, block },
        })
    }
}
