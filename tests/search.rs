use anyhow::{bail, ensure, Context};
use sokoban_pilot::search::{BlockPolicy, Searcher};
use sokoban_pilot::Game;

use crate::common::*;

mod common;

fn main() {
    run_tests("search", |_name, content| {
        let game = content.parse::<Game>().context("Invalid map")?;
        let mut searcher = Searcher::new();
        let cells = floor_cells(&game);

        for &start in &cells {
            for &goal in &cells {
                for policy in [BlockPolicy::Free, BlockPolicy::ObstacleExceptGoal] {
                    let block_is_obstacle = policy == BlockPolicy::ObstacleExceptGoal;
                    let oracle = bfs_distance(&game, start, goal, block_is_obstacle);
                    let found =
                        searcher.find_path(&game.grid, game.state.block, start, goal, policy);

                    let result = match (found, oracle) {
                        (Some(result), Some(_)) => result,
                        (None, None) => continue,
                        (Some(_), None) => bail!("Unexpected path {start} -> {goal}"),
                        (None, Some(_)) => bail!("Missing path {start} -> {goal}"),
                    };

                    ensure!(
                        result.cost() == oracle.unwrap(),
                        "Cost mismatch {start} -> {goal}: got {}, oracle {}",
                        result.cost(),
                        oracle.unwrap(),
                    );
                    ensure!(
                        result.opened >= result.closed && result.closed >= result.cost(),
                        "Count invariant violated {start} -> {goal}: \
                         opened {}, closed {}, cost {}",
                        result.opened,
                        result.closed,
                        result.cost(),
                    );

                    let mut prev = start;
                    for &cell in &result.path {
                        ensure!(prev.is_adjacent(cell), "Disconnected path {start} -> {goal}");
                        ensure!(game.grid.is_floor(cell), "Path enters a wall at {cell}");
                        if block_is_obstacle {
                            ensure!(
                                cell != game.state.block || cell == goal,
                                "Path crosses the block {start} -> {goal}",
                            );
                        }
                        prev = cell;
                    }
                    ensure!(prev == goal, "Path does not end at the goal {start} -> {goal}");

                    let again =
                        searcher.find_path(&game.grid, game.state.block, start, goal, policy);
                    ensure!(
                        again.as_ref() == Some(&result),
                        "Nondeterministic result {start} -> {goal}",
                    );
                }
            }
        }
        Ok(())
    });
}
