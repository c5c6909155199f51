use std::collections::VecDeque;
use std::path::Path;

use anyhow::Result;
use sokoban_pilot::{Cell, Game, Tile};

pub const TEST_DIR: &str = "tests";
pub const EXTENSION: &str = "map";

pub fn run_tests(subdir: &str, mut f: impl FnMut(&str, &str) -> Result<()>) {
    let mut tests = std::fs::read_dir(Path::new(TEST_DIR).join(subdir))
        .unwrap()
        .filter_map(|ent| {
            let path = ent.unwrap().path();
            if path.extension().map_or(true, |ext| ext != EXTENSION) {
                return None;
            }
            let name = path.file_stem().unwrap().to_str().unwrap().to_owned();
            Some((name, path))
        })
        .collect::<Vec<_>>();
    tests.sort();

    let mut failed_cnt = 0;
    for (name, path) in &tests {
        eprint!("{name}: ");
        let content = std::fs::read_to_string(path).unwrap();
        match f(name, &content) {
            Ok(()) => eprintln!("\x1B[32mOK\x1B[0m"),
            Err(err) => {
                eprintln!("\x1B[31mFAILED\x1B[0m\n{err:?}");
                failed_cnt += 1;
            }
        }
    }

    if failed_cnt != 0 {
        eprintln!("{failed_cnt}/{} tests failed", tests.len());
        std::process::exit(1);
    }
}

/// Brute-force BFS distance, the oracle the A* results are checked against.
#[allow(unused)]
pub fn bfs_distance(
    game: &Game,
    start: Cell,
    goal: Cell,
    block_is_obstacle: bool,
) -> Option<usize> {
    let grid = &game.grid;
    let idx = |c: Cell| c.1 as usize * grid.width() as usize + c.0 as usize;
    let mut dist = vec![usize::MAX; grid.area()];
    let mut queue = VecDeque::new();
    dist[idx(start)] = 0;
    queue.push_back(start);
    while let Some(cell) = queue.pop_front() {
        if cell == goal {
            return Some(dist[idx(cell)]);
        }
        for next in grid.neighbors(cell) {
            if !grid.is_floor(next)
                || (block_is_obstacle && next == game.state.block && next != goal)
                || dist[idx(next)] != usize::MAX
            {
                continue;
            }
            dist[idx(next)] = dist[idx(cell)] + 1;
            queue.push_back(next);
        }
    }
    None
}

#[allow(unused)]
pub fn floor_cells(game: &Game) -> Vec<Cell> {
    game.grid
        .cells()
        .filter(|&(_, tile)| tile == Tile::Floor)
        .map(|(cell, _)| cell)
        .collect()
}
