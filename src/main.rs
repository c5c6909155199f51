use std::time::Duration;

use anyhow::{bail, ensure, Context, Result};
use console::{style, Term};
use indicatif::ProgressBar;
use sokoban_pilot::drive::{Driver, Strategy, Tick};
use sokoban_pilot::Game;

struct Options {
    map_path: String,
    strategy: Strategy,
    watch: bool,
    delay: Duration,
    max_ticks: Option<u64>,
}

fn parse_args() -> Result<Options> {
    let mut map_path = None;
    let mut strategy = Strategy::Batch;
    let mut watch = false;
    let mut delay = Duration::from_millis(400);
    let mut max_ticks = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--incremental" => strategy = Strategy::Incremental,
            "--watch" => watch = true,
            "--delay" => {
                let ms = args.next().context("Missing value for --delay")?;
                delay = Duration::from_millis(ms.parse().context("Invalid --delay")?);
            }
            "--max-ticks" => {
                let n = args.next().context("Missing value for --max-ticks")?;
                max_ticks = Some(n.parse().context("Invalid --max-ticks")?);
            }
            _ => {
                ensure!(map_path.is_none(), "Unexpected argument: {arg}");
                map_path = Some(arg);
            }
        }
    }
    Ok(Options {
        map_path: map_path.context(
            "Missing map file argument. \
             Usage: sokoban-pilot [--incremental] [--watch] [--delay MS] [--max-ticks N] MAP",
        )?,
        strategy,
        watch,
        delay,
        max_ticks,
    })
}

fn status_line(tick: &Tick) -> String {
    format!(
        "{}  step {}/{}  opened {}  closed {}  cost {}",
        style(tick.phase).cyan(),
        tick.cursor,
        tick.plan_len,
        tick.stats.opened,
        tick.stats.closed,
        tick.stats.cost,
    )
}

fn main() -> Result<()> {
    let opts = parse_args()?;
    let map_data = std::fs::read_to_string(&opts.map_path).context("Failed to read the map")?;
    let mut game = map_data.parse::<Game>().context("Failed to parse the map")?;

    let mut driver = Driver::new(opts.strategy);
    let max_ticks = opts.max_ticks.unwrap_or(game.grid.area() as u64 * 4);

    let term = Term::stdout();
    let spinner = if opts.watch {
        ProgressBar::hidden()
    } else {
        ProgressBar::new_spinner()
    };
    spinner.set_message("searching");

    let mut ticks = 0;
    let last = loop {
        let tick = driver.tick(&mut game, || spinner.tick());
        ticks += 1;

        if opts.watch {
            term.clear_screen()?;
            println!("{game}");
            match tick.fault {
                Some(fault) => println!("{}", style(fault).red()),
                None => println!("{}", status_line(&tick)),
            }
            std::thread::sleep(opts.delay);
        }

        if tick.won || tick.fault.is_some() {
            break tick;
        }
        ensure!(ticks < max_ticks, "Gave up after {max_ticks} ticks");
    };
    spinner.finish_and_clear();

    if let Some(fault) = last.fault {
        bail!("{fault}");
    }

    if !opts.watch {
        println!("{game}");
    }
    println!("{}", style("Solved!").green());
    println!("Steps taken: {}", last.moves);
    println!("Nodes opened: {}", last.stats.opened);
    println!("Nodes closed: {}", last.stats.closed);
    println!("Total cost: {}", last.stats.cost);
    Ok(())
}
