use anyhow::{bail, ensure, Context};
use sokoban_pilot::plan::{plan_pushes, PlanError};
use sokoban_pilot::search::Searcher;
use sokoban_pilot::Game;

use crate::common::*;

mod common;

fn main() {
    run_tests("plan", |name, content| {
        let game = content.parse::<Game>().context("Invalid map")?;
        let mut searcher = Searcher::new();
        let planned = plan_pushes(&game, &mut searcher, || {});

        if let Some(rest) = name.strip_prefix("fail_") {
            let want = if rest.starts_with("block") {
                PlanError::NoBlockPath
            } else {
                PlanError::NoPushPath
            };
            match planned {
                Err(err) => ensure!(err == want, "Expected {want:?}, got {err:?}"),
                Ok(_) => bail!("Expected planning to fail"),
            }
            return Ok(());
        }

        let plan = match planned {
            Ok(plan) => plan,
            Err(err) => bail!("Planning failed: {err}"),
        };
        ensure!(!plan.steps.is_empty(), "Empty plan for an unsolved map");
        ensure!(plan.stats.cost > 0, "Zero-cost plan");
        ensure!(
            plan.stats.opened >= plan.stats.closed && plan.stats.closed >= plan.stats.cost,
            "Count invariant violated: opened {}, closed {}, cost {}",
            plan.stats.opened,
            plan.stats.closed,
            plan.stats.cost,
        );

        // The plan must replay on the unmodified world without divergence.
        let mut replay = game.clone();
        for (i, step) in plan.steps.iter().enumerate() {
            if let Err(err) = replay.apply(step) {
                bail!("Step {i} rejected during replay: {err:?}");
            }
        }
        ensure!(replay.is_success(), "Block not on target after replay");
        Ok(())
    });
}
