use crate::plan::{plan_pushes, PlanError, PlanStep};
use crate::search::{BlockPolicy, Searcher, SearchStats};
use crate::{Direction, Game};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Plan,
    Execute,
    SeekBlock,
    PushBlock,
    Won,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Compute one full plan up front and step through it.
    Batch,
    /// Recompute one push decision at a time.
    Incremental,
}

/// A latched terminal condition for the current attempt. Further ticks are
/// inert until `reset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    Planning(PlanError),
    SeekBlocked,
    OriginBlocked,
    PushBlocked,
}

/// Per-tick snapshot for the display layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub phase: Phase,
    pub cursor: usize,
    pub plan_len: usize,
    /// World mutations applied so far (moves and pushes).
    pub moves: u64,
    pub stats: SearchStats,
    pub won: bool,
    pub fault: Option<Fault>,
}

pub struct Driver {
    strategy: Strategy,
    phase: Phase,
    steps: Vec<PlanStep>,
    cursor: usize,
    moves: u64,
    stats: SearchStats,
    searcher: Searcher,
    fault: Option<Fault>,
}

impl Driver {
    pub fn new(strategy: Strategy) -> Self {
        Driver {
            strategy,
            phase: match strategy {
                Strategy::Batch => Phase::Plan,
                Strategy::Incremental => Phase::SeekBlock,
            },
            steps: Vec::new(),
            cursor: 0,
            moves: 0,
            stats: SearchStats::default(),
            searcher: Searcher::new(),
            fault: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn fault(&self) -> Option<Fault> {
        self.fault
    }

    /// Drop the current attempt and start over on the next tick.
    pub fn reset(&mut self) {
        self.phase = match self.strategy {
            Strategy::Batch => Phase::Plan,
            Strategy::Incremental => Phase::SeekBlock,
        };
        self.steps.clear();
        self.cursor = 0;
        self.fault = None;
    }

    /// Advance one tick: at most one phase transition and one world
    /// mutation. `on_search` fires once per completed sub-search.
    pub fn tick(&mut self, game: &mut Game, on_search: impl FnMut()) -> Tick {
        if game.is_success() {
            self.phase = Phase::Won;
        } else if self.fault.is_none() {
            match self.phase {
                Phase::Plan => self.tick_plan(game, on_search),
                Phase::Execute => self.tick_execute(game),
                Phase::SeekBlock => self.tick_seek(game),
                Phase::PushBlock => self.tick_push(game),
                Phase::Won => {}
            }
        }
        Tick {
            phase: self.phase,
            cursor: self.cursor,
            plan_len: self.steps.len(),
            moves: self.moves,
            stats: self.stats,
            won: self.phase == Phase::Won,
            fault: self.fault,
        }
    }

    fn tick_plan(&mut self, game: &Game, on_search: impl FnMut()) {
        match plan_pushes(game, &mut self.searcher, on_search) {
            Ok(plan) => {
                self.stats.merge(plan.stats);
                self.steps = plan.steps;
                self.cursor = 0;
                self.phase = Phase::Execute;
            }
            Err(err) => self.fault = Some(Fault::Planning(err)),
        }
    }

    fn tick_execute(&mut self, game: &mut Game) {
        let Some(step) = self.steps.get(self.cursor) else {
            // Plan exhausted without winning.
            self.drop_plan(Phase::Plan);
            return;
        };
        match game.apply(step) {
            Ok(_) => {
                self.cursor += 1;
                self.moves += 1;
            }
            // The world moved under us. Replan.
            Err(_) => self.drop_plan(Phase::Plan),
        }
    }

    fn tick_seek(&mut self, game: &mut Game) {
        if let Some(step) = self.steps.get(self.cursor) {
            match game.apply(step) {
                Ok(_) => {
                    self.cursor += 1;
                    self.moves += 1;
                }
                Err(_) => self.drop_plan(Phase::SeekBlock),
            }
            return;
        }
        if game.state.agent.is_adjacent(game.state.block) {
            self.phase = Phase::PushBlock;
            return;
        }
        let found = self.searcher.find_path(
            &game.grid,
            game.state.block,
            game.state.agent,
            game.state.block,
            BlockPolicy::ObstacleExceptGoal,
        );
        match found {
            Some(result) => {
                self.stats.absorb(&result);
                let mut steps = result
                    .path
                    .iter()
                    .map(|&dest| PlanStep { dest, push: None })
                    .collect::<Vec<_>>();
                // Stop beside the block; the final path cell is the block itself.
                steps.pop();
                self.install(steps);
            }
            None => self.fault = Some(Fault::SeekBlocked),
        }
    }

    fn tick_push(&mut self, game: &mut Game) {
        let state = game.state;

        let Some(dir) = self.pick_push_direction(game) else {
            self.fault = Some(Fault::PushBlocked);
            return;
        };
        let Some(origin) = game.grid.sibling(state.block, dir.reversed()) else {
            self.fault = Some(Fault::OriginBlocked);
            return;
        };

        if state.agent == origin {
            let step = PlanStep {
                dest: state.block,
                push: Some(dir),
            };
            self.install(vec![step]);
            match game.apply(&step) {
                Ok(_) => {
                    self.cursor += 1;
                    self.moves += 1;
                }
                Err(_) => self.drop_plan(Phase::PushBlock),
            }
            return;
        }

        let found = self.searcher.find_path(
            &game.grid,
            state.block,
            state.agent,
            origin,
            BlockPolicy::ObstacleExceptGoal,
        );
        match found {
            Some(result) => {
                self.stats.absorb(&result);
                self.install(
                    result
                        .path
                        .iter()
                        .map(|&dest| PlanStep { dest, push: None })
                        .collect(),
                );
                self.phase = Phase::SeekBlock;
            }
            None => self.fault = Some(Fault::OriginBlocked),
        }
    }

    /// Axis with the larger remaining offset first, then one orthogonal
    /// fallback. The fallback picks a sign even when that axis has no
    /// offset left; a detour around two blocked axes is not attempted.
    fn pick_push_direction(&self, game: &Game) -> Option<Direction> {
        let state = game.state;
        let target = game.config.target;
        let dx = i16::from(target.0) - i16::from(state.block.0);
        let dy = i16::from(target.1) - i16::from(state.block.1);

        let horizontal = if dx > 0 {
            Direction::Right
        } else {
            Direction::Left
        };
        let vertical = if dy > 0 { Direction::Down } else { Direction::Up };
        let (primary, fallback) = if dx.abs() > dy.abs() {
            (horizontal, vertical)
        } else {
            (vertical, horizontal)
        };

        [primary, fallback].into_iter().find(|&dir| {
            game.grid
                .sibling(state.block, dir)
                .is_some_and(|onto| game.grid.is_floor(onto))
        })
    }

    fn install(&mut self, steps: Vec<PlanStep>) {
        self.steps = steps;
        self.cursor = 0;
    }

    fn drop_plan(&mut self, phase: Phase) {
        self.steps.clear();
        self.cursor = 0;
        self.phase = phase;
    }
}
