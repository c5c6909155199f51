use crate::search::{BlockPolicy, Searcher, SearchStats};
use crate::{Cell, Direction, Game};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanStep {
    /// Where the agent ends up. For a push this is the cell the block
    /// occupied when the push was planned.
    pub dest: Cell,
    pub push: Option<Direction>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub steps: Vec<PlanStep>,
    pub stats: SearchStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanError {
    NoBlockPath,
    NoPushPath,
}

/// Chain block-path and agent-path searches into a full push sequence.
///
/// Each round advances the block one cell along its current shortest path
/// to the target, routing the agent behind it first. Greedy per-push, so
/// the overall plan is not guaranteed shortest, but the block's distance
/// to the target shrinks every round and the loop terminates whenever a
/// solution exists. `on_search` fires once per completed sub-search.
pub fn plan_pushes(
    game: &Game,
    searcher: &mut Searcher,
    mut on_search: impl FnMut(),
) -> Result<Plan, PlanError> {
    let grid = &game.grid;
    let target = game.config.target;
    let mut agent = game.state.agent;
    let mut block = game.state.block;
    let mut plan = Plan::default();

    while block != target {
        let block_path = searcher
            .find_path(grid, block, block, target, BlockPolicy::Free)
            .ok_or(PlanError::NoBlockPath)?;
        on_search();
        plan.stats.absorb(&block_path);

        let next = block_path.path[0];
        let dir = Direction::between(block, next).expect("path steps are adjacent");
        let origin = grid
            .sibling(block, dir.reversed())
            .ok_or(PlanError::NoPushPath)?;

        let agent_path = searcher
            .find_path(grid, block, agent, origin, BlockPolicy::ObstacleExceptGoal)
            .ok_or(PlanError::NoPushPath)?;
        on_search();
        plan.stats.absorb(&agent_path);

        plan.steps.extend(
            agent_path
                .path
                .iter()
                .map(|&dest| PlanStep { dest, push: None }),
        );
        plan.steps.push(PlanStep {
            dest: block,
            push: Some(dir),
        });

        // The push leaves the agent in the cell the block vacated.
        agent = block;
        block = next;
    }
    Ok(plan)
}
