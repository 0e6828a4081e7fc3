mod colony;
mod config;
mod construct;
mod pheromone;

pub use colony::Colony;
pub use config::*;
pub use construct::{construct_path, escape_hop};
pub use pheromone::PheromoneMatrix;

use anyhow::{anyhow, Result};
use antpath_challenges::{weighted_path::*, RandomSource};
use logging_timer::time;
use std::time::Instant;

/// Improves `graph` with the ant colony until the time budget is spent or the
/// iteration cap is reached, whichever comes first.
///
/// Both limits are checked after an iteration has finished its pheromone
/// update, so at least one iteration always runs. A single-vertex graph
/// returns at once with the trivial path.
#[time]
pub fn run_aco<R: RandomSource + ?Sized>(
    graph: Graph,
    config: &AcoConfig,
    rng: &mut R,
) -> Result<Colony> {
    config.validate()?;
    if !graph.is_connected() {
        return Err(anyhow!("Graph must be connected"));
    }
    let mut colony = Colony::new(graph);
    if colony.graph().vertex_count() == 1 {
        colony.consider(&Path::singleton(0));
        return Ok(colony);
    }

    let budget = config.time_budget();
    let start = Instant::now();
    loop {
        colony.iterate(config, rng)?;
        let capped = config
            .max_iterations
            .is_some_and(|max| colony.iterations() >= max);
        let expired = budget.is_some_and(|budget| start.elapsed() > budget);
        if capped || expired {
            break;
        }
    }
    log::debug!(
        "colony finished after {} iterations with cost {:?}",
        colony.iterations(),
        colony.best_solution().map(|best| best.cost)
    );
    Ok(colony)
}
