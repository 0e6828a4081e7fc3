use super::{construct_path, AcoConfig, PheromoneMatrix};
use anyhow::{anyhow, Result};
use antpath_challenges::{weighted_path::*, RandomSource};

/// Search state of one graph instance: the graph, its pheromone trails, the
/// paths of the running iteration and the best path found so far.
#[derive(Debug, Clone)]
pub struct Colony {
    graph: Graph,
    pheromones: PheromoneMatrix,
    candidate_paths: Vec<Path>,
    best_solution: Option<Path>,
    bootstrap_cost: Option<u64>,
    use_probability: u32,
    iterations: usize,
}

impl Colony {
    pub fn new(graph: Graph) -> Self {
        let pheromones = PheromoneMatrix::new(graph.vertex_count());
        Self {
            graph,
            pheromones,
            candidate_paths: Vec::new(),
            best_solution: None,
            bootstrap_cost: None,
            use_probability: 0,
            iterations: 0,
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn pheromones(&self) -> &PheromoneMatrix {
        &self.pheromones
    }

    pub fn best_solution(&self) -> Option<&Path> {
        self.best_solution.as_ref()
    }

    /// Best cost of the first iteration, before any pheromone guidance.
    pub fn bootstrap_cost(&self) -> Option<u64> {
        self.bootstrap_cost
    }

    /// Percent chance that an ant follows pheromone at a step.
    pub fn use_probability(&self) -> u32 {
        self.use_probability
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Keeps a copy of `candidate` as the best solution when it is strictly
    /// cheaper than the current one. Returns whether it was kept.
    pub fn consider(&mut self, candidate: &Path) -> bool {
        match &self.best_solution {
            Some(best) if best.cost <= candidate.cost => false,
            _ => {
                self.best_solution = Some(candidate.clone());
                true
            }
        }
    }

    /// Runs one iteration: `num_ants` path constructions followed by the
    /// pheromone update. The first iteration builds paths without pheromone
    /// and seeds the trails from its best path.
    pub fn iterate<R: RandomSource + ?Sized>(
        &mut self,
        config: &AcoConfig,
        rng: &mut R,
    ) -> Result<()> {
        if self.iterations > 0 {
            self.use_probability = (self.use_probability + config.probability_step).min(100);
        }
        for _ in 0..config.num_ants {
            let (graph, pheromones) = (&self.graph, &self.pheromones);
            let path = if config.reseed_per_ant {
                let mut ant_rng = rng.fork();
                construct_path(graph, pheromones, self.use_probability, config, &mut ant_rng)?
            } else {
                construct_path(graph, pheromones, self.use_probability, config, rng)?
            };
            self.candidate_paths.push(path);
        }

        let iteration_best = self
            .candidate_paths
            .iter()
            .min_by_key(|path| path.cost)
            .cloned()
            .ok_or_else(|| anyhow!("Iteration produced no paths"))?;
        let previous = self.best_solution.as_ref().map(|best| best.cost);

        if self.iterations == 0 {
            self.best_solution = Some(iteration_best.clone());
            self.bootstrap_cost = Some(iteration_best.cost);
            self.pheromones
                .deposit_first(&iteration_best, config.first_deposit, config.evaporation);
        } else {
            if self.consider(&iteration_best) {
                log::debug!(
                    "iteration {}: best cost {:?} -> {}",
                    self.iterations,
                    previous,
                    iteration_best.cost
                );
            }
            let best_cost = self.best_solution.as_ref().map_or(u64::MAX, |best| best.cost);
            self.pheromones
                .deposit_iteration(&iteration_best, best_cost, config.evaporation);
        }
        log::trace!(
            "iteration {}: iteration best {}, use probability {}%, pheromone total {:.3}",
            self.iterations,
            iteration_best.cost,
            self.use_probability,
            self.pheromones.total()
        );

        self.candidate_paths.clear();
        self.iterations += 1;
        Ok(())
    }
}
