use antpath_challenges::{weighted_path::*, RandomSource};
use ndarray::Array2;

/// Symmetric pheromone levels, one per ordered vertex pair.
///
/// Levels only change through [`deposit_first`](Self::deposit_first),
/// [`deposit_iteration`](Self::deposit_iteration) and
/// [`evaporate`](Self::evaporate), each of which keeps the matrix symmetric.
#[derive(Debug, Clone, PartialEq)]
pub struct PheromoneMatrix {
    levels: Array2<f64>,
}

impl PheromoneMatrix {
    pub fn new(vertex_count: usize) -> Self {
        Self {
            levels: Array2::zeros((vertex_count, vertex_count)),
        }
    }

    pub fn level(&self, a: usize, b: usize) -> f64 {
        self.levels[[a, b]]
    }

    pub fn total(&self) -> f64 {
        self.levels.sum()
    }

    /// Whether any edge incident to `vertex` carries pheromone.
    pub fn present(&self, graph: &Graph, vertex: usize) -> bool {
        graph
            .neighbours(vertex)
            .iter()
            .any(|&neighbour| self.level(vertex, neighbour) != 0.0)
    }

    fn lay(&mut self, path: &Path, amount: f64) {
        for (a, b) in path.edges() {
            self.levels[[a, b]] += amount;
            self.levels[[b, a]] += amount;
        }
    }

    /// Lays `amount` on every edge of the bootstrap best path, then evaporates.
    pub fn deposit_first(&mut self, best: &Path, amount: f64, evaporation: f64) {
        self.lay(best, amount);
        self.evaporate(evaporation);
    }

    /// Rewards the iteration's best path when it is at least as good as the
    /// best known cost, laying `best_cost / iteration_best.cost` per edge and
    /// then evaporating. Nothing happens otherwise, evaporation included.
    ///
    /// Returns whether a deposit was made.
    pub fn deposit_iteration(
        &mut self,
        iteration_best: &Path,
        best_cost: u64,
        evaporation: f64,
    ) -> bool {
        if iteration_best.cost > best_cost {
            return false;
        }
        let factor = if iteration_best.cost == 0 {
            1.0
        } else {
            best_cost as f64 / iteration_best.cost as f64
        };
        self.lay(iteration_best, factor);
        self.evaporate(evaporation);
        true
    }

    pub fn evaporate(&mut self, rate: f64) {
        let kept = 1.0 - rate;
        self.levels.mapv_inplace(|level| level * kept);
    }

    /// Integer percentage shares of the unvisited neighbours of `vertex`.
    ///
    /// Shares follow pheromone levels. When the smallest non-zero level is less
    /// than `smoothing_threshold` times the largest, each level `f` is first
    /// replaced by `(1 - f / total) * f`. Shares are floored, so they may sum
    /// to slightly less than 100. Empty when no unvisited neighbour carries
    /// pheromone.
    pub fn selection_shares(
        &self,
        graph: &Graph,
        vertex: usize,
        visited: &[bool],
        smoothing_threshold: f64,
    ) -> Vec<(usize, u32)> {
        let mut candidates: Vec<(usize, f64)> = graph
            .neighbours(vertex)
            .iter()
            .filter(|&&neighbour| !visited[neighbour])
            .map(|&neighbour| (neighbour, self.level(vertex, neighbour)))
            .collect();
        let mut total: f64 = candidates.iter().map(|&(_, level)| level).sum();
        if total <= 0.0 {
            return Vec::new();
        }

        let max = candidates
            .iter()
            .map(|&(_, level)| level)
            .fold(0.0, f64::max);
        let min = candidates
            .iter()
            .map(|&(_, level)| level)
            .filter(|&level| level > 0.0)
            .fold(f64::INFINITY, f64::min);
        if min / max < smoothing_threshold {
            let raw_total = total;
            total = 0.0;
            for (_, level) in candidates.iter_mut() {
                *level *= 1.0 - *level / raw_total;
                total += *level;
            }
            if total <= 0.0 {
                return Vec::new();
            }
        }

        candidates
            .into_iter()
            .map(|(neighbour, level)| (neighbour, (100.0 * level / total) as u32))
            .collect()
    }

    /// Draws an unvisited neighbour of `vertex` with probability proportional
    /// to its [`selection_shares`](Self::selection_shares).
    pub fn weighted_choice<R: RandomSource + ?Sized>(
        &self,
        graph: &Graph,
        vertex: usize,
        visited: &[bool],
        smoothing_threshold: f64,
        rng: &mut R,
    ) -> Option<usize> {
        let shares = self.selection_shares(graph, vertex, visited, smoothing_threshold);
        let sum: u32 = shares.iter().map(|&(_, share)| share).sum();
        if sum == 0 {
            return None;
        }
        let draw = rng.uniform(1, sum as usize) as u32;
        let mut end = 0;
        for (neighbour, share) in shares {
            end += share;
            if draw <= end {
                return Some(neighbour);
            }
        }
        None
    }
}
