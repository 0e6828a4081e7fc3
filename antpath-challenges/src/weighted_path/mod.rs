mod cost;
pub use cost::*;

use crate::RandomSource;
use anyhow::{anyhow, Result};
use logging_timer::time;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

pub const MIN_DEGREE: usize = 1;
pub const MAX_DEGREE: usize = 6;
pub const MIN_WEIGHT: u32 = 1;
pub const MAX_WEIGHT: u32 = 100;

// Random candidates tried per vertex before degree augmentation switches to
// enumerating the eligible neighbours.
const SAMPLING_ATTEMPTS_PER_VERTEX: usize = 4;

/// Parameters of the random graph generator.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Track {
    pub min_degree: usize,
    pub max_degree: usize,
    pub min_weight: u32,
    pub max_weight: u32,
}

impl Default for Track {
    fn default() -> Self {
        Self {
            min_degree: MIN_DEGREE,
            max_degree: MAX_DEGREE,
            min_weight: MIN_WEIGHT,
            max_weight: MAX_WEIGHT,
        }
    }
}

impl Track {
    pub fn validate(&self) -> Result<()> {
        if self.min_degree == 0 {
            return Err(anyhow!("Minimum degree must be at least 1"));
        }
        if self.max_degree < 2 {
            return Err(anyhow!(
                "Maximum degree ({}) must be at least 2 to keep the graph connected",
                self.max_degree
            ));
        }
        if self.min_degree > self.max_degree {
            return Err(anyhow!(
                "Minimum degree ({}) is greater than maximum degree ({})",
                self.min_degree,
                self.max_degree
            ));
        }
        if self.min_weight == 0 {
            return Err(anyhow!("Edge weights must be positive"));
        }
        if self.min_weight > self.max_weight {
            return Err(anyhow!(
                "Minimum weight ({}) is greater than maximum weight ({})",
                self.min_weight,
                self.max_weight
            ));
        }
        Ok(())
    }

    fn draw_weight<R: RandomSource + ?Sized>(&self, rng: &mut R) -> u32 {
        rng.uniform(self.min_weight as usize, self.max_weight as usize) as u32
    }
}

/// Undirected, connected graph with positive integer edge weights.
///
/// Neighbour lists are sorted ascending once the graph is built. `weights` is a
/// dense symmetric matrix holding 0 for non-adjacent pairs.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Graph {
    vertex_count: usize,
    adjacency: Vec<Vec<usize>>,
    weights: Array2<u32>,
}

impl Graph {
    fn empty(vertex_count: usize) -> Self {
        Self {
            vertex_count,
            adjacency: vec![Vec::new(); vertex_count],
            weights: Array2::zeros((vertex_count, vertex_count)),
        }
    }

    /// Builds a random connected graph on `vertex_count` vertices.
    ///
    /// A random Hamiltonian backbone is laid first so the graph is connected,
    /// then every vertex is topped up towards a degree drawn from
    /// `[min_degree, max_degree]`. The degree ceiling shrinks to
    /// `vertex_count - 1` on graphs too small to honour `max_degree`, and a
    /// vertex that cannot find an eligible partner keeps the degree it has.
    #[time]
    pub fn generate<R: RandomSource + ?Sized>(
        vertex_count: usize,
        track: &Track,
        rng: &mut R,
    ) -> Result<Self> {
        if vertex_count == 0 {
            return Err(anyhow!("Number of vertices must be at least 1"));
        }
        track.validate()?;
        let mut graph = Self::empty(vertex_count);
        if vertex_count == 1 {
            return Ok(graph);
        }

        let mut unused: Vec<usize> = (0..vertex_count).collect();
        let mut current = unused.swap_remove(rng.uniform(0, vertex_count - 1));
        while !unused.is_empty() {
            let next = unused.swap_remove(rng.uniform(0, unused.len() - 1));
            let weight = track.draw_weight(rng);
            graph.add_edge(current, next, weight);
            current = next;
        }

        let ceiling = track.max_degree.min(vertex_count - 1);
        let max_attempts = SAMPLING_ATTEMPTS_PER_VERTEX * vertex_count;
        for vertex in 0..vertex_count {
            let target = rng.uniform(track.min_degree, track.max_degree).min(ceiling);
            let mut attempts = 0;
            while graph.degree(vertex) < target {
                let neighbour = if attempts < max_attempts {
                    attempts += 1;
                    let candidate = rng.uniform(0, vertex_count - 1);
                    if !graph.accepts_edge(vertex, candidate, ceiling) {
                        continue;
                    }
                    candidate
                } else {
                    let eligible: Vec<usize> = (0..vertex_count)
                        .filter(|&candidate| graph.accepts_edge(vertex, candidate, ceiling))
                        .collect();
                    if eligible.is_empty() {
                        log::trace!(
                            "vertex {} settles at degree {} (target {})",
                            vertex,
                            graph.degree(vertex),
                            target
                        );
                        break;
                    }
                    eligible[rng.uniform(0, eligible.len() - 1)]
                };
                let weight = track.draw_weight(rng);
                graph.add_edge(vertex, neighbour, weight);
            }
        }

        graph.sort_adjacency();
        Ok(graph)
    }

    /// Builds a graph from an explicit weighted edge list.
    pub fn from_edges(vertex_count: usize, edges: &[(usize, usize, u32)]) -> Result<Self> {
        if vertex_count == 0 {
            return Err(anyhow!("Number of vertices must be at least 1"));
        }
        let mut graph = Self::empty(vertex_count);
        for &(a, b, weight) in edges {
            if a >= vertex_count || b >= vertex_count {
                return Err(anyhow!(
                    "Edge ({}, {}) references a vertex outside 0..{}",
                    a,
                    b,
                    vertex_count
                ));
            }
            if a == b {
                return Err(anyhow!("Edge ({}, {}) is a self-loop", a, b));
            }
            if weight == 0 {
                return Err(anyhow!("Edge ({}, {}) has zero weight", a, b));
            }
            if graph.has_edge(a, b) {
                return Err(anyhow!("Edge ({}, {}) is duplicated", a, b));
            }
            graph.add_edge(a, b, weight);
        }
        graph.sort_adjacency();
        Ok(graph)
    }

    fn add_edge(&mut self, a: usize, b: usize, weight: u32) {
        self.adjacency[a].push(b);
        self.adjacency[b].push(a);
        self.weights[[a, b]] = weight;
        self.weights[[b, a]] = weight;
    }

    fn accepts_edge(&self, vertex: usize, candidate: usize, ceiling: usize) -> bool {
        candidate != vertex
            && self.degree(candidate) < ceiling
            && !self.has_edge(vertex, candidate)
    }

    fn sort_adjacency(&mut self) {
        for neighbours in self.adjacency.iter_mut() {
            neighbours.sort_unstable();
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn neighbours(&self, vertex: usize) -> &[usize] {
        &self.adjacency[vertex]
    }

    pub fn degree(&self, vertex: usize) -> usize {
        self.adjacency[vertex].len()
    }

    pub fn has_edge(&self, a: usize, b: usize) -> bool {
        self.weights[[a, b]] != 0
    }

    /// Weight of edge `a`-`b`, or 0 when the vertices are not adjacent.
    pub fn weight(&self, a: usize, b: usize) -> u32 {
        self.weights[[a, b]]
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    pub fn is_connected(&self) -> bool {
        let mut seen = vec![false; self.vertex_count];
        let mut queue = VecDeque::from([0]);
        seen[0] = true;
        let mut reached = 1;
        while let Some(vertex) = queue.pop_front() {
            for &neighbour in self.neighbours(vertex) {
                if !seen[neighbour] {
                    seen[neighbour] = true;
                    reached += 1;
                    queue.push_back(neighbour);
                }
            }
        }
        reached == self.vertex_count
    }

    /// Checks that `path` is a walk of this graph covering every vertex with
    /// consistent edge costs and cost. Returns the number of forced repeats.
    pub fn verify_path(&self, path: &Path, penalty: u64) -> Result<usize> {
        if path.sequence.is_empty() {
            return Err(anyhow!("Path is empty"));
        }
        if let Some(&vertex) = path.sequence.iter().find(|&&v| v >= self.vertex_count) {
            return Err(anyhow!(
                "Path contains invalid vertex ({}) for a graph of {} vertices",
                vertex,
                self.vertex_count
            ));
        }
        if path.edge_costs.len() + 1 != path.sequence.len() {
            return Err(anyhow!(
                "Path has {} edge costs for {} vertices",
                path.edge_costs.len(),
                path.sequence.len()
            ));
        }
        for (step, (pair, &cost)) in path
            .sequence
            .windows(2)
            .zip(path.edge_costs.iter())
            .enumerate()
        {
            let (a, b) = (pair[0], pair[1]);
            if !self.has_edge(a, b) {
                return Err(anyhow!("Step {} crosses non-edge ({}, {})", step, a, b));
            }
            if self.weight(a, b) != cost {
                return Err(anyhow!(
                    "Step {} records cost {} but edge ({}, {}) weighs {}",
                    step,
                    cost,
                    a,
                    b,
                    self.weight(a, b)
                ));
            }
        }
        let mut visited = vec![false; self.vertex_count];
        for &vertex in path.sequence.iter() {
            visited[vertex] = true;
        }
        if let Some(missing) = visited.iter().position(|&v| !v) {
            return Err(anyhow!("Path never visits vertex {}", missing));
        }
        let expected = score(&path.edge_costs, penalty);
        if path.cost != expected {
            return Err(anyhow!(
                "Path cost ({}) does not match its edge costs ({})",
                path.cost,
                expected
            ));
        }
        Ok(path.sequence.len() - self.vertex_count)
    }
}
