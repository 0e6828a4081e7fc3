use super::{AcoConfig, PheromoneMatrix};
use anyhow::{anyhow, Result};
use antpath_challenges::{weighted_path::*, RandomSource};
use std::collections::VecDeque;

/// Builds one path that visits every vertex of `graph`.
///
/// At each step, when pheromone lies on an edge leaving the current vertex,
/// the next vertex is drawn by pheromone weight with probability
/// `use_probability` percent; otherwise a uniformly random unvisited
/// neighbour is taken. A vertex whose neighbours are all visited steps back
/// onto a random visited neighbour, so the sequence can hold repeats. Once the
/// path is longer than `dead_end_step_factor * vertex_count`, dead ends are
/// left along a shortest route towards the nearest unvisited vertex instead.
pub fn construct_path<R: RandomSource + ?Sized>(
    graph: &Graph,
    pheromones: &PheromoneMatrix,
    use_probability: u32,
    config: &AcoConfig,
    rng: &mut R,
) -> Result<Path> {
    let vertex_count = graph.vertex_count();
    let first = rng.uniform(0, vertex_count - 1);
    if vertex_count == 1 {
        return Ok(Path::singleton(first));
    }

    let mut visited = vec![false; vertex_count];
    visited[first] = true;
    let mut remaining = vertex_count - 1;
    let mut sequence = Vec::with_capacity(vertex_count);
    let mut edge_costs = Vec::with_capacity(vertex_count - 1);
    sequence.push(first);
    let escape_after = config.dead_end_step_factor * vertex_count;
    let mut untried = Vec::new();

    while remaining > 0 {
        let prev = sequence[sequence.len() - 1];
        let guided = if use_probability > 0
            && pheromones.present(graph, prev)
            && rng.uniform(1, 100) <= use_probability as usize
        {
            pheromones.weighted_choice(graph, prev, &visited, config.smoothing_threshold, rng)
        } else {
            None
        };
        let candidate = match guided {
            Some(next) => Some(next),
            None => unvisited_neighbour(graph, prev, &visited, &mut untried, rng),
        };
        let next = match candidate {
            Some(next) => next,
            None if sequence.len() > escape_after => {
                let hop = escape_hop(graph, prev, &visited).ok_or_else(|| {
                    anyhow!("No unvisited vertex is reachable from vertex {}", prev)
                })?;
                log::trace!("escaping dead end at {} through {}", prev, hop);
                hop
            }
            None => {
                let neighbours = graph.neighbours(prev);
                if neighbours.is_empty() {
                    return Err(anyhow!("Vertex {} has no neighbours", prev));
                }
                neighbours[rng.uniform(0, neighbours.len() - 1)]
            }
        };

        sequence.push(next);
        edge_costs.push(graph.weight(prev, next));
        if !visited[next] {
            visited[next] = true;
            remaining -= 1;
        }
    }

    Ok(Path::new(sequence, edge_costs, config.penalty))
}

// Samples neighbours of `vertex` without replacement until an unvisited one
// turns up. `untried` is scratch space reused across steps.
fn unvisited_neighbour<R: RandomSource + ?Sized>(
    graph: &Graph,
    vertex: usize,
    visited: &[bool],
    untried: &mut Vec<usize>,
    rng: &mut R,
) -> Option<usize> {
    untried.clear();
    untried.extend_from_slice(graph.neighbours(vertex));
    while !untried.is_empty() {
        let candidate = untried.swap_remove(rng.uniform(0, untried.len() - 1));
        if !visited[candidate] {
            return Some(candidate);
        }
    }
    None
}

/// First step of a shortest route from `from` to the nearest unvisited vertex.
pub fn escape_hop(graph: &Graph, from: usize, visited: &[bool]) -> Option<usize> {
    let mut first_hop: Vec<Option<usize>> = vec![None; graph.vertex_count()];
    let mut seen = vec![false; graph.vertex_count()];
    seen[from] = true;
    let mut queue = VecDeque::new();
    for &neighbour in graph.neighbours(from) {
        seen[neighbour] = true;
        first_hop[neighbour] = Some(neighbour);
        queue.push_back(neighbour);
    }
    while let Some(vertex) = queue.pop_front() {
        if !visited[vertex] {
            return first_hop[vertex];
        }
        for &neighbour in graph.neighbours(vertex) {
            if !seen[neighbour] {
                seen[neighbour] = true;
                first_hop[neighbour] = first_hop[vertex];
                queue.push_back(neighbour);
            }
        }
    }
    None
}
