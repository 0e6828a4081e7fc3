use serde::{Deserialize, Serialize};

/// Multiplier applied to an edge heavier than the edge that follows it.
pub const PENALTY: u64 = 5;

/// A walk through the graph together with its traversed weights and cost.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Path {
    pub sequence: Vec<usize>,
    pub edge_costs: Vec<u32>,
    pub cost: u64,
}

impl Path {
    pub fn new(sequence: Vec<usize>, edge_costs: Vec<u32>, penalty: u64) -> Self {
        let cost = score(&edge_costs, penalty);
        Self {
            sequence,
            edge_costs,
            cost,
        }
    }

    /// The trivial path of a single-vertex graph.
    pub fn singleton(vertex: usize) -> Self {
        Self {
            sequence: vec![vertex],
            edge_costs: Vec::new(),
            cost: 0,
        }
    }

    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.sequence.windows(2).map(|w| (w[0], w[1]))
    }
}

/// Sums `edge_costs`, multiplying by `penalty` every edge that is heavier than
/// its successor.
///
/// An edge whose weight equals the weight of the final edge is always counted
/// unpenalised, whatever its successor weighs.
pub fn score(edge_costs: &[u32], penalty: u64) -> u64 {
    let Some(&last) = edge_costs.last() else {
        return 0;
    };
    edge_costs
        .iter()
        .enumerate()
        .map(|(i, &weight)| {
            if weight == last || weight <= edge_costs[i + 1] {
                weight as u64
            } else {
                penalty * weight as u64
            }
        })
        .sum()
}
