use anyhow::{anyhow, Result};
use antpath_algorithms::weighted_path::ant_colony::{run_aco, AcoConfig};
use antpath_challenges::weighted_path::{Graph, Track};
use rand::{
    rngs::{SmallRng, StdRng},
    Rng, SeedableRng,
};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use std::fs;

pub const NUM_OF_INSTANCES: usize = 100;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub track: Track,
    pub aco: AcoConfig,
    pub num_instances: usize,
    /// Master seed. Drawn from the OS when absent.
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            track: Track::default(),
            aco: AcoConfig::default(),
            num_instances: NUM_OF_INSTANCES,
            seed: None,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        if self.num_instances == 0 {
            return Err(anyhow!("Number of instances must be at least 1"));
        }
        self.track.validate()?;
        self.aco.validate()
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct InstanceReport {
    pub instance: usize,
    pub seed: u64,
    pub cost: u64,
    pub path: Vec<usize>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Summary {
    pub seed: u64,
    pub instances: usize,
    pub total_cost: u64,
    /// Total cost divided by the number of instances, rounded down.
    pub average_cost: u64,
    pub min_cost: u64,
    pub max_cost: u64,
    pub mean: f64,
    pub std_dev: Option<f64>,
}

/// Reads settings from a json string, or from a file when `settings` ends in `.json`.
pub fn load_settings(settings: &str) -> Result<Settings> {
    let settings = if settings.ends_with(".json") {
        fs::read_to_string(settings)
            .map_err(|e| anyhow!("Failed to read settings file {}: {}", settings, e))?
    } else {
        settings.to_string()
    };
    serde_json::from_str::<Settings>(&settings)
        .map_err(|e| anyhow!("Failed to parse settings: {}", e))
}

pub fn parse_vertex_count(input: &str) -> Result<usize> {
    let input = input.trim();
    let value = input
        .parse::<i64>()
        .map_err(|_| anyhow!("Number of vertices must be an integer (got '{}')", input))?;
    if value <= 0 {
        return Err(anyhow!(
            "Number of vertices must be a positive integer (got {})",
            value
        ));
    }
    usize::try_from(value).map_err(|_| anyhow!("Number of vertices ({}) is too large", value))
}

/// Generates and improves `settings.num_instances` graphs one after another,
/// handing each result to `on_instance` as soon as it is known.
pub fn run_instances<F>(
    vertex_count: usize,
    settings: &Settings,
    mut on_instance: F,
) -> Result<Summary>
where
    F: FnMut(&InstanceReport),
{
    if vertex_count == 0 {
        return Err(anyhow!("Number of vertices must be at least 1"));
    }
    settings.validate()?;
    let seed = match settings.seed {
        Some(seed) => seed,
        None => StdRng::from_entropy().gen(),
    };
    log::info!("master seed {}", seed);
    let mut master = StdRng::seed_from_u64(seed);

    let mut costs = Vec::with_capacity(settings.num_instances);
    for instance in 1..=settings.num_instances {
        let instance_seed: u64 = master.gen();
        let mut rng = SmallRng::seed_from_u64(instance_seed);
        let graph = Graph::generate(vertex_count, &settings.track, &mut rng)?;
        log::debug!(
            "instance {}: {} vertices, {} edges, seed {}",
            instance,
            graph.vertex_count(),
            graph.edge_count(),
            instance_seed
        );
        let colony = run_aco(graph, &settings.aco, &mut rng)?;
        let best = colony
            .best_solution()
            .ok_or_else(|| anyhow!("Instance {} produced no path", instance))?;
        costs.push(best.cost);
        on_instance(&InstanceReport {
            instance,
            seed: instance_seed,
            cost: best.cost,
            path: best.sequence.clone(),
        });
    }

    let total_cost: u64 = costs.iter().sum();
    let samples: Vec<f64> = costs.iter().map(|&cost| cost as f64).collect();
    Ok(Summary {
        seed,
        instances: costs.len(),
        total_cost,
        average_cost: total_cost / costs.len() as u64,
        min_cost: costs.iter().copied().min().unwrap_or(0),
        max_cost: costs.iter().copied().max().unwrap_or(0),
        mean: Statistics::mean(&samples),
        std_dev: (samples.len() > 1).then(|| Statistics::std_dev(&samples)),
    })
}
