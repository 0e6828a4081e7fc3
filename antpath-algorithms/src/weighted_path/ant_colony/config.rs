use anyhow::{anyhow, Result};
use antpath_challenges::weighted_path::PENALTY;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const NUM_OF_ANTS: usize = 100;
pub const TIME_BUDGET_MS: u64 = 2000;
pub const EVAPORATION: f64 = 0.1;
pub const SMOOTHING_THRESHOLD: f64 = 0.04;

/// Hyperparameters of the colony. Every field falls back to its default when
/// missing from a settings document.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AcoConfig {
    /// Paths constructed per iteration.
    pub num_ants: usize,
    /// Wall-clock budget per instance, polled once per iteration.
    pub time_budget_ms: Option<u64>,
    /// Iteration cap, for runs that must not depend on the clock.
    pub max_iterations: Option<usize>,
    /// Fraction of pheromone lost per evaporation.
    pub evaporation: f64,
    /// Min/max pheromone ratio below which selection weights are smoothed.
    pub smoothing_threshold: f64,
    pub penalty: u64,
    /// Pheromone laid on each edge of the bootstrap best path.
    pub first_deposit: f64,
    /// Percentage points added to the pheromone-use probability per iteration.
    pub probability_step: u32,
    /// Give every ant its own generator forked from the instance generator.
    pub reseed_per_ant: bool,
    /// Steps per vertex after which dead ends are escaped along a shortest route.
    pub dead_end_step_factor: usize,
}

impl Default for AcoConfig {
    fn default() -> Self {
        Self {
            num_ants: NUM_OF_ANTS,
            time_budget_ms: Some(TIME_BUDGET_MS),
            max_iterations: None,
            evaporation: EVAPORATION,
            smoothing_threshold: SMOOTHING_THRESHOLD,
            penalty: PENALTY,
            first_deposit: 1.0,
            probability_step: 1,
            reseed_per_ant: true,
            dead_end_step_factor: 4,
        }
    }
}

impl AcoConfig {
    pub fn validate(&self) -> Result<()> {
        if self.num_ants == 0 {
            return Err(anyhow!("Number of ants must be at least 1"));
        }
        if !(0.0..1.0).contains(&self.evaporation) {
            return Err(anyhow!(
                "Evaporation ({}) must lie in [0, 1)",
                self.evaporation
            ));
        }
        if !(0.0..=1.0).contains(&self.smoothing_threshold) {
            return Err(anyhow!(
                "Smoothing threshold ({}) must lie in [0, 1]",
                self.smoothing_threshold
            ));
        }
        if !(self.first_deposit.is_finite() && self.first_deposit > 0.0) {
            return Err(anyhow!(
                "First deposit ({}) must be positive",
                self.first_deposit
            ));
        }
        if self.max_iterations == Some(0) {
            return Err(anyhow!("Iteration cap must be at least 1"));
        }
        match (self.time_budget_ms, self.max_iterations) {
            (None, None) => Err(anyhow!(
                "Either a time budget or an iteration cap is required"
            )),
            (Some(0), None) => Err(anyhow!(
                "Time budget must be positive without an iteration cap"
            )),
            _ => Ok(()),
        }
    }

    pub fn time_budget(&self) -> Option<Duration> {
        self.time_budget_ms.map(Duration::from_millis)
    }
}
