use rand::prelude::*;

use crate::core::{Priority, Ticks};

#[derive(Debug, Clone, PartialEq)]
pub struct Workload {
    pub ticks: u64,
    pub p_arrival: f64,
    pub p_block: f64,
    pub p_unblock: f64,
    pub p_short: f64,
    pub short_burst: Ticks,
    pub long_burst: Ticks,
    pub max_priority: Priority,
    pub seed: u64,
}

impl Default for Workload {
    fn default() -> Self {
        Self {
            ticks: 100,
            p_arrival: 0.3,
            p_block: 0.05,
            p_unblock: 0.1,
            p_short: 0.3,
            short_burst: 2,
            long_burst: 6,
            max_priority: 4,
            seed: 0,
        }
    }
}

impl Workload {
    // One TICK per step; same parameters, same script
    pub fn generate(&self) -> Vec<String> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut lines = Vec::new();
        let mut admitted = 0u64;

        for _ in 0..self.ticks {
            if rng.random::<f64>() < self.p_arrival {
                let burst = if rng.random::<f64>() < self.p_short {
                    self.short_burst
                } else {
                    self.long_burst
                };
                let priority = rng.random_range(0..=self.max_priority.max(0));
                lines.push(format!("ADD_TASK T{admitted} {priority} {burst}"));
                admitted += 1;
            }
            if rng.random::<f64>() < self.p_block {
                lines.push("BLOCK".to_string());
            }
            if rng.random::<f64>() < self.p_unblock {
                lines.push("UNBLOCK".to_string());
            }
            lines.push("TICK".to_string());
        }

        lines.extend(
            ["PRINT_READY", "PRINT_BLOCKED", "STATUS", "QUIT"]
                .into_iter()
                .map(String::from),
        );
        lines
    }
}
