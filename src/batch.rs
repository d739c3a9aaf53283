use std::fmt;
use std::fmt::Display;

use log::{error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::algorithm::Algorithm;
use crate::array_model::{ArrayModel, SortKey};
use crate::clock::InstantClock;
use crate::error::Result;
use crate::render::NullRenderer;
use crate::scheduler::{Speed, StepScheduler};
use crate::sorter::{sort, RunReport};

/// Runs `algorithm` with no rendering and no real waiting.
pub fn sort_headless<T: SortKey>(arr: &mut ArrayModel<T>, algorithm: Algorithm) -> Result<RunReport> {
    let scheduler = StepScheduler::detached(InstantClock::new(), Speed::default());
    sort(arr, algorithm, &mut NullRenderer, scheduler)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub algorithm: Algorithm,
    pub runs: usize,
    pub failures: usize,
    pub comparisons: u64,
    pub writes: u64,
    pub steps: u64,
}

impl Summary {
    fn mean(&self, total: u64) -> f64 {
        if self.runs == 0 {
            0.0
        } else {
            total as f64 / self.runs as f64
        }
    }
}

impl Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<10} runs {:>5}  failures {:>3}  avg comparisons {:>8.1}  avg writes {:>8.1}  avg steps {:>8.1}",
            self.algorithm.name(),
            self.runs,
            self.failures,
            self.mean(self.comparisons),
            self.mean(self.writes),
            self.mean(self.steps)
        )
    }
}

/// Sorts `rounds` seeded random arrays with every algorithm, one algorithm
/// per rayon task, and checks each result against the standard library.
pub fn verify(rounds: usize, size: usize, seed: u64) -> Vec<Summary> {
    Algorithm::ALL
        .par_iter()
        .map(|&algorithm| verify_one(algorithm, rounds, size, seed))
        .collect()
}

fn verify_one(algorithm: Algorithm, rounds: usize, size: usize, seed: u64) -> Summary {
    let mut summary = Summary {
        algorithm,
        runs: rounds,
        failures: 0,
        comparisons: 0,
        writes: 0,
        steps: 0,
    };
    for round in 0..rounds {
        let mut rng = StdRng::seed_from_u64(seed.wrapping_add(round as u64));
        let mut arr = ArrayModel::shuffled(&mut rng, size);
        let mut expected = arr.as_slice().to_vec();
        expected.sort_unstable();

        match sort_headless(&mut arr, algorithm) {
            Ok(report) if arr.as_slice() == expected.as_slice() => {
                summary.comparisons += report.stats.comparisons;
                summary.writes += report.stats.writes;
                summary.steps += report.stats.steps;
            }
            Ok(_) => {
                error!("{algorithm} sort produced {arr} (round {round}, seed {seed})");
                summary.failures += 1;
            }
            Err(e) => {
                error!("{algorithm} sort failed: {e} (round {round}, seed {seed})");
                summary.failures += 1;
            }
        }
    }
    info!("{summary}");
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_reports_no_failures() {
        let summaries = verify(25, 20, 12345);
        assert_eq!(summaries.len(), Algorithm::ALL.len());
        for summary in &summaries {
            assert_eq!(summary.failures, 0, "{summary}");
            assert_eq!(summary.runs, 25);
            assert!(summary.steps > 0);
        }
        // every pair compared once per run
        let bubble = summaries.iter().find(|s| s.algorithm == Algorithm::Bubble).unwrap();
        assert_eq!(bubble.comparisons, 25 * 190);
    }
}
