//! Rayon-based trajectory parallelism.
//!
//! Trajectories are independent: each one reads the shared market
//! generator and position groups and owns its output. Work above the
//! configured threshold is spread over the rayon pool; results keep
//! trajectory order and the first failure short-circuits the rest.

use rayon::prelude::*;

/// Default number of trajectories per rayon work item.
pub const DEFAULT_BATCH_SIZE: usize = 16;

/// Default trajectory count at which parallel execution starts.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 8;

/// Configuration for parallel execution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParallelConfig {
    /// Minimum trajectories handed to one rayon task
    pub batch_size: usize,
    /// Minimum trajectories before using parallelism
    pub parallel_threshold: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl ParallelConfig {
    /// Creates a new parallel configuration.
    pub fn new(batch_size: usize, parallel_threshold: usize) -> Self {
        Self {
            batch_size: batch_size.max(1),
            parallel_threshold,
        }
    }

    /// Configuration that never parallelises.
    pub fn sequential() -> Self {
        Self::new(DEFAULT_BATCH_SIZE, usize::MAX)
    }

    /// Returns whether to use parallel processing for the given item count.
    #[inline]
    pub fn should_parallelize(&self, n_items: usize) -> bool {
        n_items >= self.parallel_threshold
    }

    /// Maps `0..count` through a fallible `task`, preserving index order.
    ///
    /// Returns the error of the first failing index reached; in parallel
    /// mode remaining work is abandoned as soon as rayon observes it.
    pub fn try_map_indices<R, E, F>(&self, count: usize, task: F) -> Result<Vec<R>, E>
    where
        R: Send,
        E: Send,
        F: Fn(usize) -> Result<R, E> + Sync + Send,
    {
        if self.should_parallelize(count) {
            (0..count)
                .into_par_iter()
                .with_min_len(self.batch_size)
                .map(task)
                .collect()
        } else {
            (0..count).map(task).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parallel_config_default() {
        let config = ParallelConfig::default();
        assert_eq!(config.batch_size, DEFAULT_BATCH_SIZE);
        assert_eq!(config.parallel_threshold, DEFAULT_PARALLEL_THRESHOLD);
        assert_eq!(ParallelConfig::new(0, 4).batch_size, 1);
    }

    #[test]
    fn test_should_parallelize() {
        let config = ParallelConfig::default();
        assert!(!config.should_parallelize(7));
        assert!(config.should_parallelize(8));
        assert!(!ParallelConfig::sequential().should_parallelize(1_000_000));
    }

    #[test]
    fn test_try_map_preserves_order() {
        for config in [ParallelConfig::new(1, 0), ParallelConfig::sequential()] {
            let squares: Result<Vec<usize>, String> = config.try_map_indices(100, |i| Ok(i * i));
            let squares = squares.unwrap();
            assert_eq!(squares.len(), 100);
            assert!(squares.iter().enumerate().all(|(i, &s)| s == i * i));
        }
    }

    #[test]
    fn test_try_map_short_circuits() {
        let config = ParallelConfig::new(1, 0);
        let result: Result<Vec<usize>, usize> =
            config.try_map_indices(50, |i| if i == 17 { Err(i) } else { Ok(i) });
        assert_eq!(result, Err(17));
    }
}
