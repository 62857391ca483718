//! Batch layout for parallel simulation.

/// Trials drawn by one seeded batch.
pub const DEFAULT_BATCH_SIZE: usize = 4096;

/// Configuration for parallel execution.
///
/// Results depend on `batch_size` (each batch owns a seed) but not on
/// `parallel_threshold`, which only decides whether rayon is used.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Trials per batch
    pub batch_size: usize,
    /// Minimum trial count before batches run on the rayon pool
    pub parallel_threshold: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            parallel_threshold: 2 * DEFAULT_BATCH_SIZE,
        }
    }
}

impl SimulationConfig {
    /// Creates a new configuration; a zero batch size is raised to 1.
    pub fn new(batch_size: usize, parallel_threshold: usize) -> Self {
        Self {
            batch_size: batch_size.max(1),
            parallel_threshold,
        }
    }

    /// Returns whether to use parallel processing for the given trial count.
    #[inline]
    pub fn should_parallelize(&self, iterations: usize) -> bool {
        iterations >= self.parallel_threshold
    }

    /// Number of batches needed for `iterations` trials.
    #[inline]
    pub fn batch_count(&self, iterations: usize) -> usize {
        iterations.div_ceil(self.batch_size.max(1))
    }
}
