//! Summary statistics derived from a sample window.

use serde::{Deserialize, Serialize};

/// Statistics of the samples currently held by a window.
///
/// All fields are zero for an empty window. `sd` is the sample standard
/// deviation (`n - 1` divisor) and is only recomputed once at least two
/// samples are present; with fewer it keeps its previous value.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Statistics {
    /// Number of samples in the window.
    pub count: usize,
    /// Arithmetic mean of the samples.
    pub mean: f64,
    /// Smallest sample.
    pub min: f64,
    /// Largest sample.
    pub max: f64,
    /// Sample standard deviation.
    pub sd: f64,
}

impl Statistics {
    /// Recompute statistics over `samples`, carrying `sd` forward when fewer
    /// than two samples exist.
    pub fn update_from<I>(&mut self, samples: I)
    where
        I: IntoIterator<Item = f64> + Clone,
    {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;

        for sample in samples.clone() {
            count += 1;
            sum += sample;
            min = min.min(sample);
            max = max.max(sample);
        }

        self.count = count;
        if count == 0 {
            self.mean = 0.0;
            self.min = 0.0;
            self.max = 0.0;
            return;
        }

        let n = count as f64;
        self.mean = sum / n;
        self.min = min;
        self.max = max;

        if count >= 2 {
            let mean = self.mean;
            let squares: f64 = samples
                .into_iter()
                .map(|sample| {
                    let deviation = sample - mean;
                    deviation * deviation
                })
                .sum();
            self.sd = (squares / (n - 1.0)).sqrt();
        }
    }

    /// Whether no samples have been observed.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}
