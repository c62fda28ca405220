//! Fixed-capacity FIFO sample window.

use crate::Statistics;

/// Number of samples kept per channel (about five seconds of history at the
/// usual poll cadence).
pub const WINDOW_CAPACITY: usize = 5;

/// Rolling buffer of the `N` most recent samples of one channel.
///
/// Insertion order is recency: [`iter`](Self::iter) yields the oldest sample
/// first. Statistics are refreshed on every [`push`](Self::push).
#[derive(Debug, Clone, Copy)]
pub struct SampleWindow<const N: usize = WINDOW_CAPACITY> {
    samples: [f64; N],
    /// Slot holding the oldest sample.
    head: usize,
    len: usize,
    statistics: Statistics,
}

impl<const N: usize> SampleWindow<N> {
    /// Create an empty window.
    pub fn new() -> Self {
        Self {
            samples: [0.0; N],
            head: 0,
            len: 0,
            statistics: Statistics::default(),
        }
    }

    /// Append a sample, evicting and returning the oldest one if the window
    /// was already full.
    pub fn push(&mut self, sample: f64) -> Option<f64> {
        if N == 0 {
            return None;
        }

        let evicted = if self.len == N {
            let oldest = self.samples.get_mut(self.head).map(|slot| {
                let previous = *slot;
                *slot = sample;
                previous
            });
            self.head = (self.head + 1) % N;
            oldest
        } else {
            if let Some(slot) = self.samples.get_mut((self.head + self.len) % N) {
                *slot = sample;
            }
            self.len += 1;
            None
        };

        let mut statistics = self.statistics;
        statistics.update_from(self.iter());
        self.statistics = statistics;
        evicted
    }

    /// Drop every sample and zero the statistics.
    pub fn clear(&mut self) {
        self.head = 0;
        self.len = 0;
        self.statistics = Statistics::default();
    }

    /// Samples from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = f64> + Clone + '_ {
        (0..self.len).filter_map(move |offset| self.samples.get((self.head + offset) % N).copied())
    }

    /// Most recently pushed sample.
    pub fn latest(&self) -> Option<f64> {
        self.len
            .checked_sub(1)
            .and_then(|last| self.samples.get((self.head + last) % N).copied())
    }

    /// Statistics over the current contents.
    pub fn statistics(&self) -> Statistics {
        self.statistics
    }

    /// Number of samples currently held.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no sample has been pushed since construction or `clear`.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether the window holds `N` samples.
    pub fn is_full(&self) -> bool {
        self.len == N
    }

    /// Maximum number of samples, `N`.
    pub fn capacity(&self) -> usize {
        N
    }
}

impl<const N: usize> Default for SampleWindow<N> {
    fn default() -> Self {
        Self::new()
    }
}
