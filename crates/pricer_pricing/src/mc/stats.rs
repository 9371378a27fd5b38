//! Streaming mean and variance with an associative merge.
//!
//! Each chunk of paths accumulates `(n, mean, M2)` with Welford's update;
//! chunks are combined with Chan et al.'s pairwise formula. Merging in a
//! fixed order makes the totals independent of how chunks were scheduled.

/// Running count, mean and sum of squared deviations.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RunningStats {
    count: usize,
    mean: f64,
    m2: f64,
}

impl RunningStats {
    /// Empty accumulator.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one sample (Welford).
    #[inline]
    pub fn push(&mut self, x: f64) {
        self.count += 1;
        let delta = x - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (x - self.mean);
    }

    /// Combines two accumulators as if all samples had been pushed into one.
    pub fn merge(self, other: Self) -> Self {
        if self.count == 0 {
            return other;
        }
        if other.count == 0 {
            return self;
        }
        let count = self.count + other.count;
        let (na, nb, n) = (self.count as f64, other.count as f64, count as f64);
        let delta = other.mean - self.mean;
        Self {
            count,
            mean: self.mean + delta * nb / n,
            m2: self.m2 + other.m2 + delta * delta * na * nb / n,
        }
    }

    /// Number of samples.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Sample mean (0 when empty).
    #[inline]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Unbiased sample variance; 0 with fewer than two samples.
    #[inline]
    pub fn sample_variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            (self.m2 / (self.count - 1) as f64).max(0.0)
        }
    }

    /// Standard error of the mean, `s / √n`.
    #[inline]
    pub fn std_error(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            (self.sample_variance() / self.count as f64).sqrt()
        }
    }
}

impl FromIterator<f64> for RunningStats {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut stats = Self::new();
        for x in iter {
            stats.push(x);
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_known_sample() {
        let stats: RunningStats = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0].into_iter().collect();
        assert_eq!(stats.count(), 8);
        assert_relative_eq!(stats.mean(), 5.0);
        assert_relative_eq!(stats.sample_variance(), 32.0 / 7.0, epsilon = 1e-12);
        assert_relative_eq!(stats.std_error(), (32.0 / 7.0 / 8.0_f64).sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_single_sample_has_zero_error() {
        let stats: RunningStats = std::iter::once(3.5).collect();
        assert_eq!(stats.mean(), 3.5);
        assert_eq!(stats.sample_variance(), 0.0);
        assert_eq!(stats.std_error(), 0.0);
    }

    #[test]
    fn test_constant_samples_have_exactly_zero_variance() {
        let a: RunningStats = std::iter::repeat(1.2345).take(1000).collect();
        let b: RunningStats = std::iter::repeat(1.2345).take(77).collect();
        let merged = a.merge(b);
        assert_eq!(merged.mean(), 1.2345);
        assert_eq!(merged.std_error(), 0.0);
    }

    #[test]
    fn test_merge_with_empty() {
        let a: RunningStats = [1.0, 2.0].into_iter().collect();
        assert_eq!(a.merge(RunningStats::new()), a);
        assert_eq!(RunningStats::new().merge(a), a);
    }

    proptest! {
        #[test]
        fn prop_merge_matches_single_pass(
            xs in proptest::collection::vec(-1e3f64..1e3, 1..200),
            split in 0usize..200,
        ) {
            let split = split.min(xs.len());
            let whole: RunningStats = xs.iter().copied().collect();
            let left: RunningStats = xs[..split].iter().copied().collect();
            let right: RunningStats = xs[split..].iter().copied().collect();
            let merged = left.merge(right);

            prop_assert_eq!(merged.count(), whole.count());
            prop_assert!((merged.mean() - whole.mean()).abs() <= 1e-9 * (1.0 + whole.mean().abs()));
            prop_assert!(
                (merged.sample_variance() - whole.sample_variance()).abs()
                    <= 1e-7 * (1.0 + whole.sample_variance())
            );
        }
    }
}
