//! PathObserver: streaming statistics for path-dependent payoffs.
//!
//! Statistics are accumulated as each sample is generated, so the engine
//! never stores a full path.
//!
//! - **Arithmetic average**: running sum / count
//! - **Maximum** / **Minimum**: running extremes, for barrier monitoring
//! - **Terminal**: the last observed sample

/// Streaming path observation statistics.
///
/// # Example
///
/// ```
/// use pricer_pricing::path_dependent::PathObserver;
///
/// let mut observer = PathObserver::new();
/// for price in [100.0, 105.0, 110.0, 95.0, 100.0] {
///     observer.observe(price);
/// }
///
/// assert_eq!(observer.arithmetic_average(), 102.0);
/// assert_eq!(observer.maximum(), 110.0);
/// assert_eq!(observer.minimum(), 95.0);
/// assert_eq!(observer.terminal(), 100.0);
/// ```
#[derive(Clone, Debug)]
pub struct PathObserver {
    /// Running sum: Σ S_i
    running_sum: f64,
    /// Running maximum price observed
    running_max: f64,
    /// Running minimum price observed
    running_min: f64,
    /// Number of observations
    count: usize,
    /// Most recent observation
    terminal: f64,
}

impl Default for PathObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl PathObserver {
    /// Creates a new empty path observer.
    #[inline]
    pub fn new() -> Self {
        Self {
            running_sum: 0.0,
            running_max: f64::NEG_INFINITY,
            running_min: f64::INFINITY,
            count: 0,
            terminal: 0.0,
        }
    }

    /// Records one path sample.
    #[inline]
    pub fn observe(&mut self, price: f64) {
        self.running_sum += price;
        self.running_max = self.running_max.max(price);
        self.running_min = self.running_min.min(price);
        self.count += 1;
        self.terminal = price;
    }

    /// Resets all statistics. Call before starting a new path.
    #[inline]
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// `Σ S_i / n` if `n > 0`, otherwise `0`.
    #[inline]
    pub fn arithmetic_average(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.running_sum / self.count as f64
        }
    }

    /// Maximum observed price, or `-inf` if no observations.
    #[inline]
    pub fn maximum(&self) -> f64 {
        self.running_max
    }

    /// Minimum observed price, or `+inf` if no observations.
    #[inline]
    pub fn minimum(&self) -> f64 {
        self.running_min
    }

    /// Last observed price.
    #[inline]
    pub fn terminal(&self) -> f64 {
        self.terminal
    }

    /// Number of observations.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }
}
