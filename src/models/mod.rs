pub mod bs;
pub mod surface;

/// Numeric helpers shared by the pricer and the surface generator
pub mod utils {
    use statrs::distribution::{ContinuousCDF, Normal};

    /// Standard normal cumulative distribution function Φ(x).
    ///
    /// Backed by statrs, whose erfc-based implementation is accurate to well
    /// below 1e-10 across the real line.
    pub fn norm_cdf(x: f64) -> f64 {
        // N(0, 1) is always a valid distribution
        match Normal::new(0.0, 1.0) {
            Ok(n) => n.cdf(x),
            Err(_) => f64::NAN,
        }
    }

    /// `n` evenly spaced samples across `[min, max]`, both endpoints included.
    ///
    /// The step is `(max - min) / (n - 1)`. The last sample is pinned to `max`
    /// so accumulated rounding never moves the upper endpoint. Reversed or
    /// equal bounds are returned as-is (descending or constant).
    pub fn linspace(min: f64, max: f64, n: usize) -> Vec<f64> {
        match n {
            0 => Vec::new(),
            1 => vec![min],
            _ => {
                let step = (max - min) / (n - 1) as f64;
                let mut out: Vec<f64> = (0..n).map(|i| min + step * i as f64).collect();
                out[n - 1] = max;
                out
            }
        }
    }

}
