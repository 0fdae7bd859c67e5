#![allow(dead_code)] // each test binary uses a subset

use bs_surface::CalculationForm;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Market inputs `(S, K, T, r, sigma)` drawn from a realistic range.
#[derive(Debug, Clone, Copy)]
pub struct MarketSample {
    pub spot: f64,
    pub strike: f64,
    pub time: f64,
    pub rate: f64,
    pub vol: f64,
}

/// Seeded random samples so failures are reproducible.
pub fn random_market_samples(seed: u64, count: usize) -> Vec<MarketSample> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| MarketSample {
            spot: rng.gen_range(10.0..250.0),
            strike: rng.gen_range(10.0..250.0),
            time: rng.gen_range(0.02..5.0),
            rate: rng.gen_range(-0.02..0.10),
            vol: rng.gen_range(0.05..1.0),
        })
        .collect()
}

/// Calculation form with the textbook at-the-money inputs, percentages as typed.
pub fn atm_form(name: &str) -> CalculationForm {
    CalculationForm {
        name: name.to_string(),
        spot: "100".to_string(),
        strike: "100".to_string(),
        time_to_maturity: "1".to_string(),
        rate_pct: "5".to_string(),
        vol_pct: "20".to_string(),
    }
}
