//! # bs-surface: Black-Scholes Pricing and Sensitivity Heatmaps
//!
//! `bs-surface` prices European call and put options with the closed-form
//! Black-Scholes formula and evaluates those prices over a grid of spot prices
//! and volatilities, producing the data behind a pair of sensitivity heatmaps.
//!
//! ## Core Features
//!
//! - **Pricer**: pure Black-Scholes call/put pricing from five market inputs
//! - **Surface Generator**: 10×10 call/put grids over spot × volatility
//! - **Input Validation**: text forms parsed into typed requests, percentages
//!   converted to decimals, one error type for every user-correctable mistake
//! - **Session**: results table, hover details and status line for a front end
//! - **Rendering**: side-by-side SVG heatmaps with per-panel colour bars
//!
//! ## Quick Start
//!
//! ```rust
//! use bs_surface::{generate_surface, price, OptionParameters, OptionType, SurfaceSpec};
//!
//! let params = OptionParameters::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call);
//! let call = price(&params);
//! assert!((call - 10.4506).abs() < 1e-3);
//!
//! let surface = generate_surface((50.0, 150.0), (0.10, 0.50), &SurfaceSpec::default());
//! assert_eq!(surface.dimensions(), (10, 10));
//! ```
//!
//! ## Conventions
//!
//! - Rates and volatilities are decimals everywhere in the core (0.05 = 5%).
//!   Only the input forms accept percentages.
//! - The pricer does not validate its inputs. Non-positive maturity or
//!   volatility yields NaN or infinity rather than an error.

// ================================================================================================
// MODULES
// ================================================================================================

pub mod config;
pub mod input;
pub mod models;
pub mod render;
pub mod session;

// ================================================================================================
// PUBLIC RE-EXPORTS
// ================================================================================================

// Pricing
pub use models::bs::{bs_call_price, bs_put_price, OptionParameters, OptionType, PricePair};

// Surface generation
pub use models::surface::{SensitivitySurface, SurfaceSpec, DEFAULT_GRID_POINTS};
pub use models::utils::{linspace, norm_cdf};

// Presentation boundary
pub use config::AppConfig;
pub use input::{
    CalculationForm, CalculationRequest, HeatmapForm, HeatmapRequest, InputError, InputMode,
};
pub use render::{render_heatmaps, render_heatmaps_to_string, RenderOptions};
pub use session::{BatchSummary, ResultRow, Session};

// ================================================================================================
// PRICING API
// ================================================================================================

/// Theoretical Black-Scholes price of a European option.
///
/// ```text
/// d1 = (ln(S/K) + (r + σ²/2)·T) / (σ·√T)
/// d2 = d1 − σ·√T
/// call = S·Φ(d1) − K·e^(−rT)·Φ(d2)
/// put  = K·e^(−rT)·Φ(−d2) − S·Φ(−d1)
/// ```
///
/// # Preconditions
///
/// `spot`, `strike`, `time_to_maturity` and `volatility` must be positive.
/// They are not checked; callers validate before pricing.
///
/// # Example
///
/// ```rust
/// use bs_surface::{price, OptionParameters, OptionType};
///
/// let put = price(&OptionParameters::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Put));
/// assert!((put - 5.5735).abs() < 1e-3);
/// ```
pub fn price(params: &OptionParameters) -> f64 {
    models::bs::price(params)
}

/// Call and put prices for one set of market inputs.
///
/// Arguments follow the order `(S, K, T, r, sigma)`.
pub fn price_pair(
    spot: f64,
    strike: f64,
    time_to_maturity: f64,
    risk_free_rate: f64,
    volatility: f64,
) -> PricePair {
    models::bs::price_pair(spot, strike, time_to_maturity, risk_free_rate, volatility)
}

// ================================================================================================
// SURFACE API
// ================================================================================================

/// Evaluate call and put prices over an evenly spaced spot × volatility grid.
///
/// # Arguments
///
/// * `spot_range` - `(min_spot, max_spot)`, both included
/// * `vol_range` - `(min_vol, max_vol)` as decimals, both included
/// * `spec` - strike, maturity, rate and samples per axis held fixed across the
///   grid. [`SurfaceSpec::default()`] is `K = 100, T = 1, r = 0.05`, 10 points.
///
/// # Returns
///
/// A [`SensitivitySurface`] whose grids are indexed `[vol_index][spot_index]`:
/// rows run over volatility and columns over spot, so
/// `call_grid[0][0]` is priced at `(min_spot, min_vol)` and
/// `call_grid[n-1][n-1]` at `(max_spot, max_vol)`.
///
/// # Degenerate ranges
///
/// `min >= max` on either axis is accepted and produces a constant or
/// descending axis. A warning is logged.
pub fn generate_surface(
    spot_range: (f64, f64),
    vol_range: (f64, f64),
    spec: &SurfaceSpec,
) -> SensitivitySurface {
    models::surface::generate_surface(spot_range, vol_range, spec)
}
