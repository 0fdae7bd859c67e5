//! Spot/volatility sensitivity surface.
//!
//! Evaluates the Black-Scholes pricer over a rectangular grid of spot prices and
//! volatilities with strike, maturity and rate held fixed. Grids are stored
//! row-major with the row index running over volatility (ascending for an
//! ascending range) and the column index over spot, which is the orientation a
//! heatmap with volatility on the y-axis expects.

use std::io::Write;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::bs::{price_pair, OptionType};
use crate::models::utils::linspace;

/// Number of samples per axis used by the heatmap view.
pub const DEFAULT_GRID_POINTS: usize = 10;

/// Contract terms held fixed across the surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceSpec {
    /// Strike price (K)
    pub strike: f64,
    /// Years to expiry (T)
    pub time_to_maturity: f64,
    /// Risk-free rate as a decimal (r)
    pub risk_free_rate: f64,
    /// Samples per axis
    pub grid_points: usize,
}

impl Default for SurfaceSpec {
    fn default() -> Self {
        Self {
            strike: 100.0,
            time_to_maturity: 1.0,
            risk_free_rate: 0.05,
            grid_points: DEFAULT_GRID_POINTS,
        }
    }
}

/// Call and put prices evaluated over a spot × volatility grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivitySurface {
    /// Spot samples, one per column
    pub spot_axis: Vec<f64>,
    /// Volatility samples as decimals, one per row
    pub vol_axis: Vec<f64>,
    /// `call_grid[i][j]` = call price at `(spot_axis[j], vol_axis[i])`
    pub call_grid: Vec<Vec<f64>>,
    /// `put_grid[i][j]` = put price at `(spot_axis[j], vol_axis[i])`
    pub put_grid: Vec<Vec<f64>>,
    /// Terms used to build the grids
    pub spec: SurfaceSpec,
}

impl SensitivitySurface {
    /// `(rows, columns)`, i.e. `(vol samples, spot samples)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.vol_axis.len(), self.spot_axis.len())
    }

    pub fn call_at(&self, vol_index: usize, spot_index: usize) -> Option<f64> {
        self.call_grid.get(vol_index)?.get(spot_index).copied()
    }

    pub fn put_at(&self, vol_index: usize, spot_index: usize) -> Option<f64> {
        self.put_grid.get(vol_index)?.get(spot_index).copied()
    }

    pub fn grid(&self, option_type: OptionType) -> &[Vec<f64>] {
        match option_type {
            OptionType::Call => &self.call_grid,
            OptionType::Put => &self.put_grid,
        }
    }

    /// Smallest and largest finite value in one grid, `None` when no cell is finite.
    pub fn value_range(&self, option_type: OptionType) -> Option<(f64, f64)> {
        self.grid(option_type)
            .iter()
            .flatten()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// Export the surface in long format: one `volatility,spot,call,put` record per cell.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(["volatility", "spot", "call", "put"])?;
        for (i, vol) in self.vol_axis.iter().enumerate() {
            for (j, spot) in self.spot_axis.iter().enumerate() {
                wtr.serialize((vol, spot, self.call_grid[i][j], self.put_grid[i][j]))
                    .with_context(|| format!("Failed to write surface cell ({}, {})", i, j))?;
            }
        }
        wtr.flush().context("Failed to flush surface CSV")?;
        Ok(())
    }
}

/// Build the call and put grids over `spot_range` × `vol_range`.
///
/// Both ranges are `(min, max)` pairs, volatilities as decimals. Each axis holds
/// `spec.grid_points` evenly spaced samples including both endpoints.
///
/// Equal or reversed bounds are not rejected: the axis comes out constant or
/// descending and the grids are filled accordingly.
///
/// # Example
///
/// ```rust
/// use bs_surface::{generate_surface, SurfaceSpec};
///
/// let surface = generate_surface((50.0, 150.0), (0.10, 0.50), &SurfaceSpec::default());
/// assert_eq!(surface.dimensions(), (10, 10));
/// ```
pub fn generate_surface(
    spot_range: (f64, f64),
    vol_range: (f64, f64),
    spec: &SurfaceSpec,
) -> SensitivitySurface {
    let (min_spot, max_spot) = spot_range;
    let (min_vol, max_vol) = vol_range;

    if min_spot >= max_spot || min_vol >= max_vol {
        warn!(
            min_spot,
            max_spot, min_vol, max_vol, "Degenerate or reversed surface range"
        );
    }

    let spot_axis = linspace(min_spot, max_spot, spec.grid_points);
    let vol_axis = linspace(min_vol, max_vol, spec.grid_points);

    let mut call_grid = Vec::with_capacity(vol_axis.len());
    let mut put_grid = Vec::with_capacity(vol_axis.len());

    for &sigma in &vol_axis {
        let (calls, puts): (Vec<f64>, Vec<f64>) = spot_axis
            .iter()
            .map(|&s| {
                let p = price_pair(
                    s,
                    spec.strike,
                    spec.time_to_maturity,
                    spec.risk_free_rate,
                    sigma,
                );
                (p.call, p.put)
            })
            .unzip();
        call_grid.push(calls);
        put_grid.push(puts);
    }

    debug!(
        rows = vol_axis.len(),
        cols = spot_axis.len(),
        strike = spec.strike,
        "Generated sensitivity surface"
    );

    SensitivitySurface {
        spot_axis,
        vol_axis,
        call_grid,
        put_grid,
        spec: *spec,
    }
}
