//! SVG rendering of a [`SensitivitySurface`] as two side-by-side heatmaps.
//!
//! Each panel maps spot price to x and volatility (in percent) to y, with the
//! lowest-volatility row at the bottom. Cells tile the axis extent
//! `[min, max]` evenly, and each panel carries its own colour bar scaled to the
//! finite values of its grid.

use std::path::Path;

use anyhow::{anyhow, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::colors::colormaps::{ColorMap, ViridisRGB};
use tracing::info;

use crate::models::bs::OptionType;
use crate::models::surface::SensitivitySurface;

const COLOR_BAR_WIDTH: u32 = 90;
const COLOR_BAR_STEPS: usize = 64;

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 600,
        }
    }
}

pub fn panel_title(option_type: OptionType) -> &'static str {
    match option_type {
        OptionType::Call => "Call Option Price Heatmap",
        OptionType::Put => "Put Option Price Heatmap",
    }
}

/// Sorted axis bounds, widened when the extent collapses to a point.
fn axis_bounds(a: f64, b: f64) -> (f64, f64) {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    if hi > lo {
        (lo, hi)
    } else {
        (lo - 0.5, hi + 0.5)
    }
}

/// Colour scale bounds for a grid. Flat or entirely non-finite grids get a unit span.
fn scale_bounds(range: Option<(f64, f64)>) -> (f64, f64) {
    match range {
        Some((lo, hi)) if hi > lo => (lo, hi),
        Some((v, _)) => (v - 0.5, v + 0.5),
        None => (0.0, 1.0),
    }
}

fn cell_color(value: f64, lo: f64, hi: f64) -> RGBColor {
    if !value.is_finite() {
        return RGBColor(200, 200, 200);
    }
    let v = value.clamp(lo, hi);
    ViridisRGB.get_color_normalized(v, lo, hi)
}

/// Cell edges along one axis: `n` equal cells across the extent `(start, end)`.
fn cell_edges(start: f64, end: f64, n: usize) -> Vec<(f64, f64)> {
    let width = (end - start) / n as f64;
    (0..n)
        .map(|k| {
            let a = start + width * k as f64;
            let b = start + width * (k + 1) as f64;
            (a.min(b), a.max(b))
        })
        .collect()
}

fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    surface: &SensitivitySurface,
    option_type: OptionType,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let (rows, cols) = surface.dimensions();
    if rows == 0 || cols == 0 {
        return Err(anyhow!("Cannot render an empty surface"));
    }

    let spot_start = surface.spot_axis[0];
    let spot_end = surface.spot_axis[cols - 1];
    let vol_start = surface.vol_axis[0] * 100.0;
    let vol_end = surface.vol_axis[rows - 1] * 100.0;

    // plotters cannot lay out ticks on an infinite or NaN range
    if ![spot_start, spot_end, vol_start, vol_end]
        .iter()
        .all(|v| v.is_finite())
    {
        return Err(anyhow!(
            "Axis limits must be finite: spot [{}, {}], volatility [{}%, {}%]",
            spot_start,
            spot_end,
            vol_start,
            vol_end
        ));
    }

    let (x_lo, x_hi) = axis_bounds(spot_start, spot_end);
    let (y_lo, y_hi) = axis_bounds(vol_start, vol_end);
    let (c_lo, c_hi) = scale_bounds(surface.value_range(option_type));

    let (panel_w, _) = area.dim_in_pixel();
    let (map_area, bar_area) =
        area.split_horizontally(panel_w.saturating_sub(COLOR_BAR_WIDTH));

    let mut chart = ChartBuilder::on(&map_area)
        .margin(10)
        .caption(panel_title(option_type), ("sans-serif", 22))
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_desc("Spot Price")
        .y_desc("Volatility (%)")
        .draw()?;

    // a collapsed axis fills the widened bounds instead
    let x_cells = if spot_start == spot_end {
        cell_edges(x_lo, x_hi, cols)
    } else {
        cell_edges(spot_start, spot_end, cols)
    };
    let y_cells = if vol_start == vol_end {
        cell_edges(y_lo, y_hi, rows)
    } else {
        cell_edges(vol_start, vol_end, rows)
    };
    let grid = surface.grid(option_type);

    chart.draw_series(grid.iter().enumerate().flat_map(|(i, row)| {
        let (y0, y1) = y_cells[i];
        let x_cells = &x_cells;
        row.iter().enumerate().map(move |(j, &v)| {
            let (x0, x1) = x_cells[j];
            Rectangle::new([(x0, y0), (x1, y1)], cell_color(v, c_lo, c_hi).filled())
        })
    }))?;

    let mut bar = ChartBuilder::on(&bar_area)
        .margin_top(45)
        .margin_bottom(50)
        .margin_right(10)
        .y_label_area_size(50)
        .build_cartesian_2d(0.0..1.0, c_lo..c_hi)?;

    bar.configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_labels(0)
        .y_labels(6)
        .y_label_formatter(&|v| format!("{:.1}", v))
        .draw()?;

    let step = (c_hi - c_lo) / COLOR_BAR_STEPS as f64;
    bar.draw_series((0..COLOR_BAR_STEPS).map(|k| {
        let lo = c_lo + step * k as f64;
        let hi = lo + step;
        Rectangle::new(
            [(0.0, lo), (1.0, hi)],
            cell_color((lo + hi) / 2.0, c_lo, c_hi).filled(),
        )
    }))?;

    Ok(())
}

/// Draw the call and put heatmaps onto any drawing area, call on the left.
pub fn draw_heatmaps<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    surface: &SensitivitySurface,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;
    let panels = root.split_evenly((1, 2));
    draw_panel(&panels[0], surface, OptionType::Call)?;
    draw_panel(&panels[1], surface, OptionType::Put)?;
    root.present()?;
    Ok(())
}

/// Render both heatmaps into a single SVG file.
pub fn render_heatmaps(
    surface: &SensitivitySurface,
    options: &RenderOptions,
    path: &Path,
) -> Result<()> {
    let root = SVGBackend::new(path, (options.width, options.height)).into_drawing_area();
    draw_heatmaps(&root, surface)?;
    info!(path = %path.display(), "Heatmaps saved");
    Ok(())
}

/// Render both heatmaps to an in-memory SVG document.
pub fn render_heatmaps_to_string(
    surface: &SensitivitySurface,
    options: &RenderOptions,
) -> Result<String> {
    let mut buf = String::new();
    {
        let root =
            SVGBackend::with_string(&mut buf, (options.width, options.height)).into_drawing_area();
        draw_heatmaps(&root, surface)?;
    }
    Ok(buf)
}
