use bs_surface::render::panel_title;
use bs_surface::{
    generate_surface, render_heatmaps, render_heatmaps_to_string, OptionType, RenderOptions,
    SurfaceSpec,
};

#[test]
fn test_svg_contains_both_panels_and_axis_labels() {
    let surface = generate_surface((50.0, 150.0), (0.1, 0.5), &SurfaceSpec::default());
    let svg = render_heatmaps_to_string(&surface, &RenderOptions::default()).unwrap();

    assert!(svg.contains("<svg"));
    assert!(svg.contains(panel_title(OptionType::Call)));
    assert!(svg.contains(panel_title(OptionType::Put)));
    assert!(svg.contains("Spot Price"));
    assert!(svg.contains("Volatility (%)"));
    // 100 heatmap cells per panel plus the colour bars
    assert!(svg.matches("<rect").count() >= 200);
}

#[test]
fn test_degenerate_surface_still_renders() {
    let surface = generate_surface((100.0, 100.0), (0.3, 0.3), &SurfaceSpec::default());
    let svg = render_heatmaps_to_string(&surface, &RenderOptions::default()).unwrap();
    assert!(svg.contains("Call Option Price Heatmap"));
}

#[test]
fn test_render_to_file() {
    let surface = generate_surface((80.0, 120.0), (0.15, 0.35), &SurfaceSpec::default());
    let path = std::env::temp_dir().join("bs_surface_render_test.svg");
    render_heatmaps(
        &surface,
        &RenderOptions {
            width: 800,
            height: 400,
        },
        &path,
    )
    .unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("Put Option Price Heatmap"));
    let _ = std::fs::remove_file(&path);
}

/// Infinite or NaN axis limits fail fast instead of reaching plotters.
#[test]
fn test_non_finite_axis_limits_are_rejected() {
    let cases = [
        ((50.0, f64::INFINITY), (0.1, 0.5)),
        ((f64::NAN, 150.0), (0.1, 0.5)),
        ((50.0, 150.0), (0.1, f64::INFINITY)),
        ((50.0, 150.0), (f64::NAN, 0.5)),
    ];
    for (spot_range, vol_range) in cases {
        let surface = generate_surface(spot_range, vol_range, &SurfaceSpec::default());
        let result = render_heatmaps_to_string(&surface, &RenderOptions::default());
        assert!(
            result.is_err(),
            "spot {:?} vol {:?} should not render",
            spot_range,
            vol_range
        );
    }
}
