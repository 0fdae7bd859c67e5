// Example: heatmap_demo.rs
// Prices a few options through a session, prints the results table with hover
// details, then renders the default call/put sensitivity heatmaps.
//
// Usage:
//     cargo run --example heatmap_demo -- [output.svg]

use std::env;
use std::path::Path;

use anyhow::Result;
use bs_surface::{
    render_heatmaps, CalculationForm, InputMode, RenderOptions, Session, SurfaceSpec,
};

fn form(name: &str, spot: &str, strike: &str, time: &str, rate: &str, vol: &str) -> CalculationForm {
    CalculationForm {
        name: name.to_string(),
        spot: spot.to_string(),
        strike: strike.to_string(),
        time_to_maturity: time.to_string(),
        rate_pct: rate.to_string(),
        vol_pct: vol.to_string(),
    }
}

fn main() -> Result<()> {
    let output = env::args().nth(1).unwrap_or_else(|| "heatmap.svg".to_string());

    println!("Black-Scholes Calculator Demo");
    println!("=============================");

    let mut session = Session::new(SurfaceSpec::default());
    let inputs = vec![
        form("atm", "100", "100", "1", "5", "20"),
        form("otm-call", "90", "110", "0.5", "3", "35"),
        form("long-dated", "100", "80", "3", "4", "25"),
        form("typo", "100", "abc", "1", "5", "20"),
        form("", "100", "100", "1", "5", "20"),
    ];

    for input in inputs {
        session.mode = InputMode::Calculation(input);
        let _ = session.calculate();
        println!("  status: {}", session.status());
    }

    println!("\n{:<12} {:>10} {:>10}", "Name", "Call", "Put");
    println!("{}", "-".repeat(34));
    for row in session.rows() {
        println!("{:<12} {:>10} {:>10}", row.name, row.call_price, row.put_price);
    }

    if let Some(details) = session.details_for("otm-call") {
        println!("\nDetails for otm-call:\n{}", details);
    }

    session.switch_tab("Heatmap");
    let surface = session.update_heatmap()?;
    println!(
        "\nSurface {}x{}: call range {:?}, put range {:?}",
        surface.dimensions().0,
        surface.dimensions().1,
        surface.value_range(bs_surface::OptionType::Call),
        surface.value_range(bs_surface::OptionType::Put)
    );

    render_heatmaps(&surface, &RenderOptions::default(), Path::new(&output))?;
    println!("Chart saved to {}", output);
    Ok(())
}
