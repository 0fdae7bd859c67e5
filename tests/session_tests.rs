mod test_utils;

use bs_surface::input::HeatmapForm;
use bs_surface::session::STATUS_CALCULATION_OK;
use bs_surface::{
    bs_call_price, BatchSummary, CalculationForm, InputError, InputMode, ResultRow, Session,
    SurfaceSpec,
};
use test_utils::atm_form;

fn session_with(form: CalculationForm) -> Session {
    let mut session = Session::default();
    session.mode = InputMode::Calculation(form);
    session
}

#[test]
fn test_successful_calculation_adds_formatted_row() {
    let mut session = session_with(atm_form("atm"));
    let row = session.calculate().expect("valid form should price").clone();

    assert_eq!(
        row,
        ResultRow {
            name: "atm".to_string(),
            call_price: "10.45".to_string(),
            put_price: "5.57".to_string(),
        }
    );
    assert_eq!(session.rows().len(), 1);
    assert_eq!(session.status(), STATUS_CALCULATION_OK);
}

#[test]
fn test_details_lookup_after_calculation() {
    let mut session = session_with(atm_form("atm"));
    session.calculate().unwrap();

    assert_eq!(
        session.details_for("atm"),
        Some(
            "Spot Price (S): 100.0\nStrike Price (K): 100.0\nTime to Maturity (T): 1.0\n\
             Risk-Free Rate (r): 5.0%\nVolatility (sigma): 20.0%"
        )
    );
    assert_eq!(session.details_for("unknown"), None);
}

#[test]
fn test_non_numeric_strike_rejected_without_row() {
    let mut session = session_with(CalculationForm {
        strike: "one hundred".to_string(),
        ..atm_form("bad")
    });

    let err = session.calculate().unwrap_err();
    assert!(matches!(err, InputError::InvalidNumber { field: "strike", .. }));
    assert!(session.rows().is_empty());
    assert_eq!(session.details_for("bad"), None);
    assert_eq!(session.status(), "Error: Please fill all fields correctly.");
}

#[test]
fn test_empty_name_is_a_distinct_failure() {
    let mut session = session_with(atm_form(""));

    let err = session.calculate().unwrap_err();
    assert_eq!(err, InputError::MissingName);
    assert_ne!(
        err.to_string(),
        InputError::InvalidNumber {
            field: "spot",
            value: String::new()
        }
        .to_string()
    );
    assert!(session.rows().is_empty());
    assert_eq!(session.status(), "Please enter a name.");
}

#[test]
fn test_failure_after_success_keeps_existing_rows() {
    let mut session = session_with(atm_form("first"));
    session.calculate().unwrap();

    session.mode = InputMode::Calculation(CalculationForm {
        vol_pct: String::new(),
        ..atm_form("second")
    });
    assert!(session.calculate().is_err());
    assert_eq!(session.rows().len(), 1);
    assert_eq!(session.rows()[0].name, "first");
}

#[test]
fn test_reused_name_appends_row_and_replaces_details() {
    let mut session = session_with(atm_form("dup"));
    session.calculate().unwrap();

    session.mode = InputMode::Calculation(CalculationForm {
        spot: "120".to_string(),
        ..atm_form("dup")
    });
    session.calculate().unwrap();

    assert_eq!(session.rows().len(), 2);
    let details = session.details_for("dup").unwrap();
    assert!(details.starts_with("Spot Price (S): 120.0\n"));
}

#[test]
fn test_heatmap_update_uses_form_bounds() {
    let mut session = Session::new(SurfaceSpec::default());
    assert!(session.switch_tab("Heatmap"));

    let surface = session.update_heatmap().unwrap();
    assert_eq!(surface.dimensions(), (10, 10));
    assert_eq!(surface.spot_axis[0], 50.0);
    assert_eq!(surface.spot_axis[9], 150.0);
    assert_eq!(
        surface.call_grid[9][0],
        bs_call_price(50.0, 100.0, 0.05, 1.0, 0.5)
    );
    assert!(session.rows().is_empty());
}

#[test]
fn test_heatmap_invalid_bound_sets_status() {
    let mut session = Session::default();
    session.mode = InputMode::Heatmap(HeatmapForm {
        max_vol_pct: "fifty".to_string(),
        ..HeatmapForm::default()
    });

    let err = session.update_heatmap().unwrap_err();
    assert!(matches!(
        err,
        InputError::InvalidNumber {
            field: "max_volatility",
            ..
        }
    ));
    assert_eq!(session.status(), "Error: Please fill all fields correctly.");
}

#[test]
fn test_actions_require_matching_tab() {
    let mut session = Session::default();
    assert!(matches!(
        session.update_heatmap(),
        Err(InputError::WrongMode { .. })
    ));

    session.switch_tab("Heatmap");
    assert!(matches!(
        session.calculate(),
        Err(InputError::WrongMode { .. })
    ));
    assert!(session.rows().is_empty());
}

#[test]
fn test_results_csv_export() {
    let mut session = session_with(atm_form("atm"));
    session.calculate().unwrap();
    session.mode = InputMode::Calculation(CalculationForm {
        spot: "110".to_string(),
        ..atm_form("itm")
    });
    session.calculate().unwrap();

    let mut buf = Vec::new();
    session.write_results_csv(&mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("name,call_price,put_price"));
    assert_eq!(lines.next(), Some("atm,10.45,5.57"));
    assert!(lines.next().unwrap().starts_with("itm,"));
    assert_eq!(lines.next(), None);
}

#[test]
fn test_non_finite_inputs_are_formatted_not_rejected() {
    let mut session = session_with(CalculationForm {
        time_to_maturity: "-1".to_string(),
        ..atm_form("negative-t")
    });
    let row = session.calculate().unwrap().clone();
    assert_eq!(row.call_price, "nan");
    assert_eq!(row.put_price, "nan");
}

#[test]
fn test_empty_session_exports_header_only() {
    let session = Session::default();
    let mut buf = Vec::new();
    session.write_results_csv(&mut buf).unwrap();
    assert_eq!(String::from_utf8(buf).unwrap(), "name,call_price,put_price\n");
}

#[test]
fn test_heatmap_infinite_bound_rejected() {
    let mut session = Session::default();
    session.mode = InputMode::Heatmap(HeatmapForm {
        max_spot: "inf".to_string(),
        ..HeatmapForm::default()
    });

    let err = session.update_heatmap().unwrap_err();
    assert!(matches!(
        err,
        InputError::InvalidNumber {
            field: "max_spot",
            ..
        }
    ));
    assert_eq!(session.status(), "Error: Please fill all fields correctly.");
}

#[test]
fn test_batch_prices_valid_rows_and_reports_rejects() {
    let input = "\
name , spot,strike,time,rate,vol
atm,100,100,1,5,20
,100,100,1,5,20
bad,100,abc,1,5,20
short,100
";
    let mut session = Session::default();
    let summary = session.run_batch(input.as_bytes()).unwrap();

    assert_eq!(
        summary,
        BatchSummary {
            priced: 1,
            rejected_lines: vec![3, 4, 5],
        }
    );
    assert_eq!(session.rows().len(), 1);
    assert_eq!(session.rows()[0].name, "atm");
    assert!(session.details_for("atm").is_some());
    // status reflects the last record that reached validation
    assert_eq!(session.status(), "Error: Please fill all fields correctly.");

    let mut buf = Vec::new();
    session.write_results_csv(&mut buf).unwrap();
    assert_eq!(
        String::from_utf8(buf).unwrap(),
        "name,call_price,put_price\natm,10.45,5.57\n"
    );
}

#[test]
fn test_batch_with_only_header_prices_nothing() {
    let mut session = Session::default();
    let summary = session
        .run_batch("name,spot,strike,time,rate,vol\n".as_bytes())
        .unwrap();
    assert_eq!(summary, BatchSummary::default());
    assert!(session.rows().is_empty());
}
