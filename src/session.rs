//! Presentation state: the active form, the results table, the hover-detail
//! lookup and the status line. The pricing core stays stateless; everything a
//! front end needs to remember between actions lives here.

use std::collections::HashMap;
use std::io::{Read, Write};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::input::{CalculationForm, CalculationRequest, InputError, InputMode};
use crate::models::bs::price_pair;
use crate::models::surface::{generate_surface, SensitivitySurface, SurfaceSpec};

pub const STATUS_CALCULATION_OK: &str = "Calculation successful.";

/// One line of the results table. Prices are pre-formatted to 2 decimals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRow {
    pub name: String,
    pub call_price: String,
    pub put_price: String,
}

/// One input line of a batch file: `name,spot,strike,time,rate,vol`, rate and
/// volatility in percent.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchRecord {
    pub name: String,
    pub spot: String,
    pub strike: String,
    pub time: String,
    pub rate: String,
    pub vol: String,
}

impl From<BatchRecord> for CalculationForm {
    fn from(r: BatchRecord) -> Self {
        CalculationForm {
            name: r.name,
            spot: r.spot,
            strike: r.strike,
            time_to_maturity: r.time,
            rate_pct: r.rate,
            vol_pct: r.vol,
        }
    }
}

/// Outcome of [`Session::run_batch`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Rows appended to the results table
    pub priced: usize,
    /// File line numbers (header is line 1) that were skipped
    pub rejected_lines: Vec<usize>,
}

/// Two-decimal price text. NaN prints as `nan`, infinities as `inf`/`-inf`.
pub fn format_price(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else {
        format!("{:.2}", value)
    }
}

/// Hover text for a calculation, one parameter per line.
pub fn detail_summary(req: &CalculationRequest) -> String {
    format!(
        "Spot Price (S): {:?}\nStrike Price (K): {:?}\nTime to Maturity (T): {:?}\nRisk-Free Rate (r): {:?}%\nVolatility (sigma): {:?}%",
        req.spot,
        req.strike,
        req.time_to_maturity,
        req.risk_free_rate * 100.0,
        req.volatility * 100.0
    )
}

#[derive(Debug, Default)]
pub struct Session {
    pub mode: InputMode,
    pub surface_spec: SurfaceSpec,
    rows: Vec<ResultRow>,
    details: HashMap<String, String>,
    status: String,
}

impl Session {
    pub fn new(surface_spec: SurfaceSpec) -> Self {
        Self {
            surface_spec,
            ..Self::default()
        }
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Hover lookup by row name. The latest calculation under a name wins.
    pub fn details_for(&self, name: &str) -> Option<&str> {
        self.details.get(name).map(String::as_str)
    }

    pub fn switch_tab(&mut self, tab: &str) -> bool {
        self.mode.switch_to(tab)
    }

    /// Validate the active calculation form, price both sides and append a row.
    ///
    /// On failure the status line carries the error message and neither the
    /// table nor the detail lookup changes.
    pub fn calculate(&mut self) -> Result<&ResultRow, InputError> {
        let parsed = match &self.mode {
            InputMode::Calculation(form) => form.parse(),
            InputMode::Heatmap(_) => Err(InputError::WrongMode {
                expected: InputMode::CALCULATION_TAB,
            }),
        };
        match parsed {
            Ok(req) => Ok(self.record(req)),
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Price an already-validated request and append it to the table.
    pub fn record(&mut self, req: CalculationRequest) -> &ResultRow {
        debug!(name = %req.name, spot = req.spot, strike = req.strike, "Pricing calculation");
        let prices = price_pair(
            req.spot,
            req.strike,
            req.time_to_maturity,
            req.risk_free_rate,
            req.volatility,
        );

        let row = ResultRow {
            name: req.name.clone(),
            call_price: format_price(prices.call),
            put_price: format_price(prices.put),
        };
        info!(name = %row.name, call = %row.call_price, put = %row.put_price, "Calculation added");

        self.details.insert(req.name.clone(), detail_summary(&req));
        self.status = STATUS_CALCULATION_OK.to_string();
        self.rows.push(row);
        &self.rows[self.rows.len() - 1]
    }

    /// Validate the active heatmap form and build the surface.
    pub fn update_heatmap(&mut self) -> Result<SensitivitySurface, InputError> {
        let parsed = match &self.mode {
            InputMode::Heatmap(form) => form.parse(),
            InputMode::Calculation(_) => Err(InputError::WrongMode {
                expected: InputMode::HEATMAP_TAB,
            }),
        };
        match parsed {
            Ok(req) => Ok(generate_surface(
                req.spot_range(),
                req.vol_range(),
                &self.surface_spec,
            )),
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Price every record of a batch CSV through the calculation form.
    ///
    /// Records that fail to deserialize or validate are skipped and reported
    /// by line number; the rest are appended to the results table as if typed
    /// in one after another. Header names are trimmed.
    pub fn run_batch<R: Read>(&mut self, reader: R) -> Result<BatchSummary> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let mut summary = BatchSummary::default();
        for (idx, record) in rdr.deserialize::<BatchRecord>().enumerate() {
            let line = idx + 2;
            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    if e.is_io_error() {
                        return Err(e).context("Failed to read batch input");
                    }
                    warn!(line, error = %e, "Malformed batch record");
                    summary.rejected_lines.push(line);
                    continue;
                }
            };
            self.mode = InputMode::Calculation(record.into());
            if self.calculate().is_ok() {
                summary.priced += 1;
            } else {
                warn!(line, status = self.status(), "Skipping batch record");
                summary.rejected_lines.push(line);
            }
        }

        info!(
            priced = summary.priced,
            rejected = summary.rejected_lines.len(),
            "Batch complete"
        );
        Ok(summary)
    }

    /// Export the results table as `name,call_price,put_price`. The header is
    /// written even when the table is empty.
    pub fn write_results_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        wtr.write_record(["name", "call_price", "put_price"])
            .context("Failed to write results header")?;
        for row in &self.rows {
            wtr.serialize(row)
                .with_context(|| format!("Failed to write result row '{}'", row.name))?;
        }
        wtr.flush().context("Failed to flush results CSV")?;
        Ok(())
    }

    fn fail(&mut self, err: InputError) -> InputError {
        warn!(error = ?err, "Input validation failed");
        self.status = err.to_string();
        err
    }
}
