//! Form state and input validation for the two input modes.
//!
//! Forms hold raw text exactly as typed. Parsing turns them into typed requests
//! with percentages already converted to decimals, or into an [`InputError`]
//! whose `Display` is the short status message shown to the user.

use thiserror::Error;

/// The only error kind at the input boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// Calculation form submitted with a blank name
    #[error("Please enter a name.")]
    MissingName,

    /// A numeric field did not parse as a real number
    #[error("Error: Please fill all fields correctly.")]
    InvalidNumber { field: &'static str, value: String },

    /// A form was submitted while the other input mode was active
    #[error("Error: {expected} form is not active.")]
    WrongMode { expected: &'static str },
}

/// Drop digit-group underscores ("1_000" -> "1000"). An underscore that is not
/// between two digits makes the text invalid.
fn strip_digit_separators(text: &str) -> Option<String> {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    for (i, c) in text.char_indices() {
        if c == '_' {
            let before = i > 0 && bytes[i - 1].is_ascii_digit();
            let after = bytes.get(i + 1).is_some_and(u8::is_ascii_digit);
            if !(before && after) {
                return None;
            }
        } else {
            out.push(c);
        }
    }
    Some(out)
}

/// Parse one numeric field the way a desktop entry box would: surrounding
/// whitespace is ignored, underscores may group digits, anything else that is
/// not a real number fails.
pub fn parse_number(field: &'static str, raw: &str) -> Result<f64, InputError> {
    strip_digit_separators(raw.trim())
        .and_then(|text| text.parse::<f64>().ok())
        .ok_or_else(|| InputError::InvalidNumber {
            field,
            value: raw.to_string(),
        })
}

/// Like [`parse_number`], but `inf` and `nan` are rejected too.
pub fn parse_finite(field: &'static str, raw: &str) -> Result<f64, InputError> {
    let value = parse_number(field, raw)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(InputError::InvalidNumber {
            field,
            value: raw.to_string(),
        })
    }
}

/// Parse a whole-number percentage field ("5" -> 0.05).
pub fn parse_percent(field: &'static str, raw: &str) -> Result<f64, InputError> {
    Ok(parse_number(field, raw)? / 100.0)
}

/// Validated single-calculation request. Rate and volatility are decimals.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationRequest {
    pub name: String,
    pub spot: f64,
    pub strike: f64,
    pub time_to_maturity: f64,
    pub risk_free_rate: f64,
    pub volatility: f64,
}

/// Validated heatmap request. Volatility bounds are decimals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatmapRequest {
    pub min_spot: f64,
    pub max_spot: f64,
    pub min_vol: f64,
    pub max_vol: f64,
}

impl HeatmapRequest {
    pub fn spot_range(&self) -> (f64, f64) {
        (self.min_spot, self.max_spot)
    }

    pub fn vol_range(&self) -> (f64, f64) {
        (self.min_vol, self.max_vol)
    }
}

/// Raw text of the single-calculation form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalculationForm {
    pub name: String,
    pub spot: String,
    pub strike: String,
    pub time_to_maturity: String,
    /// Risk-free rate in percent
    pub rate_pct: String,
    /// Volatility in percent
    pub vol_pct: String,
}

impl CalculationForm {
    /// Name first, then the numeric fields in on-screen order.
    pub fn parse(&self) -> Result<CalculationRequest, InputError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(InputError::MissingName);
        }

        Ok(CalculationRequest {
            name: name.to_string(),
            spot: parse_number("spot", &self.spot)?,
            strike: parse_number("strike", &self.strike)?,
            time_to_maturity: parse_number("time_to_maturity", &self.time_to_maturity)?,
            risk_free_rate: parse_percent("risk_free_rate", &self.rate_pct)?,
            volatility: parse_percent("volatility", &self.vol_pct)?,
        })
    }
}

/// Raw text of the heatmap form. Volatility bounds are in percent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeatmapForm {
    pub min_spot: String,
    pub max_spot: String,
    pub min_vol_pct: String,
    pub max_vol_pct: String,
}

impl Default for HeatmapForm {
    fn default() -> Self {
        Self {
            min_spot: "50".to_string(),
            max_spot: "150".to_string(),
            min_vol_pct: "10".to_string(),
            max_vol_pct: "50".to_string(),
        }
    }
}

impl HeatmapForm {
    /// Bounds must be finite: they become the chart's axis limits.
    pub fn parse(&self) -> Result<HeatmapRequest, InputError> {
        Ok(HeatmapRequest {
            min_spot: parse_finite("min_spot", &self.min_spot)?,
            max_spot: parse_finite("max_spot", &self.max_spot)?,
            min_vol: parse_finite("min_volatility", &self.min_vol_pct)? / 100.0,
            max_vol: parse_finite("max_volatility", &self.max_vol_pct)? / 100.0,
        })
    }
}

/// Which tab is active, together with that tab's form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Calculation(CalculationForm),
    Heatmap(HeatmapForm),
}

impl Default for InputMode {
    fn default() -> Self {
        InputMode::Calculation(CalculationForm::default())
    }
}

impl InputMode {
    pub const CALCULATION_TAB: &'static str = "Calculation";
    pub const HEATMAP_TAB: &'static str = "Heatmap";

    pub fn tab_name(&self) -> &'static str {
        match self {
            InputMode::Calculation(_) => Self::CALCULATION_TAB,
            InputMode::Heatmap(_) => Self::HEATMAP_TAB,
        }
    }

    /// Fresh form for the named tab. Unknown tab names leave the mode unchanged.
    ///
    /// Switching always rebuilds the form, so text typed into the previous tab
    /// is discarded and the heatmap bounds come back pre-filled.
    pub fn switch_to(&mut self, tab: &str) -> bool {
        *self = match tab {
            Self::CALCULATION_TAB => InputMode::Calculation(CalculationForm::default()),
            Self::HEATMAP_TAB => InputMode::Heatmap(HeatmapForm::default()),
            _ => return false,
        };
        true
    }
}
