// Closed-form Black-Scholes pricing for European calls and puts on a
// non-dividend-paying underlying. The formulas are evaluated as written: no
// input is clamped, so non-positive T or sigma surface as NaN/inf.

use crate::models::utils::norm_cdf;
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Side of a European option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    Call,
    Put,
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "call"),
            OptionType::Put => write!(f, "put"),
        }
    }
}

impl FromStr for OptionType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "call" | "c" => Ok(OptionType::Call),
            "put" | "p" => Ok(OptionType::Put),
            other => Err(anyhow!("Invalid option type: {}", other)),
        }
    }
}

/// The five market inputs of the Black-Scholes formula plus the option side.
///
/// Rates and volatilities are decimals (0.05 for 5%). Values are built fresh
/// for each calculation and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionParameters {
    /// Current underlying price (S)
    pub spot: f64,
    /// Strike price (K)
    pub strike: f64,
    /// Years until expiry (T)
    pub time_to_maturity: f64,
    /// Annualised risk-free rate (r), any sign
    pub risk_free_rate: f64,
    /// Annualised volatility (sigma)
    pub volatility: f64,
    pub option_type: OptionType,
}

impl OptionParameters {
    pub fn new(
        spot: f64,
        strike: f64,
        time_to_maturity: f64,
        risk_free_rate: f64,
        volatility: f64,
        option_type: OptionType,
    ) -> Self {
        Self {
            spot,
            strike,
            time_to_maturity,
            risk_free_rate,
            volatility,
            option_type,
        }
    }

    /// Same market inputs, other side.
    pub fn with_type(self, option_type: OptionType) -> Self {
        Self {
            option_type,
            ..self
        }
    }

    /// Theoretical Black-Scholes price.
    pub fn price(&self) -> f64 {
        price(self)
    }
}

/// Call and put prices for one set of market inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePair {
    pub call: f64,
    pub put: f64,
}

#[allow(non_snake_case)]
fn d1_d2(S: f64, K: f64, r: f64, T: f64, sigma: f64) -> (f64, f64) {
    let vol_sqrt_t = sigma * T.sqrt();
    let d1 = ((S / K).ln() + (r + 0.5 * sigma.powi(2)) * T) / vol_sqrt_t;
    (d1, d1 - vol_sqrt_t)
}

/// Price of a European call option under Black-Scholes assumptions.
#[allow(non_snake_case)]
pub fn bs_call_price(S: f64, K: f64, r: f64, T: f64, sigma: f64) -> f64 {
    let (d1, d2) = d1_d2(S, K, r, T, sigma);
    S * norm_cdf(d1) - K * (-r * T).exp() * norm_cdf(d2)
}

/// Price of a European put option under Black-Scholes assumptions.
#[allow(non_snake_case)]
pub fn bs_put_price(S: f64, K: f64, r: f64, T: f64, sigma: f64) -> f64 {
    let (d1, d2) = d1_d2(S, K, r, T, sigma);
    K * (-r * T).exp() * norm_cdf(-d2) - S * norm_cdf(-d1)
}

/// Price the option described by `params`.
pub fn price(params: &OptionParameters) -> f64 {
    let OptionParameters {
        spot,
        strike,
        time_to_maturity,
        risk_free_rate,
        volatility,
        option_type,
    } = *params;

    match option_type {
        OptionType::Call => bs_call_price(spot, strike, risk_free_rate, time_to_maturity, volatility),
        OptionType::Put => bs_put_price(spot, strike, risk_free_rate, time_to_maturity, volatility),
    }
}

/// Price both sides for the same market inputs.
pub fn price_pair(
    spot: f64,
    strike: f64,
    time_to_maturity: f64,
    risk_free_rate: f64,
    volatility: f64,
) -> PricePair {
    PricePair {
        call: bs_call_price(spot, strike, risk_free_rate, time_to_maturity, volatility),
        put: bs_put_price(spot, strike, risk_free_rate, time_to_maturity, volatility),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_type_parsing() {
        assert_eq!("call".parse::<OptionType>().unwrap(), OptionType::Call);
        assert_eq!(" PUT ".parse::<OptionType>().unwrap(), OptionType::Put);
        assert_eq!("c".parse::<OptionType>().unwrap(), OptionType::Call);
        assert!("straddle".parse::<OptionType>().is_err());
        assert_eq!(OptionType::Put.to_string(), "put");
    }

    #[test]
    fn test_with_type_keeps_market_inputs() {
        let call = OptionParameters::new(100.0, 95.0, 0.5, 0.03, 0.25, OptionType::Call);
        let put = call.with_type(OptionType::Put);
        assert_eq!(put.spot, call.spot);
        assert_eq!(put.volatility, call.volatility);
        assert_eq!(put.option_type, OptionType::Put);
    }

    #[test]
    fn test_price_pair_matches_single_side_pricing() {
        let params = OptionParameters::new(110.0, 100.0, 2.0, 0.01, 0.3, OptionType::Call);
        let pair = price_pair(110.0, 100.0, 2.0, 0.01, 0.3);
        assert_eq!(pair.call, params.price());
        assert_eq!(pair.put, params.with_type(OptionType::Put).price());
    }

    #[test]
    fn test_degenerate_inputs_propagate_non_finite() {
        // at the money with T = 0, d1 is 0/0
        let p = price_pair(100.0, 100.0, 0.0, 0.05, 0.2);
        assert!(p.call.is_nan());
        assert!(p.put.is_nan());
        // negative T takes the square root of a negative number
        let neg_t = price_pair(100.0, 100.0, -1.0, 0.05, 0.2);
        assert!(neg_t.call.is_nan());
        assert!(neg_t.put.is_nan());
    }
}
