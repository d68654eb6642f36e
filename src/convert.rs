//! Currency-to-crypto conversion
//!
//! Validation clamps out-of-range amounts and raises a warning flag but
//! never blocks the computation; conversion always proceeds with the
//! clamped value. The implied exchange rate is recovered from the
//! result (`amount / converted`) rather than echoed from the input
//! price, keeping the displayed rate consistent with the displayed
//! result.

use crate::{
    constants::{DEFAULT_CONVERT_AMOUNT, MAX_CONVERT_AMOUNT},
    types::Coin,
};
use std::mem;

/// Why a submitted amount was adjusted or flagged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountWarning {
    NotANumber,
    Negative,
    TooLarge,
    Zero,
}

impl std::fmt::Display for AmountWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            AmountWarning::NotANumber => "Please enter a valid number",
            AmountWarning::Negative => "Amount cannot be negative",
            AmountWarning::TooLarge => "Amount cannot exceed 1,000,000",
            AmountWarning::Zero => "Amount cannot be zero",
        };
        f.write_str(msg)
    }
}

/// An amount after validation: the usable value plus any warning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatedAmount {
    pub value: f64,
    pub warning: Option<AmountWarning>,
}

/// Validates a raw amount string, clamping rather than rejecting
///
/// Non-numeric and negative inputs clamp to 0; inputs above 1,000,000
/// clamp to the maximum; an exact 0 keeps its value but is flagged.
pub fn validate_amount(raw: &str) -> ValidatedAmount {
    let (value, warning) = match raw.trim().parse::<f64>() {
        Err(_) => (0.0, Some(AmountWarning::NotANumber)),
        Ok(v) if !v.is_finite() => (0.0, Some(AmountWarning::NotANumber)),
        Ok(v) if v < 0.0 => (0.0, Some(AmountWarning::Negative)),
        Ok(v) if v > MAX_CONVERT_AMOUNT => (MAX_CONVERT_AMOUNT, Some(AmountWarning::TooLarge)),
        Ok(v) if v == 0.0 => (0.0, Some(AmountWarning::Zero)),
        Ok(v) => (v, None),
    };
    ValidatedAmount { value, warning }
}

/// A successful conversion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conversion {
    /// Amount of the target crypto
    pub converted: f64,
    /// Exchange rate recovered as `amount / converted`
    pub implied_rate: f64,
}

/// Result of running the converter
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConversionOutcome {
    /// No usable amount or target price; renders as six zero decimals
    Empty,
    Converted(Conversion),
}

/// Converts an amount of the source unit into the target crypto
///
/// A missing, zero or non-finite target price, or a zero amount, yields
/// the empty outcome.
pub fn convert(amount: f64, target_price: f64) -> ConversionOutcome {
    if amount == 0.0 || !amount.is_finite() || target_price <= 0.0 || !target_price.is_finite() {
        return ConversionOutcome::Empty;
    }

    let converted = amount / target_price;
    ConversionOutcome::Converted(Conversion {
        converted,
        implied_rate: amount / converted,
    })
}

/// Renders a rate with precision chosen by magnitude
pub fn format_rate(rate: f64) -> String {
    if rate < 1e-6 {
        format!("{:.2e}", rate)
    } else if rate < 0.01 {
        format!("{:.8}", rate)
    } else if rate < 1.0 {
        format!("{:.6}", rate)
    } else if rate < 1000.0 {
        format!("{:.4}", rate)
    } else {
        format!("{:.2}", rate)
    }
}

/// A coin offered as a conversion target
#[derive(Debug, Clone, PartialEq)]
pub struct CoinChoice {
    pub name: String,
    pub symbol: String,
    pub price_usd: f64,
}

impl From<&Coin> for CoinChoice {
    fn from(coin: &Coin) -> Self {
        Self {
            name: coin.name.clone(),
            symbol: coin.symbol.clone(),
            price_usd: coin.price_usd,
        }
    }
}

/// One side of the conversion: a unit label and, for crypto targets,
/// the USD price backing it
#[derive(Debug, Clone, PartialEq)]
pub struct Side {
    pub label: String,
    pub price_usd: Option<f64>,
}

impl Side {
    fn usd() -> Self {
        Self {
            label: "USD".to_string(),
            price_usd: None,
        }
    }

    fn unselected() -> Self {
        Self {
            label: String::new(),
            price_usd: None,
        }
    }

    fn from_choice(choice: &CoinChoice) -> Self {
        Self {
            label: choice.symbol.clone(),
            price_usd: Some(choice.price_usd),
        }
    }

    fn is_selected(&self) -> bool {
        !self.label.is_empty()
    }
}

/// Soft failures of converter operations; surfaced as warnings, state
/// is left unchanged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConverterWarning {
    SwapUnavailable,
}

impl std::fmt::Display for ConverterWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConverterWarning::SwapUnavailable => f.write_str("Cannot swap currencies at this time"),
        }
    }
}

/// Renderer-ready strings for the converter panel
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionDisplay {
    /// `"0.002000 BTC"`, or `"0.000000"` for the empty outcome
    pub result_text: String,
    /// `"USD 50000.000000"`; absent for the empty outcome
    pub price_text: Option<String>,
    /// `"1 USD = 50000.00 crypto"`; absent for the empty outcome
    pub rate_text: Option<String>,
}

/// Converter state: amount, both sides, and the choice list
#[derive(Debug, Clone)]
pub struct ConverterState {
    amount: f64,
    source: Side,
    target: Side,
    choices: Vec<CoinChoice>,
}

impl Default for ConverterState {
    fn default() -> Self {
        Self::new()
    }
}

impl ConverterState {
    pub fn new() -> Self {
        Self {
            amount: DEFAULT_CONVERT_AMOUNT,
            source: Side::usd(),
            target: Side::unselected(),
            choices: Vec::new(),
        }
    }

    /// Replaces the choice list and selects its first entry as target
    pub fn set_choices(&mut self, choices: Vec<CoinChoice>) -> ConversionDisplay {
        self.target = choices.first().map(Side::from_choice).unwrap_or_else(Side::unselected);
        self.choices = choices;
        self.display()
    }

    pub fn choices(&self) -> &[CoinChoice] {
        &self.choices
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Validates and stores a raw amount, then re-runs the conversion
    pub fn set_amount(&mut self, raw: &str) -> (ConversionDisplay, Option<AmountWarning>) {
        let validated = validate_amount(raw);
        self.amount = validated.value;
        (self.display(), validated.warning)
    }

    /// Selects a target coin by choice-list index
    pub fn select_target(&mut self, index: usize) -> ConversionDisplay {
        if let Some(choice) = self.choices.get(index) {
            self.target = Side::from_choice(choice);
        }
        self.display()
    }

    /// Exchanges source and target sides (including the target's price)
    /// and re-runs the conversion
    ///
    /// Fails softly when either side lacks a selection: the warning is
    /// returned and no state changes.
    pub fn swap(&mut self) -> Result<ConversionDisplay, ConverterWarning> {
        if !self.source.is_selected() || !self.target.is_selected() {
            return Err(ConverterWarning::SwapUnavailable);
        }
        mem::swap(&mut self.source, &mut self.target);
        Ok(self.display())
    }

    /// Restores the default amount and first/default selections
    pub fn reset(&mut self) -> ConversionDisplay {
        self.amount = DEFAULT_CONVERT_AMOUNT;
        self.source = Side::usd();
        self.target = self
            .choices
            .first()
            .map(Side::from_choice)
            .unwrap_or_else(Side::unselected);
        self.display()
    }

    /// Runs the conversion against the current state
    pub fn display(&self) -> ConversionDisplay {
        let target_price = self.target.price_usd.unwrap_or(0.0);
        match convert(self.amount, target_price) {
            ConversionOutcome::Empty => ConversionDisplay {
                result_text: "0.000000".to_string(),
                price_text: None,
                rate_text: None,
            },
            ConversionOutcome::Converted(conversion) => ConversionDisplay {
                result_text: format!("{:.6} {}", conversion.converted, self.target.label),
                price_text: Some(format!("{} {:.6}", self.source.label, target_price)),
                rate_text: Some(format!(
                    "1 {} = {} crypto",
                    self.source.label,
                    format_rate(conversion.implied_rate)
                )),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn btc_choice() -> CoinChoice {
        CoinChoice {
            name: "Bitcoin".to_string(),
            symbol: "BTC".to_string(),
            price_usd: 50_000.0,
        }
    }

    #[test]
    fn conversion_and_implied_rate() {
        match convert(100.0, 50_000.0) {
            ConversionOutcome::Converted(c) => {
                assert!((c.converted - 0.002).abs() < 1e-12);
                assert!((c.implied_rate - 50_000.0).abs() < 1e-6);
            }
            other => panic!("expected conversion, got {:?}", other),
        }
    }

    #[test]
    fn empty_outcomes() {
        assert_eq!(convert(0.0, 50_000.0), ConversionOutcome::Empty);
        assert_eq!(convert(100.0, 0.0), ConversionOutcome::Empty);
        assert_eq!(convert(100.0, -3.0), ConversionOutcome::Empty);
        assert_eq!(convert(100.0, f64::NAN), ConversionOutcome::Empty);
    }

    #[test]
    fn validation_clamps_and_flags() {
        let v = validate_amount("-5");
        assert_eq!(v.value, 0.0);
        assert_eq!(v.warning, Some(AmountWarning::Negative));

        let v = validate_amount("2000000");
        assert_eq!(v.value, 1_000_000.0);
        assert_eq!(v.warning, Some(AmountWarning::TooLarge));

        let v = validate_amount("abc");
        assert_eq!(v.value, 0.0);
        assert_eq!(v.warning, Some(AmountWarning::NotANumber));

        let v = validate_amount("0");
        assert_eq!(v.value, 0.0);
        assert_eq!(v.warning, Some(AmountWarning::Zero));

        let v = validate_amount("250.5");
        assert_eq!(v.value, 250.5);
        assert_eq!(v.warning, None);
    }

    #[test]
    fn rate_precision_scales_with_magnitude() {
        assert_eq!(format_rate(5e-7), "5.00e-7");
        assert_eq!(format_rate(0.0012345), "0.00123450");
        assert_eq!(format_rate(0.54321), "0.543210");
        assert_eq!(format_rate(42.5), "42.5000");
        assert_eq!(format_rate(50_000.0), "50000.00");
    }

    #[test]
    fn hundred_usd_to_btc_displays_expected_strings() {
        let mut state = ConverterState::new();
        state.set_choices(vec![btc_choice()]);
        let (display, warning) = state.set_amount("100");

        assert_eq!(warning, None);
        assert_eq!(display.result_text, "0.002000 BTC");
        assert_eq!(display.price_text.as_deref(), Some("USD 50000.000000"));
        assert_eq!(display.rate_text.as_deref(), Some("1 USD = 50000.00 crypto"));
    }

    #[test]
    fn clamped_negative_amount_shows_empty_result() {
        let mut state = ConverterState::new();
        state.set_choices(vec![btc_choice()]);
        let (display, warning) = state.set_amount("-5");

        assert_eq!(warning, Some(AmountWarning::Negative));
        assert_eq!(display.result_text, "0.000000");
        assert_eq!(display.rate_text, None);
    }

    #[test]
    fn swap_without_target_leaves_state_untouched() {
        let mut state = ConverterState::new();
        let before = state.display();

        let err = state.swap().unwrap_err();
        assert_eq!(err, ConverterWarning::SwapUnavailable);
        assert_eq!(err.to_string(), "Cannot swap currencies at this time");
        assert_eq!(state.display(), before);
        assert_eq!(state.amount(), 1.0);
    }

    #[test]
    fn swap_exchanges_sides_and_back() {
        let mut state = ConverterState::new();
        state.set_choices(vec![btc_choice()]);
        state.set_amount("100");

        // Crypto lands on the source side; USD has no backing price, so
        // the conversion empties out.
        let display = state.swap().unwrap();
        assert_eq!(display.result_text, "0.000000");

        let display = state.swap().unwrap();
        assert_eq!(display.result_text, "0.002000 BTC");
    }

    #[test]
    fn reset_restores_defaults() {
        let mut state = ConverterState::new();
        state.set_choices(vec![
            btc_choice(),
            CoinChoice {
                name: "Ethereum".to_string(),
                symbol: "ETH".to_string(),
                price_usd: 2_000.0,
            },
        ]);
        state.set_amount("500");
        state.select_target(1);

        let display = state.reset();
        assert_eq!(state.amount(), 1.0);
        assert_eq!(display.result_text, format!("{:.6} BTC", 1.0 / 50_000.0));
    }
}
