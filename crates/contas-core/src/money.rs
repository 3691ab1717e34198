//! Money and percentage formatting

use contas_config::{CurrencyConfig, SymbolPosition};
use contas_utils::group_thousands;
use rust_decimal::{Decimal, RoundingStrategy};

/// Render a decimal with exactly `dp` fractional digits, rounding half away from zero
pub fn format_fixed(value: Decimal, dp: u32) -> String {
    let mut rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(dp);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded.to_string()
}

/// Percentage with one decimal place, without the `%` sign
pub fn format_percent(value: Decimal) -> String {
    format_fixed(value, 1)
}

/// Currency formatting rules, built from `currency` in the config
#[derive(Debug, Clone, PartialEq)]
pub struct MoneyFormat {
    pub symbol: String,
    pub decimal_places: u32,
    pub thousands_separator: String,
    pub decimal_separator: String,
    pub symbol_position: SymbolPosition,
}

impl Default for MoneyFormat {
    fn default() -> Self {
        Self::from(&CurrencyConfig::default())
    }
}

impl From<&CurrencyConfig> for MoneyFormat {
    fn from(config: &CurrencyConfig) -> Self {
        Self {
            symbol: config.symbol.clone(),
            decimal_places: config.decimal_places,
            thousands_separator: config.thousands_separator.clone(),
            decimal_separator: config.decimal_separator.clone(),
            symbol_position: config.symbol_position,
        }
    }
}

impl MoneyFormat {
    /// Number part only, e.g. `1234.50`
    pub fn amount(&self, value: Decimal) -> String {
        let fixed = format_fixed(value, self.decimal_places);
        let (sign, unsigned) = match fixed.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", fixed.as_str()),
        };
        let (int_part, frac_part) = match unsigned.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (unsigned, None),
        };

        let mut out = String::from(sign);
        out.push_str(&group_thousands(int_part, &self.thousands_separator));
        if let Some(frac) = frac_part {
            out.push_str(&self.decimal_separator);
            out.push_str(frac);
        }
        out
    }

    /// Number with the currency symbol, e.g. `R$ 1234.50`
    pub fn format(&self, value: Decimal) -> String {
        match self.symbol_position {
            SymbolPosition::Before => format!("{} {}", self.symbol, self.amount(value)),
            SymbolPosition::After => format!("{} {}", self.amount(value), self.symbol),
        }
    }
}
