//! Fixed-vs-variable expense chart model
//!
//! The same data feeds the dashboard SVG and the report snapshot.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use super::metrics::saturating_add;
use super::types::Category;

/// Chart heading
pub const CHART_TITLE: &str = "Distribuição de Despesas";

/// An sRGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl Serialize for Rgb {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.hex())
    }
}

/// Slice colour for a category
pub fn category_color(category: Category) -> Rgb {
    match category {
        Category::Fixed => Rgb(59, 130, 246),
        Category::Variable => Rgb(245, 158, 11),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSlice {
    pub category: Category,
    pub label: &'static str,
    pub value: Decimal,
    /// Share of the total, rounded to one decimal
    pub percent: Decimal,
    pub color: Rgb,
}

impl ChartSlice {
    /// Unrounded share of the total in `[0, 1]`, for drawing
    pub fn fraction(&self, total: Decimal) -> f64 {
        if total.is_zero() {
            return 0.0;
        }
        self.value
            .checked_div(total)
            .and_then(|f| f.to_f64())
            .unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub total: Decimal,
    pub slices: Vec<ChartSlice>,
}

impl ChartData {
    /// Slices that take up any area, in drawing order
    pub fn visible_slices(&self) -> impl Iterator<Item = &ChartSlice> {
        self.slices.iter().filter(|s| s.value > Decimal::ZERO)
    }
}

/// Build the two-slice chart, or `None` when there is nothing to draw
pub fn expense_chart(fixed: Decimal, variable: Decimal) -> Option<ChartData> {
    let total = saturating_add(fixed, variable);
    if total <= Decimal::ZERO {
        return None;
    }

    let slices = [(Category::Fixed, fixed), (Category::Variable, variable)]
        .into_iter()
        .map(|(category, value)| ChartSlice {
            category,
            label: category.plural_label(),
            value,
            percent: value
                .checked_div(total)
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
                .unwrap_or(Decimal::ZERO)
                .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero),
            color: category_color(category),
        })
        .collect();

    Some(ChartData { total, slices })
}
