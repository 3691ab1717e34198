//! Budgeting tips derived from the current summary
//!
//! Rules run in a fixed order and only the first [`MAX_TIPS`] results are
//! kept, so later rules are dropped whenever earlier ones fire.

use rust_decimal::Decimal;
use serde::Serialize;

use super::metrics::Summary;
use super::money::{format_percent, MoneyFormat};

/// Tips shown at once
pub const MAX_TIPS: usize = 3;

/// Tip kind, drives the badge and the icon colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TipKind {
    Warning,
    Success,
    Info,
    Tip,
}

impl TipKind {
    /// Badge text
    pub fn badge(&self) -> &'static str {
        match self {
            TipKind::Warning => "Atenção",
            TipKind::Success => "Oportunidade",
            TipKind::Info => "Parabéns",
            TipKind::Tip => "Dica",
        }
    }
}

impl std::fmt::Display for TipKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TipKind::Warning => write!(f, "warning"),
            TipKind::Success => write!(f, "success"),
            TipKind::Info => write!(f, "info"),
            TipKind::Tip => write!(f, "tip"),
        }
    }
}

/// One advisory entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tip {
    pub kind: TipKind,
    pub title: String,
    pub message: String,
    /// Accent colour (hex)
    pub accent: &'static str,
}

impl Tip {
    fn new(kind: TipKind, title: &str, message: String, accent: &'static str) -> Self {
        Self {
            kind,
            title: title.to_string(),
            message,
            accent,
        }
    }
}

pub const TITLE_NEGATIVE_BALANCE: &str = "Atenção: Saldo Negativo";
pub const TITLE_SAVINGS: &str = "Oportunidade de Economia";
pub const TITLE_HIGH_SPEND: &str = "Alto Percentual de Gastos";
pub const TITLE_GOOD_CONTROL: &str = "Excelente Controle";
pub const TITLE_BUDGET_RULE: &str = "Dica Financeira";
pub const TITLE_EMERGENCY_FUND: &str = "Reserva de Emergência";

/// Evaluate every rule, keeping the first [`MAX_TIPS`]
pub fn generate_tips(summary: &Summary, money: &MoneyFormat) -> Vec<Tip> {
    let mut tips = Vec::new();
    let remaining = summary.remaining_balance;
    let spend = summary.spend_percent();

    if remaining < Decimal::ZERO {
        tips.push(Tip::new(
            TipKind::Warning,
            TITLE_NEGATIVE_BALANCE,
            "Suas despesas excedem o saldo. Considere revisar seus gastos ou aumentar sua renda."
                .to_string(),
            "#f87171",
        ));
    } else if remaining > Decimal::ZERO {
        let ten = remaining * Decimal::new(1, 1);
        let twenty = remaining * Decimal::new(2, 1);
        tips.push(Tip::new(
            TipKind::Success,
            TITLE_SAVINGS,
            format!(
                "Você pode economizar {} (10%) ou {} (20%) do seu saldo restante.",
                money.format(ten),
                money.format(twenty)
            ),
            "#4ade80",
        ));
    }

    if spend > Decimal::from(90) {
        tips.push(Tip::new(
            TipKind::Warning,
            TITLE_HIGH_SPEND,
            format!(
                "Você está gastando {}% do seu saldo. Tente manter abaixo de 80%.",
                format_percent(spend)
            ),
            "#facc15",
        ));
    } else if spend < Decimal::from(50) {
        tips.push(Tip::new(
            TipKind::Info,
            TITLE_GOOD_CONTROL,
            format!(
                "Parabéns! Você está gastando apenas {}% do seu saldo. Continue assim!",
                format_percent(spend)
            ),
            "#60a5fa",
        ));
    }

    tips.push(Tip::new(
        TipKind::Tip,
        TITLE_BUDGET_RULE,
        "A regra 50-30-20: 50% necessidades, 30% desejos, 20% poupança e investimentos."
            .to_string(),
        "#c084fc",
    ));

    if remaining > Decimal::ZERO {
        tips.push(Tip::new(
            TipKind::Tip,
            TITLE_EMERGENCY_FUND,
            "Considere guardar parte do saldo restante para emergências. O ideal são 6 meses de gastos."
                .to_string(),
            "#22d3ee",
        ));
    }

    tips.truncate(MAX_TIPS);
    tips
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Bill;
    use crate::types::Category;
    use chrono::NaiveDate;

    fn summary(initial: i64, expenses: i64) -> Summary {
        let bills = if expenses > 0 {
            vec![Bill {
                id: "1".to_string(),
                name: "Aluguel".to_string(),
                amount: Decimal::from(expenses),
                due_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
                category: Category::Fixed,
                note: None,
            }]
        } else {
            vec![]
        };
        Summary::compute(Decimal::from(initial), &bills)
    }

    fn titles(tips: &[Tip]) -> Vec<&str> {
        tips.iter().map(|t| t.title.as_str()).collect()
    }

    #[test]
    fn test_high_spend() {
        let tips = generate_tips(&summary(100, 95), &MoneyFormat::default());
        let titles = titles(&tips);
        assert!(titles.contains(&TITLE_HIGH_SPEND));
        assert!(!titles.contains(&TITLE_GOOD_CONTROL));
        assert_eq!(titles, vec![TITLE_SAVINGS, TITLE_HIGH_SPEND, TITLE_BUDGET_RULE]);
        assert!(tips[1].message.contains("95.0%"));
    }

    #[test]
    fn test_good_control() {
        let tips = generate_tips(&summary(100, 40), &MoneyFormat::default());
        let titles = titles(&tips);
        assert!(titles.contains(&TITLE_GOOD_CONTROL));
        assert!(!titles.contains(&TITLE_HIGH_SPEND));
        assert_eq!(
            tips[0].message,
            "Você pode economizar R$ 6.00 (10%) ou R$ 12.00 (20%) do seu saldo restante."
        );
    }

    #[test]
    fn test_truncation_drops_emergency_fund() {
        let tips = generate_tips(&summary(1000, 100), &MoneyFormat::default());
        assert_eq!(tips.len(), MAX_TIPS);
        assert!(!titles(&tips).contains(&TITLE_EMERGENCY_FUND));
    }

    #[test]
    fn test_mid_range_spend_shows_emergency_fund() {
        let tips = generate_tips(&summary(100, 70), &MoneyFormat::default());
        assert_eq!(titles(&tips), vec![TITLE_SAVINGS, TITLE_BUDGET_RULE, TITLE_EMERGENCY_FUND]);
    }

    #[test]
    fn test_negative_balance() {
        let tips = generate_tips(&summary(100, 150), &MoneyFormat::default());
        assert_eq!(titles(&tips), vec![TITLE_NEGATIVE_BALANCE, TITLE_HIGH_SPEND, TITLE_BUDGET_RULE]);
        assert_eq!(tips[0].kind.badge(), "Atenção");
    }

    #[test]
    fn test_empty_state() {
        let tips = generate_tips(&summary(0, 0), &MoneyFormat::default());
        assert_eq!(titles(&tips), vec![TITLE_GOOD_CONTROL, TITLE_BUDGET_RULE]);
        assert!(tips[0].message.contains("0.0%"));
    }
}
