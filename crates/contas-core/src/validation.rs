//! Bill form validation

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

use super::models::{Bill, BillDraft};
use super::types::Category;

pub const NAME_REQUIRED: &str = "Nome da conta é obrigatório";
pub const AMOUNT_INVALID: &str = "Valor deve ser um número positivo";
pub const DUE_DATE_REQUIRED: &str = "Data de vencimento é obrigatória";
pub const DUE_DATE_INVALID: &str = "Data de vencimento inválida";

/// Largest amount a form may submit, 10^15
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// Date format used by form inputs and persisted state
pub const INPUT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw form fields, exactly as submitted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BillForm {
    pub name: String,
    pub amount: String,
    pub due_date: String,
    pub category: String,
    pub note: String,
}

impl BillForm {
    /// Prefill from an existing bill
    pub fn from_bill(bill: &Bill) -> Self {
        Self {
            name: bill.name.clone(),
            amount: bill.amount.normalize().to_string(),
            due_date: bill.due_date.format(INPUT_DATE_FORMAT).to_string(),
            category: bill.category.to_string(),
            note: bill.note.clone().unwrap_or_default(),
        }
    }

    /// Category as selected, falling back to fixed
    pub fn category(&self) -> Category {
        self.category.parse().unwrap_or_default()
    }
}

/// Field key to message, empty on success
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &str, message: &str) {
        self.0.insert(field.to_string(), message.to_string());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Parse a strictly positive amount
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let value = Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()?;
    if value > Decimal::ZERO && value <= MAX_AMOUNT {
        Some(value)
    } else {
        None
    }
}

/// Check every field and build a normalized draft
pub fn validate(form: &BillForm) -> Result<BillDraft, FieldErrors> {
    let mut errors = FieldErrors::new();

    let name = form.name.trim();
    if name.is_empty() {
        errors.insert("name", NAME_REQUIRED);
    }

    let amount = parse_amount(&form.amount);
    if amount.is_none() {
        errors.insert("amount", AMOUNT_INVALID);
    }

    let due_raw = form.due_date.trim();
    let due_date = if due_raw.is_empty() {
        errors.insert("due_date", DUE_DATE_REQUIRED);
        None
    } else {
        match NaiveDate::parse_from_str(due_raw, INPUT_DATE_FORMAT) {
            Ok(date) => Some(date),
            Err(_) => {
                errors.insert("due_date", DUE_DATE_INVALID);
                None
            }
        }
    };

    match (amount, due_date) {
        (Some(amount), Some(due_date)) if errors.is_empty() => {
            let note = form.note.trim();
            Ok(BillDraft {
                name: name.to_string(),
                amount,
                due_date,
                category: form.category(),
                note: if note.is_empty() { None } else { Some(note.to_string()) },
            })
        }
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, amount: &str, due: &str) -> BillForm {
        BillForm {
            name: name.to_string(),
            amount: amount.to_string(),
            due_date: due.to_string(),
            category: "variable".to_string(),
            note: String::new(),
        }
    }

    #[test]
    fn test_rejects_bad_amounts() {
        for amount in ["0", "-5", "", "abc", "NaN", "0.00"] {
            let errors = validate(&form("Luz", amount, "2024-05-10")).unwrap_err();
            assert_eq!(errors.get("amount"), Some(AMOUNT_INVALID), "amount {:?}", amount);
            assert_eq!(errors.len(), 1);
        }
    }

    #[test]
    fn test_amount_cap() {
        assert_eq!(MAX_AMOUNT, Decimal::from(1_000_000_000_000_000_i64));
        assert_eq!(parse_amount("1000000000000000"), Some(MAX_AMOUNT));
        assert_eq!(parse_amount("1000000000000000.01"), None);

        let errors = validate(&form("Luz", "50000000000000000000000000000", "2024-05-10")).unwrap_err();
        assert_eq!(errors.get("amount"), Some(AMOUNT_INVALID));
    }

    #[test]
    fn test_accepts_valid_amount() {
        let draft = validate(&form("  Luz  ", "10.50", "2024-05-10")).unwrap();
        assert_eq!(draft.name, "Luz");
        assert_eq!(draft.amount, Decimal::from_str("10.50").unwrap());
        assert_eq!(draft.category, Category::Variable);
        assert_eq!(draft.note, None);
    }

    #[test]
    fn test_reports_every_field() {
        let errors = validate(&form("   ", "", "")).unwrap_err();
        assert_eq!(errors.get("name"), Some(NAME_REQUIRED));
        assert_eq!(errors.get("amount"), Some(AMOUNT_INVALID));
        assert_eq!(errors.get("due_date"), Some(DUE_DATE_REQUIRED));
    }

    #[test]
    fn test_malformed_date() {
        let errors = validate(&form("Luz", "10", "10/05/2024")).unwrap_err();
        assert_eq!(errors.get("due_date"), Some(DUE_DATE_INVALID));
    }

    #[test]
    fn test_note_trimmed_and_category_fallback() {
        let mut f = form("Água", "30", "2024-05-10");
        f.note = "  conta de maio ".to_string();
        f.category = "monthly".to_string();
        let draft = validate(&f).unwrap();
        assert_eq!(draft.note.as_deref(), Some("conta de maio"));
        assert_eq!(draft.category, Category::Fixed);
    }

    #[test]
    fn test_form_from_bill_round_trips() {
        let bill = Bill::from_draft("1".to_string(), validate(&form("Gás", "45.90", "2024-06-01")).unwrap());
        let prefilled = BillForm::from_bill(&bill);
        assert_eq!(prefilled.amount, "45.9");
        assert_eq!(prefilled.due_date, "2024-06-01");
        assert_eq!(validate(&prefilled).unwrap(), bill.draft());
    }
}
