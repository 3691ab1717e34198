//! Core data models for the bill list

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::Category;

/// Display format for calendar dates (pt-BR)
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

/// A recorded bill
///
/// Field aliases accept the Portuguese keys of older saved state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    /// Opaque unique identifier, assigned at creation and never changed
    pub id: String,
    /// Bill name (never empty)
    #[serde(alias = "nome")]
    pub name: String,
    /// Amount in currency units (always positive)
    #[serde(alias = "valor")]
    pub amount: Decimal,
    /// Due date (YYYY-MM-DD)
    #[serde(alias = "vencimento")]
    pub due_date: NaiveDate,
    /// Fixed or variable
    #[serde(alias = "tipo", default)]
    pub category: Category,
    /// Optional free-text note
    #[serde(alias = "observacao", default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Bill {
    /// Build a bill from validated fields
    pub fn from_draft(id: String, draft: BillDraft) -> Self {
        Self {
            id,
            name: draft.name,
            amount: draft.amount,
            due_date: draft.due_date,
            category: draft.category,
            note: draft.note,
        }
    }

    /// Replace every field except the identifier
    pub fn apply(&mut self, draft: BillDraft) {
        self.name = draft.name;
        self.amount = draft.amount;
        self.due_date = draft.due_date;
        self.category = draft.category;
        self.note = draft.note;
    }

    /// Fields without the identifier, e.g. to prefill an edit form
    pub fn draft(&self) -> BillDraft {
        BillDraft {
            name: self.name.clone(),
            amount: self.amount,
            due_date: self.due_date,
            category: self.category,
            note: self.note.clone(),
        }
    }

    /// Due date as dd/mm/yyyy
    pub fn due_date_display(&self) -> String {
        self.due_date.format(DISPLAY_DATE_FORMAT).to_string()
    }
}

/// Validated bill fields, before an identifier is assigned
#[derive(Debug, Clone, PartialEq)]
pub struct BillDraft {
    pub name: String,
    pub amount: Decimal,
    pub due_date: NaiveDate,
    pub category: Category,
    pub note: Option<String>,
}
