//! Bill tracking state and financial rules
//!
//! [`Tracker`] owns the starting balance, the bill list and the small
//! amount of UI state (form visibility, which row or card is being
//! edited). Every mutation is written through to the [`Store`] straight
//! away; derived figures are recomputed on each call.

pub mod chart;
pub mod error;
pub mod metrics;
pub mod models;
pub mod money;
pub mod schedule;
pub mod tips;
pub mod types;
pub mod validation;

use chrono::NaiveDate;
use contas_config::Config;
use contas_store::Store;
use rust_decimal::Decimal;
use serde::Serialize;
use std::str::FromStr;

pub use chart::{expense_chart, ChartData, ChartSlice};
pub use error::{CoreError, CoreResult, DefaultErrorLogger, ErrorContext, ErrorLogger, ErrorSeverity};
pub use metrics::{CategoryTotals, Summary};
pub use models::{Bill, BillDraft};
pub use money::MoneyFormat;
pub use schedule::BillEntry;
pub use tips::{Tip, TipKind};
pub use types::Category;
pub use validation::{BillForm, FieldErrors};

// ==================== Settings ====================

/// Tracker settings, taken from the `storage`, `bills` and `currency` config sections
#[derive(Debug, Clone)]
pub struct TrackerSettings {
    pub balance_key: String,
    pub bills_key: String,
    pub due_soon_days: i64,
    pub money: MoneyFormat,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl TrackerSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            balance_key: config.storage.balance_key.clone(),
            bills_key: config.storage.bills_key.clone(),
            due_soon_days: config.bills.due_soon_days,
            money: MoneyFormat::from(&config.currency),
        }
    }
}

// ==================== UI State ====================

/// Transient view toggles, never persisted
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UiState {
    /// The add-bill form is open
    pub form_visible: bool,
    /// Bill whose row is in edit mode
    pub editing_id: Option<String>,
    /// The balance card shows its input instead of the value
    pub editing_balance: bool,
}

// ==================== Tracker ====================

pub struct Tracker {
    store: Store,
    settings: TrackerSettings,
    balance: Decimal,
    bills: Vec<Bill>,
    ui: UiState,
}

impl Tracker {
    /// Load balance and bills from the store, defaulting to zero and an empty list
    pub fn open(store: Store, settings: TrackerSettings) -> Self {
        let mut balance: Decimal = store.read(&settings.balance_key, Decimal::ZERO);
        if balance < Decimal::ZERO {
            log::warn!(
                target: "contas::core",
                "Stored balance {} is negative, starting from zero",
                balance
            );
            balance = Decimal::ZERO;
        }
        let bills: Vec<Bill> = store.read(&settings.bills_key, Vec::new());

        log::info!(
            target: "contas::core",
            "Loaded {} bills and balance {} from {}",
            bills.len(),
            balance,
            store.describe()
        );

        Self {
            store,
            settings,
            ui: UiState {
                editing_balance: balance.is_zero(),
                ..UiState::default()
            },
            balance,
            bills,
        }
    }

    // ==================== Queries ====================

    pub fn settings(&self) -> &TrackerSettings {
        &self.settings
    }

    pub fn money(&self) -> &MoneyFormat {
        &self.settings.money
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Bills in storage order
    pub fn bills(&self) -> &[Bill] {
        &self.bills
    }

    pub fn bill(&self, id: &str) -> Option<&Bill> {
        self.bills.iter().find(|b| b.id == id)
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn summary(&self) -> Summary {
        Summary::compute(self.balance, &self.bills)
    }

    /// Bills sorted by due date
    pub fn sorted_bills(&self) -> Vec<Bill> {
        schedule::sorted_by_due_date(&self.bills)
    }

    /// Rows of the bill list, flagged against `today`
    pub fn entries(&self, today: NaiveDate) -> Vec<BillEntry> {
        schedule::list_entries(&self.bills, today, self.settings.due_soon_days)
    }

    pub fn tips(&self) -> Vec<Tip> {
        tips::generate_tips(&self.summary(), &self.settings.money)
    }

    pub fn chart(&self) -> Option<ChartData> {
        let totals = metrics::category_totals(&self.bills);
        expense_chart(totals.fixed_total, totals.variable_total)
    }

    pub fn export_enabled(&self) -> bool {
        self.summary().export_enabled()
    }

    // ==================== Bill CRUD ====================

    /// Append a bill under a fresh identifier and close the add form
    pub fn add_bill(&mut self, draft: BillDraft) -> Bill {
        let id = contas_utils::generate_unique_id(|candidate| {
            self.bills.iter().any(|b| b.id == candidate)
        });
        let bill = Bill::from_draft(id, draft);
        log::info!(target: "contas::core", "Adding bill {} ({})", bill.id, bill.name);

        self.bills.push(bill.clone());
        self.persist_bills();
        self.ui.form_visible = false;
        bill
    }

    /// Replace every field of an existing bill, keeping its identifier
    pub fn edit_bill(&mut self, id: &str, draft: BillDraft) -> CoreResult<Bill> {
        let bill = self
            .bills
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| CoreError::BillNotFound { id: id.to_string() })?;

        bill.apply(draft);
        let updated = bill.clone();
        log::info!(target: "contas::core", "Updated bill {}", id);

        self.persist_bills();
        self.ui.editing_id = None;
        Ok(updated)
    }

    /// Remove a bill; unknown identifiers are ignored
    pub fn remove_bill(&mut self, id: &str) -> bool {
        let before = self.bills.len();
        self.bills.retain(|b| b.id != id);
        if self.bills.len() == before {
            log::debug!(target: "contas::core", "Remove of unknown bill {} ignored", id);
            return false;
        }

        log::info!(target: "contas::core", "Removed bill {}", id);
        self.persist_bills();
        if self.ui.editing_id.as_deref() == Some(id) {
            self.ui.editing_id = None;
        }
        true
    }

    /// Validate and add
    pub fn submit_new(&mut self, form: &BillForm) -> CoreResult<Bill> {
        let draft = validation::validate(form).map_err(|errors| CoreError::ValidationError { errors })?;
        Ok(self.add_bill(draft))
    }

    /// Validate and edit
    pub fn submit_edit(&mut self, id: &str, form: &BillForm) -> CoreResult<Bill> {
        if self.bill(id).is_none() {
            return Err(CoreError::BillNotFound { id: id.to_string() });
        }
        let draft = validation::validate(form).map_err(|errors| CoreError::ValidationError { errors })?;
        self.edit_bill(id, draft)
    }

    // ==================== Balance ====================

    /// Set the starting balance; negative values are ignored
    pub fn set_balance(&mut self, value: Decimal) -> bool {
        if value < Decimal::ZERO {
            log::debug!(target: "contas::core", "Ignoring negative balance {}", value);
            return false;
        }
        self.balance = value;
        self.store.write(&self.settings.balance_key, &self.balance);
        self.ui.editing_balance = false;
        log::info!(target: "contas::core", "Balance set to {}", value);
        true
    }

    /// Set the balance from raw input, where text that does not parse counts as zero
    pub fn set_balance_input(&mut self, raw: &str) -> bool {
        let raw = raw.trim();
        let value = Decimal::from_str(raw)
            .or_else(|_| Decimal::from_scientific(raw))
            .unwrap_or(Decimal::ZERO);
        self.set_balance(value)
    }

    // ==================== UI Toggles ====================

    pub fn toggle_form(&mut self) -> bool {
        self.ui.form_visible = !self.ui.form_visible;
        self.ui.form_visible
    }

    /// Put a row in edit mode, replacing any other row being edited
    pub fn begin_edit(&mut self, id: &str) -> bool {
        if self.bill(id).is_none() {
            return false;
        }
        self.ui.editing_id = Some(id.to_string());
        true
    }

    pub fn cancel_edit(&mut self) {
        self.ui.editing_id = None;
    }

    pub fn begin_balance_edit(&mut self) {
        self.ui.editing_balance = true;
    }

    pub fn cancel_balance_edit(&mut self) {
        self.ui.editing_balance = false;
    }

    /// Write the balance and the bill list, failing on the first storage error
    pub fn flush(&self) -> CoreResult<()> {
        self.store.try_write(&self.settings.balance_key, &self.balance)?;
        self.store.try_write(&self.settings.bills_key, &self.bills)?;
        log::debug!(target: "contas::core", "State flushed to {}", self.store.describe());
        Ok(())
    }

    fn persist_bills(&self) {
        self.store.write(&self.settings.bills_key, &self.bills);
    }
}

// ==================== Tests ====================
