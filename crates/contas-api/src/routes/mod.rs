//! Route modules for the API server
//!
//! - dashboard: the dashboard page, its sections and the JSON summaries
//! - balance: starting balance card
//! - bills: bill form and list, inline edit and delete
//! - export: PDF report download
//!
//! Larger modules follow the same structure:
//! - mod.rs: Module declaration and exports
//! - api.rs: JSON API and HTMX endpoints
//! - page.rs: HTML rendering
//!
//! Every mutating endpoint answers with the whole `#dashboard` fragment, since
//! a single change moves the totals, the chart and the tips together.

pub mod balance;
pub mod bills;
pub mod dashboard;
pub mod export;

/// Swap target shared by every mutating control
pub const HX_DASHBOARD: &str = "hx-target='#dashboard' hx-swap='outerHTML'";
