//! Bill routes - add form, list rows, inline edit and delete
//!
//! Structure:
//! - api.rs: JSON API and HTMX endpoints
//! - page.rs: Form and row rendering

pub mod api;
pub mod page;

pub use api::{
    api_bills,
    htmx_bill_cancel,
    htmx_bill_delete,
    htmx_bill_edit,
    htmx_bill_store,
    htmx_bill_update,
    htmx_form_toggle,
};

pub use page::{render_bill_form, render_bill_panel};
