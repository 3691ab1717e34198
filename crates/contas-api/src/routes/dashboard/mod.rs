//! Dashboard routes - the single page of the app
//!
//! Structure:
//! - api.rs: JSON summaries and the page handler
//! - page.rs: Section rendering

pub mod api;
pub mod page;

pub use api::{api_chart, api_summary, api_tips, page_dashboard};
pub use page::{render_dashboard, FormState, FormTarget};
