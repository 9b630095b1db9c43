//! Services - business rules over the repositories.
//!
//! Each service is constructed once at startup with the repository handles
//! it needs and shared across requests. Services keep no state of their own;
//! every call reads or writes through the store.

mod content;
mod dashboard;
mod submission;

pub use content::{ContentService, Visibility};
pub use dashboard::DashboardService;
pub use submission::SubmissionService;
