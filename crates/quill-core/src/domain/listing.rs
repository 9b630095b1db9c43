//! Listing queries and pages.

use serde::Serialize;

/// Posts per page on the public blog listing.
pub const DEFAULT_PAGE_SIZE: u64 = 6;
pub const MAX_PAGE_SIZE: u64 = 100;
/// Highest page number whose offset still fits a signed 64-bit store offset.
pub const MAX_PAGE: u64 = i64::MAX as u64 / MAX_PAGE_SIZE;

/// One-based page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub per_page: u64,
}

impl PageRequest {
    /// Clamp caller input to a valid window.
    pub fn new(page: u64, per_page: u64) -> Self {
        Self {
            page: page.clamp(1, MAX_PAGE),
            per_page: per_page.clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.per_page)
    }

    pub fn limit(&self) -> u64 {
        self.per_page
    }
}

/// Filter for the blog post listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlogQuery {
    pub published: Option<bool>,
    pub page: Option<PageRequest>,
}

/// A slice of matching rows plus the total count of matches.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

/// Counts shown on the admin dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_blogs: u64,
    pub published_blogs: u64,
    pub draft_blogs: u64,
    pub total_applications: u64,
    pub total_contacts: u64,
}
