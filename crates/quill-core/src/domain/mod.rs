//! Domain entities - the core business objects.

mod blog_post;
mod lead;
mod listing;
pub mod seo;
mod slug;

pub use blog_post::{BlogPost, BlogPostPatch, FieldSelection, NewBlogPost};
pub use lead::{
    CareerApplication, ContactSubmission, JobType, NewCareerApplication, NewContactSubmission,
    UnknownJobType,
};
pub use listing::{BlogQuery, DEFAULT_PAGE_SIZE, DashboardStats, MAX_PAGE_SIZE, Page, PageRequest};
pub use slug::{BlogKey, SLUG_REGEX, derive_slug};
