//! SeaORM entities, one per table.

pub mod blog_post;
pub mod career_application;
pub mod contact_submission;
