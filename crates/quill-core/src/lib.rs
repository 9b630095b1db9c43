//! # Quill Core
//!
//! The domain layer of the Quill site backend.
//! Blog posts, lead submissions, payload validation and the services that
//! apply business rules over them. No infrastructure dependencies live here;
//! storage and identity are reached through the traits in [`ports`].

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;
pub mod validation;

pub use error::{DomainError, RepoError};
pub use validation::FieldErrors;
