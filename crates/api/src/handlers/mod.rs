//! Request handlers, one module per resource.
//!
//! Handlers delegate to the repositories in `escola-db` and map errors
//! via [`AppError`](crate::error::AppError). Collection endpoints wrap
//! their rows in the [`Page`](crate::response::Page) envelope.

pub mod auth;
pub mod courses;
pub mod enrollments;
pub mod grades;
pub mod students;
pub mod teachers;
