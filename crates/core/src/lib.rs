//! Shared domain layer for the escola platform.
//!
//! Holds the types, errors, and pure validation rules used by both the
//! Data API server (`escola-api`) and the consuming client
//! (`escola-client`). Anything that needs a database connection lives in
//! `escola-db`; anything HTTP-shaped lives in the crates above this one.

pub mod error;
pub mod grades;
pub mod groups;
pub mod types;
pub mod vocab;
