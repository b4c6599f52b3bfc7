//! Consuming client for the escola Data API.
//!
//! This crate is the school site's data layer: it resolves which API base
//! to talk to ([`base`]), performs authenticated JSON fetches that never
//! panic on transport failures ([`fetch`]), walks paginated collections
//! end-to-end ([`paginate`]), and assembles the page contexts a template
//! layer renders ([`views`]).
//!
//! Authentication state is an explicit, request-scoped
//! [`SessionAuth`](auth::SessionAuth) value passed into every call --
//! there is no implicit global session storage.

pub mod auth;
pub mod base;
pub mod config;
pub mod fetch;
pub mod paginate;
pub mod views;
