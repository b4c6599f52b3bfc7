//! Pagination aggregation.
//!
//! List endpoints answer with a `{count, next, previous, results}`
//! envelope, but some endpoints return a bare list and detail endpoints a
//! single object. A single classification step maps every payload onto
//! [`ResponseShape`]; [`fetch_all`] then walks `next` links end-to-end,
//! guarding against link cycles.

use std::collections::HashSet;

use serde_json::Value;

use crate::auth::SessionAuth;
use crate::fetch::{ApiClient, FetchError};

/// The three payload shapes a collection fetch can produce.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseShape {
    /// A pagination envelope: one page of items plus the absolute URL of
    /// the next page, when any.
    Page {
        results: Vec<Value>,
        next: Option<String>,
    },
    /// A bare, single-page list.
    List(Vec<Value>),
    /// A single object (detail endpoint).
    Single(Value),
}

/// Classify a payload into its [`ResponseShape`].
///
/// A mapping carrying a `results` array is a page; a bare array is a
/// single-page list; anything else is a single object.
pub fn classify(payload: Value) -> ResponseShape {
    match payload {
        Value::Object(mut map) => match map.remove("results") {
            Some(Value::Array(results)) => ResponseShape::Page {
                results,
                next: map.get("next").and_then(Value::as_str).map(str::to_string),
            },
            Some(other) => {
                // `results` present but not a list: keep the payload whole.
                map.insert("results".to_string(), other);
                ResponseShape::Single(Value::Object(map))
            }
            None => ResponseShape::Single(Value::Object(map)),
        },
        Value::Array(items) => ResponseShape::List(items),
        other => ResponseShape::Single(other),
    }
}

/// A fully materialized collection, plus the error that interrupted the
/// walk, when one did. Items gathered before the failure are kept so list
/// pages can still render alongside the error banner.
#[derive(Debug, Default)]
pub struct Aggregated {
    pub items: Vec<Value>,
    pub error: Option<FetchError>,
}

/// Fetch `base + path` and follow `next` links until the collection is
/// exhausted.
///
/// Guarantees a finite walk: URLs are tracked and a repeated link stops
/// the aggregation immediately, as does a failed fetch. Non-paginated
/// endpoints pass through transparently (single page, or one item for a
/// single object).
pub async fn fetch_all(
    client: &ApiClient,
    base: &str,
    path: &str,
    auth: &SessionAuth,
) -> Aggregated {
    let mut aggregated = Aggregated::default();
    let mut visited: HashSet<String> = HashSet::new();
    let mut url = format!("{base}{path}");

    loop {
        if !visited.insert(url.clone()) {
            tracing::warn!(%url, "Pagination link cycle detected, stopping");
            break;
        }

        let payload = match client.fetch_json(&url, &[], auth).await {
            Ok(payload) => payload,
            Err(err) => {
                aggregated.error = Some(err);
                break;
            }
        };

        match classify(payload) {
            ResponseShape::Page { mut results, next } => {
                aggregated.items.append(&mut results);
                match next {
                    Some(next_url) => url = next_url,
                    None => break,
                }
            }
            ResponseShape::List(mut items) => {
                aggregated.items.append(&mut items);
                break;
            }
            ResponseShape::Single(item) => {
                aggregated.items.push(item);
                break;
            }
        }
    }

    aggregated
}
