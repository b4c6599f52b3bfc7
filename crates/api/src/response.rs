//! Pagination envelope shared by every collection endpoint.
//!
//! Collection responses use the `{count, next, previous, results}` shape
//! with absolute page links, so existing consumers of the legacy API keep
//! working unchanged.

use serde::Serialize;

/// One page of a collection plus navigation links.
#[derive(Debug, Serialize)]
pub struct Page<T: Serialize> {
    /// Total number of items across all pages.
    pub count: i64,
    /// Absolute URL of the next page, when one exists.
    pub next: Option<String>,
    /// Absolute URL of the previous page, when one exists.
    pub previous: Option<String>,
    /// The items of this page, in server order.
    pub results: Vec<T>,
}

impl<T: Serialize> Page<T> {
    /// Assemble a page envelope for `results` fetched with
    /// (`page`, `page_size`) out of `count` total rows.
    ///
    /// `path` is the collection path including its trailing slash
    /// (e.g. `/estudantes/`); links are built as `{base}{path}?page=N`.
    pub fn new(
        count: i64,
        results: Vec<T>,
        base: &str,
        path: &str,
        page: i64,
        page_size: i64,
    ) -> Self {
        let next = if page * page_size < count {
            Some(format!("{base}{path}?page={}", page + 1))
        } else {
            None
        };
        let previous = if page > 1 {
            Some(format!("{base}{path}?page={}", page - 1))
        } else {
            None
        };
        Self {
            count,
            next,
            previous,
            results,
        }
    }
}
