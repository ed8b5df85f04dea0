//! Small response bodies shared by several handlers.

use serde::Serialize;

/// `{}`: returned by decision endpoints that have nothing to report.
#[derive(Debug, Default, Serialize)]
pub struct EmptyResponse {}

/// `{"updated": n}`: number of rows a bulk update touched.
#[derive(Debug, Serialize)]
pub struct UpdatedResponse {
    pub updated: u64,
}
