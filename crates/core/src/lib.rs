//! Domain rules for the construction-project lifecycle.
//!
//! Everything in this crate is pure: no database, no HTTP. The API layer
//! loads rows, asks these modules whether a transition is allowed, and
//! persists the result.

pub mod approval;
pub mod batch;
pub mod chat;
pub mod completion;
pub mod error;
pub mod notification;
pub mod project_lifecycle;
pub mod status;
pub mod types;
