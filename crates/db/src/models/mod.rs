//! Row models and request DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` + `Validate` DTOs for inserts and partial updates
//!
//! Everything crossing the wire is camelCase.

pub mod camera;
pub mod chat;
pub mod construction_site;
pub mod document;
pub mod final_document;
pub mod message;
pub mod project;
pub mod project_stage;
pub mod statistics;
