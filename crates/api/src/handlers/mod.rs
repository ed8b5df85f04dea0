//! Request handlers, one module per resource.

pub mod admin;
pub mod auth;
pub mod chat;
pub mod completion;
pub mod construction_object;
pub mod construction_site;
pub mod document;
pub mod project;
pub mod stage;
