//! Outbound delivery channels.

pub mod broadcast;
