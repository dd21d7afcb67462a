//! Infrastructure adapters. Implement ports.
//!
//! Terminal UI and draft files. Map errors to DomainError.

pub mod draft;
pub mod ui;
