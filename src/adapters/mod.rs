//! Infrastructure adapters. Implement outbound ports.
//!
//! HTTP, filesystem, terminal. Map errors to DomainError.

pub mod catalog;
pub mod location;
pub mod notify;
pub mod persistence;
pub mod ui;
