//! Networking modules for the clinic REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` issues HTTP calls, `types` defines the wire schema, and `error`
//! carries call failures back to the panels.

pub mod api;
pub mod error;
pub mod types;

#[cfg(test)]
pub mod test_helpers;
