//! Shared application state.

pub mod app;
