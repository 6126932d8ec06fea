//! Small shared helpers with no dependency on controller state.
//!
//! `datetime` interprets the backend's timestamps; `notice` is the
//! user-facing message sink.

pub mod datetime;
pub mod notice;
