//! User-facing notifications.
//!
//! A `Notice` is the console's blocking alert: one message per completed
//! action, success or failure. The sink is a trait so the controller and
//! panels can be driven without a terminal.

use std::io::Write;
use std::sync::{Mutex, PoisonError};

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A single message shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, message: message.into() }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.level {
            NoticeLevel::Info => write!(f, "[aviso] {}", self.message),
            NoticeLevel::Error => write!(f, "[error] {}", self.message),
        }
    }
}

/// Destination for notices.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Writes each notice as one line to any `Write` sink (stdout in the binary).
pub struct LineNotifier<W: Write + Send> {
    out: Mutex<W>,
}

impl<W: Write + Send> LineNotifier<W> {
    pub fn new(out: W) -> Self {
        Self { out: Mutex::new(out) }
    }
}

impl<W: Write + Send> Notifier for LineNotifier<W> {
    fn notify(&self, notice: Notice) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(error) = writeln!(out, "{notice}").and_then(|()| out.flush()) {
            tracing::warn!(%error, "failed to write notice");
        }
    }
}

#[cfg(test)]
#[path = "notice_test.rs"]
mod notice_test;
