//! Panel modules, one per navigation tab.
//!
//! ARCHITECTURE
//! ============
//! Each domain panel owns its form draft and talks to the API directly, but
//! never touches the shared collections. A finished mutation returns
//! `PanelEffect::Reload` and the root controller performs the refetch.

pub mod appointments;
pub mod clients;
pub mod dashboard;
pub mod pets;

use crate::net::api::{ClinicApi, Resource, encode_payload};
use crate::util::notice::{Notice, Notifier};

/// What the controller must do after a panel action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub enum PanelEffect {
    None,
    Reload,
}

/// Error returned when a form field name or value is not accepted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    #[error("campo desconocido: {0}")]
    UnknownField(String),

    #[error("completa los campos obligatorios: {}", .0.join(", "))]
    MissingRequired(Vec<&'static str>),

    #[error("{field} no es un número válido: {value}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("especie no válida: {0} (Perro, Gato, Ave, Conejo, Otro)")]
    InvalidSpecies(String),

    #[error("no existe {kind} con id {value}")]
    UnknownSelection { kind: &'static str, value: String },

    #[error("fecha no válida: {0} (formato AAAA-MM-DDTHH:MM)")]
    InvalidDateTime(String),

    #[error("abre el formulario antes de editarlo")]
    FormClosed,
}

/// Messages shown after a create attempt.
pub(crate) struct CreateNotices {
    pub success: &'static str,
    pub failure: &'static str,
}

/// POST `payload` to `resource` and report the outcome. Returns whether the
/// server accepted it.
pub(crate) async fn create_record<T: serde::Serialize>(
    api: &dyn ClinicApi,
    notifier: &dyn Notifier,
    resource: Resource,
    payload: &T,
    notices: &CreateNotices,
) -> bool {
    let result = match encode_payload(resource, payload) {
        Ok(body) => api.create(resource, body).await,
        Err(error) => Err(error),
    };
    match result {
        Ok(_) => {
            tracing::info!(%resource, "record created");
            notifier.notify(Notice::info(notices.success));
            true
        }
        Err(error) => {
            tracing::warn!(%resource, %error, "record create failed");
            notifier.notify(Notice::error(notices.failure));
            false
        }
    }
}

/// Report a rejected draft and leave the form untouched.
pub(crate) fn reject_draft(notifier: &dyn Notifier, error: &DraftError) -> PanelEffect {
    tracing::debug!(%error, "draft rejected");
    notifier.notify(Notice::error(error.to_string()));
    PanelEffect::None
}

/// One editable row of a rendered form.
pub(crate) struct FormRow<'a> {
    pub name: &'static str,
    pub required: bool,
    pub value: &'a str,
}

/// Section header with the form toggle label, e.g. `➕ Nuevo Cliente`.
pub(crate) fn section_header(out: &mut String, title: &str, show_form: bool, new_label: &str) {
    use std::fmt::Write;

    let toggle = if show_form { "❌ Cancelar" } else { new_label };
    let _ = writeln!(out, "{title}    [form: {toggle}]");
    let _ = writeln!(out);
}

/// Open form card: title, one `set`-able row per field, and the submit label.
pub(crate) fn form_card(out: &mut String, title: &str, rows: &[FormRow<'_>], submit_label: &str) {
    use std::fmt::Write;

    let _ = writeln!(out, "┌ {title}");
    for row in rows {
        let marker = if row.required { "*" } else { " " };
        let _ = writeln!(out, "│ {:<14}{marker} {}", row.name, row.value);
    }
    let _ = writeln!(out, "└ [submit: {submit_label}]");
    let _ = writeln!(out);
}

/// `value` when present and non-blank, otherwise `placeholder`.
pub(crate) fn or_placeholder<'a>(value: Option<&'a str>, placeholder: &'a str) -> &'a str {
    match value {
        Some(value) if !value.trim().is_empty() => value,
        _ => placeholder,
    }
}
