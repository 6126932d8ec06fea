//! Clients panel: customer cards and the new-client form.

use std::fmt::Write;

use time::UtcOffset;

use super::{
    CreateNotices, DraftError, FormRow, PanelEffect, create_record, form_card, or_placeholder, reject_draft,
    section_header,
};
use crate::net::api::{ClinicApi, Resource};
use crate::net::types::{Client, NewClient};
use crate::util::datetime::display_date;
use crate::util::notice::Notifier;

pub const CREATED_MESSAGE: &str = "Cliente registrado exitosamente";
pub const CREATE_FAILED_MESSAGE: &str = "Error al registrar cliente";

const NOTICES: CreateNotices = CreateNotices { success: CREATED_MESSAGE, failure: CREATE_FAILED_MESSAGE };

/// Free-text draft of a new client.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClientDraft {
    pub nombre: String,
    pub apellido: String,
    pub telefono: String,
    pub email: String,
    pub direccion: String,
}

impl ClientDraft {
    pub const FIELDS: [&'static str; 5] = ["nombre", "apellido", "telefono", "email", "direccion"];

    /// Set one field by its wire name.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::UnknownField`] for names outside [`Self::FIELDS`].
    pub fn set(&mut self, field: &str, value: &str) -> Result<(), DraftError> {
        let slot = match field {
            "nombre" => &mut self.nombre,
            "apellido" => &mut self.apellido,
            "telefono" => &mut self.telefono,
            "email" => &mut self.email,
            "direccion" => &mut self.direccion,
            other => return Err(DraftError::UnknownField(other.to_owned())),
        };
        value.clone_into(slot);
        Ok(())
    }

    #[must_use]
    pub fn missing_required(&self) -> Vec<&'static str> {
        [("nombre", &self.nombre), ("apellido", &self.apellido)]
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| name)
            .collect()
    }

    /// Build the `POST /clientes` body.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::MissingRequired`] when nombre or apellido is blank.
    pub fn to_payload(&self) -> Result<NewClient, DraftError> {
        let missing = self.missing_required();
        if !missing.is_empty() {
            return Err(DraftError::MissingRequired(missing));
        }
        Ok(NewClient {
            nombre: self.nombre.clone(),
            apellido: self.apellido.clone(),
            telefono: self.telefono.clone(),
            email: self.email.clone(),
            direccion: self.direccion.clone(),
        })
    }
}

/// Panel-local state for the Clients tab.
#[derive(Clone, Debug, Default)]
pub struct ClientsPanel {
    pub show_form: bool,
    pub draft: ClientDraft,
}

impl ClientsPanel {
    /// "Nuevo Cliente" opens the form; pressing it again cancels.
    pub fn toggle_form(&mut self) {
        if self.show_form {
            self.cancel_form();
        } else {
            self.show_form = true;
        }
    }

    /// Hide the form and drop the draft.
    pub fn cancel_form(&mut self) {
        self.show_form = false;
        self.draft = ClientDraft::default();
    }

    /// # Errors
    ///
    /// Returns [`DraftError::FormClosed`] when the form is hidden, or the
    /// draft's own field error.
    pub fn set_field(&mut self, field: &str, value: &str) -> Result<(), DraftError> {
        if !self.show_form {
            return Err(DraftError::FormClosed);
        }
        self.draft.set(field, value)
    }

    /// Submit the draft. Failures keep the form open with the draft intact.
    pub async fn submit(&mut self, api: &dyn ClinicApi, notifier: &dyn Notifier) -> PanelEffect {
        if !self.show_form {
            return reject_draft(notifier, &DraftError::FormClosed);
        }
        let payload = match self.draft.to_payload() {
            Ok(payload) => payload,
            Err(error) => return reject_draft(notifier, &error),
        };

        if create_record(api, notifier, Resource::Clients, &payload, &NOTICES).await {
            self.cancel_form();
            PanelEffect::Reload
        } else {
            PanelEffect::None
        }
    }

    #[must_use]
    pub fn render(&self, clients: &[Client], offset: UtcOffset) -> String {
        let mut out = String::new();
        section_header(&mut out, "👥 Gestión de Clientes", self.show_form, "➕ Nuevo Cliente");

        if self.show_form {
            let draft = &self.draft;
            let rows = [
                FormRow { name: "nombre", required: true, value: &draft.nombre },
                FormRow { name: "apellido", required: true, value: &draft.apellido },
                FormRow { name: "telefono", required: false, value: &draft.telefono },
                FormRow { name: "email", required: false, value: &draft.email },
                FormRow { name: "direccion", required: false, value: &draft.direccion },
            ];
            form_card(&mut out, "Registrar Nuevo Cliente", &rows, "Guardar Cliente");
        }

        for client in clients {
            render_card(&mut out, client, offset);
        }
        out
    }
}

fn render_card(out: &mut String, client: &Client, offset: UtcOffset) {
    let _ = writeln!(out, "■ {}", client.full_name());
    let _ = writeln!(out, "  📞 {}", or_placeholder(client.telefono.as_deref(), "No registrado"));
    let _ = writeln!(out, "  📧 {}", or_placeholder(client.email.as_deref(), "No registrado"));
    let _ = writeln!(out, "  📍 {}", or_placeholder(client.direccion.as_deref(), "No registrada"));
    if let Some(registered) = client.fecha_registro.as_deref() {
        let _ = writeln!(out, "  Registrado: {}", display_date(registered, offset));
    }
    let _ = writeln!(out);
}

#[cfg(test)]
#[path = "clients_test.rs"]
mod clients_test;
