//! Appointments panel: appointment cards, status actions, and the booking form.

use std::fmt::Write;

use time::UtcOffset;

use super::{
    CreateNotices, DraftError, FormRow, PanelEffect, create_record, form_card, reject_draft, section_header,
};
use crate::net::api::{ClinicApi, Resource, encode_payload};
use crate::net::types::{Appointment, AppointmentStatus, NewAppointment, Pet, StatusPatch};
use crate::util::datetime::{display_datetime, is_datetime_local};
use crate::util::notice::{Notice, Notifier};

pub const CREATED_MESSAGE: &str = "Cita agendada exitosamente";
pub const CREATE_FAILED_MESSAGE: &str = "Error al agendar cita";
pub const STATUS_UPDATED_MESSAGE: &str = "Estado actualizado";
pub const STATUS_FAILED_MESSAGE: &str = "Error al actualizar estado";

const NOTICES: CreateNotices = CreateNotices { success: CREATED_MESSAGE, failure: CREATE_FAILED_MESSAGE };

// =============================================================================
// STATUS ACTIONS
// =============================================================================

/// The two per-appointment buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusAction {
    Complete,
    Cancel,
}

impl StatusAction {
    #[must_use]
    pub fn target(self) -> AppointmentStatus {
        match self {
            Self::Complete => AppointmentStatus::Completada,
            Self::Cancel => AppointmentStatus::Cancelada,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Complete => "✅ Completar",
            Self::Cancel => "❌ Cancelar",
        }
    }

    #[must_use]
    pub fn command(self) -> &'static str {
        match self {
            Self::Complete => "complete",
            Self::Cancel => "cancel",
        }
    }

    /// A button is disabled when the appointment already has its target status.
    #[must_use]
    pub fn is_enabled(self, current: AppointmentStatus) -> bool {
        current != self.target()
    }
}

/// `PUT /citas/{id}` with `{estado}` and report the outcome.
pub async fn update_estado(
    api: &dyn ClinicApi,
    notifier: &dyn Notifier,
    id: i64,
    estado: AppointmentStatus,
) -> PanelEffect {
    let result = match encode_payload(Resource::Appointments, &StatusPatch { estado }) {
        Ok(patch) => api.update_partial(Resource::Appointments, id, patch).await,
        Err(error) => Err(error),
    };
    match result {
        Ok(_) => {
            tracing::info!(id, %estado, "appointment status updated");
            notifier.notify(Notice::info(STATUS_UPDATED_MESSAGE));
            PanelEffect::Reload
        }
        Err(error) => {
            tracing::warn!(id, %estado, %error, "appointment status update failed");
            notifier.notify(Notice::error(STATUS_FAILED_MESSAGE));
            PanelEffect::None
        }
    }
}

/// Press a status button on appointment `id`. Disabled buttons and unknown
/// ids send nothing.
pub async fn press(
    appointments: &[Appointment],
    id: i64,
    action: StatusAction,
    api: &dyn ClinicApi,
    notifier: &dyn Notifier,
) -> PanelEffect {
    let Some(appointment) = appointments.iter().find(|appointment| appointment.id == id) else {
        notifier.notify(Notice::error(format!("no existe cita con id {id}")));
        return PanelEffect::None;
    };
    if !action.is_enabled(appointment.estado) {
        notifier.notify(Notice::info(format!("La cita {id} ya está {}", appointment.estado)));
        return PanelEffect::None;
    }
    update_estado(api, notifier, id, action.target()).await
}

// =============================================================================
// DRAFT
// =============================================================================

/// Draft of a new appointment as typed into the form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppointmentDraft {
    pub mascota_id: Option<i64>,
    pub fecha_cita: String,
    pub motivo: String,
    pub observaciones: String,
}

impl AppointmentDraft {
    pub const FIELDS: [&'static str; 4] = ["mascota", "fecha", "motivo", "observaciones"];

    /// Set one field. `mascota` must name a loaded pet's id and `fecha` must
    /// be a datetime-local value.
    ///
    /// # Errors
    ///
    /// Returns a [`DraftError`] for unknown fields, an unknown pet id, or a
    /// malformed date.
    pub fn set(&mut self, field: &str, value: &str, pets: &[Pet]) -> Result<(), DraftError> {
        match field {
            "mascota" | "mascota_id" => self.mascota_id = Some(select_pet(value, pets)?),
            "fecha" | "fecha_cita" => {
                if !is_datetime_local(value) {
                    return Err(DraftError::InvalidDateTime(value.to_owned()));
                }
                value.trim().clone_into(&mut self.fecha_cita);
            }
            "motivo" => value.clone_into(&mut self.motivo),
            "observaciones" => value.clone_into(&mut self.observaciones),
            other => return Err(DraftError::UnknownField(other.to_owned())),
        }
        Ok(())
    }

    #[must_use]
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.mascota_id.is_none() {
            missing.push("mascota");
        }
        if self.fecha_cita.trim().is_empty() {
            missing.push("fecha");
        }
        if self.motivo.trim().is_empty() {
            missing.push("motivo");
        }
        missing
    }

    /// Build the `POST /citas` body.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::MissingRequired`] when a required field is blank.
    pub fn to_payload(&self) -> Result<NewAppointment, DraftError> {
        let missing = self.missing_required();
        let Some(mascota_id) = self.mascota_id.filter(|_| missing.is_empty()) else {
            return Err(DraftError::MissingRequired(missing));
        };
        Ok(NewAppointment {
            mascota_id,
            fecha_cita: self.fecha_cita.clone(),
            motivo: self.motivo.clone(),
            observaciones: self.observaciones.clone(),
        })
    }
}

fn select_pet(raw: &str, pets: &[Pet]) -> Result<i64, DraftError> {
    let unknown = || DraftError::UnknownSelection { kind: "mascota", value: raw.to_owned() };
    let id = raw.trim().parse::<i64>().map_err(|_| unknown())?;
    if pets.iter().any(|pet| pet.id == id) { Ok(id) } else { Err(unknown()) }
}

// =============================================================================
// PANEL
// =============================================================================

/// Panel-local state for the Appointments tab.
#[derive(Clone, Debug, Default)]
pub struct AppointmentsPanel {
    pub show_form: bool,
    pub draft: AppointmentDraft,
}

impl AppointmentsPanel {
    pub fn toggle_form(&mut self) {
        if self.show_form {
            self.cancel_form();
        } else {
            self.show_form = true;
        }
    }

    pub fn cancel_form(&mut self) {
        self.show_form = false;
        self.draft = AppointmentDraft::default();
    }

    /// # Errors
    ///
    /// Returns [`DraftError::FormClosed`] when the form is hidden, or the
    /// draft's own field error.
    pub fn set_field(&mut self, field: &str, value: &str, pets: &[Pet]) -> Result<(), DraftError> {
        if !self.show_form {
            return Err(DraftError::FormClosed);
        }
        self.draft.set(field, value, pets)
    }

    pub async fn submit(&mut self, api: &dyn ClinicApi, notifier: &dyn Notifier) -> PanelEffect {
        if !self.show_form {
            return reject_draft(notifier, &DraftError::FormClosed);
        }
        let payload = match self.draft.to_payload() {
            Ok(payload) => payload,
            Err(error) => return reject_draft(notifier, &error),
        };

        if create_record(api, notifier, Resource::Appointments, &payload, &NOTICES).await {
            self.cancel_form();
            PanelEffect::Reload
        } else {
            PanelEffect::None
        }
    }

    #[must_use]
    pub fn render(&self, appointments: &[Appointment], pets: &[Pet], offset: UtcOffset) -> String {
        let mut out = String::new();
        section_header(&mut out, "📅 Gestión de Citas", self.show_form, "➕ Nueva Cita");

        if self.show_form {
            let draft = &self.draft;
            let pet = draft.mascota_id.map(|id| pet_option(id, pets)).unwrap_or_default();
            let rows = [
                FormRow { name: "mascota", required: true, value: &pet },
                FormRow { name: "fecha", required: true, value: &draft.fecha_cita },
                FormRow { name: "motivo", required: true, value: &draft.motivo },
                FormRow { name: "observaciones", required: false, value: &draft.observaciones },
            ];
            form_card(&mut out, "Agendar Nueva Cita", &rows, "Agendar Cita");
            let _ = writeln!(out, "mascotas:");
            for pet in pets {
                let _ = writeln!(out, "  {}", pet_option(pet.id, pets));
            }
            let _ = writeln!(out);
        }

        for appointment in appointments {
            render_card(&mut out, appointment, offset);
        }
        out
    }
}

fn pet_option(id: i64, pets: &[Pet]) -> String {
    pets.iter().find(|pet| pet.id == id).map_or_else(
        || id.to_string(),
        |pet| format!("{id} {} ({}) - {}", pet.nombre, pet.especie, pet.owner_name()),
    )
}

fn render_card(out: &mut String, appointment: &Appointment, offset: UtcOffset) {
    let pet = appointment.mascota_nombre.as_deref().unwrap_or_default();
    let species = appointment.mascota_especie.map(|species| species.label()).unwrap_or_default();
    let phone = appointment.cliente_telefono.as_deref().unwrap_or_default();
    let _ = writeln!(out, "#{} 🐾 {pet} ({species})    [{}]", appointment.id, appointment.estado);
    let _ = writeln!(out, "  👤 {} | 📞 {phone}", appointment.owner_name());
    let _ = writeln!(out, "  📅 Fecha: {}", display_datetime(&appointment.fecha_cita, offset));
    let _ = writeln!(out, "  🩺 Motivo: {}", appointment.motivo);
    if let Some(notes) = appointment.observaciones.as_deref().filter(|notes| !notes.trim().is_empty()) {
        let _ = writeln!(out, "  📝 Observaciones: {notes}");
    }
    let buttons: Vec<String> = [StatusAction::Complete, StatusAction::Cancel]
        .into_iter()
        .map(|action| {
            if action.is_enabled(appointment.estado) {
                format!("[{}: {} {}]", action.label(), action.command(), appointment.id)
            } else {
                format!("[{} (deshabilitado)]", action.label())
            }
        })
        .collect();
    let _ = writeln!(out, "  {}", buttons.join(" "));
    let _ = writeln!(out);
}

#[cfg(test)]
#[path = "appointments_test.rs"]
mod appointments_test;
