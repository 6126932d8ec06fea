//! Pets panel: pet cards and the new-pet form.
//!
//! Numeric fields are kept as typed text until submission, where they are
//! converted. Blank numbers become `null`; anything unparseable blocks the
//! request so a `NaN` never reaches the server.

use std::fmt::Write;

use super::{
    CreateNotices, DraftError, FormRow, PanelEffect, create_record, form_card, or_placeholder, reject_draft,
    section_header,
};
use crate::net::api::{ClinicApi, Resource};
use crate::net::types::{Client, NewPet, Pet, Species};
use crate::util::notice::Notifier;

pub const CREATED_MESSAGE: &str = "Mascota registrada exitosamente";
pub const CREATE_FAILED_MESSAGE: &str = "Error al registrar mascota";

const NOTICES: CreateNotices = CreateNotices { success: CREATED_MESSAGE, failure: CREATE_FAILED_MESSAGE };

/// Draft of a new pet as typed into the form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PetDraft {
    pub nombre: String,
    pub especie: Species,
    pub raza: String,
    pub edad: String,
    pub peso: String,
    pub cliente_id: Option<i64>,
}

impl PetDraft {
    pub const FIELDS: [&'static str; 6] = ["nombre", "especie", "raza", "edad", "peso", "cliente"];

    /// Set one field. `cliente` must name a loaded client's id.
    ///
    /// # Errors
    ///
    /// Returns a [`DraftError`] for unknown fields, unknown species, or an
    /// owner id that is not in `clients`.
    pub fn set(&mut self, field: &str, value: &str, clients: &[Client]) -> Result<(), DraftError> {
        match field {
            "nombre" => value.clone_into(&mut self.nombre),
            "raza" => value.clone_into(&mut self.raza),
            "edad" => value.clone_into(&mut self.edad),
            "peso" => value.clone_into(&mut self.peso),
            "especie" => {
                self.especie = Species::parse(value).ok_or_else(|| DraftError::InvalidSpecies(value.to_owned()))?;
            }
            "cliente" | "cliente_id" => self.cliente_id = Some(select_client(value, clients)?),
            other => return Err(DraftError::UnknownField(other.to_owned())),
        }
        Ok(())
    }

    #[must_use]
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.nombre.trim().is_empty() {
            missing.push("nombre");
        }
        if self.cliente_id.is_none() {
            missing.push("cliente");
        }
        missing
    }

    /// Convert the draft into the `POST /mascotas` body.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::MissingRequired`] or [`DraftError::InvalidNumber`].
    pub fn to_payload(&self) -> Result<NewPet, DraftError> {
        let missing = self.missing_required();
        let Some(cliente_id) = self.cliente_id.filter(|_| missing.is_empty()) else {
            return Err(DraftError::MissingRequired(missing));
        };
        Ok(NewPet {
            nombre: self.nombre.clone(),
            especie: self.especie,
            raza: self.raza.clone(),
            edad: parse_age(&self.edad)?,
            peso: parse_weight(&self.peso)?,
            cliente_id,
        })
    }
}

fn select_client(raw: &str, clients: &[Client]) -> Result<i64, DraftError> {
    let unknown = || DraftError::UnknownSelection { kind: "cliente", value: raw.to_owned() };
    let id = raw.trim().parse::<i64>().map_err(|_| unknown())?;
    if clients.iter().any(|client| client.id == id) { Ok(id) } else { Err(unknown()) }
}

fn parse_age(raw: &str) -> Result<Option<i64>, DraftError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<i64>()
        .map(Some)
        .map_err(|_| DraftError::InvalidNumber { field: "edad", value: raw.to_owned() })
}

fn parse_weight(raw: &str) -> Result<Option<f64>, DraftError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.parse::<f64>() {
        Ok(weight) if weight.is_finite() => Ok(Some(weight)),
        _ => Err(DraftError::InvalidNumber { field: "peso", value: raw.to_owned() }),
    }
}

/// Panel-local state for the Pets tab.
#[derive(Clone, Debug, Default)]
pub struct PetsPanel {
    pub show_form: bool,
    pub draft: PetDraft,
}

impl PetsPanel {
    pub fn toggle_form(&mut self) {
        if self.show_form {
            self.cancel_form();
        } else {
            self.show_form = true;
        }
    }

    pub fn cancel_form(&mut self) {
        self.show_form = false;
        self.draft = PetDraft::default();
    }

    /// # Errors
    ///
    /// Returns [`DraftError::FormClosed`] when the form is hidden, or the
    /// draft's own field error.
    pub fn set_field(&mut self, field: &str, value: &str, clients: &[Client]) -> Result<(), DraftError> {
        if !self.show_form {
            return Err(DraftError::FormClosed);
        }
        self.draft.set(field, value, clients)
    }

    pub async fn submit(&mut self, api: &dyn ClinicApi, notifier: &dyn Notifier) -> PanelEffect {
        if !self.show_form {
            return reject_draft(notifier, &DraftError::FormClosed);
        }
        let payload = match self.draft.to_payload() {
            Ok(payload) => payload,
            Err(error) => return reject_draft(notifier, &error),
        };

        if create_record(api, notifier, Resource::Pets, &payload, &NOTICES).await {
            self.cancel_form();
            PanelEffect::Reload
        } else {
            PanelEffect::None
        }
    }

    #[must_use]
    pub fn render(&self, pets: &[Pet], clients: &[Client]) -> String {
        let mut out = String::new();
        section_header(&mut out, "🐕 Gestión de Mascotas", self.show_form, "➕ Nueva Mascota");

        if self.show_form {
            let draft = &self.draft;
            let owner = draft.cliente_id.map(|id| owner_option(id, clients)).unwrap_or_default();
            let rows = [
                FormRow { name: "nombre", required: true, value: &draft.nombre },
                FormRow { name: "especie", required: true, value: draft.especie.label() },
                FormRow { name: "raza", required: false, value: &draft.raza },
                FormRow { name: "edad (años)", required: false, value: &draft.edad },
                FormRow { name: "peso (kg)", required: false, value: &draft.peso },
                FormRow { name: "cliente", required: true, value: &owner },
            ];
            form_card(&mut out, "Registrar Nueva Mascota", &rows, "Guardar Mascota");
            let species: Vec<String> = Species::ALL.iter().map(|s| format!("{} {s}", s.option_icon())).collect();
            let _ = writeln!(out, "especies: {}", species.join(" | "));
            let _ = writeln!(out, "dueños:");
            for client in clients {
                let _ = writeln!(out, "  {}", owner_option(client.id, clients));
            }
            let _ = writeln!(out);
        }

        for pet in pets {
            render_card(&mut out, pet);
        }
        out
    }
}

fn owner_option(id: i64, clients: &[Client]) -> String {
    clients
        .iter()
        .find(|client| client.id == id)
        .map_or_else(|| id.to_string(), |client| format!("{id} ({})", client.full_name()))
}

fn render_card(out: &mut String, pet: &Pet) {
    let edad = pet.edad.map_or_else(|| "N/A".to_owned(), |edad| edad.to_string());
    let peso = pet.peso.map_or_else(|| "N/A".to_owned(), |peso| peso.to_string());
    let _ = writeln!(out, "{} {}  [{}]", pet.especie.icon(), pet.nombre, pet.especie);
    let _ = writeln!(out, "  Raza: {}", or_placeholder(pet.raza.as_deref(), "No especificada"));
    let _ = writeln!(out, "  Edad: {edad} años");
    let _ = writeln!(out, "  Peso: {peso} kg");
    let _ = writeln!(out, "  👤 Dueño: {}", pet.owner_name());
    let _ = writeln!(out, "  📞 {}", pet.cliente_telefono.as_deref().unwrap_or_default());
    let _ = writeln!(out);
}

#[cfg(test)]
#[path = "pets_test.rs"]
mod pets_test;
