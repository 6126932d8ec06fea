//! Wire schema for the clinic REST API.
//!
//! DESIGN
//! ======
//! Record types mirror the JSON rows the backend returns, field names
//! included, so no rename layer sits between the wire and the panels.
//! `especie` and `estado` are closed enums; the backend stores free text, so
//! decoding maps its legacy and unknown labels onto the closed set.
//!
//! Timestamps stay as the raw strings the server sent. `util::datetime`
//! parses them at the point of use because the backend emits several formats.

use serde::{Deserialize, Deserializer, Serialize};

// =============================================================================
// ENUMS
// =============================================================================

/// Species offered by the pet form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum Species {
    #[default]
    Perro,
    Gato,
    Ave,
    Conejo,
    Otro,
}

impl Species {
    pub const ALL: [Self; 5] = [Self::Perro, Self::Gato, Self::Ave, Self::Conejo, Self::Otro];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Perro => "Perro",
            Self::Gato => "Gato",
            Self::Ave => "Ave",
            Self::Conejo => "Conejo",
            Self::Otro => "Otro",
        }
    }

    /// Card icon. Only dogs and cats get their own glyph.
    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            Self::Perro => "🐕",
            Self::Gato => "🐈",
            Self::Ave | Self::Conejo | Self::Otro => "🐾",
        }
    }

    /// Icon used in the species choice list, which has one per species.
    #[must_use]
    pub fn option_icon(self) -> &'static str {
        match self {
            Self::Perro => "🐕",
            Self::Gato => "🐈",
            Self::Ave => "🦜",
            Self::Conejo => "🐰",
            Self::Otro => "🐾",
        }
    }

    /// Parse a form selection. Accepts the labels case-insensitively.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL.into_iter().find(|species| species.label().eq_ignore_ascii_case(raw))
    }
}

impl From<String> for Species {
    fn from(raw: String) -> Self {
        Self::parse(&raw).unwrap_or(Self::Otro)
    }
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Appointment lifecycle status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum AppointmentStatus {
    #[default]
    Pendiente,
    Completada,
    Cancelada,
}

/// Status label the backend assigns when a create omits `estado`.
const LEGACY_PENDING_LABEL: &str = "Programada";

impl AppointmentStatus {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Pendiente => "Pendiente",
            Self::Completada => "Completada",
            Self::Cancelada => "Cancelada",
        }
    }
}

impl TryFrom<String> for AppointmentStatus {
    type Error = String;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        match raw.as_str() {
            "Pendiente" | LEGACY_PENDING_LABEL => Ok(Self::Pendiente),
            "Completada" => Ok(Self::Completada),
            "Cancelada" => Ok(Self::Cancelada),
            other => Err(format!("unknown appointment status: {other}")),
        }
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// RECORDS
// =============================================================================

/// A clinic customer as returned by `GET /clientes`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Client {
    pub id: i64,
    pub nombre: String,
    pub apellido: String,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub direccion: Option<String>,
    #[serde(default)]
    pub fecha_registro: Option<String>,
}

impl Client {
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.nombre, self.apellido)
    }
}

/// A pet as returned by `GET /mascotas`, denormalized with owner fields.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Pet {
    pub id: i64,
    pub nombre: String,
    pub especie: Species,
    #[serde(default)]
    pub raza: Option<String>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub edad: Option<i64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub peso: Option<f64>,
    pub cliente_id: i64,
    #[serde(default)]
    pub cliente_nombre: Option<String>,
    #[serde(default)]
    pub cliente_apellido: Option<String>,
    #[serde(default)]
    pub cliente_telefono: Option<String>,
}

impl Pet {
    #[must_use]
    pub fn owner_name(&self) -> String {
        join_name(self.cliente_nombre.as_deref(), self.cliente_apellido.as_deref())
    }
}

/// An appointment as returned by `GET /citas`, denormalized with pet and
/// owner fields.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub mascota_id: i64,
    pub fecha_cita: String,
    pub motivo: String,
    #[serde(default)]
    pub observaciones: Option<String>,
    pub estado: AppointmentStatus,
    #[serde(default)]
    pub mascota_nombre: Option<String>,
    #[serde(default)]
    pub mascota_especie: Option<Species>,
    #[serde(default)]
    pub cliente_nombre: Option<String>,
    #[serde(default)]
    pub cliente_apellido: Option<String>,
    #[serde(default)]
    pub cliente_telefono: Option<String>,
}

impl Appointment {
    #[must_use]
    pub fn owner_name(&self) -> String {
        join_name(self.cliente_nombre.as_deref(), self.cliente_apellido.as_deref())
    }
}

fn join_name(first: Option<&str>, last: Option<&str>) -> String {
    match (first, last) {
        (Some(first), Some(last)) => format!("{first} {last}"),
        (Some(name), None) | (None, Some(name)) => name.to_owned(),
        (None, None) => String::new(),
    }
}

// =============================================================================
// PAYLOADS
// =============================================================================

/// Body of `POST /clientes`. Blank optional fields go out as empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewClient {
    pub nombre: String,
    pub apellido: String,
    pub telefono: String,
    pub email: String,
    pub direccion: String,
}

/// Body of `POST /mascotas`. Blank `edad`/`peso` go out as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPet {
    pub nombre: String,
    pub especie: Species,
    pub raza: String,
    pub edad: Option<i64>,
    pub peso: Option<f64>,
    pub cliente_id: i64,
}

/// Body of `POST /citas`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewAppointment {
    pub mascota_id: i64,
    pub fecha_cita: String,
    pub motivo: String,
    pub observaciones: String,
}

/// Body of `PUT /citas/{id}` for a status transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusPatch {
    pub estado: AppointmentStatus,
}

// =============================================================================
// LENIENT NUMBERS
// =============================================================================

/// Numeric columns may arrive as JSON numbers or, for `NUMERIC`, as strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Int(i64),
    Float(f64),
    Text(String),
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[allow(clippy::cast_precision_loss)]
    let value = match Option::<NumberOrText>::deserialize(deserializer)? {
        None => None,
        Some(NumberOrText::Int(n)) => Some(n as f64),
        Some(NumberOrText::Float(n)) => Some(n),
        Some(NumberOrText::Text(text)) if text.trim().is_empty() => None,
        Some(NumberOrText::Text(text)) => Some(text.trim().parse::<f64>().map_err(serde::de::Error::custom)?),
    };
    Ok(value)
}

fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[allow(clippy::cast_possible_truncation)]
    let value = match Option::<NumberOrText>::deserialize(deserializer)? {
        None => None,
        Some(NumberOrText::Int(n)) => Some(n),
        Some(NumberOrText::Float(n)) if n.fract() == 0.0 => Some(n as i64),
        Some(NumberOrText::Float(n)) => return Err(serde::de::Error::custom(format!("expected integer, got {n}"))),
        Some(NumberOrText::Text(text)) if text.trim().is_empty() => None,
        Some(NumberOrText::Text(text)) => Some(text.trim().parse::<i64>().map_err(serde::de::Error::custom)?),
    };
    Ok(value)
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
