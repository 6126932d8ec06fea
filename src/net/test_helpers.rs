//! Test doubles shared by controller, panel, and console tests.

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::{Value, json};

use super::api::{ClinicApi, Resource};
use super::error::ApiError;
use crate::util::notice::{Notice, NoticeLevel, Notifier};

// =========================================================================
// MockApi
// =========================================================================

/// One recorded API call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List(Resource),
    Create(Resource, Value),
    Update(Resource, i64, Value),
    Health,
}

/// Scripted [`ClinicApi`]. Lists answer from a per-resource table that tests
/// can replace between calls; mutations succeed unless a failure is queued.
#[derive(Default)]
pub struct MockApi {
    lists: Mutex<HashMap<Resource, Result<Value, ApiError>>>,
    mutation_failures: Mutex<Vec<ApiError>>,
    calls: Mutex<Vec<Call>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// All three collections answer with an empty list.
    pub fn empty() -> Self {
        let api = Self::new();
        api.set_list(Resource::Clients, json!([]));
        api.set_list(Resource::Pets, json!([]));
        api.set_list(Resource::Appointments, json!([]));
        api
    }

    pub fn set_list(&self, resource: Resource, value: Value) {
        self.lists.lock().unwrap().insert(resource, Ok(value));
    }

    pub fn fail_list(&self, resource: Resource, status: u16) {
        self.lists.lock().unwrap().insert(resource, Err(status_error("GET", resource.path(), status)));
    }

    /// Make the next create/update fail with `status`.
    pub fn fail_next_mutation(&self, status: u16) {
        self.mutation_failures.lock().unwrap().push(status_error("POST", "mutation", status));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn mutations(&self) -> Vec<Call> {
        self.calls().into_iter().filter(|call| matches!(call, Call::Create(..) | Call::Update(..))).collect()
    }

    pub fn list_calls(&self) -> usize {
        self.calls().iter().filter(|call| matches!(call, Call::List(_))).count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn next_mutation_result(&self) -> Result<Value, ApiError> {
        let mut failures = self.mutation_failures.lock().unwrap();
        if failures.is_empty() { Ok(json!({ "message": "ok", "id": 100 })) } else { Err(failures.remove(0)) }
    }
}

#[async_trait::async_trait]
impl ClinicApi for MockApi {
    async fn list(&self, resource: Resource) -> Result<Value, ApiError> {
        self.record(Call::List(resource));
        self.lists.lock().unwrap().get(&resource).cloned().unwrap_or_else(|| Ok(json!([])))
    }

    async fn create(&self, resource: Resource, payload: Value) -> Result<Value, ApiError> {
        self.record(Call::Create(resource, payload));
        self.next_mutation_result()
    }

    async fn update_partial(&self, resource: Resource, id: i64, patch: Value) -> Result<Value, ApiError> {
        self.record(Call::Update(resource, id, patch));
        self.next_mutation_result()
    }

    async fn health(&self) -> Result<Value, ApiError> {
        self.record(Call::Health);
        Ok(json!({ "status": "healthy", "database": "connected" }))
    }
}

fn status_error(method: &str, path: &str, status: u16) -> ApiError {
    ApiError::Status { method: method.to_owned(), url: format!("/{path}"), status, body: String::new() }
}

// =========================================================================
// RecordingNotifier
// =========================================================================

#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.notices().into_iter().map(|notice| notice.message).collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.notices().into_iter().filter(|notice| notice.level == NoticeLevel::Error).map(|n| n.message).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

// =========================================================================
// Fixtures
// =========================================================================

pub fn client_json(id: i64, nombre: &str, apellido: &str) -> Value {
    json!({
        "id": id,
        "nombre": nombre,
        "apellido": apellido,
        "telefono": "555-0100",
        "email": null,
        "direccion": "",
        "fecha_registro": "Sat, 17 Oct 2026 08:00:00 GMT"
    })
}

pub fn pet_json(id: i64, nombre: &str, especie: &str, cliente_id: i64) -> Value {
    json!({
        "id": id,
        "nombre": nombre,
        "especie": especie,
        "raza": null,
        "edad": 3,
        "peso": "4.50",
        "cliente_id": cliente_id,
        "cliente_nombre": "Ana",
        "cliente_apellido": "Diaz",
        "cliente_telefono": "555-0100"
    })
}

pub fn appointment_json(id: i64, mascota_id: i64, fecha_cita: &str, estado: &str) -> Value {
    json!({
        "id": id,
        "mascota_id": mascota_id,
        "fecha_cita": fecha_cita,
        "motivo": "Vacuna anual",
        "observaciones": null,
        "estado": estado,
        "mascota_nombre": "Luna",
        "mascota_especie": "Gato",
        "cliente_nombre": "Ana",
        "cliente_apellido": "Diaz",
        "cliente_telefono": "555-0100"
    })
}

/// Decode a fixture into its typed record.
pub fn decode<T: serde::de::DeserializeOwned>(value: Value) -> T {
    serde_json::from_value(value).unwrap()
}
