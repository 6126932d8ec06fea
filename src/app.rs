//! Root controller: owns application state and routes panel actions.
//!
//! SYSTEM CONTEXT
//! ==============
//! The controller performs the initial three-way fetch, switches tabs, and
//! applies the effects panels return. It is the only writer of `AppState`;
//! every successful mutation funnels through `load_data`, so all panels show
//! the latest server state afterwards.
//!
//! CONCURRENCY
//! ===========
//! The three list calls run concurrently and join all-or-nothing on call
//! failures. Rows that fail to decode are dropped individually. Nothing is
//! cancelled or retried; the loading flag is cleared on every path.

use std::sync::Arc;

use time::{Date, UtcOffset};

use crate::net::api::{ClinicApi, Resource, fetch_collection};
use crate::net::error::ApiError;
use crate::net::types::{Appointment, Client, Pet};
use crate::pages::appointments::{self, AppointmentsPanel, StatusAction};
use crate::pages::clients::ClientsPanel;
use crate::pages::pets::PetsPanel;
use crate::pages::{DraftError, PanelEffect, dashboard};
use crate::state::app::{AppState, Collections, Tab};
use crate::util::notice::{Notice, Notifier};

pub const LOAD_FAILED_MESSAGE: &str = "Error al cargar los datos. Verifica que el backend esté corriendo.";

/// Notice shown when some rows could not be read and were left out.
#[must_use]
pub fn skipped_rows_message(count: usize) -> String {
    format!("Se omitieron {count} registro(s) con datos no válidos")
}

/// Fetch all three collections concurrently. Any failed call fails the batch;
/// unreadable rows are only counted.
///
/// # Errors
///
/// Returns the first [`ApiError`] among the three calls.
pub async fn fetch_all(api: &dyn ClinicApi) -> Result<(Collections, usize), ApiError> {
    let (clients, pets, appointments) = tokio::try_join!(
        fetch_collection::<Client>(api, Resource::Clients),
        fetch_collection::<Pet>(api, Resource::Pets),
        fetch_collection::<Appointment>(api, Resource::Appointments),
    )?;
    let skipped = clients.skipped + pets.skipped + appointments.skipped;
    let collections =
        Collections { clients: clients.records, pets: pets.records, appointments: appointments.records };
    Ok((collections, skipped))
}

/// Owner of [`AppState`] and the three domain panels.
pub struct AppController {
    api: Arc<dyn ClinicApi>,
    notifier: Arc<dyn Notifier>,
    offset: UtcOffset,
    state: AppState,
    clients: ClientsPanel,
    pets: PetsPanel,
    appointments: AppointmentsPanel,
    mounted: bool,
}

impl AppController {
    pub fn new(api: Arc<dyn ClinicApi>, notifier: Arc<dyn Notifier>, offset: UtcOffset) -> Self {
        Self {
            api,
            notifier,
            offset,
            state: AppState::default(),
            clients: ClientsPanel::default(),
            pets: PetsPanel::default(),
            appointments: AppointmentsPanel::default(),
            mounted: false,
        }
    }

    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    #[must_use]
    pub fn api(&self) -> &dyn ClinicApi {
        self.api.as_ref()
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Initial load. Only the first call fetches.
    pub async fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        self.load_data().await;
    }

    /// Raise the loading flag so a screen drawn now shows the loading state.
    /// [`AppController::load_data`] clears it.
    pub fn start_loading(&mut self) {
        self.state.loading = true;
    }

    /// Refetch every collection and replace them together.
    pub async fn load_data(&mut self) {
        self.start_loading();
        match fetch_all(self.api.as_ref()).await {
            Ok((collections, skipped)) => {
                tracing::debug!(
                    clients = collections.clients.len(),
                    pets = collections.pets.len(),
                    appointments = collections.appointments.len(),
                    "collections loaded"
                );
                self.state.replace_collections(collections);
                if skipped > 0 {
                    self.notifier.notify(Notice::error(skipped_rows_message(skipped)));
                }
            }
            Err(error) => {
                tracing::error!(%error, "failed to load collections");
                self.notifier.notify(Notice::error(LOAD_FAILED_MESSAGE));
            }
        }
        self.state.loading = false;
    }

    pub fn switch_tab(&mut self, tab: Tab) {
        self.state.active_tab = tab;
    }

    pub async fn apply(&mut self, effect: PanelEffect) {
        match effect {
            PanelEffect::Reload => self.load_data().await,
            PanelEffect::None => {}
        }
    }

    // =========================================================================
    // FORM ACTIONS (routed to the active tab's panel)
    // =========================================================================

    /// Toggle the active panel's form. Returns `false` on the dashboard,
    /// which has no form.
    pub fn toggle_form(&mut self) -> bool {
        match self.state.active_tab {
            Tab::Dashboard => return false,
            Tab::Clients => self.clients.toggle_form(),
            Tab::Pets => self.pets.toggle_form(),
            Tab::Appointments => self.appointments.toggle_form(),
        }
        true
    }

    /// Hide the active panel's form and discard its draft.
    pub fn cancel_form(&mut self) -> bool {
        match self.state.active_tab {
            Tab::Dashboard => return false,
            Tab::Clients => self.clients.cancel_form(),
            Tab::Pets => self.pets.cancel_form(),
            Tab::Appointments => self.appointments.cancel_form(),
        }
        true
    }

    /// # Errors
    ///
    /// Returns the panel's [`DraftError`]; on the dashboard every field is unknown.
    pub fn set_field(&mut self, field: &str, value: &str) -> Result<(), DraftError> {
        match self.state.active_tab {
            Tab::Dashboard => Err(DraftError::UnknownField(field.to_owned())),
            Tab::Clients => self.clients.set_field(field, value),
            Tab::Pets => self.pets.set_field(field, value, &self.state.clients),
            Tab::Appointments => self.appointments.set_field(field, value, &self.state.pets),
        }
    }

    /// Submit the active panel's form. The caller applies the returned effect.
    pub async fn submit(&mut self) -> PanelEffect {
        let api = self.api.as_ref();
        let notifier = self.notifier.as_ref();
        match self.state.active_tab {
            Tab::Dashboard => {
                notifier.notify(Notice::error("el dashboard no tiene formulario"));
                PanelEffect::None
            }
            Tab::Clients => self.clients.submit(api, notifier).await,
            Tab::Pets => self.pets.submit(api, notifier).await,
            Tab::Appointments => self.appointments.submit(api, notifier).await,
        }
    }

    /// Press "Completar" or "Cancelar" on appointment `id`. The caller
    /// applies the returned effect.
    pub async fn press_status(&mut self, id: i64, action: StatusAction) -> PanelEffect {
        appointments::press(&self.state.appointments, id, action, self.api.as_ref(), self.notifier.as_ref()).await
    }

    // =========================================================================
    // RENDERING
    // =========================================================================

    /// Full screen for the active tab in the current calendar day.
    #[must_use]
    pub fn render(&self) -> String {
        self.render_on(crate::util::datetime::today(self.offset))
    }

    /// Full screen for the active tab, with `today` injected.
    #[must_use]
    pub fn render_on(&self, today: Date) -> String {
        let mut out = String::new();
        out.push_str("🐾 Veterinaria PetCare · Sistema de Gestión Integral\n");
        let nav: Vec<String> = Tab::ALL
            .iter()
            .map(|tab| if *tab == self.state.active_tab { format!("[{}]", tab.label()) } else { tab.label().to_owned() })
            .collect();
        out.push_str(&nav.join("  "));
        out.push_str("\n\n");

        if self.state.loading {
            out.push_str("Cargando datos...\n");
            return out;
        }

        let body = match self.state.active_tab {
            Tab::Dashboard => dashboard::render(&self.state, today, self.offset),
            Tab::Clients => self.clients.render(&self.state.clients, self.offset),
            Tab::Pets => self.pets.render(&self.state.pets, &self.state.clients),
            Tab::Appointments => self.appointments.render(&self.state.appointments, &self.state.pets, self.offset),
        };
        out.push_str(&body);
        out
    }
}

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;
