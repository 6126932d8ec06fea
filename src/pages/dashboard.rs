//! Dashboard: read-only counters and an upcoming-appointments preview.
//!
//! Everything here is a pure function of the loaded collections plus the
//! injected calendar date, so it never touches the network.

use std::fmt::Write;

use time::{Date, UtcOffset};

use crate::net::types::{Appointment, AppointmentStatus};
use crate::state::app::AppState;
use crate::util::datetime::{display_datetime, parse_timestamp};

/// Number of appointments shown in the preview, in received order.
pub const UPCOMING_PREVIEW_LEN: usize = 5;

/// Counters shown on the stat cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DashboardSummary {
    pub clients: usize,
    pub pets: usize,
    pub pending: usize,
    pub today: usize,
}

impl DashboardSummary {
    #[must_use]
    pub fn compute(state: &AppState, today: Date, offset: UtcOffset) -> Self {
        Self {
            clients: state.clients.len(),
            pets: state.pets.len(),
            pending: pending_count(&state.appointments),
            today: today_count(&state.appointments, today, offset),
        }
    }
}

#[must_use]
pub fn pending_count(appointments: &[Appointment]) -> usize {
    appointments.iter().filter(|appointment| appointment.estado == AppointmentStatus::Pendiente).count()
}

/// Appointments whose local calendar date is `today`. Unparseable dates never match.
#[must_use]
pub fn today_count(appointments: &[Appointment], today: Date, offset: UtcOffset) -> usize {
    appointments
        .iter()
        .filter_map(|appointment| parse_timestamp(&appointment.fecha_cita))
        .filter(|at| at.local_date(offset) == today)
        .count()
}

/// First [`UPCOMING_PREVIEW_LEN`] appointments exactly as the server ordered them.
#[must_use]
pub fn upcoming(appointments: &[Appointment]) -> &[Appointment] {
    &appointments[..appointments.len().min(UPCOMING_PREVIEW_LEN)]
}

#[must_use]
pub fn render(state: &AppState, today: Date, offset: UtcOffset) -> String {
    let summary = DashboardSummary::compute(state, today, offset);
    let mut out = String::new();

    let _ = writeln!(out, "📊 Panel de Control");
    let _ = writeln!(out);
    let _ = writeln!(out, "  👥 {:>4}  Clientes Registrados", summary.clients);
    let _ = writeln!(out, "  🐕 {:>4}  Mascotas Activas", summary.pets);
    let _ = writeln!(out, "  📅 {:>4}  Citas Pendientes", summary.pending);
    let _ = writeln!(out, "  ⏰ {:>4}  Citas Hoy", summary.today);
    let _ = writeln!(out);
    let _ = writeln!(out, "📋 Próximas Citas");

    for appointment in upcoming(&state.appointments) {
        let pet = appointment.mascota_nombre.as_deref().unwrap_or_default();
        let _ = writeln!(out, "  🐾 {pet} - {}    [{}]", appointment.owner_name(), appointment.estado);
        let _ = writeln!(out, "     {}", display_datetime(&appointment.fecha_cita, offset));
        let _ = writeln!(out, "     {}", appointment.motivo);
    }
    out
}

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;
