use super::*;
use crate::net::test_helpers::{appointment_json, client_json, decode, pet_json};
use time::macros::{date, offset};

fn appointment(id: i64, fecha_cita: &str, estado: &str) -> Appointment {
    decode(appointment_json(id, 4, fecha_cita, estado))
}

#[test]
fn pending_count_matches_estado_pendiente() {
    let appointments = vec![
        appointment(1, "2026-10-17T09:00", "Pendiente"),
        appointment(2, "2026-10-17T10:00", "Completada"),
        appointment(3, "2026-10-18T10:00", "Pendiente"),
        appointment(4, "2026-10-18T11:00", "Cancelada"),
        appointment(5, "2026-10-18T12:00", "Programada"),
    ];
    assert_eq!(pending_count(&appointments), 3);
    assert_eq!(pending_count(&[]), 0);
}

#[test]
fn today_count_ignores_time_of_day() {
    let appointments = vec![
        appointment(1, "2026-10-17T00:00", "Pendiente"),
        appointment(2, "2026-10-17T23:59:59", "Completada"),
        appointment(3, "2026-10-16T23:59", "Pendiente"),
        appointment(4, "2026-10-18T00:00", "Pendiente"),
        appointment(5, "2026-10-17", "Cancelada"),
    ];
    assert_eq!(today_count(&appointments, date!(2026-10-17), offset!(UTC)), 3);
}

#[test]
fn today_count_uses_local_offset_for_zoned_values() {
    let appointments = vec![
        appointment(1, "2026-10-16T23:30:00Z", "Pendiente"),
        appointment(2, "Sat, 17 Oct 2026 23:30:00 GMT", "Pendiente"),
    ];
    assert_eq!(today_count(&appointments, date!(2026-10-17), offset!(+2)), 1);
    assert_eq!(today_count(&appointments, date!(2026-10-17), offset!(UTC)), 1);
    assert_eq!(today_count(&appointments, date!(2026-10-18), offset!(+2)), 1);
}

#[test]
fn today_count_skips_unparseable_dates() {
    let appointments = vec![appointment(1, "sin fecha", "Pendiente")];
    assert_eq!(today_count(&appointments, date!(2026-10-17), offset!(UTC)), 0);
}

#[test]
fn upcoming_keeps_server_order_and_caps_at_five() {
    let appointments: Vec<Appointment> = (1..=7)
        .rev()
        .map(|id| appointment(id, &format!("2026-10-{:02}T09:00", 10 + id), "Pendiente"))
        .collect();
    let preview: Vec<i64> = upcoming(&appointments).iter().map(|a| a.id).collect();
    assert_eq!(preview, vec![7, 6, 5, 4, 3]);
    assert_eq!(upcoming(&appointments[..2]).len(), 2);
}

#[test]
fn summary_counts_all_collections() {
    let state = AppState {
        clients: vec![decode(client_json(1, "Ana", "Diaz")), decode(client_json(2, "Luis", "Mora"))],
        pets: vec![decode(pet_json(4, "Luna", "Gato", 1))],
        appointments: vec![
            appointment(1, "2026-10-17T09:00", "Pendiente"),
            appointment(2, "2026-10-19T09:00", "Completada"),
        ],
        ..AppState::default()
    };
    let summary = DashboardSummary::compute(&state, date!(2026-10-17), offset!(UTC));
    assert_eq!(summary, DashboardSummary { clients: 2, pets: 1, pending: 1, today: 1 });
}

#[test]
fn render_shows_counters_and_preview() {
    let state = AppState {
        appointments: vec![appointment(1, "2026-10-17T09:00", "Pendiente")],
        ..AppState::default()
    };
    let screen = render(&state, date!(2026-10-17), offset!(UTC));
    assert!(screen.contains("Citas Pendientes"));
    assert!(screen.contains("Citas Hoy"));
    assert!(screen.contains("🐾 Luna - Ana Diaz    [Pendiente]"));
    assert!(screen.contains("17/10/2026, 09:00:00"));
    assert!(screen.contains("Vacuna anual"));
}
