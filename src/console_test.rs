use super::*;
use std::sync::Arc;

use serde_json::json;
use time::UtcOffset;

use crate::net::api::Resource;
use crate::net::test_helpers::{Call, MockApi, RecordingNotifier, appointment_json, client_json, pet_json};

fn seeded() -> (Arc<MockApi>, Arc<RecordingNotifier>, AppController) {
    let api = Arc::new(MockApi::new());
    api.set_list(Resource::Clients, json!([client_json(1, "Ana", "Diaz")]));
    api.set_list(Resource::Pets, json!([pet_json(4, "Luna", "Gato", 1)]));
    api.set_list(Resource::Appointments, json!([appointment_json(9, 4, "2026-10-17T09:30", "Pendiente")]));
    let notifier = Arc::new(RecordingNotifier::new());
    let controller = AppController::new(api.clone(), notifier.clone(), UtcOffset::UTC);
    (api, notifier, controller)
}

async fn run(controller: &mut AppController, input: &str) -> String {
    let mut out = Vec::new();
    run_console(controller, input.as_bytes(), &mut out).await.unwrap();
    String::from_utf8(out).unwrap()
}

// =============================================================
// Parsing
// =============================================================

#[test]
fn parse_blank_line_is_noop() {
    assert_eq!(ConsoleCommand::parse("   "), Ok(None));
}

#[test]
fn parse_tab_accepts_both_languages() {
    assert_eq!(ConsoleCommand::parse("tab citas"), Ok(Some(ConsoleCommand::Tab(Tab::Appointments))));
    assert_eq!(ConsoleCommand::parse("TAB pets"), Ok(Some(ConsoleCommand::Tab(Tab::Pets))));
    assert_eq!(ConsoleCommand::parse("tab"), Err(CommandError::Usage("tab <dashboard|clientes|mascotas|citas>")));
}

#[test]
fn parse_set_keeps_value_spaces() {
    assert_eq!(
        ConsoleCommand::parse("set direccion  Calle 5 # 10 "),
        Ok(Some(ConsoleCommand::Set { field: "direccion".to_owned(), value: "Calle 5 # 10".to_owned() }))
    );
    assert_eq!(
        ConsoleCommand::parse("set raza"),
        Ok(Some(ConsoleCommand::Set { field: "raza".to_owned(), value: String::new() }))
    );
    assert_eq!(ConsoleCommand::parse("set"), Err(CommandError::Usage("set <campo> <valor...>")));
}

#[test]
fn parse_status_commands_need_numeric_id() {
    assert_eq!(
        ConsoleCommand::parse("complete 9"),
        Ok(Some(ConsoleCommand::Status { id: 9, action: StatusAction::Complete }))
    );
    assert_eq!(
        ConsoleCommand::parse("cancel 12"),
        Ok(Some(ConsoleCommand::Status { id: 12, action: StatusAction::Cancel }))
    );
    assert_eq!(ConsoleCommand::parse("cancel doce"), Err(CommandError::Usage("cancel <id>")));
}

#[test]
fn parse_unknown_verb() {
    assert_eq!(ConsoleCommand::parse("borrar 3"), Err(CommandError::Unknown("borrar".to_owned())));
}

// =============================================================
// Loop
// =============================================================

#[tokio::test]
async fn console_mounts_and_prints_dashboard() {
    let (api, _, mut controller) = seeded();

    let screen = run(&mut controller, "").await;

    assert_eq!(api.list_calls(), 3);
    assert!(screen.contains("📊 Panel de Control"));
    assert!(screen.contains("escribe help"));
}

#[tokio::test]
async fn console_registers_client_and_reloads() {
    let (api, notifier, mut controller) = seeded();
    let input = "tab clientes\nform\nset nombre Luis\nset apellido Mora\nset telefono 555-0199\nsubmit\nquit\n";

    let screen = run(&mut controller, input).await;

    assert_eq!(
        api.mutations(),
        vec![Call::Create(
            Resource::Clients,
            json!({ "nombre": "Luis", "apellido": "Mora", "telefono": "555-0199", "email": "", "direccion": "" })
        )]
    );
    assert_eq!(api.list_calls(), 6);
    assert_eq!(notifier.messages(), vec![crate::pages::clients::CREATED_MESSAGE.to_owned()]);
    assert!(screen.contains("👥 Gestión de Clientes"));
}

#[tokio::test]
async fn console_reports_bad_input_without_side_effects() {
    let (api, _, mut controller) = seeded();
    let input = "frobnicate\ncomplete x\nform\nset nombre Toby\n";

    let screen = run(&mut controller, input).await;

    assert!(screen.contains("comando desconocido: frobnicate"));
    assert!(screen.contains("uso: complete <id>"));
    assert!(screen.contains("el dashboard no tiene formulario"));
    assert!(screen.contains("campo desconocido: nombre"));
    assert!(api.mutations().is_empty());
    assert_eq!(api.list_calls(), 3);
}

#[tokio::test]
async fn console_completes_appointment() {
    let (api, _, mut controller) = seeded();

    run(&mut controller, "tab citas\ncomplete 9\n").await;

    assert_eq!(api.mutations(), vec![Call::Update(Resource::Appointments, 9, json!({ "estado": "Completada" }))]);
}

#[tokio::test]
async fn quit_stops_reading() {
    let (api, _, mut controller) = seeded();

    run(&mut controller, "quit\nreload\n").await;

    assert_eq!(api.list_calls(), 3);
}

#[tokio::test]
async fn health_prints_backend_document() {
    let (api, _, mut controller) = seeded();

    let screen = run(&mut controller, "health\n").await;

    assert!(screen.contains("\"status\": \"healthy\""));
    assert!(api.calls().contains(&Call::Health));
}

#[tokio::test]
async fn show_once_prints_requested_tab() {
    let (_, _, mut controller) = seeded();
    let mut out = Vec::new();

    show_once(&mut controller, Tab::Pets, &mut out).await.unwrap();

    let screen = String::from_utf8(out).unwrap();
    assert!(screen.contains("[🐕 Mascotas]"));
    assert!(screen.contains("Luna"));
}

// =============================================================
// Loading screen
// =============================================================

#[tokio::test]
async fn loading_screen_precedes_first_load() {
    let (_, _, mut controller) = seeded();

    let screen = run(&mut controller, "").await;

    let loading = screen.find("Cargando datos...").unwrap();
    let dashboard = screen.find("📊 Panel de Control").unwrap();
    assert!(loading < dashboard);
}

#[tokio::test]
async fn reload_draws_loading_screen_before_refetch() {
    let (api, _, mut controller) = seeded();

    let screen = run(&mut controller, "reload\nshow\n").await;

    assert_eq!(screen.matches("Cargando datos...").count(), 2);
    assert_eq!(api.list_calls(), 6);
    assert!(screen.trim_end().ends_with("Vacuna anual"));
}

#[tokio::test]
async fn status_change_draws_loading_screen_only_when_it_reloads() {
    let (_, _, mut controller) = seeded();

    let screen = run(&mut controller, "tab citas\ncomplete 9\ncomplete 404\n").await;

    assert_eq!(screen.matches("Cargando datos...").count(), 2);
}
