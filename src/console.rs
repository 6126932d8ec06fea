//! Line-oriented console driving the [`AppController`].
//!
//! Each input line is one command. Screens go to the output writer; notices
//! go through the controller's notifier. A command that fails to parse prints
//! a usage hint and leaves every piece of state untouched.

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::app::AppController;
use crate::pages::PanelEffect;
use crate::pages::appointments::StatusAction;
use crate::state::app::Tab;

pub const HELP: &str = "\
comandos:
  tab <dashboard|clientes|mascotas|citas>   cambiar de pestaña
  reload                                    recargar datos del servidor
  form                                      mostrar/ocultar formulario
  discard                                   cerrar formulario y descartar borrador
  set <campo> <valor...>                    editar un campo del formulario
  submit                                    enviar formulario
  complete <id>                             marcar cita como Completada
  cancel <id>                               marcar cita como Cancelada
  show                                      volver a mostrar la pantalla
  health                                    estado del backend
  help                                      esta ayuda
  quit                                      salir";

// =============================================================================
// COMMANDS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Help,
    Tab(Tab),
    Reload,
    Form,
    Discard,
    Set { field: String, value: String },
    Submit,
    Status { id: i64, action: StatusAction },
    Show,
    Health,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("comando desconocido: {0} (escribe help)")]
    Unknown(String),
    #[error("uso: {0}")]
    Usage(&'static str),
}

impl ConsoleCommand {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError`] for unknown verbs or malformed arguments.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        let command = match verb.to_ascii_lowercase().as_str() {
            "help" | "ayuda" | "?" => Self::Help,
            "tab" => {
                let tab = Tab::parse(rest).ok_or(CommandError::Usage("tab <dashboard|clientes|mascotas|citas>"))?;
                Self::Tab(tab)
            }
            "reload" => Self::Reload,
            "form" => Self::Form,
            "discard" => Self::Discard,
            "set" => {
                let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                if field.is_empty() {
                    return Err(CommandError::Usage("set <campo> <valor...>"));
                }
                Self::Set { field: field.to_ascii_lowercase(), value: value.trim().to_owned() }
            }
            "submit" => Self::Submit,
            "complete" => Self::Status { id: parse_id(rest, "complete <id>")?, action: StatusAction::Complete },
            "cancel" => Self::Status { id: parse_id(rest, "cancel <id>")?, action: StatusAction::Cancel },
            "show" => Self::Show,
            "health" => Self::Health,
            "quit" | "exit" | "salir" => Self::Quit,
            other => return Err(CommandError::Unknown(other.to_owned())),
        };
        Ok(Some(command))
    }
}

fn parse_id(raw: &str, usage: &'static str) -> Result<i64, CommandError> {
    raw.parse::<i64>().map_err(|_| CommandError::Usage(usage))
}

// =============================================================================
// LOOP
// =============================================================================

/// What the loop does after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Mount the controller, print the first screen, then run commands from
/// `reader` until EOF or `quit`.
///
/// # Errors
///
/// Returns I/O errors from reading input or writing screens.
pub async fn run_console<R, W>(controller: &mut AppController, reader: R, out: &mut W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    if !controller.is_mounted() {
        write_loading_screen(controller, out)?;
        controller.mount().await;
    }
    writeln!(out, "{}", controller.render())?;
    writeln!(out, "escribe help para ver los comandos")?;
    out.flush()?;

    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        let flow = match ConsoleCommand::parse(&line) {
            Ok(Some(command)) => execute(controller, command, out).await?,
            Ok(None) => Flow::Continue,
            Err(error) => {
                writeln!(out, "{error}")?;
                Flow::Continue
            }
        };
        out.flush()?;
        if flow == Flow::Quit {
            break;
        }
    }
    tracing::debug!("console closed");
    Ok(())
}

/// Run one parsed command against the controller.
///
/// # Errors
///
/// Returns I/O errors from writing to `out`.
pub async fn execute<W: Write>(controller: &mut AppController, command: ConsoleCommand, out: &mut W) -> std::io::Result<Flow> {
    match command {
        ConsoleCommand::Help => {
            writeln!(out, "{HELP}")?;
            return Ok(Flow::Continue);
        }
        ConsoleCommand::Quit => return Ok(Flow::Quit),
        ConsoleCommand::Health => {
            print_health(controller, out).await?;
            return Ok(Flow::Continue);
        }
        ConsoleCommand::Tab(tab) => controller.switch_tab(tab),
        ConsoleCommand::Reload => reload(controller, out).await?,
        ConsoleCommand::Form => {
            if !controller.toggle_form() {
                writeln!(out, "el dashboard no tiene formulario")?;
                return Ok(Flow::Continue);
            }
        }
        ConsoleCommand::Discard => {
            if !controller.cancel_form() {
                writeln!(out, "el dashboard no tiene formulario")?;
                return Ok(Flow::Continue);
            }
        }
        ConsoleCommand::Set { field, value } => {
            if let Err(error) = controller.set_field(&field, &value) {
                writeln!(out, "{error}")?;
                return Ok(Flow::Continue);
            }
        }
        ConsoleCommand::Submit => {
            let effect = controller.submit().await;
            settle(controller, effect, out).await?;
        }
        ConsoleCommand::Status { id, action } => {
            let effect = controller.press_status(id, action).await;
            settle(controller, effect, out).await?;
        }
        ConsoleCommand::Show => {}
    }
    writeln!(out, "{}", controller.render())?;
    Ok(Flow::Continue)
}

/// Apply a panel effect, drawing the loading screen before any refetch.
async fn settle<W: Write>(controller: &mut AppController, effect: PanelEffect, out: &mut W) -> std::io::Result<()> {
    match effect {
        PanelEffect::Reload => reload(controller, out).await,
        PanelEffect::None => Ok(()),
    }
}

async fn reload<W: Write>(controller: &mut AppController, out: &mut W) -> std::io::Result<()> {
    write_loading_screen(controller, out)?;
    controller.load_data().await;
    Ok(())
}

fn write_loading_screen<W: Write>(controller: &mut AppController, out: &mut W) -> std::io::Result<()> {
    controller.start_loading();
    writeln!(out, "{}", controller.render())?;
    out.flush()
}

/// Mount, switch to `tab`, and print a single screen.
///
/// # Errors
///
/// Returns I/O errors from writing to `out`.
pub async fn show_once<W: Write>(controller: &mut AppController, tab: Tab, out: &mut W) -> std::io::Result<()> {
    controller.mount().await;
    controller.switch_tab(tab);
    writeln!(out, "{}", controller.render())?;
    out.flush()
}

async fn print_health<W: Write>(controller: &AppController, out: &mut W) -> std::io::Result<()> {
    match controller.api().health().await {
        Ok(document) => {
            let text = serde_json::to_string_pretty(&document).unwrap_or_else(|_| document.to_string());
            writeln!(out, "{text}")
        }
        Err(error) => {
            tracing::warn!(%error, "health check failed");
            writeln!(out, "[error] backend no disponible: {error}")
        }
    }
}

#[cfg(test)]
#[path = "console_test.rs"]
mod console_test;
