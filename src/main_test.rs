use super::*;

#[test]
fn no_subcommand_means_console() {
    let cli = Cli::try_parse_from(["petcare"]).unwrap();
    assert!(matches!(cli.command.unwrap_or(Command::Console), Command::Console));
}

#[test]
fn show_accepts_spanish_and_english_tabs() {
    let cli = Cli::try_parse_from(["petcare", "show", "citas"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Show { tab: Tab::Appointments })));

    let cli = Cli::try_parse_from(["petcare", "show", "pets"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Show { tab: Tab::Pets })));

    let cli = Cli::try_parse_from(["petcare", "show"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Show { tab: Tab::Dashboard })));
}

#[test]
fn show_rejects_unknown_tab() {
    assert!(Cli::try_parse_from(["petcare", "show", "facturas"]).is_err());
}

#[test]
fn health_and_log_level_parse() {
    let cli = Cli::try_parse_from(["petcare", "--log-level", "debug", "health"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Health)));
    assert_eq!(cli.log_level, Level::DEBUG);
}
