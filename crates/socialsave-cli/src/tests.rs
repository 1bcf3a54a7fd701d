use std::path::Path;

use super::*;

#[test]
fn parses_detect_command() {
    let cli = Cli::try_parse_from(["socialsave", "detect", "https://youtu.be/x"])
        .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Detect { ref url } if url == "https://youtu.be/x"
    ));
}

#[test]
fn parses_analyze_defaults_to_card_output() {
    let cli = Cli::try_parse_from(["socialsave", "analyze", "https://x.com/a/status/1"])
        .expect("expected valid cli args");

    assert!(matches!(cli.command, Commands::Analyze { json: false, .. }));
}

#[test]
fn parses_analyze_json_flag() {
    let cli = Cli::try_parse_from(["socialsave", "analyze", "https://x.com/a/status/1", "--json"])
        .expect("expected valid cli args");

    assert!(matches!(cli.command, Commands::Analyze { json: true, .. }));
}

#[test]
fn analyze_requires_url() {
    assert!(Cli::try_parse_from(["socialsave", "analyze"]).is_err());
}

#[test]
fn parses_history_list() {
    let cli =
        Cli::try_parse_from(["socialsave", "history", "list"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::History {
            command: HistoryCommands::List
        }
    ));
}

#[test]
fn parses_history_show_with_id() {
    let cli = Cli::try_parse_from(["socialsave", "history", "show", "0f8fad5b"])
        .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::History {
            command: HistoryCommands::Show { ref id }
        } if id == "0f8fad5b"
    ));
}

#[test]
fn parses_history_clear() {
    let cli =
        Cli::try_parse_from(["socialsave", "history", "clear"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::History {
            command: HistoryCommands::Clear
        }
    ));
}

#[test]
fn parses_export_with_and_without_out_dir() {
    let cli = Cli::try_parse_from(["socialsave", "export", "abc"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Export { out: None, .. }));

    let cli = Cli::try_parse_from(["socialsave", "export", "abc", "--out", "/tmp/archives"])
        .expect("expected valid cli args");
    match cli.command {
        Commands::Export { id, out } => {
            assert_eq!(id, "abc");
            assert_eq!(out, Some(PathBuf::from("/tmp/archives")));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn missing_subcommand_is_an_error() {
    assert!(Cli::try_parse_from(["socialsave"]).is_err());
}

fn broken_env(data_dir: &Path) -> impl Fn(&str) -> Result<String, VarError> + '_ {
    move |key| match key {
        "SOCIALSAVE_BIND_ADDR" => Ok("not-an-addr".to_string()),
        "SOCIALSAVE_ENV" => Ok("staging".to_string()),
        "SOCIALSAVE_DATA_DIR" => Ok(data_dir.display().to_string()),
        _ => Err(VarError::NotPresent),
    }
}

#[tokio::test]
async fn detect_runs_without_valid_config() {
    let dir = tempfile::tempdir().unwrap();
    let command = Commands::Detect {
        url: "https://youtu.be/x".to_string(),
    };

    dispatch(command, broken_env(dir.path()))
        .await
        .expect("detect needs no configuration");
}

#[tokio::test]
async fn history_commands_ignore_unrelated_invalid_config() {
    let dir = tempfile::tempdir().unwrap();

    let list = Commands::History {
        command: HistoryCommands::List,
    };
    dispatch(list, broken_env(dir.path()))
        .await
        .expect("history list needs only the data dir");

    let export = Commands::Export {
        id: "missing".to_string(),
        out: Some(dir.path().to_path_buf()),
    };
    let err = dispatch(export, broken_env(dir.path()))
        .await
        .expect_err("no record to export");
    assert!(err.to_string().contains("no history record matches"), "{err}");
}

#[tokio::test]
async fn analyze_still_reports_invalid_config() {
    let dir = tempfile::tempdir().unwrap();
    let command = Commands::Analyze {
        url: "https://x.com/a/status/1".to_string(),
        json: true,
    };

    let err = dispatch(command, broken_env(dir.path()))
        .await
        .expect_err("invalid settings");
    assert!(
        err.downcast_ref::<socialsave_core::ConfigError>().is_some(),
        "{err}"
    );
}
