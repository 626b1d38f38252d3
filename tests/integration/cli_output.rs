//! CLI surface tests: command parsing, file input, rendering and sessions

use clap::Parser;
use script_explainer::cli::commands::explain::ExplainCommand;
use script_explainer::cli::commands::interactive::run_session;
use script_explainer::cli::output::{render, OutputFormat};
use script_explainer::cli::{Cli, Commands};
use script_explainer::config::AppConfig;
use script_explainer::AppError;
use std::io::Cursor;

use crate::common::{explain_ok, write_script_file, P2PKH_SPEND, P2SH_LOCKING};

fn explain_command(args: &[&str]) -> ExplainCommand {
    let argv = ["script-explainer", "explain"].iter().chain(args.iter()).copied();
    match Cli::try_parse_from(argv).unwrap().command {
        Commands::Explain(command) => command,
        _ => panic!("expected explain command"),
    }
}

#[test]
fn test_parse_subcommands() {
    assert!(matches!(
        Cli::try_parse_from(["script-explainer", "opcodes", "--format", "json"])
            .unwrap()
            .command,
        Commands::Opcodes(_)
    ));
    assert!(matches!(
        Cli::try_parse_from(["script-explainer", "opcode", "dup"])
            .unwrap()
            .command,
        Commands::Opcode(_)
    ));
    assert!(matches!(
        Cli::try_parse_from(["script-explainer", "interactive"])
            .unwrap()
            .command,
        Commands::Interactive(_)
    ));
    assert!(Cli::try_parse_from(["script-explainer", "bogus"]).is_err());
}

#[test]
fn test_script_and_file_conflict() {
    let result = Cli::try_parse_from([
        "script-explainer",
        "explain",
        "OP_1",
        "--file",
        "script.txt",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_explain_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_script_file(dir.path(), "p2sh.txt", &format!("{}\n", P2SH_LOCKING));

    let command = explain_command(&["--file", path.to_str().unwrap(), "--format", "json"]);
    let report = command.execute(&AppConfig::default()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&report.rendered).unwrap();
    assert_eq!(json["script_type"], "P2SH");
}

#[test]
fn test_explain_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.txt");
    let command = explain_command(&["--file", missing.to_str().unwrap()]);
    assert!(matches!(
        command.execute(&AppConfig::default()),
        Err(AppError::Io(_))
    ));
}

#[test]
fn test_invalid_format_flag() {
    let command = explain_command(&["OP_1", "--format", "xml"]);
    assert!(matches!(
        command.execute(&AppConfig::default()),
        Err(AppError::InvalidData(_))
    ));
}

#[test]
fn test_failing_script_exits_with_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_script_file(dir.path(), "fake.txt", "OP_FAKEOP abc");

    let command = explain_command(&["--file", path.to_str().unwrap(), "--quiet"]);
    let report = command.execute(&AppConfig::default()).unwrap();
    assert!(report.rendered.contains("Status: INVALID"));
    assert_eq!(
        report.failure.as_deref(),
        Some("OP_FAKEOP: unsupported opcode")
    );
    assert!(matches!(
        command.run(&AppConfig::default()),
        Err(AppError::ScriptFailed(_))
    ));

    let command = explain_command(&[P2SH_LOCKING]);
    assert!(command.run(&AppConfig::default()).is_ok());
}

#[test]
fn test_text_report_layout() {
    let result = explain_ok(P2PKH_SPEND);
    let text = render(&result, OutputFormat::Text, false).unwrap();

    assert!(text.contains("Type: UNKNOWN"));
    assert!(text.contains("Status: VALID"));
    assert!(text.contains("Step 1: <sig>"));
    assert!(text.contains("Before: (empty)"));
    assert!(text.contains("After:  <sig> | <pubkey> | <pubkey>"));
    assert!(text.contains("Final stack: CHECKSIG(<sig>, <pubkey>)"));
    assert!(text.trim_end().ends_with("Bitcoin transactions."));
}

#[test]
fn test_text_report_marks_failure() {
    let result = explain_ok("OP_DUP");
    let text = render(&result, OutputFormat::Text, false).unwrap();
    assert!(text.contains("Status: INVALID"));
    assert!(text.contains("FAILED: OP_DUP: insufficient stack items"));
}

#[test]
fn test_interactive_json_session() {
    let mut out = Vec::new();
    run_session(
        Cursor::new("OP_1\n\nOP_FAKEOP\nQ\n"),
        &mut out,
        OutputFormat::Json,
        false,
    )
    .unwrap();
    let out = String::from_utf8(out).unwrap();

    assert_eq!(out.matches("\"script_type\"").count(), 2);
    assert!(out.contains("OP_FAKEOP: unsupported opcode"));
    assert!(out.ends_with("Goodbye!\n"));
}
