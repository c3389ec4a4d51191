//! CLI routing integration tests.
//!
//! These tests parse real argument vectors and run them in-process against a
//! scratch secrets file, checking command output and error reporting.

use clap::Parser;
use veil_cli::commands::get::NO_VALUE_MESSAGE;
use veil_cli::{execute, Cli};
use veil_integration_tests::{Scratch, PASSPHRASE};
use veil_secrets::{FileSecretStore, SecretError, SecretStore};

/// Run `veil --key <PASSPHRASE> --file <scratch> <args..>` and capture stdout.
fn veil(scratch: &Scratch, args: &[&str]) -> (String, anyhow::Result<()>) {
    let path = scratch.path_arg();
    let mut argv = vec!["veil", "--key", PASSPHRASE, "--file", path.as_str()];
    argv.extend_from_slice(args);

    let cli = Cli::try_parse_from(argv).expect("arguments should parse");
    let mut out = Vec::new();
    let result = execute(cli, &mut out);
    (String::from_utf8(out).expect("utf-8 output"), result)
}

#[test]
fn test_set_then_get() {
    let scratch = Scratch::new();

    let (stdout, result) = veil(&scratch, &["set", "twitter_api_key", "abc123"]);
    result.unwrap();
    assert_eq!(stdout, "Value set successfully!\n");

    let (stdout, result) = veil(&scratch, &["get", "twitter_api_key"]);
    result.unwrap();
    assert_eq!(stdout, "twitter_api_key = abc123\n");
}

#[test]
fn test_cli_writes_library_readable_file() {
    let scratch = Scratch::new();
    veil(&scratch, &["set", "db_password", "hunter2"]).1.unwrap();

    let store = FileSecretStore::new(PASSPHRASE, &scratch.path).unwrap();
    assert_eq!(store.get("db_password").unwrap(), "hunter2");
}

#[test]
fn test_get_missing_reports_no_value() {
    let scratch = Scratch::new();

    let (stdout, result) = veil(&scratch, &["get", "nothing_here"]);
    let err = result.unwrap_err();
    assert!(stdout.is_empty());
    assert_eq!(err.to_string(), NO_VALUE_MESSAGE);
    assert!(matches!(
        err.downcast_ref::<SecretError>(),
        Some(SecretError::NotFound(_))
    ));
}

#[test]
fn test_get_with_wrong_key_fails() {
    let scratch = Scratch::new();
    veil(&scratch, &["set", "k", "v"]).1.unwrap();

    let path = scratch.path_arg();
    let cli = Cli::try_parse_from(["veil", "-k", "wrong", "-f", path.as_str(), "get", "k"]).unwrap();
    let mut out = Vec::new();
    assert!(execute(cli, &mut out).is_err());
    assert!(out.is_empty());
}

#[test]
fn test_banner_needs_no_store() {
    let scratch = Scratch::new();
    let (stdout, result) = veil(&scratch, &[]);
    result.unwrap();
    assert!(stdout.contains(veil_cli::banner::TAGLINE));
    assert!(!scratch.path.exists());
}

#[test]
fn test_version_command() {
    let scratch = Scratch::new();
    let (stdout, result) = veil(&scratch, &["version"]);
    result.unwrap();
    assert!(stdout.starts_with("veil "));
}

#[test]
fn test_unknown_command_is_rejected() {
    assert!(Cli::try_parse_from(["veil", "list"]).is_err());
}
