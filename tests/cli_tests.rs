mod common;

use clap::Parser;
use common::utils::{contact_form, scratch_dir};
use form_builder::cli::commands::{cmd_export, cmd_save, cmd_submit};
use form_builder::cli::config::{
    AppConfig, Cli, Commands, load_config, parse_key_value, resolve, resolve_import_format,
};
use form_builder::codec::{self, Format};
use form_builder::storage::{DefinitionStore, FileStore, SubmissionLog};
use form_builder::trace::TraceLogger;

// ============================================================================
// CLI Argument Parsing Tests
// ============================================================================

#[test]
fn cli_parse_list() {
    let cli = Cli::parse_from(["form-builder", "list"]);
    assert!(matches!(cli.command, Commands::List));
    assert_eq!(cli.verbose, 0);
    assert!(cli.store.is_none());
}

#[test]
fn cli_parse_save_with_format() {
    let cli = Cli::parse_from([
        "form-builder",
        "save",
        "--file",
        "contact.txt",
        "--format",
        "xml",
        "--store",
        "/tmp/forms",
        "-vv",
    ]);
    match cli.command {
        Commands::Save { file, format } => {
            assert_eq!(file, "contact.txt");
            assert_eq!(format, Some(Format::Xml));
        }
        _ => panic!("Expected Save command"),
    }
    assert_eq!(cli.store.as_deref(), Some("/tmp/forms"));
    assert_eq!(cli.verbose, 2);
}

#[test]
fn cli_parse_export_defaults() {
    let cli = Cli::parse_from(["form-builder", "export", "--title", "Contact"]);
    match cli.command {
        Commands::Export {
            title,
            format,
            output_dir,
        } => {
            assert_eq!(title, "Contact");
            assert_eq!(format, None);
            assert_eq!(output_dir, None);
        }
        _ => panic!("Expected Export command"),
    }
}

#[test]
fn cli_parse_submit_values() {
    let cli = Cli::parse_from([
        "form-builder",
        "submit",
        "--title",
        "Contact",
        "--value",
        "Email=a@example.com",
        "--value",
        "Note=x=y",
        "--value",
        "Empty=",
    ]);
    match cli.command {
        Commands::Submit { title, values } => {
            assert_eq!(title, "Contact");
            assert_eq!(
                values,
                vec![
                    ("Email".to_string(), "a@example.com".to_string()),
                    ("Note".to_string(), "x=y".to_string()),
                    ("Empty".to_string(), String::new()),
                ]
            );
        }
        _ => panic!("Expected Submit command"),
    }
}

#[test]
fn cli_rejects_bad_format_and_values() {
    assert!(Cli::try_parse_from(["form-builder", "export", "--title", "T", "--format", "yaml"]).is_err());
    assert!(Cli::try_parse_from(["form-builder", "submit", "--title", "T", "--value", "novalue"]).is_err());
    assert!(Cli::try_parse_from(["form-builder", "show"]).is_err());
}

#[test]
fn parse_key_value_requires_name() {
    assert_eq!(parse_key_value("a=b"), Ok(("a".into(), "b".into())));
    assert!(parse_key_value("=b").is_err());
    assert!(parse_key_value("ab").is_err());
}

// ============================================================================
// Config Tests
// ============================================================================

#[test]
fn config_defaults() {
    let config = AppConfig::default();
    assert_eq!(config.store.path, ".form-builder");
    assert_eq!(config.export.format, Format::Json);
    assert_eq!(config.export.output_dir, ".");
    assert!(config.trace.enabled);
    assert_eq!(config.trace.path, "form-builder-trace.jsonl");
}

#[test]
fn config_partial_yaml_fills_defaults() {
    let yaml = "export:\n  format: xml\ntrace:\n  enabled: false\n";
    let config: AppConfig = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(config.export.format, Format::Xml);
    assert_eq!(config.export.output_dir, ".");
    assert!(!config.trace.enabled);
    assert_eq!(config.store.path, ".form-builder");
}

#[test]
fn load_config_missing_or_malformed_gives_defaults() {
    let dir = scratch_dir("cli-config");
    let missing = load_config(Some(dir.join("none.yaml").to_str().unwrap()));
    assert_eq!(missing.store.path, ".form-builder");

    let bad = dir.join("bad.yaml");
    std::fs::write(&bad, "store: [unclosed").unwrap();
    let malformed = load_config(Some(bad.to_str().unwrap()));
    assert_eq!(malformed.export.format, Format::Json);

    let good = dir.join("good.yaml");
    std::fs::write(&good, "store:\n  path: /srv/forms\n").unwrap();
    assert_eq!(load_config(Some(good.to_str().unwrap())).store.path, "/srv/forms");
}

#[test]
fn cli_overrides_config() {
    let mut config = AppConfig::default();
    config.store.path = "from-config".into();
    config.trace.enabled = false;

    let plain = resolve(&Cli::parse_from(["form-builder", "list"]), &config);
    assert_eq!(plain.store_path, "from-config");
    assert_eq!(plain.trace_path, None);

    let flagged = resolve(
        &Cli::parse_from(["form-builder", "list", "--store", "cli-store", "--trace", "t.jsonl"]),
        &config,
    );
    assert_eq!(flagged.store_path, "cli-store");
    assert_eq!(flagged.trace_path.as_deref(), Some("t.jsonl"));
}

#[test]
fn import_format_resolution_order() {
    let mut config = AppConfig::default();
    config.export.format = Format::Xml;

    assert_eq!(resolve_import_format(Some(Format::Json), "a.xml", &config), Format::Json);
    assert_eq!(resolve_import_format(None, "a.json", &config), Format::Json);
    assert_eq!(resolve_import_format(None, "a.txt", &config), Format::Xml);
}

// ============================================================================
// Command Tests (file-backed store)
// ============================================================================

#[test]
fn save_export_submit_flow() {
    let dir = scratch_dir("cli-flow");
    let store_dir = dir.join("store");
    let store = store_dir.to_str().unwrap();
    let tracer = TraceLogger::disabled();

    let source = dir.join("contact.json");
    std::fs::write(&source, codec::encode(&contact_form(), Format::Json).unwrap()).unwrap();
    cmd_save(store, source.to_str().unwrap(), Format::Json, &tracer, 0).unwrap();

    // saving the same title again is refused
    assert!(cmd_save(store, source.to_str().unwrap(), Format::Json, &tracer, 0).is_err());

    let out_dir = dir.join("out");
    cmd_export(store, "Contact", Format::Xml, out_dir.to_str().unwrap(), &tracer).unwrap();
    let exported = std::fs::read_to_string(out_dir.join("Contact.xml")).unwrap();
    assert_eq!(codec::decode(&exported, Format::Xml).unwrap(), contact_form());

    cmd_submit(
        store,
        "Contact",
        &[("Email".to_string(), "a@example.com".to_string())],
        &tracer,
        0,
    )
    .unwrap();
    // mandatory field missing
    assert!(cmd_submit(store, "Contact", &[], &tracer, 0).is_err());
    // rejected by the field lookup before anything is stored
    let err = cmd_submit(
        store,
        "Contact",
        &[("Nickname".to_string(), "x".to_string())],
        &tracer,
        0,
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "Form has no field named \"Nickname\"");

    let definitions = DefinitionStore::new(FileStore::open(&store_dir).unwrap());
    assert_eq!(definitions.list().unwrap(), vec!["Contact"]);
    let log = SubmissionLog::new(FileStore::open(&store_dir).unwrap());
    assert_eq!(log.load("Contact").unwrap().len(), 1);
}

#[test]
fn commands_on_unknown_title_fail() {
    let dir = scratch_dir("cli-unknown");
    let store = dir.to_str().unwrap();
    let tracer = TraceLogger::disabled();

    assert!(cmd_export(store, "Ghost", Format::Json, store, &tracer).is_err());
    assert!(cmd_submit(store, "Ghost", &[], &tracer, 0).is_err());
}
