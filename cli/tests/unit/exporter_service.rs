//! Tests for export, import and clipboard copy of the program artifact.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::path::{Path, PathBuf};

use ccdeploy_cli::application::ports::Severity;
use ccdeploy_cli::application::services::exporter::{
    self, COPIED, COPY_FAILED, export_as_executable, export_as_text,
};
use ccdeploy_cli::domain::artifact::{ExportFormat, ProgramArtifact};
use ccdeploy_cli::domain::error::{ValidationError, WorkflowError};
use ccdeploy_cli::infra::fs::LocalFs;

use crate::mocks::{FakeClipboard, FakePicker, MemoryStore, RecordingNotifier};

// ── Export ────────────────────────────────────────────────────────────────────

#[test]
fn test_export_lua_writes_sanitized_name_and_trimmed_code() {
    let store = MemoryStore::new();
    let ui = RecordingNotifier::new();
    let artifact = ProgramArtifact::new("\nprint('hi')\n\n");

    let path = export_as_executable(&artifact, "My Program!1", Path::new("out"), &store, &ui)
        .unwrap();

    assert_eq!(path, PathBuf::from("out/My_Program_1.lua"));
    let saved = store.saved();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].mime, "text/plain");
    assert_eq!(saved[0].contents, b"print('hi')");
    assert_eq!(
        ui.notifications(),
        vec![(Severity::Success, "Saved out/My_Program_1.lua".to_string())]
    );
}

#[test]
fn test_export_text_uses_txt_extension() {
    let store = MemoryStore::new();
    let ui = RecordingNotifier::new();

    let path = export_as_text(
        &ProgramArtifact::new("x = 1"),
        "notes",
        Path::new("."),
        &store,
        &ui,
    )
    .unwrap();

    assert_eq!(path, PathBuf::from("./notes.txt"));
}

#[test]
fn test_export_empty_code_messages_differ_by_format() {
    let cases = [
        (ExportFormat::Text, "No code to download."),
        (ExportFormat::Lua, "No Lua code generated to download."),
    ];
    for (format, expected) in cases {
        let store = MemoryStore::new();
        let ui = RecordingNotifier::new();

        exporter::export(
            &ProgramArtifact::new("   "),
            "prog",
            format,
            Path::new("."),
            &store,
            &ui,
        )
        .unwrap_err();

        assert_eq!(ui.alerts(), vec![expected]);
        assert!(store.saved().is_empty());
    }
}

#[test]
fn test_export_checks_code_before_name() {
    let store = MemoryStore::new();
    let ui = RecordingNotifier::new();

    let err = exporter::export(
        &ProgramArtifact::default(),
        "",
        ExportFormat::Lua,
        Path::new("."),
        &store,
        &ui,
    )
    .unwrap_err();

    assert_eq!(
        err,
        WorkflowError::Validation(ValidationError::NoCodeToExportLua)
    );
}

#[test]
fn test_export_blank_name_alerts() {
    let store = MemoryStore::new();
    let ui = RecordingNotifier::new();

    let err = export_as_text(
        &ProgramArtifact::new("print(1)"),
        "  ",
        Path::new("."),
        &store,
        &ui,
    )
    .unwrap_err();

    assert_eq!(
        err,
        WorkflowError::Validation(ValidationError::MissingProgramName)
    );
    assert_eq!(ui.alerts(), vec!["Please enter a program name."]);
    assert!(store.saved().is_empty());
}

#[test]
fn test_export_write_failure_is_reported() {
    let store = MemoryStore::failing_save();
    let ui = RecordingNotifier::new();

    let err = export_as_text(
        &ProgramArtifact::new("print(1)"),
        "prog",
        Path::new("."),
        &store,
        &ui,
    )
    .unwrap_err();

    assert!(matches!(err, WorkflowError::Local(_)));
    let notes = ui.notifications();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].0, Severity::Error);
    assert!(notes[0].1.contains("prog.txt"));
}

#[test]
fn test_export_then_import_round_trips_code_on_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let ui = RecordingNotifier::new();
    let original = ProgramArtifact::new("print('hi')");

    let path = export_as_executable(&original, "hello", dir.path(), &LocalFs, &ui).unwrap();
    let mut loaded = ProgramArtifact::default();
    exporter::import_path(&mut loaded, &path, &LocalFs, &ui).unwrap();

    assert_eq!(loaded, original);
}

#[test]
fn test_import_latin1_file_from_disk_is_accepted() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("legacy.lua");
    std::fs::write(&path, b"print('caf\xe9')\n").unwrap();
    let ui = RecordingNotifier::new();
    let mut artifact = ProgramArtifact::default();

    exporter::import_path(&mut artifact, &path, &LocalFs, &ui).unwrap();

    assert_eq!(artifact.code, "print('caf\u{FFFD}')\n");
    assert!(ui.modals().is_empty());
}

// ── Import ────────────────────────────────────────────────────────────────────

#[test]
fn test_import_replaces_code_verbatim() {
    let store = MemoryStore::new().with_file("prog.lua", "  print(1)\n");
    let picker = FakePicker::choosing("prog.lua");
    let ui = RecordingNotifier::new();
    let mut artifact = ProgramArtifact::new("old");

    let chosen = exporter::import_from_file(&mut artifact, &picker, &store, &ui).unwrap();

    assert_eq!(chosen, Some(PathBuf::from("prog.lua")));
    assert_eq!(artifact.code, "  print(1)\n");
    assert_eq!(picker.asked_for(), vec!["lua", "txt"]);
}

#[test]
fn test_import_cancelled_is_a_silent_no_op() {
    let store = MemoryStore::new();
    let picker = FakePicker::cancelled();
    let ui = RecordingNotifier::new();
    let mut artifact = ProgramArtifact::new("keep me");

    let chosen = exporter::import_from_file(&mut artifact, &picker, &store, &ui).unwrap();

    assert_eq!(chosen, None);
    assert_eq!(artifact.code, "keep me");
    assert!(ui.shown().is_empty());
}

#[test]
fn test_import_rejects_other_extensions() {
    let store = MemoryStore::new().with_file("prog.py", "print(1)");
    let ui = RecordingNotifier::new();
    let mut artifact = ProgramArtifact::new("keep me");

    let err = exporter::import_path(&mut artifact, Path::new("prog.py"), &store, &ui)
        .unwrap_err();

    assert!(matches!(
        err,
        WorkflowError::Validation(ValidationError::UnsupportedFileType(_))
    ));
    assert_eq!(artifact.code, "keep me");
    assert_eq!(ui.alerts().len(), 1);
}

#[test]
fn test_import_read_failure_shows_modal_and_keeps_code() {
    let store = MemoryStore::new();
    let ui = RecordingNotifier::new();
    let mut artifact = ProgramArtifact::new("keep me");

    let err = exporter::import_path(&mut artifact, Path::new("gone.txt"), &store, &ui)
        .unwrap_err();

    assert!(matches!(err, WorkflowError::Local(_)));
    assert_eq!(artifact.code, "keep me");
    let modals = ui.modals();
    assert_eq!(modals.len(), 1);
    assert!(modals[0].message.contains("gone.txt"));
}

// ── Copy ──────────────────────────────────────────────────────────────────────

#[test]
fn test_copy_puts_trimmed_code_on_clipboard() {
    let clipboard = FakeClipboard::new();
    let ui = RecordingNotifier::new();

    exporter::copy_to_clipboard(&ProgramArtifact::new(" print(1) \n"), &clipboard, &ui).unwrap();

    assert_eq!(clipboard.text().as_deref(), Some("print(1)"));
    assert_eq!(
        ui.notifications(),
        vec![(Severity::Success, COPIED.to_string())]
    );
}

#[test]
fn test_copy_empty_code_alerts() {
    let clipboard = FakeClipboard::new();
    let ui = RecordingNotifier::new();

    let err =
        exporter::copy_to_clipboard(&ProgramArtifact::new("\n"), &clipboard, &ui).unwrap_err();

    assert_eq!(err, WorkflowError::Validation(ValidationError::NoCodeToCopy));
    assert_eq!(ui.alerts(), vec!["No code to copy."]);
    assert!(clipboard.text().is_none());
}

#[test]
fn test_copy_denied_notifies_failure() {
    let clipboard = FakeClipboard::denied();
    let ui = RecordingNotifier::new();

    exporter::copy_to_clipboard(&ProgramArtifact::new("print(1)"), &clipboard, &ui).unwrap_err();

    assert_eq!(
        ui.notifications(),
        vec![(Severity::Error, COPY_FAILED.to_string())]
    );
    assert!(ui.modals().is_empty());
}
