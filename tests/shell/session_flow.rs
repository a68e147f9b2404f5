//! End-to-end session scenarios

use calcspace_foundation::{Action, ErrorKind, Setting};
use calcspace_shell::Outcome;

use crate::support::{ScriptedEditor, shell, shell_with};

// =============================================================================
// Target Lifecycle
// =============================================================================

#[test]
fn free_requires_target_then_runs_once() {
    let (mut shell, analyzer) = shell();

    let err = shell.execute("free").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::TargetNotConfigured));
    assert!(err.to_string().contains("target not configured"));
    assert!(analyzer.calls.borrow().is_empty());

    shell.execute("target foo.bin").unwrap();
    assert_eq!(shell.prompt(), "[foo.bin] calcspace> ");

    let outcome = shell.execute("free").unwrap();
    assert_eq!(outcome, Outcome::Message("analyzed foo.bin".to_string()));

    let calls = analyzer.calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].action(), Some(Action::FreeTextSpace));
    for action in Action::ALL {
        assert_eq!(calls[0].is_requested(action), action == Action::FreeTextSpace);
    }
    assert_eq!(shell.session().flags().action(), None);
}

#[test]
fn scripted_session_prompts() {
    let editor = ScriptedEditor::new(&["free", "target foo.bin", "free", "target dir/bar.bin"]);
    let (mut shell, analyzer) = shell_with(editor);

    shell.run().unwrap();

    assert_eq!(
        shell.editor().prompts,
        [
            "[None] calcspace> ",
            "[None] calcspace> ",
            "[foo.bin] calcspace> ",
            "[foo.bin] calcspace> ",
            "[bar.bin] calcspace> ",
        ]
    );
    assert_eq!(analyzer.calls.borrow().len(), 1);
}

#[test]
fn failed_load_keeps_previous_target() {
    let (mut shell, analyzer) = shell();
    shell.execute("target foo.bin").unwrap();

    let err = shell.execute("target missing.bin").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::TargetLoad { .. }));
    assert_eq!(shell.session().display_name(), "foo.bin");

    shell.execute("nop").unwrap();
    assert_eq!(analyzer.calls.borrow()[0].action(), Some(Action::NopSpace));
}

#[test]
fn target_without_path() {
    let (mut shell, _) = shell();
    let err = shell.execute("target").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MissingArgument { .. }));
    assert!(!shell.session().has_target());
}

#[test]
fn target_replaces_buffer() {
    let (mut shell, _) = shell();
    shell.execute("target foo.bin").unwrap();
    shell.execute("target dir/bar.bin").unwrap();
    let target = shell.session().target().unwrap();
    assert_eq!(target.name(), "bar.bin");
    assert_eq!(target.path().to_str(), Some("dir/bar.bin"));
}

// =============================================================================
// Flags
// =============================================================================

#[test]
fn every_action_resets_flags() {
    let (mut shell, analyzer) = shell();
    shell.execute("target foo.bin").unwrap();

    for (command, action) in [
        ("new", Action::NewCmdsSpace),
        ("free", Action::FreeTextSpace),
        ("nop", Action::NopSpace),
        ("nopt", Action::TotalNopSpace),
    ] {
        shell.execute(command).unwrap();
        assert_eq!(shell.session().flags().action(), None);
        assert_eq!(analyzer.calls.borrow().last().unwrap().action(), Some(action));
    }
}

#[test]
fn settings_reach_the_analyzer() {
    let (mut shell, analyzer) = shell();
    shell.execute("target foo.bin").unwrap();
    shell.execute("excel").unwrap();
    shell.execute("ios").unwrap();
    shell.execute("new").unwrap();

    let calls = analyzer.calls.borrow();
    assert!(calls[0].excel_output());
    assert!(calls[0].ios_target());
    assert!(!calls[0].all_sections());
}

#[test]
fn settings_survive_target_change() {
    let (mut shell, _) = shell();
    shell.execute("all").unwrap();
    shell.execute("target foo.bin").unwrap();
    assert!(shell.session().flags().get(Setting::AllSections));
}

#[test]
fn options_reports_settings() {
    let (mut shell, _) = shell();
    shell.execute("excel").unwrap();
    let Outcome::Message(text) = shell.execute("options").unwrap() else {
        panic!("options should print");
    };
    assert!(text.starts_with("Current configuration:"));
    assert!(text.contains("excel output  enabled"));
    assert!(text.contains("ios target    disabled"));
}

// =============================================================================
// Loop Termination
// =============================================================================

#[test]
fn quit_ends_loop() {
    let (mut shell, _) = shell_with(ScriptedEditor::new(&["excel", "quit", "all"]));
    shell.run().unwrap();
    assert!(shell.session().flags().excel_output());
    assert!(!shell.session().flags().all_sections());
    assert_eq!(shell.editor().prompts.len(), 2);
}

#[test]
fn exit_is_quit() {
    let (mut shell, _) = shell();
    assert_eq!(
        shell.execute("exit").unwrap(),
        shell.execute("quit").unwrap()
    );
}

#[test]
fn interrupt_continues_loop() {
    let editor = ScriptedEditor::new(&["ios", "all"]).interrupt_at(1);
    let (mut shell, _) = shell_with(editor);
    shell.run().unwrap();
    assert!(shell.session().flags().ios_target());
    assert!(shell.session().flags().all_sections());
    assert_eq!(shell.history().len(), 2);
}

#[test]
fn unknown_command_is_reported() {
    let (mut shell, _) = shell();
    let err = shell.execute("frobnicate now").unwrap_err();
    assert_eq!(err.to_string(), "frobnicate: No such command for calcspace.");
}

#[test]
fn lookup_is_case_sensitive() {
    let (mut shell, _) = shell();
    assert!(shell.execute("EXCEL").is_err());
    assert!(!shell.session().flags().excel_output());
}

#[test]
fn editor_recall_mirrors_history() {
    let (mut shell, _) = shell_with(ScriptedEditor::new(&["excel", "", "!!", "!missing"]));
    shell.run().unwrap();
    assert_eq!(shell.editor().recalled, ["excel", "excel"]);
    assert!(!shell.session().flags().excel_output());
}
