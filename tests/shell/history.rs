//! Tests for history recording and bang expansion through the shell

use calcspace_foundation::Action;
use calcspace_shell::HISTORY_CAPACITY;

use crate::support::shell;

#[test]
fn bang_bang_reruns_previous_command() {
    let (mut shell, analyzer) = shell();
    shell.process_line("target foo.bin");
    shell.process_line("nopt");
    shell.process_line("!!");

    let calls = analyzer.calls.borrow();
    assert_eq!(calls.len(), 2);
    assert!(calls.iter().all(|f| f.action() == Some(Action::TotalNopSpace)));
}

#[test]
fn prefix_search_reloads_target() {
    let (mut shell, _) = shell();
    shell.process_line("target foo.bin");
    shell.process_line("target dir/bar.bin");
    shell.process_line("!?foo?");
    assert_eq!(shell.session().display_name(), "foo.bin");
    assert_eq!(shell.history().last(), Some("target foo.bin"));
}

#[test]
fn word_designator_feeds_argument() {
    let (mut shell, _) = shell();
    shell.process_line("help dir/bar.bin");
    shell.process_line("target !!$");
    assert_eq!(shell.session().display_name(), "bar.bin");
}

#[test]
fn bare_designator_uses_previous_event() {
    let (mut shell, _) = shell();
    shell.process_line("help dir/bar.bin");
    shell.process_line("target !$");
    assert_eq!(shell.session().display_name(), "bar.bin");
    assert_eq!(shell.history().last(), Some("target dir/bar.bin"));
}

#[test]
fn apostrophe_does_not_block_expansion() {
    let (mut shell, _) = shell();
    shell.process_line("target foo.bin");
    shell.process_line("help don't !!");
    assert_eq!(shell.history().last(), Some("help don't target foo.bin"));
}

#[test]
fn quick_substitution_through_shell() {
    let (mut shell, _) = shell();
    shell.process_line("target dir/bar.bin");
    shell.process_line("^dir/bar^foo");
    assert_eq!(shell.session().display_name(), "foo.bin");
}

#[test]
fn oldest_line_unreachable_after_capacity_exceeded() {
    let (mut shell, _) = shell();
    shell.process_line("target foo.bin");
    for _ in 0..HISTORY_CAPACITY {
        shell.process_line("options");
    }

    assert_eq!(shell.history().len(), HISTORY_CAPACITY);
    assert!(shell.history().expand("!1").is_err());
    assert!(shell.history().expand("!tar").is_err());
    assert!(shell.history().expand("!2").is_ok());
}

#[test]
fn failed_expansion_leaves_state_alone() {
    let (mut shell, analyzer) = shell();
    shell.process_line("target foo.bin");
    assert!(shell.process_line("!nope"));
    assert!(shell.process_line("!!:s/zzz/y/"));
    assert_eq!(shell.history().len(), 1);
    assert!(analyzer.calls.borrow().is_empty());
}
