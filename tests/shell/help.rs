//! Tests for the help command

use calcspace_shell::Outcome;

use crate::support::shell;

fn help(arg: &str) -> String {
    let (mut shell, _) = shell();
    match shell.execute(&format!("help {arg}")).unwrap() {
        Outcome::Message(text) => text,
        other => panic!("help should print, got {other:?}"),
    }
}

#[test]
fn help_for_registered_command() {
    assert_eq!(help("nopt"), "nopt\t\tCalculate total NOP space.");
    assert_eq!(help("?"), "?\t\tSynonym for `help'.");
}

#[test]
fn question_mark_is_help() {
    let (mut shell, _) = shell();
    assert_eq!(shell.execute("? excel").unwrap(), shell.execute("help excel").unwrap());
}

#[test]
fn help_without_argument_has_two_sections() {
    let text = help("");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Available commands:");
    let config = lines
        .iter()
        .position(|l| *l == "Configuration options:")
        .unwrap();
    assert_eq!(
        &lines[config + 1..config + 4],
        [
            "excel\t\tSet output to excel mode.",
            "all\t\tSet free command to calculate space for all sections.",
            "ios\t\tSet target as an iOS application.",
        ]
    );
    assert_eq!(config, 11);
}

#[test]
fn help_bogus_lists_all_names() {
    let text = help("bogus");
    assert!(text.starts_with("No commands match `bogus'. Available commands are:\n"));
    for name in ["new", "free", "nop", "nopt", "target", "options", "excel", "exit"] {
        assert!(text.contains(&format!("{name}\t")), "missing {name}");
    }
    assert!(text.lines().skip(1).all(|l| l.split('\t').count() <= 7));
}

#[test]
fn help_is_case_sensitive() {
    assert!(help("FREE").starts_with("No commands match `FREE'."));
}
