//! Property-based tests for session invariants

use calcspace_foundation::Setting;
use calcspace_shell::HISTORY_CAPACITY;
use proptest::prelude::*;

use crate::support::shell;

fn toggle_command() -> impl Strategy<Value = (&'static str, Setting)> {
    prop::sample::select(vec![
        ("excel", Setting::ExcelOutput),
        ("all", Setting::AllSections),
        ("ios", Setting::IosTarget),
    ])
}

fn any_command() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "new", "free", "nop", "nopt", "excel", "all", "ios", "options", "help", "?",
        "target foo.bin", "target missing.bin", "target",
    ])
}

proptest! {
    #[test]
    fn unknown_words_change_nothing(words in prop::collection::vec("[A-Z][a-z]{0,6}", 1..10)) {
        let (mut shell, analyzer) = shell();
        shell.execute("excel").unwrap();
        let before = *shell.session().flags();

        for word in &words {
            prop_assert!(shell.execute(word).is_err());
        }

        prop_assert_eq!(*shell.session().flags(), before);
        prop_assert!(!shell.session().has_target());
        prop_assert!(analyzer.calls.borrow().is_empty());
    }

    #[test]
    fn double_toggle_restores(
        (command, setting) in toggle_command(),
        start in any::<bool>(),
    ) {
        let (mut shell, _) = shell();
        shell.session_mut().flags_mut().set(setting, start);

        shell.execute(command).unwrap();
        prop_assert_eq!(shell.session().flags().get(setting), !start);
        shell.execute(command).unwrap();
        prop_assert_eq!(shell.session().flags().get(setting), start);
    }

    #[test]
    fn no_action_pending_between_commands(commands in prop::collection::vec(any_command(), 0..20)) {
        let (mut shell, analyzer) = shell();
        for command in &commands {
            let _ = shell.execute(command);
            prop_assert_eq!(shell.session().flags().action(), None);
        }
        for flags in analyzer.calls.borrow().iter() {
            prop_assert!(flags.action().is_some());
        }
    }

    #[test]
    fn history_stays_bounded(lines in prop::collection::vec("(options|excel|help [a-z]{1,4})", 0..30)) {
        let (mut shell, _) = shell();
        for line in &lines {
            shell.process_line(line);
            prop_assert!(shell.history().len() <= HISTORY_CAPACITY);
        }
    }
}
