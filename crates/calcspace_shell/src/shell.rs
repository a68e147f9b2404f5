//! The interactive shell loop.

use std::io::{self, Write};

use calcspace_analysis::{Analyzer, FileLoader, SummaryAnalyzer, TargetLoader};
use calcspace_foundation::{Error, Result};
use tracing::{debug, warn};

use crate::commands::{self, FAREWELL};
use crate::completion::CommandCompleter;
use crate::dispatch;
use crate::editor::{LineEditor, ReadResult, RustylineEditor};
use crate::history::{Expansion, History};
use crate::registry::{Context, Outcome, Registry};
use crate::session::Session;

/// The interactive shell.
pub struct Shell<E: LineEditor = RustylineEditor> {
    /// The line editor for input.
    editor: E,

    /// Session state (target, flags).
    session: Session,

    /// Built-in commands.
    registry: Registry,

    /// Accepted lines, for bang expansion.
    history: History,

    /// Reads targets for the `target` command.
    loader: Box<dyn TargetLoader>,

    /// Runs analysis passes.
    analyzer: Box<dyn Analyzer>,

    /// Whether to show the welcome banner.
    show_banner: bool,
}

impl Shell<RustylineEditor> {
    /// Creates a new shell with the default rustyline editor.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails to initialize.
    pub fn new() -> Result<Self> {
        let registry = Registry::builtin();
        let editor = RustylineEditor::new(CommandCompleter::new(&registry))?;
        Ok(Self::with_registry(editor, registry))
    }
}

impl<E: LineEditor> Shell<E> {
    /// Creates a new shell with the given editor.
    pub fn with_editor(editor: E) -> Self {
        Self::with_registry(editor, Registry::builtin())
    }

    fn with_registry(editor: E, registry: Registry) -> Self {
        Self {
            editor,
            session: Session::new(),
            registry,
            history: History::new(),
            loader: Box::new(FileLoader::new()),
            analyzer: Box::new(SummaryAnalyzer::new()),
            show_banner: true,
        }
    }

    /// Sets the session for this shell.
    #[must_use]
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = session;
        self
    }

    /// Sets the target loader.
    #[must_use]
    pub fn with_loader(mut self, loader: impl TargetLoader + 'static) -> Self {
        self.loader = Box::new(loader);
        self
    }

    /// Sets the analyzer.
    #[must_use]
    pub fn with_analyzer(mut self, analyzer: impl Analyzer + 'static) -> Self {
        self.analyzer = Box::new(analyzer);
        self
    }

    /// Disables the welcome banner.
    #[must_use]
    pub fn without_banner(mut self) -> Self {
        self.show_banner = false;
        self
    }

    /// Returns a reference to the session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Returns a mutable reference to the session.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Returns the line history.
    #[must_use]
    pub const fn history(&self) -> &History {
        &self.history
    }

    /// Returns the line editor.
    #[must_use]
    pub const fn editor(&self) -> &E {
        &self.editor
    }

    /// The prompt for the current session state.
    #[must_use]
    pub fn prompt(&self) -> String {
        format!("[{}] calcspace> ", self.session.display_name())
    }

    /// Loads a target before the loop starts.
    ///
    /// # Errors
    ///
    /// Returns the loader's error; the session is left unchanged.
    pub fn load_target(&mut self, path: &str) -> Result<()> {
        commands::load_target(&mut self.session, self.loader.as_ref(), path).map(|_| ())
    }

    /// Runs the shell loop until `quit`, `exit`, or end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal fails.
    pub fn run(&mut self) -> Result<()> {
        if self.show_banner {
            print_banner();
        }

        while self.read_eval_print()? {}

        Ok(())
    }

    /// Executes one read-eval-print iteration.
    ///
    /// Returns `Ok(true)` to continue, `Ok(false)` to exit.
    fn read_eval_print(&mut self) -> Result<bool> {
        let prompt = self.prompt();
        match self.editor.read_line(&prompt)? {
            ReadResult::Line(line) => Ok(self.process_line(&line)),
            ReadResult::Interrupted => Ok(true),
            ReadResult::Eof => {
                println!();
                println!("{FAREWELL}");
                Ok(false)
            }
        }
    }

    /// Handles one raw input line: trims it, expands history references,
    /// records it, and executes it. Errors are printed, never returned.
    ///
    /// Returns false once the shell should stop.
    pub fn process_line(&mut self, raw: &str) -> bool {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return true;
        }

        let line = match self.history.expand(trimmed) {
            Ok(Expansion::PrintOnly(text)) => {
                eprintln!("{text}");
                return true;
            }
            Ok(expansion) => expansion.into_text(),
            Err(e) => {
                print_error(&e);
                return true;
            }
        };
        let line = line.trim();
        if line.is_empty() {
            return true;
        }

        self.history.push(line);
        self.editor.add_history(line);

        match self.execute(line) {
            Ok(Outcome::Silent) => true,
            Ok(Outcome::Message(text)) => {
                println!("{text}");
                true
            }
            Ok(Outcome::Exit(farewell)) => {
                println!("{farewell}");
                false
            }
            Err(e) => {
                if let Some(context) = &e.context {
                    debug!(%context, "command failed");
                }
                print_error(&e);
                true
            }
        }
    }

    /// Dispatches a line to its command without touching history.
    ///
    /// # Errors
    ///
    /// Returns the dispatch or handler error.
    pub fn execute(&mut self, line: &str) -> Result<Outcome> {
        let mut ctx = Context {
            session: &mut self.session,
            loader: self.loader.as_ref(),
            analyzer: self.analyzer.as_mut(),
            registry: &self.registry,
        };
        dispatch::execute(&mut ctx, line)
    }
}

/// Prints an error to stderr. Input mistakes are shown in red, anything
/// else in bold red and logged.
fn print_error(error: &Error) {
    if error.is_user_error() {
        eprintln!("\x1b[31mError: {error}\x1b[0m");
    } else {
        warn!(%error, "command failed");
        eprintln!("\x1b[1;31mError: {error}\x1b[0m");
    }
}

/// Prints the welcome banner.
fn print_banner() {
    println!(" _____     _     _____ ");
    println!("|     |___| |___|   __|___ ___ ___ ___ ");
    println!("|   --| .'| |  _|__   | . | .'|  _| -_|");
    println!("|_____|__,|_|___|_____|  _|__,|___|___|");
    println!("                      |_|              ");
    println!("Calculate free space in mach-o headers v{}", env!("CARGO_PKG_VERSION"));
    println!("Type `help' for commands. Use Ctrl+D to exit.\n");

    // Flush to ensure banner appears
    let _ = io::stdout().flush();
}
