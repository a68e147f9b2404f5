//! Built-in command handlers.

use std::fmt::Write as _;
use std::path::Path;

use calcspace_analysis::{Target, TargetLoader};
use calcspace_foundation::{Action, Error, Result, Setting};
use tracing::{debug, info, warn};

use crate::registry::{Category, Command, Context, Handler, Outcome, Registry};
use crate::session::Session;

/// Printed when the shell exits.
pub const FAREWELL: &str = "Bye bye...!";

/// Names per row in the fallback help listing.
const HELP_COLUMNS: usize = 6;

impl Registry {
    /// Builds the registry of built-in commands.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for command in [
            Command::new(
                "new",
                Analyze(Action::NewCmdsSpace),
                "Calculate free space for new commands.",
                Category::Action,
            ),
            Command::new(
                "free",
                Analyze(Action::FreeTextSpace),
                "Calculate free __TEXT space.",
                Category::Action,
            ),
            Command::new(
                "nop",
                Analyze(Action::NopSpace),
                "Calculate NOP space inside functions.",
                Category::Action,
            ),
            Command::new(
                "nopt",
                Analyze(Action::TotalNopSpace),
                "Calculate total NOP space.",
                Category::Action,
            ),
            Command::new(
                "target",
                cmd_target,
                "Load a new target binary.",
                Category::Action,
            ),
            Command::new(
                "options",
                cmd_options,
                "Display current configuration options.",
                Category::Action,
            ),
            Command::new(
                "excel",
                Toggle(Setting::ExcelOutput),
                "Set output to excel mode.",
                Category::Configuration,
            ),
            Command::new(
                "all",
                Toggle(Setting::AllSections),
                "Set free command to calculate space for all sections.",
                Category::Configuration,
            ),
            Command::new(
                "ios",
                Toggle(Setting::IosTarget),
                "Set target as an iOS application.",
                Category::Configuration,
            ),
            Command::new("help", cmd_help, "Display this text.", Category::Action),
            Command::new("?", cmd_help, "Synonym for `help'.", Category::Action),
            Command::new("quit", cmd_quit, "Exit this utility.", Category::Action),
            Command::new("exit", cmd_quit, "Exit this utility.", Category::Action),
        ] {
            registry.insert(command);
        }
        registry
    }
}

/// Runs one analysis pass.
struct Analyze(Action);

impl Handler for Analyze {
    fn handle(&self, ctx: &mut Context<'_>, arg: &str) -> Result<Outcome> {
        if !arg.is_empty() {
            debug!(action = %self.0, arg, "ignoring argument");
        }
        let report = ctx.session.run_action(self.0, &mut *ctx.analyzer)?;
        Ok(Outcome::Message(report))
    }
}

/// Flips a persistent setting.
struct Toggle(Setting);

impl Handler for Toggle {
    fn handle(&self, ctx: &mut Context<'_>, _arg: &str) -> Result<Outcome> {
        let enabled = ctx.session.flags_mut().toggle(self.0);
        debug!(setting = %self.0, enabled, "toggled setting");
        Ok(Outcome::Message(format!(
            "{} is now {}.",
            self.0,
            enabled_label(enabled)
        )))
    }
}

/// Loads `path` with `loader` and makes it the session's target.
///
/// Pending action flags are cleared first. If loading fails the previous
/// target stays in place.
///
/// # Errors
///
/// Returns a `MissingArgument` error for an empty path, or the loader's error.
pub fn load_target(
    session: &mut Session,
    loader: &dyn TargetLoader,
    path: &str,
) -> Result<Outcome> {
    if path.is_empty() {
        return Err(Error::missing_argument("target", "a file path"));
    }

    session.flags_mut().reset_actions();

    let target = loader.load(Path::new(path)).inspect_err(|e| {
        warn!(path, error = %e, "target load failed, keeping previous target");
    })?;

    let message = describe_target(&target);
    info!(name = target.name(), size = target.len(), "target loaded");
    session.set_target(target);

    Ok(Outcome::Message(message))
}

fn describe_target(target: &Target) -> String {
    format!(
        "Target set to {} ({} bytes, {}).",
        target.name(),
        target.len(),
        target.kind()
    )
}

fn cmd_target(ctx: &mut Context<'_>, arg: &str) -> Result<Outcome> {
    load_target(ctx.session, ctx.loader, arg)
}

fn cmd_options(ctx: &mut Context<'_>, _arg: &str) -> Result<Outcome> {
    let flags = ctx.session.flags();
    let mut out = String::from("Current configuration:");
    for setting in Setting::ALL {
        let _ = write!(
            out,
            "\n  {:<14}{}",
            setting.label(),
            enabled_label(flags.get(setting))
        );
    }
    Ok(Outcome::Message(out))
}

fn cmd_help(ctx: &mut Context<'_>, arg: &str) -> Result<Outcome> {
    Ok(Outcome::Message(help_text(ctx.registry, arg)))
}

fn cmd_quit(_ctx: &mut Context<'_>, _arg: &str) -> Result<Outcome> {
    Ok(Outcome::Exit(FAREWELL.to_string()))
}

/// Renders help for `arg`, or for every command when `arg` is empty.
#[must_use]
pub fn help_text(registry: &Registry, arg: &str) -> String {
    let mut out = String::new();

    if arg.is_empty() {
        out.push_str("Available commands:\n");
        for command in registry.in_category(Category::Action) {
            push_entry(&mut out, command);
        }
        out.push_str("Configuration options:\n");
        for command in registry.in_category(Category::Configuration) {
            push_entry(&mut out, command);
        }
        out.push_str("Note: execute the configuration commands to enable/disable each setting.");
        return out;
    }

    if let Some(command) = registry.lookup(arg) {
        push_entry(&mut out, command);
        out.pop();
        return out;
    }

    let _ = writeln!(out, "No commands match `{arg}'. Available commands are:");
    for (i, name) in registry.names().iter().enumerate() {
        if i > 0 && i % HELP_COLUMNS == 0 {
            out.push('\n');
        }
        out.push_str(name);
        out.push('\t');
    }
    out
}

fn push_entry(out: &mut String, command: &Command) {
    let _ = writeln!(out, "{}\t\t{}", command.name(), command.doc());
}

const fn enabled_label(enabled: bool) -> &'static str {
    if enabled { "enabled" } else { "disabled" }
}
