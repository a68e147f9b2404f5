//! calcspace CLI entry point.

use std::process::ExitCode;

use calcspace_foundation::{Flags, Setting};
use calcspace_shell::{Session, Shell};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Interactive shell for calculating free space in binary headers.
#[derive(Parser, Debug)]
#[command(name = "calcspace")]
#[command(version)]
struct Args {
    /// Target binary to load before the prompt appears
    target: Option<String>,

    /// Start with excel output enabled
    #[arg(short, long)]
    excel: bool,

    /// Start with free space computed for all sections
    #[arg(short, long)]
    all: bool,

    /// Start with the target treated as an iOS application
    #[arg(short, long)]
    ios: bool,

    /// Do not print the banner
    #[arg(long)]
    no_banner: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn initial_flags(&self) -> Flags {
        let mut flags = Flags::new();
        flags.set(Setting::ExcelOutput, self.excel);
        flags.set(Setting::AllSections, self.all);
        flags.set(Setting::IosTarget, self.ios);
        flags
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    // RUST_LOG wins over --verbose, e.g. RUST_LOG=calcspace_shell=trace
    let env_filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if args.verbose {
        EnvFilter::new("calcspace=debug,calcspace_shell=debug,calcspace_analysis=debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .init();

    debug!(verbose = args.verbose, "logging initialized");

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> calcspace_foundation::Result<()> {
    let mut shell = Shell::new()?.with_session(Session::with_flags(args.initial_flags()));

    if args.no_banner {
        shell = shell.without_banner();
    }

    if let Some(path) = &args.target {
        shell.load_target(path)?;
    }

    shell.run()
}
