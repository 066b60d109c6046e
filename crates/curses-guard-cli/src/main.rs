//! CLI entrypoint for curses-guard.
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

mod commands;
mod presenter;
mod scenarios;
mod telemetry;

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use curses_guard::abort;
use curses_guard::{Curses, CursesBackend, HeadlessBackend, HeadlessConfig};
use tracing::{debug, error};

use crate::commands::{BackendKind, Cli, Commands};
use crate::scenarios::WindowPlan;
use crate::telemetry::LogSink;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let sink = LogSink::select(cli.log_file.clone(), cli.backend == BackendKind::Ncurses);
    let telemetry = telemetry::init_tracing(&cli.log_level, &sink)
        .with_context(|| match &sink {
            LogSink::File(path) => format!("failed to open log file {}", path.display()),
            _ => "failed to set up logging".to_string(),
        })?;

    if let Commands::Completions { shell } = cli.command {
        clap_complete::generate(
            shell,
            &mut Cli::command(),
            "curses-guard",
            &mut io::stdout(),
        );
        return Ok(());
    }

    let exit_code = match cli.backend {
        BackendKind::Headless => drive(Curses::new(headless_backend(&cli)), &cli)?,
        #[cfg(all(unix, feature = "ncurses"))]
        BackendKind::Ncurses => match curses_guard::NcursesBackend::acquire() {
            Ok(backend) => drive(Curses::new(backend), &cli)?,
            Err(err) => {
                eprintln!("Error: {err}");
                err.exit_code()
            }
        },
        #[cfg(not(all(unix, feature = "ncurses")))]
        BackendKind::Ncurses => {
            anyhow::bail!("built without ncurses support; rebuild with --features ncurses")
        }
    };

    drop(telemetry);
    std::process::exit(exit_code);
}

fn headless_backend(cli: &Cli) -> HeadlessBackend {
    let backend = HeadlessBackend::new(HeadlessConfig {
        rows: cli.rows,
        cols: cli.cols,
        colors: !cli.no_colors,
    });
    if let Some(input) = &cli.input {
        backend.push_input(input.as_bytes());
    }
    for &op in &cli.fail {
        debug!(op = op.name(), "injecting failure");
        backend.fail(op);
    }
    backend
}

/// Runs the selected command and returns the process exit status.
///
/// A failed library call is reported with the restore-and-exit protocol
/// before the status is returned, so nothing else touches the screen.
fn drive<B: CursesBackend>(curses: Curses<B>, cli: &Cli) -> Result<i32> {
    let output = match &cli.command {
        Commands::Window {
            height,
            width,
            y,
            x,
            derived,
            title,
            hold,
        } => scenarios::window(
            &curses,
            &WindowPlan {
                height: *height,
                width: *width,
                y: *y,
                x: *x,
                derived: *derived,
                title: title.as_deref(),
                hold: *hold,
            },
        ),
        Commands::Prompt { max_len, label } => scenarios::prompt(&curses, label, *max_len),
        Commands::Key => scenarios::key(&curses),
        Commands::Colors => scenarios::colors(&curses),
        Commands::Constants { format } => match scenarios::constants(&curses) {
            Ok(entries) => Ok(presenter::render_constants(&entries, *format)
                .context("failed to render constants")?),
            Err(err) => Err(err),
        },
        Commands::Completions { .. } => return Ok(0),
    };

    let output = match output {
        Ok(output) => output,
        Err(err) => {
            error!(code = err.code(), context = %err.context(), "fatal curses error");
            return Ok(abort::report(curses.backend(), &err, &mut io::stderr().lock()));
        }
    };

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{output}").context("failed to write output")?;
    Ok(0)
}
