//! Restore-and-exit handling for failed curses calls.
//!
//! A failure ends the process: the screen is torn down once so the user's
//! terminal works again, the failed call is printed, and the process exits
//! non-zero without unwinding or touching any other handle.

use std::io::{self, Write};

use tracing::error;

use crate::Curses;
use crate::backend::{CursesBackend, ERR};
use crate::error::CursesError;

/// Diagnostic written when the teardown itself fails.
pub const TEARDOWN_FAILED: &str = "endwin failed";

/// Tears the screen down and writes the diagnostic for `err` to `out`.
///
/// Returns the exit status the process should end with. A failed teardown
/// is reported before the original error and never suppresses it.
pub fn report<B, W>(backend: &B, err: &CursesError, out: &mut W) -> i32
where
    B: CursesBackend + ?Sized,
    W: Write,
{
    if backend.endwin() == ERR {
        let _ = writeln!(out, "{TEARDOWN_FAILED}");
    }
    let _ = writeln!(out, "{err}");
    let _ = out.flush();
    err.exit_code()
}

/// Reports `err` on standard error and terminates the process.
pub fn abort<B>(backend: &B, err: &CursesError) -> !
where
    B: CursesBackend + ?Sized,
{
    error!(code = err.code(), context = %err.context(), "fatal curses error");
    let code = report(backend, err, &mut io::stderr().lock());
    std::process::exit(code)
}

/// Applies the restore-and-exit policy to a guarded call's result.
pub trait OrAbort<T> {
    fn or_abort<B: CursesBackend>(self, curses: &Curses<B>) -> T;
}

impl<T> OrAbort<T> for Result<T, CursesError> {
    fn or_abort<B: CursesBackend>(self, curses: &Curses<B>) -> T {
        match self {
            Ok(value) => value,
            Err(err) => abort(curses.backend(), &err),
        }
    }
}
