//! Curses call errors with structured context.
//!
//! A failed call is captured as data (the operation plus its arguments) and
//! only rendered into a diagnostic line at the reporting boundary.

use std::fmt;
use std::str::FromStr;

use curses_guard_common::error_codes::{self, ErrorCategory};
use serde_json::{Value, json};
use thiserror::Error;

use crate::backend::RawWindow;

/// Every library entry point the guarded layer forwards to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Setlocale,
    Initscr,
    Endwin,
    Echo,
    Noecho,
    Cbreak,
    Newwin,
    Derwin,
    Delwin,
    Wmove,
    Wclear,
    Waddnstr,
    Wgetch,
    Wgetnstr,
    Box,
    Wborder,
    Wrefresh,
    Wnoutrefresh,
    Doupdate,
    Touchwin,
    HasColors,
    StartColor,
    AcsMap,
}

impl Operation {
    pub const ALL: [Operation; 23] = [
        Operation::Setlocale,
        Operation::Initscr,
        Operation::Endwin,
        Operation::Echo,
        Operation::Noecho,
        Operation::Cbreak,
        Operation::Newwin,
        Operation::Derwin,
        Operation::Delwin,
        Operation::Wmove,
        Operation::Wclear,
        Operation::Waddnstr,
        Operation::Wgetch,
        Operation::Wgetnstr,
        Operation::Box,
        Operation::Wborder,
        Operation::Wrefresh,
        Operation::Wnoutrefresh,
        Operation::Doupdate,
        Operation::Touchwin,
        Operation::HasColors,
        Operation::StartColor,
        Operation::AcsMap,
    ];

    /// The library's own name for the call.
    pub fn name(self) -> &'static str {
        match self {
            Operation::Setlocale => "setlocale",
            Operation::Initscr => "initscr",
            Operation::Endwin => "endwin",
            Operation::Echo => "echo",
            Operation::Noecho => "noecho",
            Operation::Cbreak => "cbreak",
            Operation::Newwin => "newwin",
            Operation::Derwin => "derwin",
            Operation::Delwin => "delwin",
            Operation::Wmove => "wmove",
            Operation::Wclear => "wclear",
            Operation::Waddnstr => "waddnstr",
            Operation::Wgetch => "wgetch",
            Operation::Wgetnstr => "wgetnstr",
            Operation::Box => "box",
            Operation::Wborder => "wborder",
            Operation::Wrefresh => "wrefresh",
            Operation::Wnoutrefresh => "wnoutrefresh",
            Operation::Doupdate => "doupdate",
            Operation::Touchwin => "touchwin",
            Operation::HasColors => "has_colors",
            Operation::StartColor => "start_color",
            Operation::AcsMap => "acs_map",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| format!("unknown curses operation: {s}"))
    }
}

/// A single argument of a failed call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arg {
    Int(i32),
    Handle(RawWindow),
}

impl From<i32> for Arg {
    fn from(value: i32) -> Self {
        Arg::Int(value)
    }
}

impl From<RawWindow> for Arg {
    fn from(value: RawWindow) -> Self {
        Arg::Handle(value)
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Int(n) => write!(f, "{n}"),
            Arg::Handle(raw) => write!(f, "{raw}"),
        }
    }
}

/// An operation together with the arguments it was invoked with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub op: Operation,
    pub args: Vec<Arg>,
}

impl Call {
    pub fn new(op: Operation, args: Vec<Arg>) -> Self {
        Self { op, args }
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.op)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{arg}")?;
        }
        f.write_str(")")
    }
}

/// Curses call errors with structured context.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CursesError {
    #[error("{call} failed")]
    Failed { call: Call },

    #[error("{call} failed: no window returned")]
    NullHandle { call: Call },

    #[error("terminal session is already held by another backend")]
    Busy,
}

impl CursesError {
    /// Returns the error code for this error.
    pub fn code(&self) -> i32 {
        match self {
            CursesError::Failed { .. } => error_codes::CALL_FAILED,
            CursesError::NullHandle { .. } => error_codes::NULL_HANDLE,
            CursesError::Busy => error_codes::SESSION_BUSY,
        }
    }

    /// Returns the error category for programmatic handling.
    pub fn category(&self) -> ErrorCategory {
        error_codes::category_for_code(self.code())
    }

    /// The failed call, if the error came from the library.
    pub fn call(&self) -> Option<&Call> {
        match self {
            CursesError::Failed { call } | CursesError::NullHandle { call } => Some(call),
            CursesError::Busy => None,
        }
    }

    pub fn operation(&self) -> Option<Operation> {
        self.call().map(|call| call.op)
    }

    /// Returns structured context about the error for debugging.
    pub fn context(&self) -> Value {
        match self.call() {
            Some(call) => {
                let args: Vec<Value> = call
                    .args
                    .iter()
                    .map(|arg| match arg {
                        Arg::Int(n) => json!(n),
                        Arg::Handle(raw) => json!(raw.to_string()),
                    })
                    .collect();
                json!({
                    "operation": call.op.name(),
                    "args": args
                })
            }
            None => json!({ "operation": "acquire" }),
        }
    }

    /// Returns a helpful suggestion for resolving the error.
    pub fn suggestion(&self) -> String {
        match self {
            CursesError::Failed { call } => match call.op {
                Operation::Wmove => {
                    "Cursor position is outside the window. Check the window size.".to_string()
                }
                Operation::Delwin => {
                    "Delete derived windows before their parent.".to_string()
                }
                Operation::Wgetch | Operation::Wgetnstr => {
                    "Input ended or the read was interrupted.".to_string()
                }
                Operation::StartColor => "The terminal does not support colors.".to_string(),
                _ => "The curses library rejected the call. Check that the screen is initialized."
                    .to_string(),
            },
            CursesError::NullHandle { .. } => {
                "Window does not fit on the screen. Check the requested size and origin."
                    .to_string()
            }
            CursesError::Busy => {
                "Only one terminal session may be active per process. Drop the other backend first."
                    .to_string()
            }
        }
    }

    /// Returns whether this error is potentially transient and may succeed on retry.
    pub fn is_retryable(&self) -> bool {
        error_codes::is_retryable(self.code())
    }

    /// Converts to UNIX sysexits.h-compliant exit code.
    pub fn exit_code(&self) -> i32 {
        self.category().exit_code()
    }

    /// Returns structured JSON representation of this error.
    pub fn to_json(&self) -> Value {
        json!({
            "code": self.code(),
            "message": self.to_string(),
            "category": self.category().as_str(),
            "retryable": self.is_retryable(),
            "context": self.context(),
            "suggestion": self.suggestion()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn newwin_call() -> Call {
        Call::new(
            Operation::Newwin,
            vec![Arg::Int(5), Arg::Int(10), Arg::Int(100), Arg::Int(3)],
        )
    }

    #[test]
    fn test_call_display_lists_arguments() {
        assert_eq!(newwin_call().to_string(), "newwin(5, 10, 100, 3)");
        assert_eq!(Call::new(Operation::Doupdate, vec![]).to_string(), "doupdate()");
    }

    #[test]
    fn test_handle_argument_renders_as_address() {
        let call = Call::new(
            Operation::Derwin,
            vec![RawWindow::from_addr(0x1000).into(), 1.into(), 2.into()],
        );
        assert_eq!(call.to_string(), "derwin(0x1000, 1, 2)");
    }

    #[test]
    fn test_error_messages() {
        let failed = CursesError::Failed {
            call: Call::new(Operation::Wrefresh, vec![RawWindow::from_addr(0x2a).into()]),
        };
        assert_eq!(failed.to_string(), "wrefresh(0x2a) failed");

        let null = CursesError::NullHandle { call: newwin_call() };
        assert_eq!(
            null.to_string(),
            "newwin(5, 10, 100, 3) failed: no window returned"
        );
    }

    #[test]
    fn test_error_codes() {
        let null = CursesError::NullHandle { call: newwin_call() };
        assert_eq!(null.code(), error_codes::NULL_HANDLE);
        assert_eq!(CursesError::Busy.code(), error_codes::SESSION_BUSY);
    }

    #[test]
    fn test_error_category() {
        let null = CursesError::NullHandle { call: newwin_call() };
        assert_eq!(null.category(), ErrorCategory::External);
        assert_eq!(CursesError::Busy.category(), ErrorCategory::Busy);
    }

    #[test]
    fn test_error_context() {
        let err = CursesError::NullHandle { call: newwin_call() };
        let ctx = err.context();
        assert_eq!(ctx["operation"], "newwin");
        assert_eq!(ctx["args"], json!([5, 10, 100, 3]));
    }

    #[test]
    fn test_error_exit_code_is_nonzero() {
        let err = CursesError::NullHandle { call: newwin_call() };
        assert_eq!(err.exit_code(), 74);
        assert_ne!(CursesError::Busy.exit_code(), 0);
    }

    #[test]
    fn test_only_busy_is_retryable() {
        assert!(CursesError::Busy.is_retryable());
        assert!(!CursesError::NullHandle { call: newwin_call() }.is_retryable());
    }

    #[test]
    fn test_to_json() {
        let err = CursesError::NullHandle { call: newwin_call() };
        let json = err.to_json();
        assert_eq!(json["code"], error_codes::NULL_HANDLE);
        assert_eq!(json["category"], "external");
        assert_eq!(json["retryable"], false);
        assert!(json["suggestion"].as_str().unwrap().contains("fit"));
    }

    #[test]
    fn test_operation_parses_from_name() {
        for op in Operation::ALL {
            assert_eq!(op.name().parse::<Operation>(), Ok(op));
        }
        assert!("nonsense".parse::<Operation>().is_err());
    }
}
