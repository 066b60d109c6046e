pub const GENERIC_ERROR: i32 = -32000;

pub const SESSION_BUSY: i32 = -32006;

pub const CALL_FAILED: i32 = -32008;
pub const NULL_HANDLE: i32 = -32009;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Busy,
    Internal,
    External,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Busy => "busy",
            ErrorCategory::Internal => "internal",
            ErrorCategory::External => "external",
        }
    }

    /// Converts to a UNIX sysexits.h-compliant exit code.
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorCategory::Busy => 73,     // EX_CANTCREAT
            ErrorCategory::External => 74, // EX_IOERR
            ErrorCategory::Internal => 70, // EX_SOFTWARE
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub fn is_retryable(code: i32) -> bool {
    matches!(code, SESSION_BUSY)
}

pub fn category_for_code(code: i32) -> ErrorCategory {
    match code {
        SESSION_BUSY => ErrorCategory::Busy,
        CALL_FAILED | NULL_HANDLE => ErrorCategory::External,
        _ => ErrorCategory::Internal,
    }
}
