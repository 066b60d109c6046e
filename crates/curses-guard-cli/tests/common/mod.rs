//! Test harness exports.

use assert_cmd::Command;

/// sysexits EX_IOERR: a curses call failed.
pub const EXIT_CALL_FAILED: i32 = 74;

/// The binary with a clean environment, pinned to the headless backend.
pub fn curses_guard_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("curses-guard"));
    cmd.env_remove("RUST_LOG")
        .env_remove("CURSES_GUARD_LOG")
        .env_remove("CURSES_GUARD_LOG_LEVEL")
        .env_remove("CURSES_GUARD_BACKEND")
        .args(["--backend", "headless"]);
    cmd
}

pub fn run(args: &[&str]) -> assert_cmd::assert::Assert {
    curses_guard_cmd().args(args).assert()
}
