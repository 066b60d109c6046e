use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
pub use clap_complete::Shell;
use curses_guard::Operation;

use crate::presenter::OutputFormat;

const LONG_ABOUT: &str = r#"curses-guard drives the curses library through a guarded calling layer.

Every library call is checked against its failure sentinel. On failure the
screen is torn down, a single diagnostic naming the failed call and its
arguments is printed to stderr, and the process exits non-zero.

BACKENDS:
    headless    In-memory stand-in; no terminal needed (default without the
                ncurses feature)
    ncurses     The system curses library

EXAMPLES:
    # Draw a bordered 5x20 window at row 2, column 4
    curses-guard window --height 5 --width 20 -y 2 -x 4

    # Read at most 16 bytes of input
    curses-guard --backend headless --input "hello" prompt --max-len 16

    # See what a failing refresh looks like
    curses-guard --backend headless --fail wrefresh window --height 3 --width 3"#;

#[derive(Parser)]
#[command(name = "curses-guard")]
#[command(author, version)]
#[command(about = "Drive curses through a guarded calling layer")]
#[command(long_about = LONG_ABOUT)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Terminal library to drive
    #[arg(
        long,
        global = true,
        value_enum,
        env = "CURSES_GUARD_BACKEND",
        default_value_t = BackendKind::DEFAULT
    )]
    pub backend: BackendKind,

    /// Screen height of the headless backend
    #[arg(long, global = true, default_value = "24")]
    pub rows: i32,

    /// Screen width of the headless backend
    #[arg(long, global = true, default_value = "80")]
    pub cols: i32,

    /// Make the headless terminal report no color support
    #[arg(long, global = true)]
    pub no_colors: bool,

    /// Keystrokes queued for the headless backend
    #[arg(long, global = true)]
    pub input: Option<String>,

    /// Make a headless library call fail, e.g. wrefresh (repeatable)
    #[arg(long = "fail", global = true, value_name = "OP")]
    pub fail: Vec<Operation>,

    /// Append logs to this file instead of stderr
    #[arg(long, global = true, env = "CURSES_GUARD_LOG", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(
        long,
        global = true,
        env = "CURSES_GUARD_LOG_LEVEL",
        default_value = "off"
    )]
    pub log_level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackendKind {
    /// In-memory stand-in, no terminal needed
    Headless,
    /// The system ncurses library (needs the `ncurses` feature)
    Ncurses,
}

impl BackendKind {
    #[cfg(all(unix, feature = "ncurses"))]
    pub const DEFAULT: Self = BackendKind::Ncurses;
    #[cfg(not(all(unix, feature = "ncurses")))]
    pub const DEFAULT: Self = BackendKind::Headless;
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a bordered window, refresh it, then tear everything down
    Window {
        /// Window height in rows (0 fills the rest of the screen)
        #[arg(long)]
        height: i32,

        /// Window width in columns (0 fills the rest of the screen)
        #[arg(long)]
        width: i32,

        /// Top row of the window
        #[arg(short = 'y', long, default_value = "0", allow_negative_numbers = true)]
        y: i32,

        /// Left column of the window
        #[arg(short = 'x', long, default_value = "0", allow_negative_numbers = true)]
        x: i32,

        /// Derive the window from the standard screen instead of creating it
        #[arg(long)]
        derived: bool,

        /// Text written on the top border
        #[arg(long)]
        title: Option<String>,

        /// Wait for a key before tearing down
        #[arg(long)]
        hold: bool,
    },

    /// Read one line of at most --max-len bytes
    Prompt {
        /// Longest line accepted, in bytes
        #[arg(long, default_value = "64")]
        max_len: usize,

        /// Text shown before the input
        #[arg(long, default_value = "> ")]
        label: String,
    },

    /// Read a single key and print its code
    Key,

    /// Print every color, attribute and line-drawing constant
    Constants {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Report color support, starting colors when available
    Colors,

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}
