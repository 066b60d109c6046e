//! The raw library surface the guarded layer forwards to.
//!
//! Implementations report results exactly the way the C library does: status
//! calls return [`OK`] or [`ERR`], window constructors return `None` for a null
//! pointer. Checking those sentinels is the job of [`crate::Curses`].

use std::fmt;

/// Success status of a curses call.
pub const OK: i32 = 0;
/// Failure sentinel of a status-returning curses call.
pub const ERR: i32 = -1;
/// The library's `TRUE`.
pub const TRUE: i32 = 1;

/// An opaque, address-sized window token owned by the library.
///
/// Never dereferenced on the Rust side.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawWindow(usize);

impl RawWindow {
    pub const fn from_addr(addr: usize) -> Self {
        Self(addr)
    }

    pub const fn addr(self) -> usize {
        self.0
    }
}

impl fmt::Debug for RawWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RawWindow({:#x})", self.0)
    }
}

impl fmt::Display for RawWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Glyphs for the eight parts of a window border. Zero selects the library
/// default for that part.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Border {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
    pub top_left: i32,
    pub top_right: i32,
    pub bottom_left: i32,
    pub bottom_right: i32,
}

impl Border {
    /// The border `box(win, vertical, horizontal)` draws.
    pub fn boxed(vertical: i32, horizontal: i32) -> Self {
        Self {
            left: vertical,
            right: vertical,
            top: horizontal,
            bottom: horizontal,
            ..Self::default()
        }
    }
}

/// One call per curses entry point, results unchecked.
pub trait CursesBackend {
    /// Applies the environment's locale. Returns whether the library accepted it.
    fn setlocale(&self) -> bool;

    fn initscr(&self) -> Option<RawWindow>;
    fn endwin(&self) -> i32;

    fn echo(&self) -> i32;
    fn noecho(&self) -> i32;
    fn cbreak(&self) -> i32;

    fn newwin(&self, height: i32, width: i32, y: i32, x: i32) -> Option<RawWindow>;
    fn derwin(
        &self,
        parent: RawWindow,
        height: i32,
        width: i32,
        y: i32,
        x: i32,
    ) -> Option<RawWindow>;
    fn delwin(&self, win: RawWindow) -> i32;

    fn wmove(&self, win: RawWindow, y: i32, x: i32) -> i32;
    fn wclear(&self, win: RawWindow) -> i32;
    /// Writes every byte of `text` (the library's `n` is `text.len()`).
    fn waddnstr(&self, win: RawWindow, text: &[u8]) -> i32;

    fn wgetch(&self, win: RawWindow) -> i32;
    /// Reads at most `buf.len() - 1` bytes followed by a NUL. `buf` is never empty.
    fn wgetnstr(&self, win: RawWindow, buf: &mut [u8]) -> i32;

    fn box_border(&self, win: RawWindow, vertical: i32, horizontal: i32) -> i32;
    fn wborder(&self, win: RawWindow, border: &Border) -> i32;

    fn wrefresh(&self, win: RawWindow) -> i32;
    fn wnoutrefresh(&self, win: RawWindow) -> i32;
    fn doupdate(&self) -> i32;
    fn touchwin(&self, win: RawWindow) -> i32;

    /// Raw capability answer; only [`TRUE`] means colors are supported.
    fn has_colors(&self) -> i32;
    fn start_color(&self) -> i32;

    /// Entry `key` of the alternate character set map.
    fn acs_value(&self, key: u8) -> u32;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_window_formats_like_pointer() {
        let raw = RawWindow::from_addr(0x7f00);
        assert_eq!(raw.to_string(), "0x7f00");
        assert_eq!(format!("{raw:?}"), "RawWindow(0x7f00)");
        assert_eq!(raw.addr(), 0x7f00);
    }

    #[test]
    fn test_boxed_border_uses_default_corners() {
        let border = Border::boxed(124, 45);
        assert_eq!(border.left, 124);
        assert_eq!(border.right, 124);
        assert_eq!(border.top, 45);
        assert_eq!(border.bottom, 45);
        assert_eq!(border.top_left, 0);
        assert_eq!(border.bottom_right, 0);
    }
}
