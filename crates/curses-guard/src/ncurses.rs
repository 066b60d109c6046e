//! Backend over the system ncurses library.
//!
//! The library keeps one terminal session per process, so the backend is a
//! process-wide singleton: [`NcursesBackend::acquire`] hands out at most one
//! instance at a time.
#![allow(unsafe_code)]

use std::ffi::{c_char, c_int};
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use crate::backend::{Border, CursesBackend, RawWindow};
use crate::error::CursesError;

type Chtype = u32;

#[allow(clippy::upper_case_acronyms)]
#[repr(C)]
pub struct WINDOW {
    _opaque: [u8; 0],
}

#[link(name = "ncurses")]
extern "C" {
    fn initscr() -> *mut WINDOW;
    fn endwin() -> c_int;

    fn echo() -> c_int;
    fn noecho() -> c_int;
    fn cbreak() -> c_int;

    fn newwin(nlines: c_int, ncols: c_int, begin_y: c_int, begin_x: c_int) -> *mut WINDOW;
    fn derwin(
        orig: *mut WINDOW,
        nlines: c_int,
        ncols: c_int,
        begin_y: c_int,
        begin_x: c_int,
    ) -> *mut WINDOW;
    fn delwin(win: *mut WINDOW) -> c_int;

    fn wmove(win: *mut WINDOW, y: c_int, x: c_int) -> c_int;
    fn wclear(win: *mut WINDOW) -> c_int;
    fn waddnstr(win: *mut WINDOW, s: *const c_char, n: c_int) -> c_int;
    fn wgetch(win: *mut WINDOW) -> c_int;
    fn wgetnstr(win: *mut WINDOW, s: *mut c_char, n: c_int) -> c_int;

    #[link_name = "box"]
    fn box_(win: *mut WINDOW, verch: Chtype, horch: Chtype) -> c_int;
    #[allow(clippy::too_many_arguments)]
    fn wborder(
        win: *mut WINDOW,
        ls: Chtype,
        rs: Chtype,
        ts: Chtype,
        bs: Chtype,
        tl: Chtype,
        tr: Chtype,
        bl: Chtype,
        br: Chtype,
    ) -> c_int;

    fn wrefresh(win: *mut WINDOW) -> c_int;
    fn wnoutrefresh(win: *mut WINDOW) -> c_int;
    fn doupdate() -> c_int;
    fn touchwin(win: *mut WINDOW) -> c_int;

    fn has_colors() -> u8;
    fn start_color() -> c_int;

    static mut acs_map: [Chtype; 128];
}

static CLAIMED: AtomicBool = AtomicBool::new(false);

fn window(raw: RawWindow) -> *mut WINDOW {
    raw.addr() as *mut WINDOW
}

fn handle(ptr: *mut WINDOW) -> Option<RawWindow> {
    (!ptr.is_null()).then(|| RawWindow::from_addr(ptr as usize))
}

fn clamp_len(len: usize) -> c_int {
    c_int::try_from(len).unwrap_or(c_int::MAX)
}

/// The process's one handle on the system curses library.
#[derive(Debug)]
pub struct NcursesBackend {
    _claim: (),
}

impl NcursesBackend {
    /// Claims the terminal session, failing with [`CursesError::Busy`] while
    /// another instance is alive.
    pub fn acquire() -> Result<Self, CursesError> {
        CLAIMED
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| CursesError::Busy)?;
        debug!("ncurses backend acquired");
        Ok(Self { _claim: () })
    }
}

impl Drop for NcursesBackend {
    fn drop(&mut self) {
        CLAIMED.store(false, Ordering::Release);
    }
}

// SAFETY (all calls below): handles only ever come from the library itself
// and are passed back unchanged; buffers are Rust slices whose lengths bound
// what the library reads or writes.
impl CursesBackend for NcursesBackend {
    fn setlocale(&self) -> bool {
        let locale = unsafe { libc::setlocale(libc::LC_ALL, b"\0".as_ptr().cast()) };
        !locale.is_null()
    }

    fn initscr(&self) -> Option<RawWindow> {
        handle(unsafe { initscr() })
    }

    fn endwin(&self) -> i32 {
        unsafe { endwin() }
    }

    fn echo(&self) -> i32 {
        unsafe { echo() }
    }

    fn noecho(&self) -> i32 {
        unsafe { noecho() }
    }

    fn cbreak(&self) -> i32 {
        unsafe { cbreak() }
    }

    fn newwin(&self, height: i32, width: i32, y: i32, x: i32) -> Option<RawWindow> {
        handle(unsafe { newwin(height, width, y, x) })
    }

    fn derwin(
        &self,
        parent: RawWindow,
        height: i32,
        width: i32,
        y: i32,
        x: i32,
    ) -> Option<RawWindow> {
        handle(unsafe { derwin(window(parent), height, width, y, x) })
    }

    fn delwin(&self, win: RawWindow) -> i32 {
        unsafe { delwin(window(win)) }
    }

    fn wmove(&self, win: RawWindow, y: i32, x: i32) -> i32 {
        unsafe { wmove(window(win), y, x) }
    }

    fn wclear(&self, win: RawWindow) -> i32 {
        unsafe { wclear(window(win)) }
    }

    fn waddnstr(&self, win: RawWindow, text: &[u8]) -> i32 {
        unsafe { waddnstr(window(win), text.as_ptr().cast(), clamp_len(text.len())) }
    }

    fn wgetch(&self, win: RawWindow) -> i32 {
        unsafe { wgetch(window(win)) }
    }

    fn wgetnstr(&self, win: RawWindow, buf: &mut [u8]) -> i32 {
        let n = clamp_len(buf.len().saturating_sub(1));
        unsafe { wgetnstr(window(win), buf.as_mut_ptr().cast(), n) }
    }

    fn box_border(&self, win: RawWindow, vertical: i32, horizontal: i32) -> i32 {
        unsafe { box_(window(win), vertical as Chtype, horizontal as Chtype) }
    }

    fn wborder(&self, win: RawWindow, border: &Border) -> i32 {
        unsafe {
            wborder(
                window(win),
                border.left as Chtype,
                border.right as Chtype,
                border.top as Chtype,
                border.bottom as Chtype,
                border.top_left as Chtype,
                border.top_right as Chtype,
                border.bottom_left as Chtype,
                border.bottom_right as Chtype,
            )
        }
    }

    fn wrefresh(&self, win: RawWindow) -> i32 {
        unsafe { wrefresh(window(win)) }
    }

    fn wnoutrefresh(&self, win: RawWindow) -> i32 {
        unsafe { wnoutrefresh(window(win)) }
    }

    fn doupdate(&self) -> i32 {
        unsafe { doupdate() }
    }

    fn touchwin(&self, win: RawWindow) -> i32 {
        unsafe { touchwin(window(win)) }
    }

    fn has_colors(&self) -> i32 {
        i32::from(unsafe { has_colors() })
    }

    fn start_color(&self) -> i32 {
        unsafe { start_color() }
    }

    fn acs_value(&self, key: u8) -> u32 {
        // The map is rewritten by initscr, so read it through a raw pointer
        // every time instead of caching.
        unsafe {
            std::ptr::addr_of!(acs_map)
                .cast::<Chtype>()
                .add(usize::from(key & 0x7f))
                .read_volatile()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_one_backend_at_a_time() {
        let first = NcursesBackend::acquire().unwrap();
        assert_eq!(NcursesBackend::acquire().unwrap_err(), CursesError::Busy);
        drop(first);
        assert!(NcursesBackend::acquire().is_ok());
    }
}
