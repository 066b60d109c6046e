//! The guarded call layer.
//!
//! Each method forwards to exactly one backend call and checks the library's
//! failure sentinel: `ERR` for status calls, null for window constructors.
//! Failures come back as [`CursesError`] values naming the operation and its
//! arguments; [`crate::OrAbort`] turns them into the restore-and-exit policy.

use tracing::{debug, trace};

use crate::Result;
use crate::backend::{Border, CursesBackend, ERR, RawWindow, TRUE};
use crate::constants::AcsGlyph;
use crate::error::{Arg, Call, CursesError, Operation};
use crate::handle::{Drawable, Screen, Window};

/// Longest line [`Curses::read_line`] will allocate for.
pub const READ_LINE_LIMIT: usize = 64 * 1024;

/// Guarded entry points over a [`CursesBackend`].
#[derive(Debug, Default)]
pub struct Curses<B> {
    backend: B,
}

fn int_arg(n: usize) -> Arg {
    Arg::Int(i32::try_from(n).unwrap_or(i32::MAX))
}

impl<B: CursesBackend> Curses<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    fn check(
        &self,
        status: i32,
        op: Operation,
        args: impl FnOnce() -> Vec<Arg>,
    ) -> Result<i32> {
        if status == ERR {
            let call = Call::new(op, args());
            debug!(%call, "curses call returned ERR");
            return Err(CursesError::Failed { call });
        }
        trace!(op = op.name(), status, "curses call ok");
        Ok(status)
    }

    fn check_handle(
        &self,
        handle: Option<RawWindow>,
        op: Operation,
        args: impl FnOnce() -> Vec<Arg>,
    ) -> Result<RawWindow> {
        match handle {
            Some(raw) => {
                trace!(op = op.name(), handle = %raw, "curses call ok");
                Ok(raw)
            }
            None => {
                let call = Call::new(op, args());
                debug!(%call, "curses call returned a null window");
                Err(CursesError::NullHandle { call })
            }
        }
    }

    /// Value of a line-drawing glyph in the alternate character set.
    pub fn acs(&self, glyph: AcsGlyph) -> i32 {
        self.backend.acs_value(glyph.key()) as i32
    }

    /// Applies the environment's locale. Never fails.
    pub fn setlocale(&self) {
        if !self.backend.setlocale() {
            debug!("setlocale rejected the environment locale; continuing");
        }
    }

    pub fn initscr(&self) -> Result<Screen> {
        let raw = self.check_handle(self.backend.initscr(), Operation::Initscr, Vec::new)?;
        Ok(Screen::from_raw(raw))
    }

    /// Ends the session and restores the terminal.
    pub fn endwin(&self, screen: Screen) -> Result<()> {
        let raw = screen.into_raw();
        self.check(self.backend.endwin(), Operation::Endwin, Vec::new)?;
        trace!(screen = %raw, "screen ended");
        Ok(())
    }

    pub fn echo(&self) -> Result<()> {
        self.check(self.backend.echo(), Operation::Echo, Vec::new)?;
        Ok(())
    }

    pub fn noecho(&self) -> Result<()> {
        self.check(self.backend.noecho(), Operation::Noecho, Vec::new)?;
        Ok(())
    }

    /// Switches input to character-at-a-time mode.
    pub fn cbreak(&self) -> Result<()> {
        self.check(self.backend.cbreak(), Operation::Cbreak, Vec::new)?;
        Ok(())
    }

    pub fn newwin(&self, height: i32, width: i32, y: i32, x: i32) -> Result<Window> {
        let raw = self.check_handle(
            self.backend.newwin(height, width, y, x),
            Operation::Newwin,
            || vec![height.into(), width.into(), y.into(), x.into()],
        )?;
        Ok(Window::from_raw(raw))
    }

    /// Derives a window sharing `parent`'s memory, positioned relative to it.
    pub fn derwin(
        &self,
        parent: &impl Drawable,
        height: i32,
        width: i32,
        y: i32,
        x: i32,
    ) -> Result<Window> {
        let parent = parent.raw();
        let raw = self.check_handle(
            self.backend.derwin(parent, height, width, y, x),
            Operation::Derwin,
            || vec![parent.into(), height.into(), width.into(), y.into(), x.into()],
        )?;
        Ok(Window::from_raw(raw))
    }

    pub fn delwin(&self, win: Window) -> Result<()> {
        let raw = win.into_raw();
        self.check(self.backend.delwin(raw), Operation::Delwin, || vec![raw.into()])?;
        Ok(())
    }

    pub fn wmove(&self, win: &impl Drawable, y: i32, x: i32) -> Result<()> {
        let raw = win.raw();
        self.check(self.backend.wmove(raw, y, x), Operation::Wmove, || {
            vec![raw.into(), y.into(), x.into()]
        })?;
        Ok(())
    }

    pub fn wclear(&self, win: &impl Drawable) -> Result<()> {
        let raw = win.raw();
        self.check(self.backend.wclear(raw), Operation::Wclear, || vec![raw.into()])?;
        Ok(())
    }

    /// Writes at most `max_len` bytes of `text`; a negative `max_len` writes all of it.
    pub fn waddnstr(&self, win: &impl Drawable, text: &[u8], max_len: i32) -> Result<()> {
        let end = usize::try_from(max_len).map_or(text.len(), |n| n.min(text.len()));
        let raw = win.raw();
        self.check(
            self.backend.waddnstr(raw, &text[..end]),
            Operation::Waddnstr,
            || vec![raw.into(), max_len.into()],
        )?;
        Ok(())
    }

    pub fn waddstr(&self, win: &impl Drawable, text: &str) -> Result<()> {
        self.waddnstr(win, text.as_bytes(), -1)
    }

    /// Blocks for one key and returns its code.
    pub fn wgetch(&self, win: &impl Drawable) -> Result<i32> {
        let raw = win.raw();
        self.check(self.backend.wgetch(raw), Operation::Wgetch, || vec![raw.into()])
    }

    /// Reads a line into `buf`, storing at most `max_len` bytes plus a NUL.
    ///
    /// `max_len` is clamped so the terminator always fits in `buf`. Returns
    /// the number of bytes before the terminator; an empty `buf` reads
    /// nothing and returns 0.
    pub fn wgetnstr(&self, win: &impl Drawable, buf: &mut [u8], max_len: usize) -> Result<usize> {
        let Some(capacity) = buf.len().checked_sub(1) else {
            return Ok(0);
        };
        let limit = max_len.min(capacity);
        let bounded = &mut buf[..=limit];
        let raw = win.raw();
        self.check(
            self.backend.wgetnstr(raw, bounded),
            Operation::Wgetnstr,
            || vec![raw.into(), int_arg(limit)],
        )?;
        Ok(bounded.iter().position(|&b| b == 0).unwrap_or(limit))
    }

    /// Reads a line of at most `max_len` bytes, capped at [`READ_LINE_LIMIT`].
    pub fn read_line(&self, win: &impl Drawable, max_len: usize) -> Result<String> {
        let max_len = max_len.min(READ_LINE_LIMIT);
        let mut buf = vec![0u8; max_len.saturating_add(1)];
        let len = self.wgetnstr(win, &mut buf, max_len)?;
        buf.truncate(len);
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Draws a border with `vertical` sides, `horizontal` edges and default corners.
    pub fn draw_box(&self, win: &impl Drawable, vertical: i32, horizontal: i32) -> Result<()> {
        let raw = win.raw();
        self.check(
            self.backend.box_border(raw, vertical, horizontal),
            Operation::Box,
            || vec![raw.into(), vertical.into(), horizontal.into()],
        )?;
        Ok(())
    }

    pub fn wborder(&self, win: &impl Drawable, border: &Border) -> Result<()> {
        let raw = win.raw();
        self.check(self.backend.wborder(raw, border), Operation::Wborder, || {
            vec![
                raw.into(),
                border.left.into(),
                border.right.into(),
                border.top.into(),
                border.bottom.into(),
                border.top_left.into(),
                border.top_right.into(),
                border.bottom_left.into(),
                border.bottom_right.into(),
            ]
        })?;
        Ok(())
    }

    pub fn wrefresh(&self, win: &impl Drawable) -> Result<()> {
        let raw = win.raw();
        self.check(self.backend.wrefresh(raw), Operation::Wrefresh, || vec![raw.into()])?;
        Ok(())
    }

    /// Stages `win` for the next [`Curses::doupdate`] without touching the terminal.
    pub fn wnoutrefresh(&self, win: &impl Drawable) -> Result<()> {
        let raw = win.raw();
        self.check(self.backend.wnoutrefresh(raw), Operation::Wnoutrefresh, || {
            vec![raw.into()]
        })?;
        Ok(())
    }

    pub fn doupdate(&self) -> Result<()> {
        self.check(self.backend.doupdate(), Operation::Doupdate, Vec::new)?;
        Ok(())
    }

    pub fn touchwin(&self, win: &impl Drawable) -> Result<()> {
        let raw = win.raw();
        self.check(self.backend.touchwin(raw), Operation::Touchwin, || vec![raw.into()])?;
        Ok(())
    }

    /// True only when the library answers with its `TRUE` sentinel.
    pub fn has_colors(&self) -> bool {
        self.backend.has_colors() == TRUE
    }

    pub fn start_color(&self) -> Result<()> {
        self.check(self.backend.start_color(), Operation::StartColor, Vec::new)?;
        Ok(())
    }
}
