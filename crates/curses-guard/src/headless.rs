//! In-memory stand-in for the curses library.
//!
//! Follows the library's result conventions closely enough to drive the
//! guarded layer without a terminal: windows must fit on the screen, cursor
//! moves must stay inside the window, reads fail once input runs out, and
//! nothing works outside an initscr/endwin session. Every call is recorded and
//! any operation can be forced to fail.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;

use curses_guard_common::mutex_lock_or_recover;

use crate::backend::{Border, CursesBackend, ERR, OK, RawWindow, TRUE};
use crate::constants::Attribute;
use crate::error::Operation;

const STDSCR_ADDR: usize = 0x1000;
const WINDOW_STRIDE: usize = 0x100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadlessConfig {
    pub rows: i32,
    pub cols: i32,
    pub colors: bool,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            rows: 24,
            cols: 80,
            colors: true,
        }
    }
}

/// Observable state of one headless window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowSnapshot {
    pub height: i32,
    pub width: i32,
    pub begin_y: i32,
    pub begin_x: i32,
    pub cursor: (i32, i32),
    pub parent: Option<RawWindow>,
    pub border: Option<Border>,
    pub text: String,
    pub touched: bool,
    pub staged: bool,
    pub refreshes: usize,
}

#[derive(Debug)]
struct WindowState {
    snapshot: WindowSnapshot,
    children: usize,
}

impl WindowState {
    fn new(height: i32, width: i32, begin_y: i32, begin_x: i32, parent: Option<RawWindow>) -> Self {
        Self {
            snapshot: WindowSnapshot {
                height,
                width,
                begin_y,
                begin_x,
                cursor: (0, 0),
                parent,
                border: None,
                text: String::new(),
                touched: true,
                staged: false,
                refreshes: 0,
            },
            children: 0,
        }
    }
}

#[derive(Debug)]
struct HeadlessState {
    config: HeadlessConfig,
    active: bool,
    stdscr: Option<RawWindow>,
    next_addr: usize,
    windows: HashMap<RawWindow, WindowState>,
    echo: bool,
    cbreak: bool,
    locale: bool,
    colors_started: bool,
    color_response: i32,
    updates: usize,
    input: VecDeque<u8>,
    faults: HashSet<Operation>,
    calls: Vec<Operation>,
}

impl HeadlessState {
    fn new(config: HeadlessConfig) -> Self {
        Self {
            config,
            active: false,
            stdscr: None,
            next_addr: STDSCR_ADDR + WINDOW_STRIDE,
            windows: HashMap::new(),
            echo: true,
            cbreak: false,
            locale: false,
            colors_started: false,
            color_response: if config.colors { TRUE } else { 0 },
            updates: 0,
            input: VecDeque::new(),
            faults: HashSet::new(),
            calls: Vec::new(),
        }
    }

    /// Logs the call and reports whether it should go ahead.
    fn enter(&mut self, op: Operation) -> bool {
        self.calls.push(op);
        !self.faults.contains(&op)
    }

    fn window_mut(&mut self, win: RawWindow) -> Option<&mut WindowSnapshot> {
        if !self.active {
            return None;
        }
        self.windows.get_mut(&win).map(|w| &mut w.snapshot)
    }

    fn allocate(&mut self, state: WindowState) -> RawWindow {
        let raw = RawWindow::from_addr(self.next_addr);
        self.next_addr += WINDOW_STRIDE;
        self.windows.insert(raw, state);
        raw
    }

    fn with_window(&mut self, op: Operation, win: RawWindow, f: impl FnOnce(&mut WindowSnapshot) -> i32) -> i32 {
        if !self.enter(op) {
            return ERR;
        }
        match self.window_mut(win) {
            Some(window) => f(window),
            None => ERR,
        }
    }

    fn session_call(&mut self, op: Operation) -> bool {
        self.enter(op) && self.active
    }
}

/// Resolves a zero extent to "the rest of the area" and checks the result fits.
fn fit(extent: i32, origin: i32, available: i32) -> Option<i32> {
    if origin < 0 {
        return None;
    }
    let extent = if extent == 0 {
        available.checked_sub(origin)?
    } else {
        extent
    };
    let end = origin.checked_add(extent)?;
    (extent > 0 && end <= available).then_some(extent)
}

/// Fake curses library for tests and terminal-less runs.
#[derive(Debug)]
pub struct HeadlessBackend {
    state: Mutex<HeadlessState>,
}

impl Default for HeadlessBackend {
    fn default() -> Self {
        Self::new(HeadlessConfig::default())
    }
}

impl HeadlessBackend {
    pub fn new(config: HeadlessConfig) -> Self {
        Self {
            state: Mutex::new(HeadlessState::new(config)),
        }
    }

    /// Makes every later call of `op` fail with the library's sentinel.
    pub fn fail(&self, op: Operation) {
        mutex_lock_or_recover(&self.state).faults.insert(op);
    }

    /// Queues bytes for `wgetch` and `wgetnstr`.
    pub fn push_input(&self, bytes: &[u8]) {
        mutex_lock_or_recover(&self.state).input.extend(bytes);
    }

    /// Overrides the raw value `has_colors` answers with.
    pub fn set_color_response(&self, raw: i32) {
        mutex_lock_or_recover(&self.state).color_response = raw;
    }

    pub fn calls(&self) -> Vec<Operation> {
        mutex_lock_or_recover(&self.state).calls.clone()
    }

    pub fn call_count(&self, op: Operation) -> usize {
        mutex_lock_or_recover(&self.state)
            .calls
            .iter()
            .filter(|&&c| c == op)
            .count()
    }

    pub fn window(&self, win: RawWindow) -> Option<WindowSnapshot> {
        mutex_lock_or_recover(&self.state)
            .windows
            .get(&win)
            .map(|w| w.snapshot.clone())
    }

    /// Windows created by newwin/derwin that are not yet deleted.
    pub fn live_windows(&self) -> usize {
        let state = mutex_lock_or_recover(&self.state);
        state
            .windows
            .keys()
            .filter(|&&raw| Some(raw) != state.stdscr)
            .count()
    }

    pub fn is_active(&self) -> bool {
        mutex_lock_or_recover(&self.state).active
    }

    pub fn echo_enabled(&self) -> bool {
        mutex_lock_or_recover(&self.state).echo
    }

    pub fn cbreak_enabled(&self) -> bool {
        mutex_lock_or_recover(&self.state).cbreak
    }

    pub fn locale_applied(&self) -> bool {
        mutex_lock_or_recover(&self.state).locale
    }

    pub fn colors_started(&self) -> bool {
        mutex_lock_or_recover(&self.state).colors_started
    }

    /// Number of successful doupdate calls.
    pub fn updates(&self) -> usize {
        mutex_lock_or_recover(&self.state).updates
    }
}

impl CursesBackend for HeadlessBackend {
    fn setlocale(&self) -> bool {
        let mut state = mutex_lock_or_recover(&self.state);
        state.locale = state.enter(Operation::Setlocale);
        state.locale
    }

    fn initscr(&self) -> Option<RawWindow> {
        let mut state = mutex_lock_or_recover(&self.state);
        if !state.enter(Operation::Initscr) {
            return None;
        }
        state.active = true;
        if let Some(stdscr) = state.stdscr {
            return Some(stdscr);
        }
        let stdscr = RawWindow::from_addr(STDSCR_ADDR);
        let (rows, cols) = (state.config.rows, state.config.cols);
        state.windows.insert(stdscr, WindowState::new(rows, cols, 0, 0, None));
        state.stdscr = Some(stdscr);
        Some(stdscr)
    }

    fn endwin(&self) -> i32 {
        let mut state = mutex_lock_or_recover(&self.state);
        if !state.session_call(Operation::Endwin) {
            return ERR;
        }
        state.active = false;
        OK
    }

    fn echo(&self) -> i32 {
        let mut state = mutex_lock_or_recover(&self.state);
        if !state.session_call(Operation::Echo) {
            return ERR;
        }
        state.echo = true;
        OK
    }

    fn noecho(&self) -> i32 {
        let mut state = mutex_lock_or_recover(&self.state);
        if !state.session_call(Operation::Noecho) {
            return ERR;
        }
        state.echo = false;
        OK
    }

    fn cbreak(&self) -> i32 {
        let mut state = mutex_lock_or_recover(&self.state);
        if !state.session_call(Operation::Cbreak) {
            return ERR;
        }
        state.cbreak = true;
        OK
    }

    fn newwin(&self, height: i32, width: i32, y: i32, x: i32) -> Option<RawWindow> {
        let mut state = mutex_lock_or_recover(&self.state);
        if !state.session_call(Operation::Newwin) {
            return None;
        }
        let height = fit(height, y, state.config.rows)?;
        let width = fit(width, x, state.config.cols)?;
        Some(state.allocate(WindowState::new(height, width, y, x, None)))
    }

    fn derwin(
        &self,
        parent: RawWindow,
        height: i32,
        width: i32,
        y: i32,
        x: i32,
    ) -> Option<RawWindow> {
        let mut state = mutex_lock_or_recover(&self.state);
        if !state.session_call(Operation::Derwin) {
            return None;
        }
        let outer = state.windows.get(&parent)?.snapshot.clone();
        let height = fit(height, y, outer.height)?;
        let width = fit(width, x, outer.width)?;
        let begin_y = outer.begin_y.checked_add(y)?;
        let begin_x = outer.begin_x.checked_add(x)?;
        let child = WindowState::new(height, width, begin_y, begin_x, Some(parent));
        if let Some(outer) = state.windows.get_mut(&parent) {
            outer.children += 1;
        }
        Some(state.allocate(child))
    }

    fn delwin(&self, win: RawWindow) -> i32 {
        let mut state = mutex_lock_or_recover(&self.state);
        if !state.enter(Operation::Delwin) || Some(win) == state.stdscr {
            return ERR;
        }
        match state.windows.get(&win) {
            Some(window) if window.children == 0 => {}
            _ => return ERR,
        }
        if let Some(removed) = state.windows.remove(&win) {
            if let Some(parent) = removed.snapshot.parent.and_then(|p| state.windows.get_mut(&p)) {
                parent.children -= 1;
            }
        }
        OK
    }

    fn wmove(&self, win: RawWindow, y: i32, x: i32) -> i32 {
        mutex_lock_or_recover(&self.state).with_window(Operation::Wmove, win, |w| {
            if y < 0 || x < 0 || y >= w.height || x >= w.width {
                return ERR;
            }
            w.cursor = (y, x);
            OK
        })
    }

    fn wclear(&self, win: RawWindow) -> i32 {
        mutex_lock_or_recover(&self.state).with_window(Operation::Wclear, win, |w| {
            w.cursor = (0, 0);
            w.border = None;
            w.text.clear();
            w.touched = true;
            OK
        })
    }

    fn waddnstr(&self, win: RawWindow, text: &[u8]) -> i32 {
        let text = text.split(|&b| b == 0).next().unwrap_or_default();
        mutex_lock_or_recover(&self.state).with_window(Operation::Waddnstr, win, |w| {
            let (y, x) = w.cursor;
            let advanced = x + i32::try_from(text.len()).unwrap_or(i32::MAX);
            let row = y + advanced / w.width;
            // No scrolling region: writing past the last cell fails.
            if row >= w.height {
                return ERR;
            }
            w.cursor = (row, advanced % w.width);
            w.text.push_str(&String::from_utf8_lossy(text));
            w.touched = true;
            OK
        })
    }

    fn wgetch(&self, win: RawWindow) -> i32 {
        let mut state = mutex_lock_or_recover(&self.state);
        if !state.enter(Operation::Wgetch) || state.window_mut(win).is_none() {
            return ERR;
        }
        state.input.pop_front().map_or(ERR, i32::from)
    }

    fn wgetnstr(&self, win: RawWindow, buf: &mut [u8]) -> i32 {
        let mut state = mutex_lock_or_recover(&self.state);
        if !state.enter(Operation::Wgetnstr) || state.window_mut(win).is_none() {
            return ERR;
        }
        if state.input.is_empty() || buf.is_empty() {
            return ERR;
        }
        let limit = buf.len() - 1;
        let mut stored = 0;
        // Bytes past the limit are consumed and dropped, up to the newline.
        while let Some(byte) = state.input.pop_front() {
            if byte == b'\n' || byte == b'\r' {
                break;
            }
            if stored < limit {
                buf[stored] = byte;
                stored += 1;
            }
        }
        buf[stored] = 0;
        OK
    }

    fn box_border(&self, win: RawWindow, vertical: i32, horizontal: i32) -> i32 {
        mutex_lock_or_recover(&self.state).with_window(Operation::Box, win, |w| {
            w.border = Some(Border::boxed(vertical, horizontal));
            w.touched = true;
            OK
        })
    }

    fn wborder(&self, win: RawWindow, border: &Border) -> i32 {
        mutex_lock_or_recover(&self.state).with_window(Operation::Wborder, win, |w| {
            w.border = Some(*border);
            w.touched = true;
            OK
        })
    }

    fn wrefresh(&self, win: RawWindow) -> i32 {
        mutex_lock_or_recover(&self.state).with_window(Operation::Wrefresh, win, |w| {
            w.refreshes += 1;
            w.touched = false;
            w.staged = false;
            OK
        })
    }

    fn wnoutrefresh(&self, win: RawWindow) -> i32 {
        mutex_lock_or_recover(&self.state).with_window(Operation::Wnoutrefresh, win, |w| {
            w.staged = true;
            w.touched = false;
            OK
        })
    }

    fn doupdate(&self) -> i32 {
        let mut state = mutex_lock_or_recover(&self.state);
        if !state.session_call(Operation::Doupdate) {
            return ERR;
        }
        for window in state.windows.values_mut().filter(|w| w.snapshot.staged) {
            window.snapshot.staged = false;
            window.snapshot.refreshes += 1;
        }
        state.updates += 1;
        OK
    }

    fn touchwin(&self, win: RawWindow) -> i32 {
        mutex_lock_or_recover(&self.state).with_window(Operation::Touchwin, win, |w| {
            w.touched = true;
            OK
        })
    }

    fn has_colors(&self) -> i32 {
        let mut state = mutex_lock_or_recover(&self.state);
        state.calls.push(Operation::HasColors);
        state.color_response
    }

    fn start_color(&self) -> i32 {
        let mut state = mutex_lock_or_recover(&self.state);
        if !state.session_call(Operation::StartColor) || !state.config.colors {
            return ERR;
        }
        state.colors_started = true;
        OK
    }

    fn acs_value(&self, key: u8) -> u32 {
        let mut state = mutex_lock_or_recover(&self.state);
        state.calls.push(Operation::AcsMap);
        u32::from(key) | Attribute::AltCharset.bits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calls_fail_outside_session() {
        let backend = HeadlessBackend::default();
        assert_eq!(backend.endwin(), ERR);
        assert_eq!(backend.cbreak(), ERR);
        assert!(backend.newwin(1, 1, 0, 0).is_none());

        let stdscr = backend.initscr().unwrap();
        assert_eq!(backend.cbreak(), OK);
        assert_eq!(backend.endwin(), OK);

        assert_eq!(backend.wrefresh(stdscr), ERR);
        assert_eq!(backend.endwin(), ERR);
    }

    #[test]
    fn test_initscr_twice_returns_same_screen() {
        let backend = HeadlessBackend::default();
        let first = backend.initscr().unwrap();
        let second = backend.initscr().unwrap();
        assert_eq!(first, second);
        assert_eq!(first.addr(), STDSCR_ADDR);
    }

    #[test]
    fn test_zero_extent_fills_remaining_area() {
        let backend = HeadlessBackend::new(HeadlessConfig {
            rows: 10,
            cols: 20,
            colors: true,
        });
        backend.initscr().unwrap();

        let win = backend.newwin(0, 0, 4, 5).unwrap();
        let snapshot = backend.window(win).unwrap();
        assert_eq!((snapshot.height, snapshot.width), (6, 15));
    }

    #[test]
    fn test_window_must_fit_screen() {
        let backend = HeadlessBackend::default();
        backend.initscr().unwrap();

        assert!(backend.newwin(24, 80, 0, 0).is_some());
        assert!(backend.newwin(25, 80, 0, 0).is_none());
        assert!(backend.newwin(1, 1, -1, 0).is_none());
        assert!(backend.newwin(-3, 1, 0, 0).is_none());
        assert!(backend.newwin(1, 1, 0, 80).is_none());
    }

    #[test]
    fn test_stdscr_cannot_be_deleted() {
        let backend = HeadlessBackend::default();
        let stdscr = backend.initscr().unwrap();
        assert_eq!(backend.delwin(stdscr), ERR);
        assert_eq!(backend.delwin(RawWindow::from_addr(0xdead)), ERR);
    }

    #[test]
    fn test_faults_apply_to_every_later_call() {
        let backend = HeadlessBackend::default();
        backend.initscr().unwrap();
        backend.fail(Operation::Doupdate);

        assert_eq!(backend.doupdate(), ERR);
        assert_eq!(backend.doupdate(), ERR);
        assert_eq!(backend.call_count(Operation::Doupdate), 2);
    }

    #[test]
    fn test_input_modes_are_tracked() {
        let backend = HeadlessBackend::default();
        backend.initscr().unwrap();
        assert!(backend.echo_enabled());

        backend.noecho();
        backend.cbreak();
        assert!(!backend.echo_enabled());
        assert!(backend.cbreak_enabled());

        backend.echo();
        assert!(backend.echo_enabled());
    }

    #[test]
    fn test_waddnstr_stops_at_nul_and_last_cell() {
        let backend = HeadlessBackend::new(HeadlessConfig {
            rows: 2,
            cols: 4,
            colors: true,
        });
        let stdscr = backend.initscr().unwrap();

        assert_eq!(backend.waddnstr(stdscr, b"ab\0cd"), OK);
        assert_eq!(backend.window(stdscr).unwrap().text, "ab");

        assert_eq!(backend.waddnstr(stdscr, b"cdefgh"), ERR);
    }

    #[test]
    fn test_wgetnstr_without_input_fails() {
        let backend = HeadlessBackend::default();
        let stdscr = backend.initscr().unwrap();
        let mut buf = [0u8; 8];
        assert_eq!(backend.wgetnstr(stdscr, &mut buf), ERR);
    }

    #[test]
    fn test_acs_values_carry_altcharset() {
        let backend = HeadlessBackend::default();
        let value = backend.acs_value(b'q');
        assert_eq!(value & 0xff, u32::from(b'q'));
        assert_ne!(value & Attribute::AltCharset.bits(), 0);
    }

    #[test]
    fn test_calls_are_recorded_in_order() {
        let backend = HeadlessBackend::default();
        let stdscr = backend.initscr().unwrap();
        backend.wrefresh(stdscr);
        backend.endwin();

        assert_eq!(
            backend.calls(),
            vec![Operation::Initscr, Operation::Wrefresh, Operation::Endwin]
        );
    }

    #[test]
    fn test_extreme_origins_are_rejected() {
        let backend = HeadlessBackend::default();
        let stdscr = backend.initscr().unwrap();

        assert!(backend.newwin(1, 1, i32::MAX, 0).is_none());
        assert!(backend.newwin(1, 1, 0, i32::MAX).is_none());
        assert!(backend.newwin(0, 1, i32::MIN, 0).is_none());
        assert!(backend.newwin(i32::MAX, 1, 1, 0).is_none());
        assert!(backend.derwin(stdscr, 1, 1, i32::MAX, 0).is_none());
        assert!(backend.derwin(stdscr, 0, 0, 0, i32::MIN).is_none());
        assert_eq!(backend.live_windows(), 0);
    }
}
