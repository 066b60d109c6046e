//! C entry points for callers whose foreign-function interface can only
//! import plain functions.
//!
//! Every symbol takes and returns `int`s, byte pointers with explicit
//! lengths, or opaque window pointers. Constant accessors are pure. Every other
//! call restores the terminal, prints the failed call to stderr and exits on
//! failure, so callers must treat it as possibly non-returning.
#![allow(unsafe_code)]

use std::ffi::{c_char, c_int, c_void};
use std::sync::OnceLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::abort::OrAbort;
use crate::backend::{Border, RawWindow};
use crate::constants::{AcsGlyph, Attribute, Color};
use crate::error::{Arg, Call, CursesError, Operation};
use crate::handle::{Screen, Window};
use crate::ncurses::NcursesBackend;
use crate::Curses;

static STDSCR: AtomicUsize = AtomicUsize::new(0);

fn curses() -> &'static Curses<NcursesBackend> {
    static CURSES: OnceLock<Curses<NcursesBackend>> = OnceLock::new();
    CURSES.get_or_init(|| match NcursesBackend::acquire() {
        Ok(backend) => Curses::new(backend),
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(err.exit_code())
        }
    })
}

fn foreign(win: *mut c_void) -> Window {
    Window::from_raw(RawWindow::from_addr(win as usize))
}

fn exported(win: Window) -> *mut c_void {
    win.into_raw().addr() as *mut c_void
}

macro_rules! constant_accessors {
    ($($symbol:ident => $value:expr;)*) => {
        $(
            #[no_mangle]
            pub extern "C" fn $symbol() -> c_int {
                $value
            }
        )*
    };
}

constant_accessors! {
    cg_color_black => Color::Black.value();
    cg_color_red => Color::Red.value();
    cg_color_green => Color::Green.value();
    cg_color_yellow => Color::Yellow.value();
    cg_color_blue => Color::Blue.value();
    cg_color_magenta => Color::Magenta.value();
    cg_color_cyan => Color::Cyan.value();
    cg_color_white => Color::White.value();

    cg_a_attributes => Attribute::Attributes.value();
    cg_a_normal => Attribute::Normal.value();
    cg_a_standout => Attribute::Standout.value();
    cg_a_underline => Attribute::Underline.value();
    cg_a_reverse => Attribute::Reverse.value();
    cg_a_blink => Attribute::Blink.value();
    cg_a_dim => Attribute::Dim.value();
    cg_a_bold => Attribute::Bold.value();
    cg_a_altcharset => Attribute::AltCharset.value();
    cg_a_invis => Attribute::Invis.value();
    cg_a_protect => Attribute::Protect.value();
    cg_a_horizontal => Attribute::Horizontal.value();
    cg_a_left => Attribute::Left.value();
    cg_a_low => Attribute::Low.value();
    cg_a_right => Attribute::Right.value();
    cg_a_top => Attribute::Top.value();
    cg_a_vertical => Attribute::Vertical.value();

    cg_acs_ulcorner => curses().acs(AcsGlyph::UlCorner);
    cg_acs_urcorner => curses().acs(AcsGlyph::UrCorner);
    cg_acs_llcorner => curses().acs(AcsGlyph::LlCorner);
    cg_acs_lrcorner => curses().acs(AcsGlyph::LrCorner);
    cg_acs_ltee => curses().acs(AcsGlyph::LTee);
    cg_acs_rtee => curses().acs(AcsGlyph::RTee);
    cg_acs_btee => curses().acs(AcsGlyph::BTee);
    cg_acs_ttee => curses().acs(AcsGlyph::TTee);
    cg_acs_hline => curses().acs(AcsGlyph::HLine);
    cg_acs_vline => curses().acs(AcsGlyph::VLine);
    cg_acs_plus => curses().acs(AcsGlyph::Plus);
    cg_acs_s1 => curses().acs(AcsGlyph::S1);
    cg_acs_s9 => curses().acs(AcsGlyph::S9);
    cg_acs_diamond => curses().acs(AcsGlyph::Diamond);
    cg_acs_ckboard => curses().acs(AcsGlyph::CkBoard);
    cg_acs_degree => curses().acs(AcsGlyph::Degree);
    cg_acs_plminus => curses().acs(AcsGlyph::PlMinus);
    cg_acs_bullet => curses().acs(AcsGlyph::Bullet);
    cg_acs_larrow => curses().acs(AcsGlyph::LArrow);
    cg_acs_rarrow => curses().acs(AcsGlyph::RArrow);
    cg_acs_darrow => curses().acs(AcsGlyph::DArrow);
    cg_acs_uarrow => curses().acs(AcsGlyph::UArrow);
    cg_acs_board => curses().acs(AcsGlyph::Board);
    cg_acs_lantern => curses().acs(AcsGlyph::Lantern);
    cg_acs_block => curses().acs(AcsGlyph::Block);
    cg_acs_s3 => curses().acs(AcsGlyph::S3);
    cg_acs_s7 => curses().acs(AcsGlyph::S7);
    cg_acs_lequal => curses().acs(AcsGlyph::LEqual);
    cg_acs_gequal => curses().acs(AcsGlyph::GEqual);
    cg_acs_pi => curses().acs(AcsGlyph::Pi);
    cg_acs_nequal => curses().acs(AcsGlyph::NEqual);
    cg_acs_sterling => curses().acs(AcsGlyph::Sterling);
    cg_acs_bssb => curses().acs(AcsGlyph::Bssb);
    cg_acs_ssbb => curses().acs(AcsGlyph::Ssbb);
    cg_acs_bbss => curses().acs(AcsGlyph::Bbss);
    cg_acs_sbbs => curses().acs(AcsGlyph::Sbbs);
    cg_acs_sbss => curses().acs(AcsGlyph::Sbss);
    cg_acs_sssb => curses().acs(AcsGlyph::Sssb);
    cg_acs_ssbs => curses().acs(AcsGlyph::Ssbs);
    cg_acs_bsss => curses().acs(AcsGlyph::Bsss);
    cg_acs_bsbs => curses().acs(AcsGlyph::Bsbs);
    cg_acs_sbsb => curses().acs(AcsGlyph::Sbsb);
    cg_acs_ssss => curses().acs(AcsGlyph::Ssss);
}

/// Locale failures are ignored.
#[no_mangle]
pub extern "C" fn cg_setlocale() {
    curses().setlocale();
}

#[no_mangle]
pub extern "C" fn cg_initscr() -> *mut c_void {
    let curses = curses();
    let raw = curses.initscr().or_abort(curses).into_raw();
    STDSCR.store(raw.addr(), Ordering::Release);
    raw.addr() as *mut c_void
}

#[no_mangle]
pub extern "C" fn cg_endwin() {
    let curses = curses();
    let screen = Screen::from_raw(RawWindow::from_addr(STDSCR.swap(0, Ordering::AcqRel)));
    curses.endwin(screen).or_abort(curses);
}

#[no_mangle]
pub extern "C" fn cg_echo() {
    let curses = curses();
    curses.echo().or_abort(curses);
}

#[no_mangle]
pub extern "C" fn cg_noecho() {
    let curses = curses();
    curses.noecho().or_abort(curses);
}

#[no_mangle]
pub extern "C" fn cg_cbreak() {
    let curses = curses();
    curses.cbreak().or_abort(curses);
}

#[no_mangle]
pub extern "C" fn cg_newwin(height: c_int, width: c_int, y: c_int, x: c_int) -> *mut c_void {
    let curses = curses();
    exported(curses.newwin(height, width, y, x).or_abort(curses))
}

#[no_mangle]
pub extern "C" fn cg_derwin(
    parent: *mut c_void,
    height: c_int,
    width: c_int,
    y: c_int,
    x: c_int,
) -> *mut c_void {
    let curses = curses();
    exported(
        curses
            .derwin(&foreign(parent), height, width, y, x)
            .or_abort(curses),
    )
}

#[no_mangle]
pub extern "C" fn cg_delwin(win: *mut c_void) {
    let curses = curses();
    curses.delwin(foreign(win)).or_abort(curses);
}

#[no_mangle]
pub extern "C" fn cg_wmove(win: *mut c_void, y: c_int, x: c_int) {
    let curses = curses();
    curses.wmove(&foreign(win), y, x).or_abort(curses);
}

#[no_mangle]
pub extern "C" fn cg_wclear(win: *mut c_void) {
    let curses = curses();
    curses.wclear(&foreign(win)).or_abort(curses);
}

/// Writes at most `n` bytes of `s`, or all of it up to the NUL when `n` is negative.
///
/// # Safety
///
/// `s` must point to at least `n` readable bytes, or to a NUL-terminated
/// string when `n` is negative.
#[no_mangle]
pub unsafe extern "C" fn cg_waddnstr(win: *mut c_void, s: *const c_char, n: c_int) {
    let curses = curses();
    let win = foreign(win);
    if s.is_null() {
        let err = CursesError::Failed {
            call: Call::new(Operation::Waddnstr, vec![win.into_raw().into(), Arg::Int(n)]),
        };
        crate::abort::abort(curses.backend(), &err);
    }
    let text = match usize::try_from(n) {
        Ok(len) => std::slice::from_raw_parts(s.cast::<u8>(), len),
        Err(_) => std::ffi::CStr::from_ptr(s).to_bytes(),
    };
    curses.waddnstr(&win, text, n).or_abort(curses);
}

#[no_mangle]
pub extern "C" fn cg_wgetch(win: *mut c_void) -> c_int {
    let curses = curses();
    curses.wgetch(&foreign(win)).or_abort(curses)
}

/// Reads at most `n` bytes plus a NUL into `buf`.
///
/// # Safety
///
/// `buf` must point to at least `n + 1` writable bytes.
#[no_mangle]
pub unsafe extern "C" fn cg_wgetnstr(win: *mut c_void, buf: *mut c_char, n: c_int) {
    let curses = curses();
    let win = foreign(win);
    let Some(len) = usize::try_from(n).ok().filter(|_| !buf.is_null()) else {
        let err = CursesError::Failed {
            call: Call::new(Operation::Wgetnstr, vec![win.into_raw().into(), Arg::Int(n)]),
        };
        crate::abort::abort(curses.backend(), &err);
    };
    let buf = std::slice::from_raw_parts_mut(buf.cast::<u8>(), len + 1);
    curses.wgetnstr(&win, buf, len).or_abort(curses);
}

#[no_mangle]
pub extern "C" fn cg_box(win: *mut c_void, vertical: c_int, horizontal: c_int) {
    let curses = curses();
    curses
        .draw_box(&foreign(win), vertical, horizontal)
        .or_abort(curses);
}

#[no_mangle]
#[allow(clippy::too_many_arguments)]
pub extern "C" fn cg_wborder(
    win: *mut c_void,
    left: c_int,
    right: c_int,
    top: c_int,
    bottom: c_int,
    top_left: c_int,
    top_right: c_int,
    bottom_left: c_int,
    bottom_right: c_int,
) {
    let curses = curses();
    let border = Border {
        left,
        right,
        top,
        bottom,
        top_left,
        top_right,
        bottom_left,
        bottom_right,
    };
    curses.wborder(&foreign(win), &border).or_abort(curses);
}

#[no_mangle]
pub extern "C" fn cg_wrefresh(win: *mut c_void) {
    let curses = curses();
    curses.wrefresh(&foreign(win)).or_abort(curses);
}

#[no_mangle]
pub extern "C" fn cg_wnoutrefresh(win: *mut c_void) {
    let curses = curses();
    curses.wnoutrefresh(&foreign(win)).or_abort(curses);
}

#[no_mangle]
pub extern "C" fn cg_doupdate() {
    let curses = curses();
    curses.doupdate().or_abort(curses);
}

#[no_mangle]
pub extern "C" fn cg_touchwin(win: *mut c_void) {
    let curses = curses();
    curses.touchwin(&foreign(win)).or_abort(curses);
}

/// 1 when the terminal supports colors, 0 otherwise.
#[no_mangle]
pub extern "C" fn cg_has_colors() -> c_int {
    c_int::from(curses().has_colors())
}

#[no_mangle]
pub extern "C" fn cg_start_color() {
    let curses = curses();
    curses.start_color().or_abort(curses);
}
