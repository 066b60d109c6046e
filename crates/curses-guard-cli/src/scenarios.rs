//! The sequences of guarded calls behind each CLI command.
//!
//! Every scenario opens and ends its own screen. The first failing call is
//! returned unchanged so the caller can apply the restore-and-exit policy.

use curses_guard::{AcsGlyph, Attribute, Color, Curses, CursesBackend, Result};
use tracing::info;

use crate::presenter::ConstantEntry;

/// Where and how to draw the bordered window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowPlan<'a> {
    pub height: i32,
    pub width: i32,
    pub y: i32,
    pub x: i32,
    pub derived: bool,
    pub title: Option<&'a str>,
    pub hold: bool,
}

/// Column where a title starts on the top border.
const TITLE_COLUMN: i32 = 2;

pub fn window<B: CursesBackend>(curses: &Curses<B>, plan: &WindowPlan<'_>) -> Result<String> {
    curses.setlocale();
    let screen = curses.initscr()?;
    curses.noecho()?;
    curses.cbreak()?;

    let win = if plan.derived {
        curses.derwin(&screen, plan.height, plan.width, plan.y, plan.x)?
    } else {
        curses.newwin(plan.height, plan.width, plan.y, plan.x)?
    };
    curses.draw_box(&win, 0, 0)?;
    if let Some(title) = plan.title {
        curses.wmove(&win, 0, TITLE_COLUMN)?;
        curses.waddstr(&win, title)?;
    }

    // A derived window shares cells with the screen, so both are staged and
    // flushed in one update.
    if plan.derived {
        curses.touchwin(&screen)?;
        curses.wnoutrefresh(&screen)?;
        curses.wnoutrefresh(&win)?;
        curses.doupdate()?;
    } else {
        curses.wrefresh(&win)?;
    }

    if plan.hold {
        curses.wgetch(&win)?;
    }

    curses.delwin(win)?;
    curses.endwin(screen)?;
    info!(height = plan.height, width = plan.width, "window drawn");
    Ok(format!(
        "window {}x{} at ({}, {})",
        plan.height, plan.width, plan.y, plan.x
    ))
}

pub fn prompt<B: CursesBackend>(curses: &Curses<B>, label: &str, max_len: usize) -> Result<String> {
    curses.setlocale();
    let screen = curses.initscr()?;
    curses.cbreak()?;
    curses.echo()?;
    curses.wclear(&screen)?;
    curses.waddstr(&screen, label)?;
    curses.wrefresh(&screen)?;
    let line = curses.read_line(&screen, max_len)?;
    curses.endwin(screen)?;
    Ok(line)
}

pub fn key<B: CursesBackend>(curses: &Curses<B>) -> Result<String> {
    let screen = curses.initscr()?;
    curses.cbreak()?;
    curses.noecho()?;
    let code = curses.wgetch(&screen)?;
    curses.endwin(screen)?;
    Ok(code.to_string())
}

pub fn colors<B: CursesBackend>(curses: &Curses<B>) -> Result<String> {
    let screen = curses.initscr()?;
    let supported = curses.has_colors();
    if supported {
        curses.start_color()?;
    }
    curses.endwin(screen)?;
    Ok(format!("colors: {supported}"))
}

/// Collects every constant. Glyph values are only filled in once the screen
/// is initialized, so they are read inside a session.
pub fn constants<B: CursesBackend>(curses: &Curses<B>) -> Result<Vec<ConstantEntry>> {
    let screen = curses.initscr()?;
    let entries = Color::ALL
        .iter()
        .map(|c| ConstantEntry::new(c.name(), c.value()))
        .chain(
            Attribute::ALL
                .iter()
                .map(|a| ConstantEntry::new(a.name(), a.value())),
        )
        .chain(
            AcsGlyph::ALL
                .iter()
                .map(|&g| ConstantEntry::new(g.name(), curses.acs(g))),
        )
        .collect();
    curses.endwin(screen)?;
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use curses_guard::{CursesError, HeadlessBackend, HeadlessConfig, Operation};

    fn headless() -> Curses<HeadlessBackend> {
        Curses::new(HeadlessBackend::default())
    }

    fn plan(height: i32, width: i32, y: i32, x: i32) -> WindowPlan<'static> {
        WindowPlan {
            height,
            width,
            y,
            x,
            ..WindowPlan::default()
        }
    }

    #[test]
    fn test_window_cleans_up_after_itself() {
        let curses = headless();
        let output = window(&curses, &plan(5, 10, 2, 3)).unwrap();

        assert_eq!(output, "window 5x10 at (2, 3)");
        let backend = curses.backend();
        assert_eq!(backend.live_windows(), 0);
        assert!(!backend.is_active());
        assert!(backend.locale_applied());
        assert_eq!(backend.call_count(Operation::Wrefresh), 1);
        assert_eq!(backend.call_count(Operation::Endwin), 1);
    }

    #[test]
    fn test_window_out_of_bounds_names_the_call() {
        let curses = headless();
        let err = window(&curses, &plan(5, 10, 100, 3)).unwrap_err();

        assert!(matches!(err, CursesError::NullHandle { .. }));
        assert_eq!(err.to_string(), "newwin(5, 10, 100, 3) failed: no window returned");
        assert_eq!(curses.backend().call_count(Operation::Endwin), 0);
    }

    #[test]
    fn test_derived_window_flushes_with_one_update() {
        let curses = headless();
        let plan = WindowPlan {
            derived: true,
            title: Some("hi"),
            ..plan(4, 8, 1, 1)
        };
        window(&curses, &plan).unwrap();

        let backend = curses.backend();
        assert_eq!(backend.updates(), 1);
        assert_eq!(backend.call_count(Operation::Wrefresh), 0);
        assert_eq!(backend.call_count(Operation::Derwin), 1);
        assert_eq!(backend.call_count(Operation::Waddnstr), 1);
    }

    #[test]
    fn test_window_hold_waits_for_a_key() {
        let curses = headless();
        let plan = WindowPlan {
            hold: true,
            ..plan(3, 3, 0, 0)
        };
        let err = window(&curses, &plan).unwrap_err();
        assert_eq!(err.operation(), Some(Operation::Wgetch));

        let curses = headless();
        curses.backend().push_input(b"q");
        assert!(window(&curses, &plan).is_ok());
    }

    #[test]
    fn test_prompt_reads_bounded_line() {
        let curses = headless();
        curses.backend().push_input(b"hello world\n");
        let line = prompt(&curses, "> ", 5).unwrap();

        assert_eq!(line, "hello");
        assert!(curses.backend().echo_enabled());
        assert!(curses.backend().cbreak_enabled());
    }

    #[test]
    fn test_prompt_without_input_fails_on_read() {
        let curses = headless();
        let err = prompt(&curses, "> ", 8).unwrap_err();
        assert_eq!(err.operation(), Some(Operation::Wgetnstr));
    }

    #[test]
    fn test_key_reports_code() {
        let curses = headless();
        curses.backend().push_input(b"a");
        assert_eq!(key(&curses).unwrap(), "97");
    }

    #[test]
    fn test_colors_only_started_when_supported() {
        let curses = headless();
        assert_eq!(colors(&curses).unwrap(), "colors: true");
        assert!(curses.backend().colors_started());

        let curses = Curses::new(HeadlessBackend::new(HeadlessConfig {
            colors: false,
            ..HeadlessConfig::default()
        }));
        assert_eq!(colors(&curses).unwrap(), "colors: false");
        assert_eq!(curses.backend().call_count(Operation::StartColor), 0);
    }

    #[test]
    fn test_constants_cover_every_family() {
        let curses = headless();
        let entries = constants(&curses).unwrap();

        assert_eq!(
            entries.len(),
            Color::ALL.len() + Attribute::ALL.len() + AcsGlyph::ALL.len()
        );
        assert!(entries.contains(&ConstantEntry::new("COLOR_WHITE", 7)));
        assert!(entries.contains(&ConstantEntry::new("A_NORMAL", 0)));
        let hline = entries.iter().find(|e| e.name == "ACS_HLINE").unwrap();
        assert_eq!(hline.value, curses.acs(AcsGlyph::HLine));
        assert!(!curses.backend().is_active());
    }
}
