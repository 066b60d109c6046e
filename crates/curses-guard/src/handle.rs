use crate::backend::RawWindow;

mod sealed {
    pub trait Sealed {}
}

/// Anything a drawing operation can target.
pub trait Drawable: sealed::Sealed {
    fn raw(&self) -> RawWindow;
}

/// The standard screen returned by screen initialization.
///
/// Ended by exactly one [`crate::Curses::endwin`].
#[derive(Debug, PartialEq, Eq)]
#[must_use = "the screen must be ended with Curses::endwin"]
pub struct Screen {
    raw: RawWindow,
}

/// A window created by `newwin` or derived by `derwin`.
///
/// Deleted by exactly one [`crate::Curses::delwin`].
#[derive(Debug, PartialEq, Eq)]
#[must_use = "the window must be deleted with Curses::delwin"]
pub struct Window {
    raw: RawWindow,
}

impl Screen {
    pub(crate) fn from_raw(raw: RawWindow) -> Self {
        Self { raw }
    }

    pub fn into_raw(self) -> RawWindow {
        self.raw
    }
}

impl Window {
    pub(crate) fn from_raw(raw: RawWindow) -> Self {
        Self { raw }
    }

    pub fn into_raw(self) -> RawWindow {
        self.raw
    }
}

impl sealed::Sealed for Screen {}
impl sealed::Sealed for Window {}

impl Drawable for Screen {
    fn raw(&self) -> RawWindow {
        self.raw
    }
}

impl Drawable for Window {
    fn raw(&self) -> RawWindow {
        self.raw
    }
}
