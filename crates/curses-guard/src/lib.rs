#![deny(clippy::all)]

pub mod abort;
pub mod backend;
pub mod constants;
pub mod error;
mod guard;
mod handle;
pub mod headless;

#[cfg(all(unix, feature = "ncurses"))]
pub mod ffi;
#[cfg(all(unix, feature = "ncurses"))]
mod ncurses;

pub use abort::OrAbort;
pub use backend::Border;
pub use backend::CursesBackend;
pub use backend::RawWindow;
pub use constants::AcsGlyph;
pub use constants::Attribute;
pub use constants::Color;
pub use error::Arg;
pub use error::Call;
pub use error::CursesError;
pub use error::Operation;
pub use guard::Curses;
pub use guard::READ_LINE_LIMIT;
pub use handle::Drawable;
pub use handle::Screen;
pub use handle::Window;
pub use headless::HeadlessBackend;
pub use headless::HeadlessConfig;
#[cfg(all(unix, feature = "ncurses"))]
pub use ncurses::NcursesBackend;

pub type Result<T> = std::result::Result<T, CursesError>;
