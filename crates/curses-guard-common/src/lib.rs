#![deny(clippy::all)]

pub mod error_codes;
mod sync;

pub use error_codes::ErrorCategory;
pub use sync::mutex_lock_or_recover;
