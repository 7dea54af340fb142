//! Directory autoload for media players.
//!
//! When a file starts playing, its playable siblings are found, put in
//! natural order and spliced into the player queue after it, unless the user
//! already built a playlist.

pub mod classify;
pub mod config;
pub mod error;
pub mod host;
pub mod library;
pub mod mpv;
pub mod natural;
pub mod path;
pub mod playlist;
pub mod reconcile;

mod runtime;

pub use error::{Error, Result};
pub use runtime::run;

#[cfg(test)]
mod test_support;
