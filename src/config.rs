//! Settings schema and loader.
//!
//! Settings pick the classifier tools, scanning policy, player socket and
//! log filter. Everything has a default, so a missing file is fine.

mod load;
mod schema;

pub use schema::*;
