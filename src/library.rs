//! Sibling discovery: list a directory, keep the playable files and put them
//! in natural order.

mod model;
mod scan;

pub use model::PlayableFile;
pub use scan::{DirectoryLister, WalkDirLister, scan, scan_parallel};
