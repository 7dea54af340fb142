//! Crate-level error type.

use std::io;
use std::process::ExitStatus;

use thiserror::Error;

use crate::classify::ClassifyError;
use crate::mpv::IpcError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// A sibling could not be classified; the whole run is abandoned.
    #[error(transparent)]
    Classify(#[from] ClassifyError),

    #[error("failed to list directory {dir}: {source}")]
    Listing {
        dir: String,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Ipc(#[from] IpcError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("player exited with {0}")]
    PlayerExited(ExitStatus),

    #[error("failed to start classifier workers: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}
