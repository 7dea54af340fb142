//! Queue reconciliation: decide what to splice into the player queue when a
//! file starts playing.
//!
//! Only a queue holding at most the file that just started is touched. Its
//! playable siblings are appended in natural order and the playing entry is
//! moved to its own natural position among them, so the queue mirrors the
//! directory. A second trigger for the same directory sees a multi-entry
//! queue and does nothing.

use tracing::{debug, trace};

use crate::classify::Classify;
use crate::error::Result;
use crate::library::{DirectoryLister, PlayableFile, scan};
use crate::path::{is_url, split_path};

/// One instruction for the player queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueMutation {
    /// Add a file at the end of the queue without interrupting playback.
    Append(String),
    /// Move the entry at index `from` so it lands before the entry currently
    /// at index `to` (`to == len` means the end).
    Move { from: usize, to: usize },
}

/// Why a trigger left the queue alone.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The queue already holds more than the playing file.
    CuratedPlaylist { count: usize },
    /// The player reports no current path.
    NothingPlaying,
    /// The playing path is a stream, not a file in a directory.
    Stream,
    /// The directory holds no playable files.
    NoSiblings,
    /// The playing file is not among the playable siblings.
    NotAmongSiblings,
    /// The playing file is the only playable file.
    NothingToAdd,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    Skipped(SkipReason),
    Queue(Vec<QueueMutation>),
}

impl Reconciliation {
    pub fn mutations(&self) -> &[QueueMutation] {
        match self {
            Self::Skipped(_) => &[],
            Self::Queue(m) => m,
        }
    }
}

/// Find `playing` among `siblings` by exact path.
///
/// Returns its index and every other sibling, order preserved.
pub fn partition_current(
    siblings: &[PlayableFile],
    playing: &str,
) -> Option<(usize, Vec<PlayableFile>)> {
    let index = siblings.iter().position(|f| f.path == playing)?;
    let remainder = siblings
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != index)
        .map(|(_, f)| f.clone())
        .collect();
    Some((index, remainder))
}

/// Directory autoload with injected listing and classification.
pub struct Autoloader<L, C> {
    lister: L,
    classifier: C,
}

impl<L: DirectoryLister, C: Classify> Autoloader<L, C> {
    pub fn new(lister: L, classifier: C) -> Self {
        Self { lister, classifier }
    }

    /// Compute the queue mutations for `playing` having just started while
    /// the queue holds `queue_count` entries.
    ///
    /// Scan failures propagate; nothing is emitted for a failed run.
    pub fn reconcile(&self, playing: &str, queue_count: usize) -> Result<Reconciliation> {
        if queue_count > 1 {
            debug!(count = queue_count, "stopping: manually made playlist");
            return Ok(Reconciliation::Skipped(SkipReason::CuratedPlaylist {
                count: queue_count,
            }));
        }
        if is_url(playing) {
            debug!(%playing, "stopping: not a local file");
            return Ok(Reconciliation::Skipped(SkipReason::Stream));
        }

        let (dir, file) = split_path(playing);
        trace!(dir, file, "autoload triggered");

        let siblings = scan(dir, &self.lister, &self.classifier)?;
        if siblings.is_empty() {
            debug!(dir, "no playable files in directory");
            return Ok(Reconciliation::Skipped(SkipReason::NoSiblings));
        }

        let Some((index, remainder)) = partition_current(&siblings, playing) else {
            debug!(%playing, "playing file not among playable siblings");
            return Ok(Reconciliation::Skipped(SkipReason::NotAmongSiblings));
        };
        trace!(index, "current file position in files");

        if remainder.is_empty() {
            debug!(%playing, "no other playable files");
            return Ok(Reconciliation::Skipped(SkipReason::NothingToAdd));
        }

        // The playing entry heads the queue; once the remainder is appended
        // behind it, moving it to `index + 1` leaves the whole directory in
        // natural order.
        let playing_entry = queue_count.saturating_sub(1);

        let mut mutations: Vec<QueueMutation> = remainder
            .into_iter()
            .map(|f| QueueMutation::Append(f.path))
            .collect();
        mutations.push(QueueMutation::Move {
            from: playing_entry,
            to: index + 1,
        });

        Ok(Reconciliation::Queue(mutations))
    }
}
