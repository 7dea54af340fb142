//! The player side of autoload: what the core needs from a running player
//! and how a playback-start event is turned into queue commands.

use tracing::{debug, info};

use crate::classify::Classify;
use crate::error::Result;
use crate::library::DirectoryLister;
use crate::reconcile::{Autoloader, QueueMutation, Reconciliation, SkipReason};

/// Queue capabilities of a running player.
pub trait Player {
    /// Path of the entry currently playing, if any.
    fn playing_path(&mut self) -> Result<Option<String>>;
    /// Number of entries in the playback queue.
    fn playlist_count(&mut self) -> Result<usize>;
    /// Add `path` at the end of the queue without interrupting playback.
    fn append(&mut self, path: &str) -> Result<()>;
    /// Move entry `from` so it lands before the entry currently at `to`.
    fn move_entry(&mut self, from: usize, to: usize) -> Result<()>;
}

/// Issue `mutations` in order. Stops at the first failure; commands already
/// issued stay applied.
pub fn apply_mutations<P: Player + ?Sized>(player: &mut P, mutations: &[QueueMutation]) -> Result<()> {
    for m in mutations {
        debug!(mutation = ?m, "queue mutation");
        match m {
            QueueMutation::Append(path) => player.append(path)?,
            QueueMutation::Move { from, to } => player.move_entry(*from, *to)?,
        }
    }
    Ok(())
}

/// Handle one playback-start event end to end.
pub fn on_playback_started<P, L, C>(player: &mut P, autoloader: &Autoloader<L, C>) -> Result<Reconciliation>
where
    P: Player + ?Sized,
    L: DirectoryLister,
    C: Classify,
{
    let count = player.playlist_count()?;
    let Some(path) = player.playing_path()? else {
        debug!("stopping: nothing playing");
        return Ok(Reconciliation::Skipped(SkipReason::NothingPlaying));
    };

    let reconciliation = autoloader.reconcile(&path, count)?;
    if let Reconciliation::Queue(mutations) = &reconciliation {
        apply_mutations(player, mutations)?;
        info!(
            playing = %path,
            added = mutations.len().saturating_sub(1),
            "queued sibling files"
        );
    }
    Ok(reconciliation)
}
