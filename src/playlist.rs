//! Playlist files: write a directory's playable files in natural order and
//! hand the result to the player.

use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info};

use crate::classify::Classify;
use crate::error::{Error, Result};
use crate::library::{DirectoryLister, scan_parallel};

/// Starts the player on a playlist file.
pub trait PlaylistPlayer {
    fn play(&self, playlist: &Path) -> Result<()>;
}

/// Runs `<binary> --playlist=<file>` and waits for it to exit.
#[derive(Debug, Clone)]
pub struct MpvLauncher {
    pub binary: String,
}

impl PlaylistPlayer for MpvLauncher {
    fn play(&self, playlist: &Path) -> Result<()> {
        info!(playlist = %playlist.display(), "starting player");
        let status = Command::new(&self.binary)
            .arg(format!("--playlist={}", playlist.display()))
            .status()?;
        if status.success() {
            Ok(())
        } else {
            Err(Error::PlayerExited(status))
        }
    }
}

#[derive(Debug, Clone)]
pub struct PlaylistOptions {
    pub directory: String,
    /// Regenerate even when the playlist file already exists.
    pub force: bool,
    /// Only write the playlist.
    pub skip_play: bool,
    pub output: PathBuf,
    /// Classifier processes allowed to run at once.
    pub jobs: NonZeroUsize,
}

/// What a playlist run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaylistOutcome {
    /// Entries written, `None` when an existing playlist was reused.
    pub written: Option<usize>,
    pub played: bool,
}

/// Write the playable files of `dir`, one name per line, to `output`.
///
/// Names are relative to `dir`, which is where the playlist lives by default.
/// Nothing is written when the directory has no playable files. Up to `jobs`
/// files are classified at once.
pub fn write_playlist<L, C>(
    dir: &str,
    output: &Path,
    lister: &L,
    classifier: &C,
    jobs: NonZeroUsize,
) -> Result<usize>
where
    L: DirectoryLister + ?Sized,
    C: Classify + Sync + ?Sized,
{
    let files = scan_parallel(dir, lister, classifier, jobs)?;
    if files.is_empty() {
        debug!(dir, "no playable files, playlist not written");
        return Ok(0);
    }

    let body = files
        .iter()
        .map(|f| f.name.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    fs::write(output, body)?;
    info!(output = %output.display(), entries = files.len(), "wrote playlist");
    Ok(files.len())
}

pub fn run<L, C, P>(opts: &PlaylistOptions, lister: &L, classifier: &C, player: &P) -> Result<PlaylistOutcome>
where
    L: DirectoryLister + ?Sized,
    C: Classify + Sync + ?Sized,
    P: PlaylistPlayer + ?Sized,
{
    if opts.output.is_file() && !opts.force && !opts.skip_play {
        player.play(&opts.output)?;
        return Ok(PlaylistOutcome {
            written: None,
            played: true,
        });
    }

    let written = write_playlist(&opts.directory, &opts.output, lister, classifier, opts.jobs)?;

    let played = !opts.skip_play && opts.output.is_file();
    if played {
        player.play(&opts.output)?;
    }
    Ok(PlaylistOutcome {
        written: Some(written),
        played,
    })
}
