use std::io;
use std::num::NonZeroUsize;

use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::classify::Classify;
use crate::config::LibrarySettings;
use crate::error::{Error, Result};
use crate::natural::{sorted_by, tokenize};
use crate::path::{join_path, listing_dir};

use super::model::PlayableFile;

/// Lists the names of regular files directly inside a directory.
pub trait DirectoryLister {
    fn list_files(&self, dir: &str) -> io::Result<Vec<String>>;
}

impl<T: DirectoryLister + ?Sized> DirectoryLister for &T {
    fn list_files(&self, dir: &str) -> io::Result<Vec<String>> {
        (**self).list_files(dir)
    }
}

/// Non-recursive listing backed by `walkdir`.
#[derive(Debug, Clone, Copy)]
pub struct WalkDirLister {
    pub follow_links: bool,
    pub include_hidden: bool,
}

impl WalkDirLister {
    pub fn new(settings: &LibrarySettings) -> Self {
        Self {
            follow_links: settings.follow_links,
            include_hidden: settings.include_hidden,
        }
    }
}

impl DirectoryLister for WalkDirLister {
    fn list_files(&self, dir: &str) -> io::Result<Vec<String>> {
        let walker = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(self.follow_links);

        let mut names = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                // The directory itself is unreadable.
                Err(e) if e.depth() == 0 => return Err(e.into()),
                Err(e) => {
                    trace!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }
            let Some(name) = entry.file_name().to_str() else {
                trace!(path = %entry.path().display(), "skipping non UTF-8 name");
                continue;
            };
            if !self.include_hidden && name.starts_with('.') {
                continue;
            }
            names.push(name.to_string());
        }
        Ok(names)
    }
}

/// Playable files directly inside `dir`, in natural order of their names.
///
/// `dir` is the directory part of a player path (possibly empty, meaning the
/// current directory); returned paths are joined onto it unchanged. An empty
/// result is not an error. The first classification failure aborts the scan.
pub fn scan<L, C>(dir: &str, lister: &L, classifier: &C) -> Result<Vec<PlayableFile>>
where
    L: DirectoryLister + ?Sized,
    C: Classify + ?Sized,
{
    let names = list(dir, lister)?;
    let playable = classify_names(dir, &names, classifier)?;
    Ok(finish(dir, playable))
}

/// Like [`scan`], but classifies on a pool of `jobs` worker threads.
///
/// Every name is classified; the error reported is the one for the earliest
/// name, as in a sequential scan.
pub fn scan_parallel<L, C>(
    dir: &str,
    lister: &L,
    classifier: &C,
    jobs: NonZeroUsize,
) -> Result<Vec<PlayableFile>>
where
    L: DirectoryLister + ?Sized,
    C: Classify + Sync + ?Sized,
{
    let names = list(dir, lister)?;
    let pool = ThreadPoolBuilder::new().num_threads(jobs.get()).build()?;
    trace!(jobs = jobs.get(), files = names.len(), "classifying in parallel");

    let results: Vec<Result<Option<PlayableFile>>> = pool.install(|| {
        names
            .par_iter()
            .map(|name| classify_name(dir, name, classifier))
            .collect()
    });

    let mut playable = Vec::new();
    for result in results {
        playable.extend(result?);
    }
    Ok(finish(dir, playable))
}

fn list<L: DirectoryLister + ?Sized>(dir: &str, lister: &L) -> Result<Vec<String>> {
    lister.list_files(listing_dir(dir)).map_err(|source| Error::Listing {
        dir: listing_dir(dir).to_string(),
        source,
    })
}

fn classify_names<C: Classify + ?Sized>(
    dir: &str,
    names: &[String],
    classifier: &C,
) -> Result<Vec<PlayableFile>> {
    let mut playable = Vec::new();
    for name in names {
        playable.extend(classify_name(dir, name, classifier)?);
    }
    Ok(playable)
}

fn classify_name<C: Classify + ?Sized>(
    dir: &str,
    name: &str,
    classifier: &C,
) -> Result<Option<PlayableFile>> {
    let path = join_path(dir, name);
    let media = classifier.classify(&path)?;
    if media.is_playable() {
        Ok(Some(PlayableFile {
            path,
            name: name.to_string(),
            media,
        }))
    } else {
        trace!(%path, "not audio or video");
        Ok(None)
    }
}

fn finish(dir: &str, playable: Vec<PlayableFile>) -> Vec<PlayableFile> {
    let files = sorted_by(playable, |f| tokenize(&f.name));
    debug!(dir = listing_dir(dir), found = files.len(), "scanned directory");
    files
}
