use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::thread;

use clap::{Parser, Subcommand};
use tracing::{info, warn};

use crate::classify::{Classifier, SystemRunner};
use crate::error::Result;
use crate::library::WalkDirLister;
use crate::mpv::MpvIpc;
use crate::path::join_path;
use crate::playlist::{self, MpvLauncher, PlaylistOptions};
use crate::reconcile::Autoloader;

mod event_loop;
mod logging;
mod settings;

#[derive(Debug, Parser)]
#[command(version, about = "Queue a playing file's sibling media in natural order")]
struct Cli {
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    /// Autoload sibling files into a running mpv whenever a file starts.
    Watch {
        /// IPC socket of the player (`--input-ipc-server`)
        #[arg(env = "DIRQUEUE_SOCKET")]
        socket: Option<String>,
    },
    /// Write a natural-order playlist of a directory and play it.
    Playlist {
        /// Directory holding the media (default: current directory)
        #[arg(default_value = ".")]
        directory: String,
        /// Regenerate the playlist even if it already exists
        #[arg(short, long)]
        force: bool,
        /// Do not start the player
        #[arg(short, long)]
        skip_play: bool,
        /// Playlist file path (default: DIRECTORY/<playlist.file_name>)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let (settings, problem) = settings::load_settings();
    logging::init(&settings.log);
    if let Some(msg) = problem {
        warn!("{msg}, using defaults");
    }

    let lister = WalkDirLister::new(&settings.library);
    let classifier = Classifier::new(SystemRunner, settings.classifier.clone());

    match cli.command {
        Cmd::Watch { socket } => {
            let socket = socket.unwrap_or_else(|| settings.mpv.socket.clone());
            let mut ipc = MpvIpc::connect(Path::new(&socket))?;
            info!(%socket, "connected to player");

            let autoloader = Autoloader::new(lister, classifier);
            event_loop::run(&mut ipc, &autoloader)
        }
        Cmd::Playlist {
            directory,
            force,
            skip_play,
            output,
        } => {
            let output = output
                .unwrap_or_else(|| PathBuf::from(join_path(&directory, &settings.playlist.file_name)));
            let jobs = thread::available_parallelism().unwrap_or(NonZeroUsize::MIN);
            let opts = PlaylistOptions {
                directory,
                force,
                skip_play,
                output,
                jobs,
            };
            let launcher = MpvLauncher {
                binary: settings.mpv.binary.clone(),
            };
            playlist::run(&opts, &lister, &classifier, &launcher)?;
            Ok(())
        }
    }
}
