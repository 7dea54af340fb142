use std::io::{BufRead, Write};

use tracing::{debug, error, trace};

use crate::classify::Classify;
use crate::error::{Error, Result};
use crate::host::on_playback_started;
use crate::library::DirectoryLister;
use crate::mpv::MpvIpc;
use crate::reconcile::Autoloader;

/// Serve player events until it shuts down or hangs up.
///
/// Runs are strictly one at a time: an event is fully handled before the
/// next one is read. A failed run is logged and the next `start-file` starts
/// afresh; a broken connection ends the loop.
pub fn run<R, W, L, C>(ipc: &mut MpvIpc<R, W>, autoloader: &Autoloader<L, C>) -> Result<()>
where
    R: BufRead,
    W: Write,
    L: DirectoryLister,
    C: Classify,
{
    while let Some(event) = ipc.next_event()? {
        match event.as_str() {
            "start-file" => match on_playback_started(ipc, autoloader) {
                Ok(outcome) => trace!(?outcome, "autoload finished"),
                Err(Error::Ipc(e)) => return Err(e.into()),
                Err(e) => error!(error = %e, "autoload failed"),
            },
            "shutdown" => {
                debug!("player shutting down");
                break;
            }
            _ => trace!(%event, "ignored event"),
        }
    }
    Ok(())
}
