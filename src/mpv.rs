//! mpv JSON IPC client.
//!
//! Talks to a player started with `--input-ipc-server=<socket>`: one JSON
//! object per line, requests tagged with a `request_id`, events interleaved
//! with replies.

mod protocol;

use std::collections::VecDeque;
use std::io::{self, BufRead, BufReader, Write};
use std::os::unix::net::UnixStream;
use std::path::Path;

use serde_json::{Value, json};
use thiserror::Error;
use tracing::trace;

use crate::error::Result;
use crate::host::Player;

use protocol::{Incoming, Request};

#[derive(Error, Debug)]
pub enum IpcError {
    #[error("failed to connect to {path}: {source}")]
    Connect {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("IPC I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed IPC message: {0}")]
    Json(#[from] serde_json::Error),

    #[error("command {command} failed: {error}")]
    Command { command: String, error: String },

    #[error("unexpected reply to {command}: {data}")]
    Unexpected { command: String, data: Value },

    #[error("player closed the connection")]
    Closed,
}

pub struct MpvIpc<R, W> {
    reader: R,
    writer: W,
    next_request_id: u64,
    pending_events: VecDeque<String>,
}

impl MpvIpc<BufReader<UnixStream>, UnixStream> {
    pub fn connect(socket: &Path) -> std::result::Result<Self, IpcError> {
        let stream = UnixStream::connect(socket).map_err(|source| IpcError::Connect {
            path: socket.display().to_string(),
            source,
        })?;
        Self::from_stream(stream)
    }

    pub fn from_stream(stream: UnixStream) -> std::result::Result<Self, IpcError> {
        let writer = stream.try_clone()?;
        Ok(Self::new(BufReader::new(stream), writer))
    }
}

impl<R: BufRead, W: Write> MpvIpc<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            next_request_id: 1,
            pending_events: VecDeque::new(),
        }
    }

    /// Send a command and wait for its reply. Events seen meanwhile are kept
    /// for `next_event`.
    pub fn command(&mut self, args: &[Value]) -> std::result::Result<Value, IpcError> {
        let request_id = self.next_request_id;
        self.next_request_id += 1;

        let mut line = serde_json::to_string(&Request {
            command: args,
            request_id,
        })?;
        line.push('\n');
        self.writer.write_all(line.as_bytes())?;
        self.writer.flush()?;
        let sent = Value::from(args.to_vec());
        trace!(request_id, command = %sent, "sent");

        loop {
            match self.read_message()? {
                None => return Err(IpcError::Closed),
                Some(Incoming::Event(name)) => self.pending_events.push_back(name),
                Some(Incoming::Reply { request_id: id, error, data }) if id == request_id => {
                    return if error == "success" {
                        Ok(data)
                    } else {
                        Err(IpcError::Command {
                            command: sent.to_string(),
                            error,
                        })
                    };
                }
                Some(Incoming::Reply { request_id: id, .. }) => {
                    trace!(request_id = id, "dropping stale reply");
                }
                Some(Incoming::Other) => {}
            }
        }
    }

    pub fn get_property(&mut self, name: &str) -> std::result::Result<Value, IpcError> {
        self.command(&[json!("get_property"), json!(name)])
    }

    /// Next event name, or `None` once the player closes the connection.
    pub fn next_event(&mut self) -> std::result::Result<Option<String>, IpcError> {
        if let Some(event) = self.pending_events.pop_front() {
            return Ok(Some(event));
        }
        loop {
            match self.read_message()? {
                None => return Ok(None),
                Some(Incoming::Event(name)) => return Ok(Some(name)),
                Some(_) => continue,
            }
        }
    }

    fn read_message(&mut self) -> std::result::Result<Option<Incoming>, IpcError> {
        let mut line = String::new();
        loop {
            line.clear();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            let text = line.trim();
            if !text.is_empty() {
                return Ok(Some(Incoming::parse(text)?));
            }
        }
    }
}

impl<R: BufRead, W: Write> Player for MpvIpc<R, W> {
    fn playing_path(&mut self) -> Result<Option<String>> {
        match self.get_property("path") {
            Ok(Value::String(path)) => Ok(Some(path)),
            Ok(Value::Null) | Err(IpcError::Command { .. }) => Ok(None),
            Ok(data) => Err(IpcError::Unexpected {
                command: "get_property path".to_string(),
                data,
            }
            .into()),
            Err(e) => Err(e.into()),
        }
    }

    fn playlist_count(&mut self) -> Result<usize> {
        match self.get_property("playlist-count") {
            Ok(data) => match data.as_u64().and_then(|n| usize::try_from(n).ok()) {
                Some(n) => Ok(n),
                None => Err(IpcError::Unexpected {
                    command: "get_property playlist-count".to_string(),
                    data,
                }
                .into()),
            },
            // Treat an unavailable count as a lone entry.
            Err(IpcError::Command { .. }) => Ok(1),
            Err(e) => Err(e.into()),
        }
    }

    fn append(&mut self, path: &str) -> Result<()> {
        self.command(&[json!("loadfile"), json!(path), json!("append")])?;
        Ok(())
    }

    fn move_entry(&mut self, from: usize, to: usize) -> Result<()> {
        self.command(&[json!("playlist-move"), json!(from), json!(to)])?;
        Ok(())
    }
}
