//! Fakes shared by unit tests.

use std::cell::RefCell;
use std::sync::Mutex;
use std::io::{self, BufRead, BufReader, Write};
use std::os::unix::net::UnixStream;
use std::thread::{self, JoinHandle};

use serde_json::{Value, json};

use crate::classify::{Classify, ClassifyError, MediaType};
use crate::library::DirectoryLister;
use crate::reconcile::QueueMutation;

/// Returns a fixed set of names for any directory; records what was listed.
pub struct FakeLister {
    names: Vec<String>,
    pub listed: RefCell<Vec<String>>,
}

impl FakeLister {
    pub fn new(names: &[&str]) -> Self {
        Self {
            names: names.iter().map(|n| n.to_string()).collect(),
            listed: RefCell::new(Vec::new()),
        }
    }
}

impl DirectoryLister for FakeLister {
    fn list_files(&self, dir: &str) -> io::Result<Vec<String>> {
        self.listed.borrow_mut().push(dir.to_string());
        Ok(self.names.clone())
    }
}

pub struct MissingDir;

impl DirectoryLister for MissingDir {
    fn list_files(&self, _dir: &str) -> io::Result<Vec<String>> {
        Err(io::Error::new(io::ErrorKind::NotFound, "gone"))
    }
}

/// Classifies by extension; `.bad` fails. Records every path asked about.
#[derive(Default)]
pub struct ByExtension {
    pub seen: Mutex<Vec<String>>,
}

impl Classify for ByExtension {
    fn classify(&self, path: &str) -> Result<MediaType, ClassifyError> {
        self.seen.lock().unwrap().push(path.to_string());
        match crate::path::extension(path) {
            Some(".mkv" | ".mp4") => Ok(MediaType::Video),
            Some(".mp3" | ".flac") => Ok(MediaType::Audio),
            Some(".bad") => Err(ClassifyError::ClassificationFailure {
                output: "garbage".into(),
                args: vec!["file".into(), path.into()],
            }),
            _ => Ok(MediaType::Other),
        }
    }
}

/// Apply `mutations` to a local queue the way the player does.
pub fn apply(queue: &mut Vec<String>, mutations: &[QueueMutation]) {
    for m in mutations {
        match m {
            QueueMutation::Append(path) => queue.push(path.clone()),
            QueueMutation::Move { from, to } => {
                if *from >= queue.len() || *to > queue.len() {
                    continue;
                }
                let entry = queue.remove(*from);
                let target = if to > from { to - 1 } else { *to };
                queue.insert(target, entry);
            }
        }
    }
}

/// Script for a fake player on the far end of a socket pair.
pub struct FakeMpv {
    pub opening_events: Vec<&'static str>,
    pub properties: Vec<(&'static str, Value)>,
    /// Send `shutdown` and hang up after answering this many commands.
    pub shutdown_after: usize,
}

/// Serve `script` on `stream`; the handle yields every command received.
pub fn spawn_fake_mpv(stream: UnixStream, script: FakeMpv) -> JoinHandle<Vec<Vec<Value>>> {
    thread::spawn(move || {
        let mut writer = stream.try_clone().unwrap();
        let reader = BufReader::new(stream);
        for event in &script.opening_events {
            writeln!(writer, "{}", json!({ "event": event })).unwrap();
        }

        let mut seen = Vec::new();
        for line in reader.lines() {
            let Ok(line) = line else { break };
            let request: Value = serde_json::from_str(&line).unwrap();
            let id = request["request_id"].clone();
            let command = request["command"].as_array().unwrap().clone();

            let reply = if command[0] == "get_property" {
                match script.properties.iter().find(|(k, _)| command[1] == *k) {
                    Some((_, v)) => json!({ "request_id": id, "error": "success", "data": v }),
                    None => json!({ "request_id": id, "error": "property unavailable" }),
                }
            } else {
                json!({ "request_id": id, "error": "success", "data": null })
            };
            writeln!(writer, "{reply}").unwrap();

            seen.push(command);
            if seen.len() >= script.shutdown_after {
                writeln!(writer, "{}", json!({ "event": "shutdown" })).unwrap();
                break;
            }
        }
        seen
    })
}
