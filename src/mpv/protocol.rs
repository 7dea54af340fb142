use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize)]
pub(super) struct Request<'a> {
    pub command: &'a [Value],
    pub request_id: u64,
}

#[derive(Debug, Deserialize)]
struct RawMessage {
    event: Option<String>,
    request_id: Option<u64>,
    error: Option<String>,
    #[serde(default)]
    data: Value,
}

/// One line received from the player.
#[derive(Debug, PartialEq)]
pub(super) enum Incoming {
    Event(String),
    Reply {
        request_id: u64,
        error: String,
        data: Value,
    },
    Other,
}

impl Incoming {
    pub fn parse(line: &str) -> Result<Self, serde_json::Error> {
        let raw: RawMessage = serde_json::from_str(line)?;
        Ok(match (raw.event, raw.request_id, raw.error) {
            (Some(name), _, _) => Self::Event(name),
            (None, Some(request_id), Some(error)) => Self::Reply {
                request_id,
                error,
                data: raw.data,
            },
            _ => Self::Other,
        })
    }
}
