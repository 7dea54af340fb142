use std::fmt;

/// What a file is, as far as queueing goes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MediaType {
    Audio,
    Video,
    Other,
}

impl MediaType {
    pub fn is_playable(self) -> bool {
        matches!(self, Self::Audio | Self::Video)
    }
}

/// A parsed `type/subtype` answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MimeType {
    pub kind: String,
    pub subtype: String,
}

impl MimeType {
    /// Parse a single `type/subtype` line.
    ///
    /// Empty answers, multi-line answers and anything without exactly one `/`
    /// separating two non-empty parts are rejected.
    pub fn parse(s: &str) -> Option<Self> {
        if s.contains(['\n', '\r']) {
            return None;
        }
        let mut parts = s.split('/');
        let kind = parts.next()?;
        let subtype = parts.next()?;
        if parts.next().is_some() || kind.is_empty() || subtype.is_empty() {
            return None;
        }
        Some(Self {
            kind: kind.to_string(),
            subtype: subtype.to_string(),
        })
    }

    pub fn media_type(&self) -> MediaType {
        match self.kind.as_str() {
            "audio" => MediaType::Audio,
            "video" => MediaType::Video,
            _ => MediaType::Other,
        }
    }
}

impl fmt::Display for MimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.subtype)
    }
}
