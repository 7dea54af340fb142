use crate::classify::MediaType;

/// A sibling that classified as audio or video during one scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayableFile {
    /// Directory and name joined the way the player spells paths.
    pub path: String,
    pub name: String,
    pub media: MediaType,
}
