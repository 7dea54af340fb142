use serde::Deserialize;

/// Top-level settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/dirqueue/config.toml` or `~/.config/dirqueue/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `DIRQUEUE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub classifier: ClassifierSettings,
    pub library: LibrarySettings,
    pub mpv: MpvSettings,
    pub playlist: PlaylistSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClassifierSettings {
    /// Extensions (with the dot, case-sensitive) that go straight to the
    /// content sniffer because the filetype registry misreads them.
    pub fast_path_extensions: Vec<String>,
    /// Content sniffer invocation; the file path is appended.
    pub sniff_command: Vec<String>,
    /// Filetype registry invocation; the file path is appended.
    pub registry_command: Vec<String>,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            // .ts is MPEG-TS to the sniffer but Qt/TypeScript to the registry.
            fast_path_extensions: vec![".ts".into(), ".bak".into(), ".txt".into(), ".TXT".into()],
            sniff_command: vec!["file".into(), "-Lb".into(), "--mime-type".into()],
            registry_command: vec!["xdg-mime".into(), "query".into(), "filetype".into()],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Whether symlinked entries count as regular files when their target is one.
    pub follow_links: bool,
    /// Whether to include hidden files (dotfiles).
    pub include_hidden: bool,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            follow_links: true,
            include_hidden: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MpvSettings {
    /// JSON IPC socket of a running player (`--input-ipc-server`).
    pub socket: String,
    /// Player binary used to play generated playlists.
    pub binary: String,
}

impl Default for MpvSettings {
    fn default() -> Self {
        Self {
            socket: "/tmp/mpvsocket".to_string(),
            binary: "mpv".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaylistSettings {
    /// File name of a generated playlist inside the scanned directory.
    pub file_name: String,
}

impl Default for PlaylistSettings {
    fn default() -> Self {
        Self {
            file_name: "playlist".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// `tracing` filter directive, used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}
