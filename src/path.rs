//! String path helpers matching how the player reports file paths.
//!
//! Player paths are opaque strings; they are only ever split on the last `/`
//! and joined back, so `join_path(split_path(p))` reproduces `p` exactly.

/// Split `path` into `(directory, file_name)`.
///
/// A path without a separator has an empty directory. The root separator is
/// kept on the directory (`"/a.mkv"` -> `("/", "a.mkv")`).
pub fn split_path(path: &str) -> (&str, &str) {
    match path.rfind('/') {
        Some(0) => ("/", &path[1..]),
        Some(i) => (&path[..i], &path[i + 1..]),
        None => ("", path),
    }
}

pub fn join_path(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_string()
    } else if dir.ends_with('/') {
        format!("{dir}{name}")
    } else {
        format!("{dir}/{name}")
    }
}

/// Directory to hand to a filesystem listing for a split-off directory part.
pub fn listing_dir(dir: &str) -> &str {
    if dir.is_empty() { "." } else { dir }
}

/// Extension of the file name in `path`, including the leading dot.
///
/// A dot at position 0 marks a hidden file, not an extension.
pub fn extension(path: &str) -> Option<&str> {
    let (_, name) = split_path(path);
    match name.rfind('.') {
        Some(0) | None => None,
        Some(i) => Some(&name[i..]),
    }
}

/// Whether `path` names a stream (`scheme://...`) rather than a local file.
pub fn is_url(path: &str) -> bool {
    match path.find("://") {
        Some(i) if i > 0 => path[..i]
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_path_handles_nested_bare_and_rooted_paths() {
        assert_eq!(split_path("/media/show/ep2.mkv"), ("/media/show", "ep2.mkv"));
        assert_eq!(split_path("ep2.mkv"), ("", "ep2.mkv"));
        assert_eq!(split_path("/ep2.mkv"), ("/", "ep2.mkv"));
        assert_eq!(split_path("show/"), ("show", ""));
    }

    #[test]
    fn join_path_reverses_split_path() {
        for p in ["/media/show/ep2.mkv", "ep2.mkv", "/ep2.mkv", "a/b/c"] {
            let (dir, name) = split_path(p);
            assert_eq!(join_path(dir, name), p);
        }
    }

    #[test]
    fn listing_dir_defaults_to_current_directory() {
        assert_eq!(listing_dir(""), ".");
        assert_eq!(listing_dir("/media"), "/media");
    }

    #[test]
    fn extension_ignores_hidden_file_dot() {
        assert_eq!(extension("/a/clip.ts"), Some(".ts"));
        assert_eq!(extension("/a/archive.tar.bak"), Some(".bak"));
        assert_eq!(extension("/a/.hidden"), None);
        assert_eq!(extension("/a/.hidden.txt"), Some(".txt"));
        assert_eq!(extension("/a.d/noext"), None);
    }

    #[test]
    fn is_url_detects_stream_schemes_only() {
        assert!(is_url("https://example.com/a.mkv"));
        assert!(is_url("ytdl://abc"));
        assert!(!is_url("/media/a://b.mkv"));
        assert!(!is_url("ep1.mkv"));
        assert!(!is_url("://nothing"));
    }
}
