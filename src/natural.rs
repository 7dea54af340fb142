//! Natural ordering for file names.
//!
//! A name is split into alternating text and digit runs. Digit runs compare
//! by numeric value (of any length), text runs by plain code point order, so
//! `ep2.mkv` sorts before `ep10.mkv`.

use std::cmp::Ordering;

/// One run of a tokenized name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// A run of decimal digits, stored with leading zeros stripped.
    ///
    /// Keeping the digits instead of a machine integer lets runs of any
    /// length compare exactly: a longer normalized run is always larger.
    Number(String),
    Text(String),
}

impl Segment {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Build a numeric segment from an ASCII digit run.
    pub fn number(digits: &str) -> Self {
        let trimmed = digits.trim_start_matches('0');
        if trimmed.is_empty() {
            Self::Number("0".to_string())
        } else {
            Self::Number(trimmed.to_string())
        }
    }
}

impl Ord for Segment {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.len().cmp(&b.len()).then_with(|| a.cmp(b)),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            // Only reachable when one name starts with digits and the other
            // does not; digits first, as in a plain byte comparison.
            (Self::Number(_), Self::Text(_)) => Ordering::Less,
            (Self::Text(_), Self::Number(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for Segment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Sort key of a file name: its segments compared element-wise, with a
/// strict prefix sorting first.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct SortKey(pub Vec<Segment>);

impl SortKey {
    pub fn segments(&self) -> &[Segment] {
        &self.0
    }
}

/// Split `name` on maximal runs of ASCII digits.
///
/// No empty segments are produced, so a name starting with digits begins with
/// a `Number` and a name without digits is a single `Text` segment.
pub fn tokenize(name: &str) -> SortKey {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut in_digits = false;

    for (i, c) in name.char_indices() {
        let digit = c.is_ascii_digit();
        if i > start && digit != in_digits {
            segments.push(make_segment(&name[start..i], in_digits));
            start = i;
        }
        in_digits = digit;
    }
    if start < name.len() {
        segments.push(make_segment(&name[start..], in_digits));
    }

    SortKey(segments)
}

fn make_segment(run: &str, digits: bool) -> Segment {
    if digits {
        Segment::number(run)
    } else {
        Segment::text(run)
    }
}

pub fn compare(a: &SortKey, b: &SortKey) -> Ordering {
    a.cmp(b)
}

/// Natural comparison of two names.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    compare(&tokenize(a), &tokenize(b))
}

/// Return `items` sorted by `key`, keeping the original order of equal keys.
pub fn sorted_by<T, K, F>(items: impl IntoIterator<Item = T>, key: F) -> Vec<T>
where
    K: Ord,
    F: FnMut(&T) -> K,
{
    let mut items: Vec<T> = items.into_iter().collect();
    items.sort_by_cached_key(key);
    items
}
