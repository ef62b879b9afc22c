//! Splitting legacy markdown tickets into header, title and body.
//!
//! The header block is a handful of `key: value` lines fenced by `---`
//! marker lines. It is split line by line; values are kept as raw strings.

/// Marker line that opens and closes a header block.
pub const HEADER_MARKER: &str = "---";

/// Title used when neither a heading nor a usable filename is available.
pub const UNTITLED: &str = "Untitled";

/// Key/value pairs from a header block, in order of first appearance.
///
/// A key repeated later in the block replaces the earlier value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    entries: Vec<(String, String)>,
}

impl Header {
    /// Value recorded for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn parse_lines(text: &str) -> Self {
        let mut header = Self::default();
        for (key, value) in text.lines().filter_map(|line| line.split_once(':')) {
            header.insert(key.trim(), value.trim());
        }
        header
    }

    fn insert(&mut self, key: &str, value: &str) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.entries.push((key.to_string(), value.to_string())),
        }
    }
}

fn is_marker(line: &str) -> bool {
    line.trim_end_matches(['\n', '\r']) == HEADER_MARKER
}

/// Split `content` into its header block and the text that follows it.
///
/// A header must start on the first line and be closed by the next line
/// consisting solely of the marker. Anything else leaves the document
/// untouched with an empty header.
pub fn parse_header(content: &str) -> (Header, &str) {
    let mut lines = content.split_inclusive('\n');
    let Some(first) = lines.next() else {
        return (Header::default(), content);
    };
    if !is_marker(first) {
        return (Header::default(), content);
    }

    let header_start = first.len();
    let mut offset = header_start;
    for line in lines {
        if is_marker(line) {
            let header = Header::parse_lines(&content[header_start..offset]);
            return (header, &content[offset + line.len()..]);
        }
        offset += line.len();
    }

    (Header::default(), content)
}

/// Pull the first `# ` heading out as the title; the rest is the body.
///
/// Blank lines right after the heading are skipped and the body is trimmed.
/// Without a heading the title is empty and the whole text is the body.
pub fn extract_title_and_body(content: &str) -> (String, String) {
    let lines: Vec<&str> = content.trim().split('\n').collect();

    let mut title = String::new();
    let mut body_start = 0;
    if let Some((idx, heading)) = lines
        .iter()
        .enumerate()
        .find_map(|(i, line)| line.strip_prefix("# ").map(|rest| (i, rest)))
    {
        title = heading.trim().to_string();
        body_start = idx + 1;
    }

    while body_start < lines.len() && lines[body_start].trim().is_empty() {
        body_start += 1;
    }

    let body = lines[body_start..].join("\n").trim().to_string();
    (title, body)
}

/// Title derived from a file stem: hyphens become spaces, words are
/// title-cased.
pub fn fallback_title(stem: &str) -> String {
    let spaced = stem.replace('-', " ");
    let mut title = String::with_capacity(spaced.len());
    let mut in_word = false;
    for c in spaced.chars() {
        if c.is_alphabetic() {
            if in_word {
                title.extend(c.to_lowercase());
            } else {
                title.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            title.push(c);
            in_word = false;
        }
    }

    if title.trim().is_empty() {
        UNTITLED.to_string()
    } else {
        title
    }
}
