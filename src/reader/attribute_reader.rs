//! Optional `.att` side-car reader, advanced in lock-step with `start_group`.

use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// One `key:=value` pair from an attribute block.
pub(crate) struct AttributePair {
    pub key: String,
    pub value: String,
}

/// Walks an attribute side-car file forward, never backward, matching the
/// parser's depth-first `start_group` calls one at a time.
pub(crate) struct AttributeReader<R: Read> {
    lines: std::iter::Peekable<std::io::Lines<BufReader<R>>>,
    /// Line buffered from a previous `block_for` call that didn't match.
    pending: Option<String>,
}

impl AttributeReader<std::fs::File> {
    /// Opens the `.att` file next to `model_path`, if one exists. Returns
    /// `None` on any I/O failure; attribute absence never fails the parse.
    pub(crate) fn open_sidecar(model_path: &Path) -> Option<Self> {
        let candidate = sidecar_path(model_path)?;
        let file = std::fs::File::open(candidate).ok()?;
        Some(Self::new(file))
    }
}

fn sidecar_path(model_path: &Path) -> Option<std::path::PathBuf> {
    let stem = model_path.file_stem()?;
    let mut candidate = model_path.to_path_buf();
    candidate.set_file_name(stem);
    candidate.set_extension("att");
    if candidate.exists() {
        return Some(candidate);
    }
    // Case-insensitive fallback: scan the parent directory once.
    let parent = model_path.parent()?;
    let stem_str = stem.to_str()?.to_ascii_lowercase();
    std::fs::read_dir(parent).ok()?.find_map(|entry| {
        let entry = entry.ok()?;
        let name = entry.file_name();
        let name = name.to_str()?;
        let (base, ext) = name.rsplit_once('.')?;
        if base.to_ascii_lowercase() == stem_str && ext.eq_ignore_ascii_case("att") {
            Some(entry.path())
        } else {
            None
        }
    })
}

impl<R: Read> AttributeReader<R> {
    pub(crate) fn new(inner: R) -> Self {
        AttributeReader {
            lines: BufReader::new(inner).lines().peekable(),
            pending: None,
        }
    }

    /// Advances until `NEW <name>` is found (returning its pairs) or until
    /// the next `NEW` block that isn't a match (in which case that header
    /// line is buffered for the next call and `None` is returned), or EOF.
    pub(crate) fn block_for(&mut self, name: &str) -> Option<Vec<AttributePair>> {
        let target = format!("NEW {name}");
        loop {
            let header = self.pending.take().or_else(|| self.next_line())?;
            if header.trim_end() != target {
                continue;
            }
            let mut pairs = Vec::new();
            loop {
                match self.peek_line() {
                    Some(line) if line.starts_with("NEW ") => break,
                    Some(_) => {
                        let line = self.next_line().unwrap();
                        if let Some(pair) = parse_pair(&line) {
                            pairs.push(pair);
                        }
                    }
                    None => break,
                }
            }
            return Some(pairs);
        }
    }

    fn next_line(&mut self) -> Option<String> {
        self.lines.next()?.ok()
    }

    fn peek_line(&mut self) -> Option<&str> {
        match self.lines.peek()? {
            Ok(s) => Some(s.as_str()),
            Err(_) => None,
        }
    }
}

/// Parses a `key:=value` line. `value` begins four characters after the
/// `:=` marker, per the legacy producer's fixed padding, and both sides are
/// trimmed of surrounding whitespace.
fn parse_pair(line: &str) -> Option<AttributePair> {
    let sep = line.find(":=")?;
    let key = line[..sep].trim().to_string();
    let value_start = sep + 2 + 4;
    let value = line.get(value_start..).unwrap_or("").trim().to_string();
    Some(AttributePair { key, value })
}

/// Expands ISO-8859-1 bytes to UTF-8: every byte below 0x80 passes through
/// unchanged; every byte at or above 0x80 maps to the Latin-1 code point at
/// that value, which is always a two-byte UTF-8 sequence.
pub(crate) fn latin1_to_utf8(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}
