//! Bookmark record codec
//!
//! One record per line: `name|path`. The name is stored raw and may not
//! contain `|`; the path escapes `\` as `\\` and `|` as `\|`. A backslash
//! followed by anything else is kept literally, so files written without
//! escaping still decode.

use crate::error::BookmarkError;

pub const DELIMITER: char = '|';
const ESCAPE: char = '\\';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bookmark {
    pub name: String,
    pub path: String,
}

impl Bookmark {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

pub fn validate_name(name: &str) -> Result<(), BookmarkError> {
    if name.is_empty() || name.contains([DELIMITER, '\n', '\r']) {
        return Err(BookmarkError::InvalidName(name.to_string()));
    }
    Ok(())
}

pub fn validate_path(path: &str) -> Result<(), BookmarkError> {
    if path.is_empty() || path.contains(['\n', '\r']) {
        return Err(BookmarkError::InvalidPath(path.to_string()));
    }
    Ok(())
}

/// Encodes one record, including the trailing newline.
pub fn encode(bookmark: &Bookmark) -> Result<String, BookmarkError> {
    validate_name(&bookmark.name)?;
    validate_path(&bookmark.path)?;

    let mut line = String::with_capacity(bookmark.name.len() + bookmark.path.len() + 2);
    line.push_str(&bookmark.name);
    line.push(DELIMITER);
    for c in bookmark.path.chars() {
        if c == ESCAPE || c == DELIMITER {
            line.push(ESCAPE);
        }
        line.push(c);
    }
    line.push('\n');
    Ok(line)
}

/// Decodes one line (without its newline). `line_no` is 1-based.
pub fn decode(line: &str, line_no: usize) -> Result<Bookmark, BookmarkError> {
    let malformed = || BookmarkError::MalformedRecord {
        line: line_no,
        content: line.to_string(),
    };

    let (name, raw_path) = line.split_once(DELIMITER).ok_or_else(malformed)?;

    let mut path = String::with_capacity(raw_path.len());
    let mut chars = raw_path.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            ESCAPE => match chars.peek() {
                Some(&next) if next == ESCAPE || next == DELIMITER => {
                    path.push(next);
                    chars.next();
                }
                _ => path.push(ESCAPE),
            },
            DELIMITER => return Err(malformed()),
            _ => path.push(c),
        }
    }

    if name.is_empty() || path.is_empty() {
        return Err(malformed());
    }

    Ok(Bookmark::new(name, path))
}
