//! JAR manifest parsing.
//!
//! Follows the rules the JDK applies when it reads `META-INF/MANIFEST.MF`:
//! every line is terminated, no line is longer than 512 bytes, a header is
//! `Name: value` with exactly one space after the colon, and a continuation
//! line (leading space) only follows a header. Sections after the main one
//! are validated but not kept.

use thiserror::Error;

pub const MANIFEST_PATH: &str = "META-INF/MANIFEST.MF";
pub const AUTOMATIC_MODULE_NAME: &str = "Automatic-Module-Name";

/// Longest line accepted, terminator included
pub const MAX_LINE_BYTES: usize = 512;
const MAX_NAME_LEN: usize = 70;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ManifestError {
    #[error("manifest line {line} is not terminated by a newline")]
    MissingNewline { line: usize },

    #[error("manifest line {line} is longer than {MAX_LINE_BYTES} bytes")]
    LineTooLong { line: usize },

    #[error("manifest line {line} is a continuation without a preceding header")]
    MisplacedContinuation { line: usize },

    #[error("manifest line {line} is not a `Name: value` header")]
    InvalidHeader { line: usize },

    #[error("manifest line {line} has an invalid header name")]
    InvalidName { line: usize },

    #[error("manifest section starting at line {line} does not begin with `Name:`")]
    InvalidSection { line: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Main,
    BetweenSections,
    Section,
}

/// Attributes of the manifest main section, in file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MainAttributes {
    entries: Vec<(String, String)>,
}

impl MainAttributes {
    pub fn parse(bytes: &[u8]) -> Result<Self, ManifestError> {
        let mut entries: Vec<(String, Vec<u8>)> = Vec::new();
        let mut state = State::Main;
        let mut continuable = false;

        for (index, line) in split_lines(bytes)?.into_iter().enumerate() {
            let number = index + 1;

            if line.is_empty() {
                state = State::BetweenSections;
                continuable = false;
                continue;
            }

            if let Some(rest) = line.strip_prefix(b" ") {
                if !continuable {
                    return Err(ManifestError::MisplacedContinuation { line: number });
                }
                if state == State::Main {
                    if let Some((_, value)) = entries.last_mut() {
                        value.extend_from_slice(rest);
                    }
                }
                continue;
            }

            let (name, value) = parse_header(line, number)?;
            match state {
                State::Main => entries.push((name, value.to_vec())),
                State::BetweenSections => {
                    if !name.eq_ignore_ascii_case("Name") {
                        return Err(ManifestError::InvalidSection { line: number });
                    }
                    state = State::Section;
                }
                State::Section => {}
            }
            continuable = true;
        }

        // Values are decoded once joined, a character may span a continuation
        let entries = entries
            .into_iter()
            .map(|(name, value)| (name, String::from_utf8_lossy(&value).into_owned()))
            .collect();
        Ok(Self { entries })
    }

    /// Value of the header named `name` (ASCII case-insensitive). A repeated
    /// header resolves to its last occurrence.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn automatic_module_name(&self) -> Option<&str> {
        self.get(AUTOMATIC_MODULE_NAME)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Lines without their terminator. `\r\n`, `\n` and a lone `\r` all end a line.
fn split_lines(bytes: &[u8]) -> Result<Vec<&[u8]>, ManifestError> {
    let mut lines = Vec::new();
    let mut rest = bytes;

    while !rest.is_empty() {
        let number = lines.len() + 1;
        let Some(end) = rest.iter().position(|&b| b == b'\n' || b == b'\r') else {
            return Err(if rest.len() >= MAX_LINE_BYTES {
                ManifestError::LineTooLong { line: number }
            } else {
                ManifestError::MissingNewline { line: number }
            });
        };

        let terminator = if rest[end] == b'\r' && rest.get(end + 1) == Some(&b'\n') {
            2
        } else {
            1
        };
        if end + terminator > MAX_LINE_BYTES {
            return Err(ManifestError::LineTooLong { line: number });
        }

        lines.push(&rest[..end]);
        rest = &rest[end + terminator..];
    }

    Ok(lines)
}

fn parse_header(line: &[u8], number: usize) -> Result<(String, &[u8]), ManifestError> {
    let invalid = ManifestError::InvalidHeader { line: number };
    let colon = line.iter().position(|&b| b == b':').ok_or(invalid.clone())?;
    let value = line[colon + 1..].strip_prefix(b" ").ok_or(invalid)?;

    let name = &line[..colon];
    if !is_valid_name(name) {
        return Err(ManifestError::InvalidName { line: number });
    }

    Ok((String::from_utf8_lossy(name).into_owned(), value))
}

fn is_valid_name(name: &[u8]) -> bool {
    (1..=MAX_NAME_LEN).contains(&name.len())
        && name
            .iter()
            .all(|&b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}
