//! Text decoding for delimited input files.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::IoError;

/// Character encoding of an input file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextEncoding {
    /// UTF-8; a leading byte-order mark is dropped.
    #[default]
    Utf8,
    /// ISO-8859-1, common in Spanish-language station exports.
    Latin1,
}

impl TextEncoding {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Latin1 => "latin-1",
        }
    }

    /// Decodes `bytes` read from `path`.
    pub(crate) fn decode(self, bytes: Vec<u8>, path: &Path) -> Result<String, IoError> {
        match self {
            Self::Utf8 => {
                let text = String::from_utf8(bytes).map_err(|e| IoError::Decode {
                    path: path.to_path_buf(),
                    encoding: self.as_str().to_string(),
                    reason: e.utf8_error().to_string(),
                })?;
                Ok(match text.strip_prefix('\u{feff}') {
                    Some(rest) => rest.to_string(),
                    None => text,
                })
            }
            // Every Latin-1 byte maps to the code point of the same value.
            Self::Latin1 => Ok(bytes.into_iter().map(char::from).collect()),
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TextEncoding {
    type Err = IoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "utf-8" | "utf8" | "utf-8-sig" => Ok(Self::Utf8),
            "latin-1" | "latin1" | "iso-8859-1" | "iso8859-1" => Ok(Self::Latin1),
            _ => Err(IoError::UnsupportedEncoding {
                label: s.to_string(),
            }),
        }
    }
}
