use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{Result, SkydiskError};

/// A filename template with one frame-number placeholder.
///
/// Accepted placeholders: `{}`, `{:4}`, `{:04}` and the printf-flavored
/// `{:04d}`. A leading `0` pads with zeros, otherwise with spaces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FramePattern {
    prefix: String,
    suffix: String,
    width: usize,
    zero_pad: bool,
}

impl FramePattern {
    pub fn parse(pattern: &str) -> Result<Self> {
        let invalid = |why: &str| SkydiskError::InvalidPattern(format!("{pattern:?}: {why}"));

        let open = pattern
            .find('{')
            .ok_or_else(|| invalid("missing frame number placeholder"))?;
        let close = pattern[open..]
            .find('}')
            .map(|i| open + i)
            .ok_or_else(|| invalid("unclosed '{'"))?;
        let suffix = &pattern[close + 1..];
        if suffix.contains('{') || suffix.contains('}') || pattern[..open].contains('}') {
            return Err(invalid("only one placeholder is allowed"));
        }

        let spec = &pattern[open + 1..close];
        let spec = match spec.strip_prefix(':') {
            Some(rest) => rest,
            None if spec.is_empty() => "",
            None => return Err(invalid("placeholder must be '{}' or '{:<width>}'")),
        };
        let spec = spec.strip_suffix('d').unwrap_or(spec);
        let zero_pad = spec.starts_with('0');
        let width = if spec.is_empty() {
            0
        } else {
            spec.parse::<usize>()
                .map_err(|_| invalid("placeholder width must be a number"))?
        };

        Ok(Self {
            prefix: pattern[..open].to_string(),
            suffix: suffix.to_string(),
            width,
            zero_pad,
        })
    }

    /// Path of frame `index`.
    pub fn format(&self, index: u32) -> PathBuf {
        let number = if self.zero_pad {
            format!("{index:0width$}", width = self.width)
        } else {
            format!("{index:width$}", width = self.width)
        };
        PathBuf::from(format!("{}{}{}", self.prefix, number, self.suffix))
    }
}

impl FromStr for FramePattern {
    type Err = SkydiskError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl std::fmt::Display for FramePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let zero = if self.zero_pad { "0" } else { "" };
        if self.width == 0 {
            write!(f, "{}{{}}{}", self.prefix, self.suffix)
        } else {
            write!(f, "{}{{:{}{}}}{}", self.prefix, zero, self.width, self.suffix)
        }
    }
}
