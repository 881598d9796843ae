//! Preset file reader.
//!
//! MilkDrop presets are INI-flavoured text: an ignorable `[preset00]`
//! section header followed by `key=value` lines. Keys are looked up
//! case-insensitively (they are lowercased on read), values are kept
//! verbatim, and insertion order is preserved - expression code is
//! reassembled from its numbered keys in the order the file lists them.
//!
//! ```text
//! [preset00]
//! fRating=3.0
//! nWaveMode=7
//! per_frame_1=zoom = 1.2;
//! per_frame_2=rot = rot + 0.01;
//! ```

use std::fs;
use std::path::Path;

use indexmap::IndexMap;

use crate::error::ConvertError;

/// An in-memory preset: lowercased keys mapping to raw values.
#[derive(Debug, Default)]
pub struct PresetFile {
    values: IndexMap<String, String>,
}

impl PresetFile {
    /// Read and parse a preset file.
    pub fn read(path: &Path) -> Result<Self, ConvertError> {
        let text = fs::read_to_string(path).map_err(|source| ConvertError::ReadInput {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&text))
    }

    /// Parse preset text.
    ///
    /// Section headers (`[...]`) and lines without `=` are skipped; the
    /// split is at the first `=` so values may themselves contain `=`.
    /// The first occurrence of a key wins.
    pub fn parse(text: &str) -> Self {
        let mut values = IndexMap::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim().to_ascii_lowercase();
            if key.is_empty() {
                continue;
            }
            values.entry(key).or_insert_with(|| value.to_string());
        }
        Self { values }
    }

    /// Case-insensitive scalar lookup.
    pub fn scalar(&self, key: &str) -> Option<&str> {
        if key.bytes().any(|b| b.is_ascii_uppercase()) {
            self.values.get(&key.to_ascii_lowercase()).map(String::as_str)
        } else {
            self.values.get(key).map(String::as_str)
        }
    }

    /// Concatenated expression code for a key prefix.
    ///
    /// Joins, in preset order, the values of every key starting with
    /// `prefix` (lowercased). Fragments are separated with `;` on their
    /// own line boundary so a trailing `//` comment in one fragment
    /// cannot swallow the next.
    pub fn code(&self, prefix: &str) -> String {
        let prefix = prefix.to_ascii_lowercase();
        let mut out = String::new();
        for (key, value) in &self.values {
            if key.starts_with(&prefix) {
                if !out.is_empty() {
                    out.push_str(";\n");
                }
                out.push_str(value);
            }
        }
        out
    }

    /// Number of key/value pairs.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if the preset has no key/value pairs.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
