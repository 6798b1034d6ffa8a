//! Command parameter maps and their wire serialization.
//!
//! A command is a set of string parameters (`source=hvo_def_tilt`,
//! `action=data`, ...). Insertion order carries no meaning on the wire, so
//! the map is backed by a `BTreeMap` and always serializes in key order;
//! the same command value produces the same bytes every time.

use std::collections::BTreeMap;

/// Prefix written before the serialized parameters of a data request.
pub const GETDATA_PREFIX: &str = "getdata: ";

/// Separator joining `key=value` pairs on the wire.
pub const PAIR_SEPARATOR: char = ';';

/// A VDX command: string parameters serialized as `key=value` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Command {
    params: BTreeMap<String, String>,
}

impl Command {
    /// Creates an empty command.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter, builder style.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Sets a parameter. An existing value under the same key is replaced.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.insert(key.into(), value.into());
    }

    /// Returns the value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Iterates parameters in serialization (key) order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Serializes the parameters as `key=value` pairs joined by `;`.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        for (key, value) in &self.params {
            if !out.is_empty() {
                out.push(PAIR_SEPARATOR);
            }
            out.push_str(key);
            out.push('=');
            out.push_str(value);
        }
        out
    }

    /// Parses a serialized parameter string back into a command.
    ///
    /// Empty segments (from trailing or doubled separators) and segments
    /// without `=` are skipped; a repeated key keeps its last value.
    pub fn parse(s: &str) -> Self {
        let mut params = BTreeMap::new();
        for segment in s.split(PAIR_SEPARATOR) {
            if segment.is_empty() {
                continue;
            }
            if let Some((key, value)) = segment.split_once('=') {
                params.insert(key.to_string(), value.to_string());
            }
        }
        Self { params }
    }

    /// Builds the complete newline-terminated request line for this command.
    pub fn request_line(&self) -> String {
        format!("{}{}\n", GETDATA_PREFIX, self.serialize())
    }
}

impl FromIterator<(String, String)> for Command {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            params: iter.into_iter().collect(),
        }
    }
}
