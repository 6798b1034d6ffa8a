//! Channel metadata - one sensor and its geographic location.
//!
//! Channel lists arrive as text responses, one channel per line, fields
//! joined by `:` in the order id, code, name, lon, lat, height, active,
//! azimuth, type id. Trailing fields may be absent; coordinates default to
//! NaN, active to 1 and the type id to 0.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from parsing a channel string.
#[derive(Debug, Error, PartialEq)]
pub enum ChannelParseError {
    #[error("empty channel string")]
    Empty,
    #[error("invalid {field} in channel string: {value:?}")]
    BadNumber { field: &'static str, value: String },
}

/// One sensor with its geographic location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub id: i32,
    pub code: String,
    pub name: String,
    pub lon: f64,
    pub lat: f64,
    pub height: f64,
    /// 1 if the channel is actively collecting.
    pub active: i32,
    pub azimuth: f64,
    /// Channel type id, 0 when untyped.
    pub ctid: i32,
}

fn field_f64(parts: &[&str], idx: usize, field: &'static str) -> Result<f64, ChannelParseError> {
    match parts.get(idx) {
        Some(v) => v.parse().map_err(|_| ChannelParseError::BadNumber {
            field,
            value: v.to_string(),
        }),
        None => Ok(f64::NAN),
    }
}

fn field_i32(
    parts: &[&str],
    idx: usize,
    field: &'static str,
    default: i32,
) -> Result<i32, ChannelParseError> {
    match parts.get(idx) {
        Some(v) => v.parse().map_err(|_| ChannelParseError::BadNumber {
            field,
            value: v.to_string(),
        }),
        None => Ok(default),
    }
}

impl FromStr for Channel {
    type Err = ChannelParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ChannelParseError::Empty);
        }
        let parts: Vec<&str> = s.split(':').collect();
        let id = parts[0]
            .parse()
            .map_err(|_| ChannelParseError::BadNumber {
                field: "id",
                value: parts[0].to_string(),
            })?;
        let code = parts.get(1).map(|p| p.to_string()).unwrap_or_default();
        let name = parts
            .get(2)
            .map(|p| p.to_string())
            .unwrap_or_else(|| code.clone());
        Ok(Self {
            id,
            code,
            name,
            lon: field_f64(&parts, 3, "lon")?,
            lat: field_f64(&parts, 4, "lat")?,
            height: field_f64(&parts, 5, "height")?,
            active: field_i32(&parts, 6, "active", 1)?,
            azimuth: field_f64(&parts, 7, "azimuth")?,
            ctid: field_i32(&parts, 8, "ctid", 0)?,
        })
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}:{}:{}:{}:{}:{}",
            self.id,
            self.code,
            self.name,
            self.lon,
            self.lat,
            self.height,
            self.active,
            self.azimuth,
            self.ctid
        )
    }
}

impl Channel {
    pub fn is_active(&self) -> bool {
        self.active != 0
    }

    /// Parses a batch of response lines into a map keyed by channel id.
    pub fn map_from_lines<S: AsRef<str>>(
        lines: &[S],
    ) -> Result<HashMap<i32, Channel>, ChannelParseError> {
        let mut map = HashMap::with_capacity(lines.len());
        for line in lines {
            let channel: Channel = line.as_ref().parse()?;
            map.insert(channel.id, channel);
        }
        Ok(map)
    }
}
