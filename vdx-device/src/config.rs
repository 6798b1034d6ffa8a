//! Device session configuration.
//!
//! Options arrive as a string key/value map, the shape field configuration
//! files produce. `DeviceConfig::from_params` applies defaults, validates
//! everything once, and yields an immutable value; no device exists until
//! the configuration is valid.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, FixedOffset, Utc};

use crate::error::ConfigError;
use crate::timefmt;

/// How the device delivers data: pushed continuously or polled on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acquisition {
    Stream,
    Poll,
}

impl FromStr for Acquisition {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "stream" => Ok(Acquisition::Stream),
            "poll" => Ok(Acquisition::Poll),
            _ => Err(ConfigError::InvalidAcquisition(s.to_string())),
        }
    }
}

impl fmt::Display for Acquisition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Acquisition::Stream => write!(f, "stream"),
            Acquisition::Poll => write!(f, "poll"),
        }
    }
}

/// Validated, immutable session options for one device.
#[derive(Debug, Clone)]
pub struct DeviceConfig {
    /// Station id, for logging.
    pub station_id: String,
    /// Acquisition mode.
    pub acquisition: Acquisition,
    /// Timestamp mask as configured, vendor pattern language.
    pub timestamp_mask: String,
    /// Timezone the device keeps its clock in.
    pub timezone: FixedOffset,
    /// Link timeout.
    pub timeout: Duration,
    /// Attempt budget for one request.
    pub max_tries: u32,
    /// Largest line count one poll may request.
    pub max_lines: u32,
    /// Seconds between samples.
    pub sample_rate: u32,
    /// Field delimiter within a data line.
    pub delimiter: String,
    /// Column treated as the null marker, empty when unused.
    pub null_field: String,
    /// Sentinel the device emits for bad readings, empty when unused.
    pub bad_data_value: String,
    /// Start polling from the last stored sample instead of now.
    pub poll_history: bool,
    /// Column names of the data lines, never empty.
    pub fields: Vec<String>,
    /// Timezone string as configured, for display.
    timezone_name: String,
    /// Timestamp mask translated to strftime.
    strftime_mask: String,
}

fn lookup<'a>(params: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    params.get(key).map(String::as_str).filter(|v| !v.is_empty())
}

fn lookup_number<T: FromStr>(
    params: &HashMap<String, String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(params, key) {
        Some(v) => v.parse().map_err(|_| ConfigError::InvalidNumber {
            key,
            value: v.to_string(),
        }),
        None => Ok(default),
    }
}

fn lookup_bool(
    params: &HashMap<String, String>,
    key: &'static str,
    default: bool,
) -> Result<bool, ConfigError> {
    match lookup(params, key) {
        Some(v) => match v.to_ascii_lowercase().as_str() {
            "true" | "t" | "yes" | "y" | "1" => Ok(true),
            "false" | "f" | "no" | "n" | "0" => Ok(false),
            _ => Err(ConfigError::InvalidBool {
                key,
                value: v.to_string(),
            }),
        },
        None => Ok(default),
    }
}

impl DeviceConfig {
    /// Builds a configuration from a parameter map, applying defaults.
    ///
    /// `acquisition` and a non-empty `fields` list are required; everything
    /// else falls back to the documented defaults.
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let acquisition: Acquisition = lookup(params, "acquisition")
            .ok_or(ConfigError::MissingAcquisition)?
            .parse()?;

        let fields: Vec<String> = lookup(params, "fields")
            .unwrap_or("")
            .split(',')
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_string)
            .collect();
        if fields.is_empty() {
            return Err(ConfigError::MissingFields);
        }

        let timestamp_mask = lookup(params, "timestamp")
            .unwrap_or("MM/dd/yy HH:mm:ss")
            .to_string();
        let strftime_mask = timefmt::translate_mask(&timestamp_mask)?;

        let timezone_name = lookup(params, "timezone").unwrap_or("GMT").to_string();
        let timezone = timefmt::parse_timezone(&timezone_name)?;

        let sample_rate: u32 = lookup_number(params, "samplerate", 60)?;
        if sample_rate == 0 {
            return Err(ConfigError::ZeroSampleRate);
        }

        Ok(Self {
            station_id: lookup(params, "id").unwrap_or("0").to_string(),
            acquisition,
            timestamp_mask,
            timezone,
            timeout: Duration::from_millis(lookup_number(params, "timeout", 60_000)?),
            max_tries: lookup_number(params, "maxtries", 2)?,
            max_lines: lookup_number(params, "maxlines", 30)?,
            sample_rate,
            delimiter: lookup(params, "delimiter").unwrap_or(",").to_string(),
            null_field: lookup(params, "nullfield").unwrap_or("").to_string(),
            bad_data_value: lookup(params, "baddataval").unwrap_or("").to_string(),
            poll_history: lookup_bool(params, "pollhist", true)?,
            fields,
            timezone_name,
            strftime_mask,
        })
    }

    /// Renders an instant in the device timezone using the configured mask.
    pub fn format_timestamp(&self, instant: DateTime<Utc>) -> String {
        instant
            .with_timezone(&self.timezone)
            .format(&self.strftime_mask)
            .to_string()
    }
}

impl fmt::Display for DeviceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "id:{}/acquisition:{}/timestamp:{}/timezone:{}/timeout:{}/maxtries:{}/maxlines:{}/\
             samplerate:{}/delimiter:{}/nullfield:{}/pollhist:{}/baddataval:{}/",
            self.station_id,
            self.acquisition,
            self.timestamp_mask,
            self.timezone_name,
            self.timeout.as_millis(),
            self.max_tries,
            self.max_lines,
            self.sample_rate,
            self.delimiter,
            self.null_field,
            self.poll_history,
            self.bad_data_value
        )
    }
}
