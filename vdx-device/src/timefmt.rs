//! Timestamp mask translation and timezone parsing.
//!
//! Field configuration files carry timestamp masks in the pattern language
//! instrument vendors document (`MM/dd/yy HH:mm:ss`, `ss,mm,HH,dd,MM,yy`).
//! Those masks are translated to strftime once, at configuration build, so
//! existing config files keep working unchanged. Only the tokens the field
//! configs use are supported; anything else is rejected up front.
//!
//! Timezones accept `GMT`/`UTC` and fixed offsets (`GMT+10`, `UTC-02:30`,
//! `+05:00`). Named zone databases are out of scope.

use chrono::FixedOffset;

use crate::error::ConfigError;

/// Translates a vendor timestamp mask to a strftime format string.
///
/// Supported tokens: `yyyy`, `yy`, `MM`, `dd`, `HH`, `mm`, `ss`. Any other
/// alphabetic run fails with [`ConfigError::BadTimestampMask`]. Literal
/// characters pass through; `%` is escaped.
pub fn translate_mask(mask: &str) -> Result<String, ConfigError> {
    let mut out = String::with_capacity(mask.len());
    let chars: Vec<char> = mask.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c.is_ascii_alphabetic() {
            let mut len = 1;
            while i + len < chars.len() && chars[i + len] == c {
                len += 1;
            }
            let directive = match (c, len) {
                ('y', 4) => "%Y",
                ('y', 2) => "%y",
                ('M', 2) => "%m",
                ('d', 2) => "%d",
                ('H', 2) => "%H",
                ('m', 2) => "%M",
                ('s', 2) => "%S",
                _ => {
                    return Err(ConfigError::BadTimestampMask {
                        mask: mask.to_string(),
                        token: chars[i..i + len].iter().collect(),
                    })
                }
            };
            out.push_str(directive);
            i += len;
        } else {
            if c == '%' {
                out.push('%');
            }
            out.push(c);
            i += 1;
        }
    }
    Ok(out)
}

/// Parses a timezone string into a fixed offset.
pub fn parse_timezone(s: &str) -> Result<FixedOffset, ConfigError> {
    let trimmed = s.trim();
    let upper = trimmed.to_ascii_uppercase();
    let rest = upper
        .strip_prefix("GMT")
        .or_else(|| upper.strip_prefix("UTC"))
        .unwrap_or(&upper);
    if rest.is_empty() {
        return FixedOffset::east_opt(0).ok_or_else(|| ConfigError::BadTimezone(s.to_string()));
    }

    let bad = || ConfigError::BadTimezone(s.to_string());
    let (sign, digits) = match rest.as_bytes()[0] {
        b'+' => (1i32, &rest[1..]),
        b'-' => (-1i32, &rest[1..]),
        _ => return Err(bad()),
    };

    // Exactly one sign, consumed above; components are bare digits.
    let component = |part: &str| -> Result<u32, ConfigError> {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(bad());
        }
        part.parse().map_err(|_| bad())
    };

    let (hours, minutes) = if let Some((h, m)) = digits.split_once(':') {
        (component(h)?, component(m)?)
    } else if digits.len() == 4 {
        (component(&digits[..2])?, component(&digits[2..])?)
    } else {
        (component(digits)?, 0)
    };
    if hours > 23 || minutes > 59 {
        return Err(bad());
    }

    FixedOffset::east_opt(sign * (hours as i32 * 3600 + minutes as i32 * 60)).ok_or_else(bad)
}
