//!  Escape Reservation Agent
//!
//!  Copyright (C) 2026  Mamy Ratsimbazafy
//!
//!  This program is free software: you can redistribute it and/or modify
//!  it under the terms of the GNU Affero General Public License as published by
//!  the Free Software Foundation, either version 3 of the License, or
//!  (at your option) any later version.
//!
//!  This program is distributed in the hope that it will be useful,
//!  but WITHOUT ANY WARRANTY; without even the implied warranty of
//!  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//!  GNU Affero General Public License for more details.
//!
//!  You should have received a copy of the GNU Affero General Public License
//!  along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! # Reservation Requests
//!
//! Per-site request values, shaped like the JSON bodies the booking API
//! receives (camelCase keys).

use anyhow::{Context, Result, bail};
use chrono::{FixedOffset, TimeZone};
use serde::{Deserialize, Serialize};

/// Booking sites we know how to drive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Target {
    /// Zero World Hongdae: theme-addressed pages, token in a header
    ZeroWorld,
    /// Earth Escape: branch-addressed form, token in a hidden field
    EarthEscape,
}

impl Target {
    pub fn as_str_name(&self) -> &'static str {
        match self {
            Target::ZeroWorld => "zero-world",
            Target::EarthEscape => "earth-escape",
        }
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZeroWorldRequest {
    /// Theme PK; weekday and weekend sessions of one theme have distinct ids
    pub theme_id: String,
    /// YYYY-MM-DD
    pub reservation_date: String,
    /// HH:MM:SS
    pub reservation_time: String,
    pub name: String,
    pub phone: String,
    pub people: u32,
    /// "1" pays on site
    pub payment_type: String,
    pub policy: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarthEscapeRequest {
    pub branch: String,
    pub theme: String,
    /// YYYY-MM-DD
    pub date: String,
    /// HH:MM
    pub time: String,
    pub name: String,
    pub phone: String,
    pub people: String,
    /// "21" is virtual account transfer
    pub payment_method: String,
    pub policy: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "target", rename_all = "kebab-case")]
pub enum ReservationRequest {
    ZeroWorld(ZeroWorldRequest),
    EarthEscape(EarthEscapeRequest),
}

impl ReservationRequest {
    pub fn target(&self) -> Target {
        match self {
            ReservationRequest::ZeroWorld(_) => Target::ZeroWorld,
            ReservationRequest::EarthEscape(_) => Target::EarthEscape,
        }
    }
}

impl From<ZeroWorldRequest> for ReservationRequest {
    fn from(request: ZeroWorldRequest) -> Self {
        ReservationRequest::ZeroWorld(request)
    }
}

impl From<EarthEscapeRequest> for ReservationRequest {
    fn from(request: EarthEscapeRequest) -> Self {
        ReservationRequest::EarthEscape(request)
    }
}

/// Hyphenate a Korean phone number the way the booking pages display it.
///
/// Non-digits are dropped first: `01012345678` -> `010-1234-5678`,
/// `0212345678` -> `021-234-5678`. Digits past the eleventh are ignored.
pub fn format_phone_number(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    let len = digits.len();
    if len <= 3 {
        digits
    } else if len <= 7 {
        format!("{}-{}", &digits[..3], &digits[3..])
    } else if len <= 10 {
        format!("{}-{}-{}", &digits[..3], &digits[3..6], &digits[6..])
    } else {
        format!("{}-{}-{}", &digits[..3], &digits[3..7], &digits[7..11])
    }
}

const KST_OFFSET_SECS: i32 = 9 * 60 * 60;

/// Convert a Unix timestamp in seconds to `HH:MM:SS` wall-clock time in Korea.
pub fn time_from_unix_timestamp(timestamp: &str) -> Result<String> {
    let timestamp = timestamp.trim();
    if timestamp.is_empty() {
        bail!("Timestamp is empty");
    }
    let epoch_secs: i64 = timestamp
        .parse()
        .with_context(|| format!("Invalid timestamp: {}", timestamp))?;
    let kst = FixedOffset::east_opt(KST_OFFSET_SECS).context("KST offset out of range")?;
    let local = kst
        .timestamp_opt(epoch_secs, 0)
        .single()
        .with_context(|| format!("Timestamp out of range: {}", epoch_secs))?;
    Ok(local.format("%H:%M:%S").to_string())
}
