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

//! # CSRF Token Extraction
//!
//! Side-effect free lookup of the anti-forgery token that Laravel-style
//! booking pages render as `<meta name="csrf-token" ... content="...">`.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::SubmissionError;

static CSRF_META: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<meta name="csrf-token"[^>]*content="([^"]+)""#).expect("static csrf pattern")
});

/// Returns the first csrf-token meta value of `html`.
///
/// A missing marker, one with an empty `content`, or one whose value could not
/// travel in a request header (control characters) is [`SubmissionError::TokenNotFound`].
pub fn extract_csrf_token(html: &str) -> Result<String, SubmissionError> {
    CSRF_META
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|token| !token.chars().any(char::is_control))
        .map(str::to_string)
        .ok_or(SubmissionError::TokenNotFound)
}
