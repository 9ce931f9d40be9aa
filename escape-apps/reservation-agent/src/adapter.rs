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

//! # Reservation Adapters
//!
//! One adapter per booking site. An adapter is static knowledge about a site:
//! where its pages live, what its form post looks like, where the CSRF token
//! goes and which status codes mean "booked". It performs no I/O; the engine
//! drives the GET/POST pair.

use chrono::{NaiveDate, NaiveTime};

use crate::error::SubmissionError;
use crate::reservation_request::Target;
use crate::session::SessionContext;

// =============================================================================
// Browser Headers
// =============================================================================

/// Desktop Safari, matching the TLS/HTTP2 fingerprint the client emulates
pub const DESKTOP_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/18.5 Safari/605.1.15";

pub const HTML_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

pub const JSON_ACCEPT: &str = "application/json, text/javascript, */*; q=0.01";

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

// =============================================================================
// Form Submission
// =============================================================================

/// Where a site expects the CSRF token on the form post
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenPlacement {
    Header(&'static str),
    FormField(&'static str),
}

/// A fully rendered form post: ordered fields and request headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmission {
    pub url: String,
    pub fields: Vec<(&'static str, String)>,
    pub headers: Vec<(&'static str, String)>,
}

impl FormSubmission {
    /// `application/x-www-form-urlencoded` body, fields in declaration order
    pub fn encode_body(&self) -> String {
        self.fields
            .iter()
            .map(|(name, value)| {
                format!("{}={}", urlencoding::encode(name), urlencoding::encode(value))
            })
            .collect::<Vec<_>>()
            .join("&")
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

// =============================================================================
// Adapter Trait
// =============================================================================

pub trait ReservationAdapter: Send + Sync {
    type Request: Send + Sync;

    fn target(&self) -> Target;

    /// Scheme and host, no trailing slash
    fn base_url(&self) -> &str;

    /// Page whose GET hands out the session cookies and CSRF token
    fn listing_url(&self, request: &Self::Request) -> String;

    fn submission_url(&self) -> String;

    fn referer(&self, request: &Self::Request) -> String;

    fn accept(&self) -> &'static str;

    fn token_placement(&self) -> TokenPlacement;

    /// Site-specific headers beyond the common browser set
    fn extra_headers(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    /// Status codes the site answers a successful booking with
    fn success_statuses(&self) -> &'static [u16];

    /// Reject requests the site would refuse anyway, before any network traffic.
    fn check_eligibility(&self, request: &Self::Request) -> Result<(), SubmissionError>;

    /// The site's form fields, in the order its own page posts them
    fn form_fields(&self, request: &Self::Request) -> Vec<(&'static str, String)>;

    fn build_form(&self, request: &Self::Request, session: &SessionContext) -> FormSubmission {
        let mut fields = self.form_fields(request);
        let mut headers = vec![
            ("User-Agent", DESKTOP_USER_AGENT.to_string()),
            ("Accept", self.accept().to_string()),
        ];

        match self.token_placement() {
            TokenPlacement::Header(name) => headers.push((name, session.csrf_token.clone())),
            TokenPlacement::FormField(name) => fields.push((name, session.csrf_token.clone())),
        }
        headers.extend(self.extra_headers());
        headers.push(("Referer", self.referer(request)));
        headers.push(("Origin", self.base_url().to_string()));
        headers.push((
            "Cookie",
            session.cookie_header.clone().unwrap_or_default(),
        ));

        FormSubmission {
            url: self.submission_url(),
            fields,
            headers,
        }
    }

    fn classify_success(&self, status: u16) -> bool {
        self.success_statuses().contains(&status)
    }
}

// =============================================================================
// Shared Request Checks
// =============================================================================

pub(crate) fn consent_given(policy: bool) -> Result<(), SubmissionError> {
    if policy {
        Ok(())
    } else {
        Err(SubmissionError::ConsentRequired)
    }
}

pub(crate) fn policy_value(policy: bool) -> String {
    if policy { "on".to_string() } else { String::new() }
}

pub(crate) fn require_text(field: &str, value: &str) -> Result<(), SubmissionError> {
    if value.trim().is_empty() {
        return Err(SubmissionError::InvalidRequest(format!("{field} is required")));
    }
    Ok(())
}

pub(crate) fn require_date(field: &str, value: &str) -> Result<NaiveDate, SubmissionError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        SubmissionError::InvalidRequest(format!("{field} must be YYYY-MM-DD, got {value:?}"))
    })
}

pub(crate) fn require_time(
    field: &str,
    value: &str,
    format: &str,
) -> Result<NaiveTime, SubmissionError> {
    NaiveTime::parse_from_str(value, format).map_err(|_| {
        SubmissionError::InvalidRequest(format!("{field} must match {format}, got {value:?}"))
    })
}

pub(crate) fn trim_base_url(base_url: impl Into<String>) -> String {
    base_url.into().trim_end_matches('/').to_string()
}
