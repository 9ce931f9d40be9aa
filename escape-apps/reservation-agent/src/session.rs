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

//! # Session Acquisition
//!
//! Effectful (network) priming GET that captures what the booking form post
//! needs: session cookies and the page's CSRF token.

use wreq::header::{ACCEPT, USER_AGENT};

use crate::adapter::{DESKTOP_USER_AGENT, HTML_ACCEPT};
use crate::cookie_header::{build_cookie_header, collect_set_cookies};
use crate::csrf_token::extract_csrf_token;
use crate::error::SubmissionError;

/// Session state scraped from one listing page.
///
/// Built once per submission attempt and never shared between attempts:
/// the token and cookies are single-use from the target's point of view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub page_body: String,
    pub cookie_header: Option<String>,
    pub csrf_token: String,
}

impl SessionContext {
    /// Side-effect free assembly from an already fetched page.
    pub fn from_page<I, S>(page_body: String, set_cookies: I) -> Result<Self, SubmissionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let csrf_token = extract_csrf_token(&page_body)?;
        let cookie_header = build_cookie_header(set_cookies);
        Ok(Self {
            page_body,
            cookie_header,
            csrf_token,
        })
    }

    /// GET `listing_url` and capture its session state.
    pub async fn acquire(
        client: &wreq::Client,
        listing_url: &str,
    ) -> Result<Self, SubmissionError> {
        let fetch_start = std::time::Instant::now();
        tracing::info!("Acquiring booking session from {}", listing_url);

        let response = client
            .get(listing_url)
            .header(USER_AGENT, DESKTOP_USER_AGENT)
            .header(ACCEPT, HTML_ACCEPT)
            .send()
            .await?;

        let status = response.status();
        let set_cookies = collect_set_cookies(response.headers());
        let body = response.text().await?;
        tracing::debug!(
            "[acquire] HTTP {} in {:?}: {} KB, {} cookie(s)",
            status.as_u16(),
            fetch_start.elapsed(),
            body.len() / 1024,
            set_cookies.len()
        );

        let session = Self::from_page(body, set_cookies).inspect_err(|_| {
            tracing::warn!(
                "No csrf-token meta on {} (HTTP {}) - page layout changed or session rejected",
                listing_url,
                status.as_u16()
            );
        })?;
        tracing::debug!(
            "[acquire] CSRF token: {}, Cookie: {:?}",
            session.csrf_token,
            session.cookie_header
        );
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assembles_token_and_cookies() {
        let html = r#"<meta name="csrf-token" content="abc123">"#.to_string();
        let session = SessionContext::from_page(html, ["sess=1; Path=/"]).unwrap();
        assert_eq!(session.csrf_token, "abc123");
        assert_eq!(session.cookie_header.as_deref(), Some("sess=1"));
    }

    #[test]
    fn no_cookies_still_yields_session() {
        let html = r#"<meta name="csrf-token" content="t">"#.to_string();
        let session = SessionContext::from_page(html, Vec::<String>::new()).unwrap();
        assert_eq!(session.cookie_header, None);
    }

    #[test]
    fn missing_token_fails() {
        let result = SessionContext::from_page("<html></html>".to_string(), ["sess=1"]);
        assert!(matches!(result, Err(SubmissionError::TokenNotFound)));
    }
}
