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

//! # Earth Escape
//!
//! A plain Laravel form: the CSRF token rides along as the hidden `_token`
//! field and a successful booking redirects (302) to the confirmation page.

use crate::adapter::{
    HTML_ACCEPT, ReservationAdapter, TokenPlacement, consent_given, policy_value, require_date,
    require_text, require_time, trim_base_url,
};
use crate::catalog::earth_escape_theme;
use crate::error::SubmissionError;
use crate::reservation_request::{EarthEscapeRequest, Target};

/// 지구별방탈출.com
pub const EARTH_ESCAPE_BASE_URL: &str = "https://www.xn--2e0b040a4xj.com";

const RESERVATION_PATH: &str = "/reservation";

#[derive(Debug, Clone)]
pub struct EarthEscapeAdapter {
    base_url: String,
}

impl Default for EarthEscapeAdapter {
    fn default() -> Self {
        Self::new(EARTH_ESCAPE_BASE_URL)
    }
}

impl EarthEscapeAdapter {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: trim_base_url(base_url),
        }
    }
}

impl ReservationAdapter for EarthEscapeAdapter {
    type Request = EarthEscapeRequest;

    fn target(&self) -> Target {
        Target::EarthEscape
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn listing_url(&self, _request: &EarthEscapeRequest) -> String {
        format!("{}{}", self.base_url, RESERVATION_PATH)
    }

    fn submission_url(&self) -> String {
        format!("{}{}", self.base_url, RESERVATION_PATH)
    }

    fn referer(&self, request: &EarthEscapeRequest) -> String {
        self.listing_url(request)
    }

    fn accept(&self) -> &'static str {
        HTML_ACCEPT
    }

    fn token_placement(&self) -> TokenPlacement {
        TokenPlacement::FormField("_token")
    }

    fn success_statuses(&self) -> &'static [u16] {
        &[200, 302]
    }

    fn check_eligibility(&self, request: &EarthEscapeRequest) -> Result<(), SubmissionError> {
        consent_given(request.policy)?;
        require_text("branch", &request.branch)?;
        require_text("theme", &request.theme)?;
        require_text("name", &request.name)?;
        require_text("phone", &request.phone)?;
        require_text("people", &request.people)?;
        require_text("paymentMethod", &request.payment_method)?;
        require_date("date", &request.date)?;
        require_time("time", &request.time, "%H:%M")?;

        if let Some(theme) = earth_escape_theme(&request.theme) {
            if theme.branch != request.branch.trim() {
                return Err(SubmissionError::InvalidRequest(format!(
                    "theme {} ({}) belongs to branch {}, not {}",
                    theme.id, theme.name, theme.branch, request.branch
                )));
            }
        }
        Ok(())
    }

    fn form_fields(&self, request: &EarthEscapeRequest) -> Vec<(&'static str, String)> {
        vec![
            ("branch", request.branch.trim().to_string()),
            ("theme", request.theme.trim().to_string()),
            ("date", request.date.clone()),
            ("time", request.time.clone()),
            ("name", request.name.clone()),
            ("phone", request.phone.clone()),
            ("people", request.people.clone()),
            ("payment_method", request.payment_method.clone()),
            ("policy", policy_value(request.policy)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionContext;

    fn request() -> EarthEscapeRequest {
        EarthEscapeRequest {
            branch: "2".into(),
            theme: "18".into(),
            date: "2025-12-04".into(),
            time: "20:10".into(),
            name: "홍길동".into(),
            phone: "010-1234-5678".into(),
            people: "4".into(),
            payment_method: "21".into(),
            policy: true,
        }
    }

    #[test]
    fn token_travels_as_last_field() {
        let session = SessionContext {
            page_body: String::new(),
            cookie_header: None,
            csrf_token: "tok".into(),
        };
        let form = EarthEscapeAdapter::default().build_form(&request(), &session);

        assert_eq!(form.fields.last(), Some(&("_token", "tok".to_string())));
        assert_eq!(form.field("payment_method"), Some("21"));
        assert_eq!(form.header("X-CSRF-TOKEN"), None);
        assert_eq!(form.header("X-Requested-With"), None);
        assert_eq!(form.header("Cookie"), Some(""));
        assert_eq!(form.header("Referer"), Some("https://www.xn--2e0b040a4xj.com/reservation"));
        assert_eq!(form.header("Accept"), Some(HTML_ACCEPT));
        assert_eq!(form.url, "https://www.xn--2e0b040a4xj.com/reservation");
    }

    #[test]
    fn posted_ids_are_trimmed() {
        let session = SessionContext {
            page_body: String::new(),
            cookie_header: None,
            csrf_token: "tok".into(),
        };
        let padded = EarthEscapeRequest { branch: " 2".into(), theme: "18 ".into(), ..request() };
        let adapter = EarthEscapeAdapter::default();
        assert!(adapter.check_eligibility(&padded).is_ok());
        let form = adapter.build_form(&padded, &session);
        assert_eq!(form.field("branch"), Some("2"));
        assert_eq!(form.field("theme"), Some("18"));
    }

    #[test]
    fn redirect_counts_as_success() {
        let adapter = EarthEscapeAdapter::default();
        assert!(adapter.classify_success(200));
        assert!(adapter.classify_success(302));
        assert!(!adapter.classify_success(301));
        assert!(!adapter.classify_success(419));
    }

    #[test]
    fn theme_must_match_branch_when_known() {
        let adapter = EarthEscapeAdapter::default();
        let wrong_branch = EarthEscapeRequest { branch: "1".into(), ..request() };
        assert!(matches!(
            adapter.check_eligibility(&wrong_branch),
            Err(SubmissionError::InvalidRequest(_))
        ));

        let unknown_theme = EarthEscapeRequest { theme: "99".into(), branch: "4".into(), ..request() };
        assert!(adapter.check_eligibility(&unknown_theme).is_ok());
    }

    #[test]
    fn consent_is_checked_first() {
        let request = EarthEscapeRequest { policy: false, name: String::new(), ..request() };
        assert!(matches!(
            EarthEscapeAdapter::default().check_eligibility(&request),
            Err(SubmissionError::ConsentRequired)
        ));
    }
}
