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

//! # Zero World Hongdae
//!
//! Theme pages live at `/reservation/{themeId}`; the booking form is posted as
//! an XHR with the CSRF token in `X-CSRF-TOKEN` and answered with JSON.
//! Only HTTP 200 means booked.

use crate::adapter::{
    JSON_ACCEPT, ReservationAdapter, TokenPlacement, consent_given, policy_value, require_date,
    require_text, require_time, trim_base_url,
};
use crate::error::SubmissionError;
use crate::reservation_request::{Target, ZeroWorldRequest};

pub const ZERO_WORLD_BASE_URL: &str = "https://zerohongdae.com";

const RESERVATION_PATH: &str = "/reservation";

#[derive(Debug, Clone)]
pub struct ZeroWorldAdapter {
    base_url: String,
}

impl Default for ZeroWorldAdapter {
    fn default() -> Self {
        Self::new(ZERO_WORLD_BASE_URL)
    }
}

impl ZeroWorldAdapter {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: trim_base_url(base_url),
        }
    }
}

impl ReservationAdapter for ZeroWorldAdapter {
    type Request = ZeroWorldRequest;

    fn target(&self) -> Target {
        Target::ZeroWorld
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn listing_url(&self, request: &ZeroWorldRequest) -> String {
        format!(
            "{}{}/{}",
            self.base_url,
            RESERVATION_PATH,
            urlencoding::encode(request.theme_id.trim())
        )
    }

    fn submission_url(&self) -> String {
        format!("{}{}", self.base_url, RESERVATION_PATH)
    }

    fn referer(&self, _request: &ZeroWorldRequest) -> String {
        self.submission_url()
    }

    fn accept(&self) -> &'static str {
        JSON_ACCEPT
    }

    fn token_placement(&self) -> TokenPlacement {
        TokenPlacement::Header("X-CSRF-TOKEN")
    }

    fn extra_headers(&self) -> Vec<(&'static str, String)> {
        vec![("X-Requested-With", "XMLHttpRequest".to_string())]
    }

    fn success_statuses(&self) -> &'static [u16] {
        &[200]
    }

    fn check_eligibility(&self, request: &ZeroWorldRequest) -> Result<(), SubmissionError> {
        consent_given(request.policy)?;
        require_text("themeId", &request.theme_id)?;
        require_text("name", &request.name)?;
        require_text("phone", &request.phone)?;
        require_text("paymentType", &request.payment_type)?;
        require_date("reservationDate", &request.reservation_date)?;
        require_time("reservationTime", &request.reservation_time, "%H:%M:%S")?;
        if request.people == 0 {
            return Err(SubmissionError::InvalidRequest(
                "people must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    fn form_fields(&self, request: &ZeroWorldRequest) -> Vec<(&'static str, String)> {
        vec![
            ("themePK", request.theme_id.trim().to_string()),
            ("name", request.name.clone()),
            ("phone", request.phone.clone()),
            ("people", request.people.to_string()),
            ("paymentType", request.payment_type.clone()),
            ("policy", policy_value(request.policy)),
            ("reservationDate", request.reservation_date.clone()),
            ("reservationTime", request.reservation_time.clone()),
        ]
    }
}
