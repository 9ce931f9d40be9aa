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

// Library for escape-reservation-agent
// Replays the browser booking flow of escape-room sites (GET page, POST form)

mod adapter;
pub mod catalog;
mod config;
mod cookie_header;
mod csrf_token;
mod earth_escape_adapter;
mod error;
mod outcome;
mod reservation_engine;
mod reservation_request;
mod response_classifier;
mod session;
mod zero_world_adapter;

pub use adapter::{
    DESKTOP_USER_AGENT, FORM_CONTENT_TYPE, FormSubmission, HTML_ACCEPT, JSON_ACCEPT,
    ReservationAdapter, TokenPlacement,
};
pub use config::EngineConfig;
pub use cookie_header::{build_cookie_header, collect_set_cookies};
pub use csrf_token::extract_csrf_token;
pub use earth_escape_adapter::{EARTH_ESCAPE_BASE_URL, EarthEscapeAdapter};
pub use error::{FailureKind, SubmissionError};
pub use outcome::{ReservationResponse, SUCCESS_MESSAGE, SubmissionOutcome};
pub use reservation_engine::ReservationEngine;
pub use reservation_request::{
    EarthEscapeRequest, ReservationRequest, Target, ZeroWorldRequest, format_phone_number,
    time_from_unix_timestamp,
};
pub use response_classifier::{body_preview, classify, extract_reservation_id};
pub use session::SessionContext;
pub use zero_world_adapter::{ZERO_WORLD_BASE_URL, ZeroWorldAdapter};
