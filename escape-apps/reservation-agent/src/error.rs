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

//! # Submission Errors
//!
//! Everything that can stop a reservation attempt before the target site
//! answers the form post. Rejections by the site itself are not errors: they
//! are classified into a [`crate::SubmissionOutcome`].

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("서버로부터 응답을 받지 못했습니다: {0}")]
    Transport(#[from] wreq::Error),
    #[error("CSRF 토큰을 찾을 수 없습니다.")]
    TokenNotFound,
    #[error("개인정보 처리방침에 동의해주세요.")]
    ConsentRequired,
    #[error("잘못된 예약 요청입니다: {0}")]
    InvalidRequest(String),
    #[error("예약 요청이 {0:?} 안에 완료되지 않았습니다.")]
    Timeout(Duration),
    #[error("예약 요청을 더 이상 받을 수 없습니다.")]
    GateClosed,
}

impl SubmissionError {
    pub fn kind(&self) -> FailureKind {
        match self {
            SubmissionError::Transport(_) => FailureKind::Transport,
            SubmissionError::TokenNotFound => FailureKind::TokenNotFound,
            SubmissionError::ConsentRequired => FailureKind::ConsentRequired,
            SubmissionError::InvalidRequest(_) => FailureKind::InvalidRequest,
            SubmissionError::Timeout(_) => FailureKind::Timeout,
            SubmissionError::GateClosed => FailureKind::GateClosed,
        }
    }
}

/// Machine-readable cause of a failed submission.
///
/// `NonSuccessStatus` and `MalformedErrorBody` come from response
/// classification; the rest mirror [`SubmissionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Transport,
    TokenNotFound,
    NonSuccessStatus,
    MalformedErrorBody,
    ConsentRequired,
    InvalidRequest,
    Timeout,
    GateClosed,
}

impl FailureKind {
    pub fn as_str_name(&self) -> &'static str {
        match self {
            FailureKind::Transport => "transport",
            FailureKind::TokenNotFound => "token_not_found",
            FailureKind::NonSuccessStatus => "non_success_status",
            FailureKind::MalformedErrorBody => "malformed_error_body",
            FailureKind::ConsentRequired => "consent_required",
            FailureKind::InvalidRequest => "invalid_request",
            FailureKind::Timeout => "timeout",
            FailureKind::GateClosed => "gate_closed",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_follows_variant() {
        assert_eq!(SubmissionError::TokenNotFound.kind(), FailureKind::TokenNotFound);
        assert_eq!(
            SubmissionError::InvalidRequest("date".into()).kind(),
            FailureKind::InvalidRequest
        );
        assert_eq!(
            SubmissionError::Timeout(Duration::from_secs(1)).kind(),
            FailureKind::Timeout
        );
    }

    #[test]
    fn kind_serializes_snake_case() {
        let json = serde_json::to_string(&FailureKind::MalformedErrorBody).unwrap();
        assert_eq!(json, "\"malformed_error_body\"");
        assert_eq!(FailureKind::NonSuccessStatus.to_string(), "non_success_status");
    }
}
