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

use serde::{Deserialize, Serialize};

use crate::error::{FailureKind, SubmissionError};

pub const SUCCESS_MESSAGE: &str = "예약이 완료되었습니다.";

/// Prefix of every failure that did not come from the site's own error message
pub const ERROR_PREFIX: &str = "예약 중 오류가 발생했습니다: ";

/// Result of one reservation attempt. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Success {
        message: String,
        /// No supported site exposes one in its response yet
        reservation_id: Option<String>,
    },
    Failure {
        message: String,
        kind: FailureKind,
    },
}

impl SubmissionOutcome {
    pub fn from_error(err: &SubmissionError) -> Self {
        SubmissionOutcome::Failure {
            message: format!("{ERROR_PREFIX}{err}"),
            kind: err.kind(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionOutcome::Success { .. })
    }

    pub fn message(&self) -> &str {
        match self {
            SubmissionOutcome::Success { message, .. } => message,
            SubmissionOutcome::Failure { message, .. } => message,
        }
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            SubmissionOutcome::Success { .. } => None,
            SubmissionOutcome::Failure { kind, .. } => Some(*kind),
        }
    }

    pub fn to_api_response(&self) -> ReservationResponse {
        match self {
            SubmissionOutcome::Success {
                message,
                reservation_id,
            } => ReservationResponse {
                success: true,
                message: message.clone(),
                reservation_id: reservation_id.clone(),
                failure_kind: None,
            },
            SubmissionOutcome::Failure { message, kind } => ReservationResponse {
                success: false,
                message: message.clone(),
                reservation_id: None,
                failure_kind: Some(*kind),
            },
        }
    }
}

/// Wire shape of an outcome, as the booking API returns it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResponse {
    pub success: bool,
    pub message: String,
    pub reservation_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_kind: Option<FailureKind>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_share_one_prefix() {
        let outcome = SubmissionOutcome::from_error(&SubmissionError::TokenNotFound);
        assert_eq!(
            outcome.message(),
            "예약 중 오류가 발생했습니다: CSRF 토큰을 찾을 수 없습니다."
        );
        assert_eq!(outcome.failure_kind(), Some(FailureKind::TokenNotFound));
        assert!(!outcome.is_success());
    }

    #[test]
    fn api_response_json() {
        let ok = SubmissionOutcome::Success {
            message: SUCCESS_MESSAGE.into(),
            reservation_id: None,
        };
        let json = serde_json::to_value(ok.to_api_response()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"success": true, "message": SUCCESS_MESSAGE, "reservationId": null})
        );

        let failed = SubmissionOutcome::Failure {
            message: "이미 예약된 시간입니다.".into(),
            kind: FailureKind::NonSuccessStatus,
        };
        let json = serde_json::to_value(failed.to_api_response()).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["failureKind"], "non_success_status");
    }
}
