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

//! # Response Classifier
//!
//! Side-effect free mapping of a form post answer to a [`SubmissionOutcome`].
//! Sites report rejections as `{"message": "..."}`; anything else is echoed
//! back, capped, behind a generic prefix.

use serde_json::Value;

use crate::error::FailureKind;
use crate::outcome::{SUCCESS_MESSAGE, SubmissionOutcome};

const REJECTED_PREFIX: &str = "예약 실패: ";

/// Classify a form post answer.
///
/// `accepted` is the adapter's verdict on the status code. Pure and idempotent.
pub fn classify(accepted: bool, body: &str, max_body_chars: usize) -> SubmissionOutcome {
    if accepted {
        return SubmissionOutcome::Success {
            message: SUCCESS_MESSAGE.to_string(),
            reservation_id: extract_reservation_id(body),
        };
    }

    match serde_json::from_str::<Value>(body) {
        Ok(json) => match json.get("message") {
            Some(Value::String(message)) => SubmissionOutcome::Failure {
                message: message.clone(),
                kind: FailureKind::NonSuccessStatus,
            },
            Some(other) => SubmissionOutcome::Failure {
                message: other.to_string(),
                kind: FailureKind::NonSuccessStatus,
            },
            None => SubmissionOutcome::Failure {
                message: format!("{REJECTED_PREFIX}{}", body_preview(body, max_body_chars)),
                kind: FailureKind::NonSuccessStatus,
            },
        },
        Err(e) => {
            tracing::debug!("Error body is not JSON: {}", e);
            SubmissionOutcome::Failure {
                message: format!("{REJECTED_PREFIX}{}", body_preview(body, max_body_chars)),
                kind: FailureKind::MalformedErrorBody,
            }
        }
    }
}

/// Reservation id of a successful booking.
///
/// Neither supported site returns a parseable id (Zero World answers a bare
/// JSON ack, Earth Escape a redirect), so this is always `None` for now.
pub fn extract_reservation_id(_body: &str) -> Option<String> {
    None
}

/// First `max_chars` characters of `body`, with `…` when cut.
pub fn body_preview(body: &str, max_chars: usize) -> String {
    let mut chars = body.chars();
    let preview: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{preview}…")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_has_fixed_message_and_no_id() {
        let outcome = classify(true, r#"{"ok":true}"#, 500);
        assert_eq!(
            outcome,
            SubmissionOutcome::Success {
                message: "예약이 완료되었습니다.".into(),
                reservation_id: None
            }
        );
    }

    #[test]
    fn json_message_is_used_verbatim() {
        let outcome = classify(false, r#"{"message":"이미 예약된 시간입니다."}"#, 500);
        assert_eq!(outcome.message(), "이미 예약된 시간입니다.");
        assert_eq!(outcome.failure_kind(), Some(FailureKind::NonSuccessStatus));
    }

    #[test]
    fn json_without_message_embeds_body() {
        let outcome = classify(false, r#"{"errors":{"phone":["required"]}}"#, 500);
        assert_eq!(outcome.message(), r#"예약 실패: {"errors":{"phone":["required"]}}"#);
    }

    #[test]
    fn html_body_is_malformed_and_capped() {
        let body = format!("<html>{}</html>", "가".repeat(1000));
        let outcome = classify(false, &body, 20);
        let SubmissionOutcome::Failure { message, kind } = outcome else {
            panic!("expected failure");
        };
        assert_eq!(kind, FailureKind::MalformedErrorBody);
        assert!(message.starts_with("예약 실패: <html>가가"));
        assert!(message.ends_with('…'));
        assert_eq!(message.chars().count(), "예약 실패: ".chars().count() + 20 + 1);
    }

    #[test]
    fn empty_rejection_body() {
        let outcome = classify(false, "", 500);
        assert_eq!(outcome.message(), "예약 실패: ");
        assert_eq!(outcome.failure_kind(), Some(FailureKind::MalformedErrorBody));
    }

    #[test]
    fn idempotent() {
        for (accepted, body) in [
            (true, ""),
            (false, r#"{"message":"x"}"#),
            (false, "<h1>419 Page Expired</h1>"),
            (false, r#"{"message":42}"#),
        ] {
            assert_eq!(classify(accepted, body, 8), classify(accepted, body, 8));
        }
    }

    #[test]
    fn preview_short_body_untouched() {
        assert_eq!(body_preview("short", 10), "short");
        assert_eq!(body_preview("exactly10!", 10), "exactly10!");
        assert_eq!(body_preview("elevenchars", 10), "elevenchar…");
    }
}
