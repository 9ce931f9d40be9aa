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

//! Property checks for session scraping and response classification.
//!
//! - Any well-formed csrf-token meta yields exactly its content
//! - Malformed or hostile pages fail with TokenNotFound, never panic
//! - Cookie headers keep one `name=value` per Set-Cookie, in order
//! - Classification is deterministic
//!
//! Run with:
//!     cargo test --test t_token_and_cookie_properties

use escape_reservation_agent::{
    FailureKind, SubmissionError, build_cookie_header, classify, extract_csrf_token,
};

/// Tokens shaped like the ones Laravel hands out, plus edge characters.
const TOKENS: &[&str] = &[
    "abc123",
    "x",
    "Zk9mR2pTQnV4eWx0b2tlbg",
    "a+b/c=",
    "토큰",
    "0123456789012345678901234567890123456789",
];

#[test]
fn test_token_roundtrips_through_meta() {
    for token in TOKENS {
        for page in [
            format!(r#"<meta name="csrf-token" content="{token}">"#),
            format!(r#"<head><meta name="csrf-token" content="{token}" /></head>"#),
            format!(r#"<meta name="csrf-token" id="csrf" data-x="1" content="{token}">"#),
            format!("<html>\n<head>\n  <meta name=\"csrf-token\" content=\"{token}\">\n</head>"),
        ] {
            let extracted = extract_csrf_token(&page).expect("token should be found");
            assert_eq!(&extracted, token, "page: {}", page);
        }
    }
    println!("{} tokens x 4 layouts extracted - OK", TOKENS.len());
}

#[test]
fn test_malformed_pages_never_panic() {
    let long_garbage = "<meta ".repeat(10_000);
    let pages: Vec<String> = vec![
        String::new(),
        "<".into(),
        r#"<meta name="csrf-token">"#.into(),
        r#"<meta name="csrf-token" content="">"#.into(),
        r#"<meta name="csrf-token" content="unterminated"#.into(),
        r#"<meta name="csrf" content="abc">"#.into(),
        r#"<meta content="abc" name="csrf-token">"#.into(),
        "\u{0000}\u{FFFD}한글".into(),
        "<meta name=\"csrf-token\" content=\"ab\ncd\">".into(),
        "<meta name=\"csrf-token\" content=\"ab\tcd\">".into(),
        long_garbage,
    ];
    for page in &pages {
        let result = extract_csrf_token(page);
        assert!(
            matches!(result, Err(SubmissionError::TokenNotFound)),
            "expected TokenNotFound for {:?}, got {:?}",
            &page.chars().take(60).collect::<String>(),
            result
        );
    }
}

#[test]
fn test_cookie_header_has_one_segment_per_cookie() {
    let cases: &[&[&str]] = &[
        &["sess=1; Path=/"],
        &["XSRF-TOKEN=eyJpdiI6; expires=Thu, 04-Dec-2025 12:00:00 GMT; Max-Age=7200; path=/; samesite=lax"],
        &["a=1", "b=2; HttpOnly", "c=3; Secure; Path=/"],
        &["dup=1; Path=/", "dup=2; Path=/"],
        &["empty=; Path=/", "flag"],
    ];
    for raw in cases {
        let header = build_cookie_header(raw.iter()).expect("non-empty input gives a header");
        let segments: Vec<&str> = header.split("; ").collect();
        assert_eq!(segments.len(), raw.len(), "header: {}", header);
        for (segment, cookie) in segments.iter().zip(raw.iter()) {
            let expected = cookie.split(';').next().unwrap_or_default();
            assert_eq!(*segment, expected);
        }
    }
}

#[test]
fn test_no_cookies_no_header() {
    assert_eq!(build_cookie_header(Vec::<String>::new()), None);
}

#[test]
fn test_classification_is_deterministic() {
    let bodies = [
        "",
        r#"{"ok":true}"#,
        r#"{"message":"이미 예약된 시간입니다."}"#,
        r#"{"message":["a","b"]}"#,
        r#"{"errors":{}}"#,
        "<!DOCTYPE html><title>Page Expired</title>",
        "null",
    ];
    for body in bodies {
        for accepted in [true, false] {
            for cap in [0, 5, 500] {
                let first = classify(accepted, body, cap);
                let second = classify(accepted, body, cap);
                assert_eq!(first, second);
                assert_eq!(first.is_success(), accepted);
            }
        }
    }
}

#[test]
fn test_failure_kinds_by_body_shape() {
    let json = classify(false, r#"{"errors":{}}"#, 500);
    assert_eq!(json.failure_kind(), Some(FailureKind::NonSuccessStatus));

    let html = classify(false, "<h1>419</h1>", 500);
    assert_eq!(html.failure_kind(), Some(FailureKind::MalformedErrorBody));

    let non_string = classify(false, r#"{"message":["a","b"]}"#, 500);
    assert_eq!(non_string.message(), r#"["a","b"]"#);
}
