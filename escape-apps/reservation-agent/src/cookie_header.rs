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

//! Cookie header replay: `Set-Cookie` values from the priming page are sent
//! back verbatim as `name=value` pairs, attributes dropped.

use wreq::header::{HeaderMap, SET_COOKIE};

/// Every `Set-Cookie` value of a response, in server order.
pub fn collect_set_cookies(headers: &HeaderMap) -> Vec<String> {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| match value.to_str() {
            Ok(s) => Some(s.to_string()),
            Err(_) => {
                tracing::debug!("Skipping non-ASCII Set-Cookie value ({} bytes)", value.len());
                None
            }
        })
        .collect()
}

/// Build a `Cookie` request header from raw `Set-Cookie` values.
///
/// Keeps what precedes the first `;` of each value and joins the pairs with `"; "`.
/// Repeated names are all carried through.
///
/// ## Returns
///
/// `None` when there is no cookie at all.
pub fn build_cookie_header<I, S>(set_cookies: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let pairs: Vec<String> = set_cookies
        .into_iter()
        .map(|raw| {
            let raw = raw.as_ref();
            raw.split(';').next().unwrap_or(raw).to_string()
        })
        .collect();

    if pairs.is_empty() {
        None
    } else {
        Some(pairs.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wreq::header::HeaderValue;

    #[test]
    fn drops_attributes() {
        let header = build_cookie_header([
            "XSRF-TOKEN=eyJpdiI6; expires=Thu, 04-Dec-2025 12:00:00 GMT; Max-Age=7200; path=/; samesite=lax",
            "laravel_session=eyJpdiI6Ik; expires=Thu, 04-Dec-2025 12:00:00 GMT; path=/; httponly",
        ]);
        assert_eq!(
            header.as_deref(),
            Some("XSRF-TOKEN=eyJpdiI6; laravel_session=eyJpdiI6Ik")
        );
    }

    #[test]
    fn keeps_repeats_in_order() {
        let header = build_cookie_header(vec!["a=1; Path=/", "b=2", "a=3; HttpOnly"]);
        assert_eq!(header.as_deref(), Some("a=1; b=2; a=3"));
    }

    #[test]
    fn empty_input_is_none() {
        assert_eq!(build_cookie_header(Vec::<String>::new()), None);
    }

    #[test]
    fn collects_all_set_cookie_values() {
        let mut headers = HeaderMap::new();
        headers.append(SET_COOKIE, HeaderValue::from_static("sess=1; Path=/"));
        headers.append(SET_COOKIE, HeaderValue::from_static("theme=dark"));
        headers.append("content-type", HeaderValue::from_static("text/html"));

        assert_eq!(
            collect_set_cookies(&headers),
            vec!["sess=1; Path=/".to_string(), "theme=dark".to_string()]
        );
    }
}
