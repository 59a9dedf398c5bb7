// Playgate - Offer-gated streaming content toolkit
// Copyright (C) 2025 Playgate contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.


//! JSONP callback naming and payload unwrapping
//!
//! The offer network serves `callback_name([...])` bodies. We generate a
//! fresh callback name per request (the servers key their response cache on
//! it) and strip the wrapper before JSON parsing. Servers occasionally
//! ignore the parameter and return bare JSON; that passes through unchanged.

use chrono::Utc;
use rand::Rng;

use crate::error::{PlaygateError, Result};

/// Generate a unique callback name with the given prefix.
///
/// Shape: `<prefix>_<unix_millis>_<4 hex digits>`.
pub fn callback_name(prefix: &str) -> String {
    let suffix: u16 = rand::thread_rng().gen();
    format!("{}_{}_{:04x}", prefix, Utc::now().timestamp_millis(), suffix)
}

/// Strip a JSONP wrapper from a response body.
///
/// Accepts `cb(payload)`, `cb(payload);`, surrounding whitespace, and bare
/// JSON (returned as-is). A wrapper with a different callback name is an
/// error: it means the response belongs to some other request.
pub fn strip_jsonp<'a>(body: &'a str, callback: &str) -> Result<&'a str> {
    let trimmed = body.trim();

    if trimmed.starts_with('[') || trimmed.starts_with('{') {
        return Ok(trimmed);
    }

    let rest = trimmed.strip_prefix(callback).ok_or_else(|| {
        PlaygateError::InvalidApiResponse {
            message: format!("response is not JSON and not a {}(...) wrapper", callback),
            response_body: Some(snippet(trimmed)),
        }
    })?;

    let rest = rest.trim_start();
    let inner = rest
        .strip_prefix('(')
        .and_then(|r| r.trim_end().trim_end_matches(';').trim_end().strip_suffix(')'))
        .ok_or_else(|| PlaygateError::InvalidApiResponse {
            message: "malformed JSONP wrapper".to_string(),
            response_body: Some(snippet(trimmed)),
        })?;

    Ok(inner.trim())
}

/// Parse a JSONP body into a list of items, treating anything that is not a
/// well-formed array as "no data".
///
/// Individual elements that fail to deserialize are dropped rather than
/// failing the whole response; the feed is third-party and best-effort.
pub fn parse_items<T>(body: &str, callback: &str) -> Vec<T>
where
    T: serde::de::DeserializeOwned,
{
    let payload = match strip_jsonp(body, callback) {
        Ok(payload) => payload,
        Err(_) => return Vec::new(),
    };

    let value: serde_json::Value = match serde_json::from_str(payload) {
        Ok(value) => value,
        Err(_) => return Vec::new(),
    };

    match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    }
}

fn snippet(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::offers::models::{LeadEvent, Offer};

    #[test]
    fn callback_names_are_unique_and_prefixed() {
        let a = callback_name("pg_offers");
        let b = callback_name("pg_offers");
        assert!(a.starts_with("pg_offers_"));
        assert_ne!(a, b);
    }

    #[test]
    fn strips_wrapper_with_and_without_semicolon() {
        assert_eq!(strip_jsonp("cb([1,2])", "cb").unwrap(), "[1,2]");
        assert_eq!(strip_jsonp("cb([1,2]);", "cb").unwrap(), "[1,2]");
        assert_eq!(strip_jsonp("  cb ( [1,2] ) ;  ", "cb").unwrap(), "[1,2]");
    }

    #[test]
    fn bare_json_passes_through() {
        assert_eq!(strip_jsonp(r#"[{"id":1}]"#, "cb").unwrap(), r#"[{"id":1}]"#);
        assert_eq!(strip_jsonp(r#"{"id":1}"#, "cb").unwrap(), r#"{"id":1}"#);
    }

    #[test]
    fn foreign_callback_is_rejected() {
        assert!(strip_jsonp("other([1])", "cb").is_err());
        assert!(strip_jsonp("<html>502</html>", "cb").is_err());
    }

    #[test]
    fn parse_items_treats_non_arrays_as_empty() {
        let offers: Vec<Offer> = parse_items(r#"cb({"error":"down"})"#, "cb");
        assert!(offers.is_empty());

        let offers: Vec<Offer> = parse_items("cb(null)", "cb");
        assert!(offers.is_empty());

        let offers: Vec<Offer> = parse_items("totally not json", "cb");
        assert!(offers.is_empty());
    }

    #[test]
    fn parse_items_drops_malformed_elements() {
        let leads: Vec<LeadEvent> =
            parse_items(r#"cb([{"offer_id":1,"points":5},"garbage",{"offer_id":2}])"#, "cb");
        // Strings deserialize to no valid lead; the two objects survive.
        assert_eq!(leads.len(), 2);
        assert_eq!(leads[0].valid_id(), Some(1));
        assert_eq!(leads[1].valid_id(), Some(2));
    }
}
