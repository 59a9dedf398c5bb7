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


//! Offer feed and lead-check response models
//!
//! The feed is loosely specified: the display title may arrive as `anchor`
//! or `title`, the thumbnail under any of eight field names, ids as numbers
//! or numeric strings. Every field is optional on the wire; accessor
//! methods implement the documented fallback order so callers never deal
//! with the raw spellings.

use serde::de::Deserializer;
use serde::Deserialize;
use serde_json::Value;

/// Accept an id as a JSON number or a numeric string.
///
/// Anything else (including zero handled later by `valid_id`) maps to None
/// rather than failing the whole response.
fn loose_id<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Accept reward points as a JSON number or a numeric string; anything
/// unparseable credits nothing rather than invalidating the event.
fn loose_points<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    })
}

/// One promotional item from the offer feed.
///
/// Read-only; lifetime is one render pass.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Offer {
    #[serde(default)]
    pub anchor: Option<String>,

    #[serde(default)]
    pub title: Option<String>,

    /// Click-through URL
    #[serde(default)]
    pub url: Option<String>,

    /// Short conversion note ("Email submit", "Install and open", ...)
    #[serde(default)]
    pub conversion: Option<String>,

    #[serde(default)]
    pub requirement: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Thumbnail image, under whichever name the feed picked today.
    #[serde(
        default,
        alias = "image",
        alias = "img",
        alias = "thumbnail_url",
        alias = "image_url",
        alias = "icon",
        alias = "icon_url",
        alias = "picture",
        alias = "photo"
    )]
    pub thumbnail: Option<String>,

    #[serde(default, deserialize_with = "loose_id")]
    pub offer_id: Option<u64>,

    #[serde(default, deserialize_with = "loose_id")]
    pub id: Option<u64>,
}

impl Offer {
    /// Display title: `anchor`, then `title`, then an ordinal fallback.
    pub fn display_title(&self, index: usize) -> String {
        self.anchor
            .as_deref()
            .or(self.title.as_deref())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Offer {}", index + 1))
    }

    /// Click-through URL, `#` when the feed omitted one.
    pub fn click_url(&self) -> &str {
        self.url.as_deref().filter(|s| !s.is_empty()).unwrap_or("#")
    }

    /// Requirement text: `requirement`, `description`, `conversion`, then a
    /// generic placeholder.
    pub fn requirement_text(&self) -> &str {
        self.requirement
            .as_deref()
            .or(self.description.as_deref())
            .or(self.conversion.as_deref())
            .filter(|s| !s.is_empty())
            .unwrap_or("Complete this offer")
    }

    /// Tooltip text; empty when the feed provided no conversion note.
    pub fn conversion_text(&self) -> &str {
        self.conversion.as_deref().unwrap_or("")
    }

    /// Id for click tracking: `offer_id`, then `id`, then the list index.
    pub fn tracking_id(&self, index: usize) -> u64 {
        self.offer_id.or(self.id).unwrap_or(index as u64)
    }
}

/// A completed-lead event from the check endpoint.
///
/// Consumed to update completion state, then discarded.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeadEvent {
    #[serde(default, deserialize_with = "loose_id")]
    pub offer_id: Option<u64>,

    /// Reward points; the network reports cents.
    #[serde(default, deserialize_with = "loose_points")]
    pub points: f64,
}

impl LeadEvent {
    /// Offer id if present and non-zero; zero and unparseable ids are
    /// invalid and the event is skipped.
    pub fn valid_id(&self) -> Option<u64> {
        self.offer_id.filter(|id| *id != 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offer_title_fallback_order() {
        let offer: Offer =
            serde_json::from_str(r#"{"anchor":"Play Quiz","title":"ignored"}"#).unwrap();
        assert_eq!(offer.display_title(0), "Play Quiz");

        let offer: Offer = serde_json::from_str(r#"{"title":"Only Title"}"#).unwrap();
        assert_eq!(offer.display_title(0), "Only Title");

        let offer: Offer = serde_json::from_str("{}").unwrap();
        assert_eq!(offer.display_title(2), "Offer 3");
    }

    #[test]
    fn thumbnail_accepted_under_any_candidate_name() {
        for field in [
            "thumbnail",
            "image",
            "img",
            "thumbnail_url",
            "image_url",
            "icon",
            "icon_url",
            "picture",
            "photo",
        ] {
            let json = format!(r#"{{"{}":"https://cdn.example/x.png"}}"#, field);
            let offer: Offer = serde_json::from_str(&json).unwrap();
            assert_eq!(
                offer.thumbnail.as_deref(),
                Some("https://cdn.example/x.png"),
                "field {}",
                field
            );
        }
    }

    #[test]
    fn requirement_falls_back_through_description_and_conversion() {
        let offer: Offer = serde_json::from_str(r#"{"description":"Enter your email"}"#).unwrap();
        assert_eq!(offer.requirement_text(), "Enter your email");

        let offer: Offer = serde_json::from_str(r#"{"conversion":"Install and open"}"#).unwrap();
        assert_eq!(offer.requirement_text(), "Install and open");

        let offer: Offer = serde_json::from_str("{}").unwrap();
        assert_eq!(offer.requirement_text(), "Complete this offer");
    }

    #[test]
    fn lead_ids_parse_from_number_or_string() {
        let lead: LeadEvent =
            serde_json::from_str(r#"{"offer_id":"9174","points":"120"}"#).unwrap();
        assert_eq!(lead.valid_id(), Some(9174));
        assert_eq!(lead.points, 120.0);

        let lead: LeadEvent = serde_json::from_str(r#"{"offer_id":9174,"points":120}"#).unwrap();
        assert_eq!(lead.valid_id(), Some(9174));
        assert_eq!(lead.points, 120.0);
    }

    #[test]
    fn zero_or_garbage_ids_are_invalid() {
        let lead: LeadEvent = serde_json::from_str(r#"{"offer_id":0,"points":50}"#).unwrap();
        assert_eq!(lead.valid_id(), None);

        let lead: LeadEvent =
            serde_json::from_str(r#"{"offer_id":"not-a-number","points":50}"#).unwrap();
        assert_eq!(lead.valid_id(), None);

        let lead: LeadEvent = serde_json::from_str(r#"{"points":50}"#).unwrap();
        assert_eq!(lead.valid_id(), None);
    }

    #[test]
    fn missing_points_default_to_zero() {
        let lead: LeadEvent = serde_json::from_str(r#"{"offer_id":7}"#).unwrap();
        assert_eq!(lead.points, 0.0);
    }
}
