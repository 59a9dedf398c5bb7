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


//! Locker overlay rendering
//!
//! Pure view layer: every function maps data to an HTML string. The feed is
//! third-party content, so every interpolated value goes through
//! [`html_escape`]; markup-significant characters in offer fields must
//! render as literal text.

use crate::locker::page::{self, PageContext};
use crate::locker::session::DisplayState;
use crate::offers::Offer;

/// Escape `&`, `<`, `>` and `"` for safe interpolation into markup
/// (element text and double-quoted attribute values).
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// The overlay headline, personalized with the content title when one was
/// extracted from the page.
pub fn render_title(ctx: &PageContext) -> String {
    match page::extract_title(ctx) {
        Some(title) => format!(
            r#"Complete one free quick offer to continue watching <span class="content-name">{}</span>."#,
            html_escape(title)
        ),
        None => "Complete one free quick offer to continue watching.".to_string(),
    }
}

/// The poster slot: the extracted poster image, or the lock icon when the
/// page gave us nothing.
pub fn render_poster(ctx: &PageContext) -> String {
    match page::extract_poster(ctx) {
        Some(poster) => format!(
            r#"<img src="{}" alt="Content preview">"#,
            html_escape(poster)
        ),
        None => r#"<i class="bi bi-lock-fill"></i>"#.to_string(),
    }
}

/// One offer card.
///
/// The index feeds the ordinal fallback title and the tracking id when the
/// feed omitted both id fields.
pub fn render_offer_card(offer: &Offer, index: usize) -> String {
    let thumbnail = offer
        .thumbnail
        .as_deref()
        .filter(|url| !url.is_empty())
        .map(|url| {
            format!(
                r#"<img class="offer-thumb" src="{}" alt="">"#,
                html_escape(url)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<a href="{url}" target="_blank" rel="noopener noreferrer" class="offer-card" data-offer-id="{id}" title="{tooltip}">
    <div class="offer-content">
        {thumbnail}<div class="offer-info">
            <div class="offer-title">{title}</div>
            <div class="offer-requirement">{requirement}</div>
        </div>
    </div>
</a>"#,
        url = html_escape(offer.click_url()),
        id = offer.tracking_id(index),
        tooltip = html_escape(offer.conversion_text()),
        thumbnail = thumbnail,
        title = html_escape(&offer.display_title(index)),
        requirement = html_escape(offer.requirement_text()),
    )
}

/// The offers grid.
pub fn render_offer_cards(offers: &[Offer]) -> String {
    offers
        .iter()
        .enumerate()
        .map(|(index, offer)| render_offer_card(offer, index))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The retryable error card shown when the feed is unavailable.
pub fn render_error_card() -> String {
    r#"<div class="offers-error">
    <i class="bi bi-exclamation-triangle"></i>
    <p>Unable to load offers. Please refresh.</p>
</div>"#
        .to_string()
}

fn render_loading() -> String {
    r#"<div class="offers-loading"><div class="loading-spinner"></div></div>"#.to_string()
}

/// Completion progress line under the offer grid.
pub fn render_progress(completed: usize, required: usize) -> String {
    format!(
        r#"<p class="offers-progress">{} of {} offers completed</p>"#,
        completed, required
    )
}

/// The offers area for the current display state.
pub fn render_offers_area(state: &DisplayState) -> String {
    match state {
        DisplayState::Idle | DisplayState::Loading => render_loading(),
        DisplayState::Ready(offers) => format!(
            r#"<div class="offers-grid">
{}
</div>"#,
            render_offer_cards(offers)
        ),
        DisplayState::Error => render_error_card(),
    }
}

/// The complete overlay, from the header down to the footer.
pub fn render_overlay(ctx: &PageContext, state: &DisplayState) -> String {
    format!(
        r#"<div class="locker-modal">
    <div class="locker-backdrop"></div>
    <div class="locker-header">
        <div class="locker-icon">
            <div class="poster-container">{poster}</div>
        </div>
        <h2 class="locker-title">{title}</h2>
    </div>
    <div class="locker-content">
        <div class="locker-offers-container">
{offers}
        </div>
    </div>
    <div class="locker-footer">
        <p class="footer-note"><i class="bi bi-shield-check"></i> Verified &amp; secure</p>
    </div>
</div>"#,
        poster = render_poster(ctx),
        title = render_title(ctx),
        offers = render_offers_area(state),
    )
}
