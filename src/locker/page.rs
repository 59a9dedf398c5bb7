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


//! Best-effort page metadata extraction
//!
//! The locker personalizes its overlay with the title and poster of the
//! content being gated. Host pages expose these in several places (an info
//! panel, the player's poster attribute, a series data object, generic
//! poster-classed images); each lookup is a named strategy, evaluated in a
//! fixed order, first match wins. All strategies missing is fine: the
//! overlay just stays generic.

/// Candidate metadata sources harvested from the surrounding page.
///
/// The embedding layer fills in whatever it can find; every field is
/// optional.
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    /// Title text from the content info panel
    pub info_panel_name: Option<String>,
    /// `title` from the page's current-series data object
    pub series_title: Option<String>,
    /// `name` from the page's current-series data object
    pub series_name: Option<String>,
    /// First heading on the page
    pub first_heading: Option<String>,

    /// Poster image inside the content info panel
    pub info_panel_poster: Option<String>,
    /// The media element's own poster attribute
    pub player_poster: Option<String>,
    /// `poster` from the current-series data object
    pub series_poster: Option<String>,
    /// `thumbnail` from the current-series data object
    pub series_thumbnail: Option<String>,
    /// Any image with a poster/thumbnail-style class or path
    pub poster_classed_image: Option<String>,
}

type Probe = for<'a> fn(&'a PageContext) -> Option<&'a str>;

/// One named lookup against a [`PageContext`].
pub struct Strategy {
    pub name: &'static str,
    probe: Probe,
}

impl Strategy {
    /// Run the lookup, rejecting empty and whitespace-only values.
    pub fn probe<'a>(&self, ctx: &'a PageContext) -> Option<&'a str> {
        (self.probe)(ctx)
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}

fn info_panel_name(ctx: &PageContext) -> Option<&str> {
    ctx.info_panel_name.as_deref()
}

fn series_title(ctx: &PageContext) -> Option<&str> {
    ctx.series_title.as_deref()
}

fn series_name(ctx: &PageContext) -> Option<&str> {
    ctx.series_name.as_deref()
}

fn first_heading(ctx: &PageContext) -> Option<&str> {
    ctx.first_heading.as_deref()
}

fn info_panel_poster(ctx: &PageContext) -> Option<&str> {
    ctx.info_panel_poster.as_deref()
}

fn player_poster(ctx: &PageContext) -> Option<&str> {
    ctx.player_poster.as_deref()
}

fn series_poster(ctx: &PageContext) -> Option<&str> {
    ctx.series_poster.as_deref()
}

fn series_thumbnail(ctx: &PageContext) -> Option<&str> {
    ctx.series_thumbnail.as_deref()
}

fn poster_classed_image(ctx: &PageContext) -> Option<&str> {
    ctx.poster_classed_image.as_deref()
}

/// Title lookups, in evaluation order.
pub const TITLE_STRATEGIES: &[Strategy] = &[
    Strategy {
        name: "info-panel",
        probe: info_panel_name,
    },
    Strategy {
        name: "series-title",
        probe: series_title,
    },
    Strategy {
        name: "series-name",
        probe: series_name,
    },
    Strategy {
        name: "heading",
        probe: first_heading,
    },
];

/// Poster lookups, in evaluation order.
pub const POSTER_STRATEGIES: &[Strategy] = &[
    Strategy {
        name: "info-panel-poster",
        probe: info_panel_poster,
    },
    Strategy {
        name: "player-poster",
        probe: player_poster,
    },
    Strategy {
        name: "series-poster",
        probe: series_poster,
    },
    Strategy {
        name: "series-thumbnail",
        probe: series_thumbnail,
    },
    Strategy {
        name: "poster-classed-image",
        probe: poster_classed_image,
    },
];

fn first_match<'a>(strategies: &[Strategy], ctx: &'a PageContext) -> Option<&'a str> {
    strategies.iter().find_map(|strategy| strategy.probe(ctx))
}

/// Content title, via the first matching title strategy.
pub fn extract_title(ctx: &PageContext) -> Option<&str> {
    first_match(TITLE_STRATEGIES, ctx)
}

/// Poster image URL, via the first matching poster strategy.
pub fn extract_poster(ctx: &PageContext) -> Option<&str> {
    first_match(POSTER_STRATEGIES, ctx)
}
