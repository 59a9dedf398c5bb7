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


//! Playgate: offer-gated streaming content toolkit
//!
//! Four loosely coupled pieces:
//! - [`locker`]: the content-locker session — fetches offers from the ad
//!   network, polls completed leads, and unlocks playback once the visitor
//!   clears the configured threshold; plus the overlay view layer.
//! - [`offers`]: the ad-network HTTP client (JSONP endpoints).
//! - [`player`]: the media control surface (transport, seeking, volume,
//!   keyboard), with the seek-triggered lock hook.
//! - [`catalog`] / [`tmdb`]: the persisted content catalog and the metadata
//!   importer that fills it, driven by the `add-content` and
//!   `fetch-content` binaries.

pub mod catalog;
pub mod config;
pub mod error;
pub mod locker;
pub mod offers;
pub mod player;
pub mod tmdb;

pub use config::{LockerConfig, TmdbConfig};
pub use error::{PlaygateError, Result};
pub use locker::{DisplayState, LockState, LockerSession, PageContext};
pub use offers::{LeadEvent, Offer, OfferClient};
pub use player::{MediaElement, PlayerController};
