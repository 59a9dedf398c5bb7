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


//! Offer-network client
//!
//! The ad network exposes two endpoints: an offer feed (promotional items a
//! visitor must engage with) and a completed-lead check. Both are legacy
//! JSONP endpoints: the response body arrives wrapped in a call to a
//! caller-supplied callback name. This module issues plain HTTP GETs with a
//! generated callback parameter and unwraps the payload itself, which keeps
//! the wire format the servers expect without any script-tag lifecycle.
//!
//! Field names in the feed are loosely specified; see [`models::Offer`] for
//! the accepted spellings.

pub mod client;
pub mod jsonp;
pub mod models;

pub use client::{OfferClient, OfferNetwork};
pub use models::{LeadEvent, Offer};
