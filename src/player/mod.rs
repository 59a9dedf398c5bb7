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


//! Media control surface
//!
//! A stateless event-binding layer over a single media element: play/pause,
//! seek by click or drag along a progress bar, volume with persistence,
//! fullscreen, and keyboard shortcuts. The media element sits behind a
//! trait so the whole surface is unit-testable.
//!
//! Seeking is the one place the locker product leaks in: every seek action
//! invokes an externally supplied lock hook (rate-limited by a fixed
//! cooldown) and forces an exit from fullscreen so the overlay is visible.

pub mod controller;
pub mod settings;

pub use controller::{
    format_timestamp, HlsTuning, Key, MediaElement, MediaState, PlayerController, ProgressBar,
    StreamKind,
};
pub use settings::{PlayerSettings, SettingsStore};
