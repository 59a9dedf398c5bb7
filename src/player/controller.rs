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


//! Player controller: transport, seeking, volume, keyboard
//!
//! [`PlayerController`] binds control gestures to a [`MediaElement`]. Seek
//! positions are computed as the pointer's fraction of the progress bar's
//! pixel width mapped onto the media duration. Every seek action fires the
//! external lock hook at most once per cooldown window and drops out of
//! fullscreen; that is deliberate product behavior (the locker overlay must
//! be visible), not a playback concern.

use std::time::{Duration, Instant};

use tracing::warn;

use crate::player::settings::SettingsStore;

/// Minimum spacing between two lock-hook invocations.
pub const SEEK_HOOK_COOLDOWN: Duration = Duration::from_secs(3);

/// Arrow-key seek step in seconds.
pub const KEY_SEEK_STEP: f64 = 5.0;

/// Arrow-key volume step.
pub const KEY_VOLUME_STEP: f64 = 0.1;

/// Streaming source kinds the player can be attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    /// Segmented HLS playlist, handled by the streaming helper
    Hls,
    /// Plain progressive file
    Progressive,
}

impl StreamKind {
    /// Classify a source URL; `.m3u8` playlists go through the helper.
    pub fn detect(url: &str) -> Self {
        let path = url.split(['?', '#']).next().unwrap_or(url);
        if path.ends_with(".m3u8") {
            StreamKind::Hls
        } else {
            StreamKind::Progressive
        }
    }
}

/// Tuning passed to the HLS helper when a playlist source is attached.
#[derive(Debug, Clone)]
pub struct HlsTuning {
    pub enable_worker: bool,
    pub low_latency_mode: bool,
    pub back_buffer_length: u32,
}

impl Default for HlsTuning {
    fn default() -> Self {
        Self {
            enable_worker: true,
            low_latency_mode: true,
            back_buffer_length: 90,
        }
    }
}

/// The slice of a media element the controller needs.
///
/// Implemented by [`MediaState`] for tests and headless use; an embedding
/// layer implements it over a real element.
pub trait MediaElement {
    fn is_paused(&self) -> bool;
    fn play(&mut self);
    fn pause(&mut self);

    fn duration(&self) -> f64;
    fn current_time(&self) -> f64;
    fn set_current_time(&mut self, seconds: f64);

    fn volume(&self) -> f64;
    fn set_volume(&mut self, volume: f64);
    fn is_muted(&self) -> bool;
    fn set_muted(&mut self, muted: bool);

    fn is_fullscreen(&self) -> bool;
    fn set_fullscreen(&mut self, fullscreen: bool);
}

/// Plain in-memory media element.
#[derive(Debug, Clone)]
pub struct MediaState {
    pub paused: bool,
    pub current_time: f64,
    pub duration: f64,
    pub volume: f64,
    pub muted: bool,
    pub fullscreen: bool,
}

impl MediaState {
    pub fn with_duration(duration: f64) -> Self {
        Self {
            paused: true,
            current_time: 0.0,
            duration,
            volume: 1.0,
            muted: false,
            fullscreen: false,
        }
    }
}

impl Default for MediaState {
    fn default() -> Self {
        Self::with_duration(0.0)
    }
}

impl MediaElement for MediaState {
    fn is_paused(&self) -> bool {
        self.paused
    }
    fn play(&mut self) {
        self.paused = false;
    }
    fn pause(&mut self) {
        self.paused = true;
    }
    fn duration(&self) -> f64 {
        self.duration
    }
    fn current_time(&self) -> f64 {
        self.current_time
    }
    fn set_current_time(&mut self, seconds: f64) {
        self.current_time = seconds;
    }
    fn volume(&self) -> f64 {
        self.volume
    }
    fn set_volume(&mut self, volume: f64) {
        self.volume = volume;
    }
    fn is_muted(&self) -> bool {
        self.muted
    }
    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }
    fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }
    fn set_fullscreen(&mut self, fullscreen: bool) {
        self.fullscreen = fullscreen;
    }
}

/// Progress bar geometry, in pixels.
#[derive(Debug, Clone, Copy)]
pub struct ProgressBar {
    pub left: f64,
    pub width: f64,
}

impl ProgressBar {
    /// Pointer position as a fraction of the bar, clamped to `[0, 1]`.
    pub fn fraction_at(&self, x: f64) -> f64 {
        if self.width <= 0.0 {
            return 0.0;
        }
        ((x - self.left) / self.width).clamp(0.0, 1.0)
    }
}

/// Keyboard shortcuts understood by the control surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    K,
    F,
    M,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
}

type LockHook = Box<dyn FnMut() + Send>;

/// Control surface over one media element.
pub struct PlayerController<M: MediaElement> {
    media: M,
    settings: SettingsStore,
    dragging: bool,
    was_playing: bool,
    lock_hook: Option<LockHook>,
    last_hook_fire: Option<Instant>,
}

impl<M: MediaElement> PlayerController<M> {
    /// Wire up a controller, restoring the persisted volume.
    pub fn new(mut media: M, settings: SettingsStore) -> Self {
        let stored = settings.load();
        media.set_volume(stored.volume.clamp(0.0, 1.0));
        Self {
            media,
            settings,
            dragging: false,
            was_playing: false,
            lock_hook: None,
            last_hook_fire: None,
        }
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    /// Register the external lock hook invoked on seek actions.
    pub fn on_seek_lock<F: FnMut() + Send + 'static>(&mut self, hook: F) {
        self.lock_hook = Some(Box::new(hook));
    }

    pub fn toggle_play(&mut self) {
        if self.media.is_paused() {
            self.media.play();
        } else {
            self.media.pause();
        }
    }

    /// Seek to an absolute position.
    ///
    /// Fires the lock hook (subject to the cooldown) and forces an exit
    /// from fullscreen before moving the playhead.
    pub fn seek_to(&mut self, seconds: f64, now: Instant) {
        self.fire_lock_hook(now);
        if self.media.is_fullscreen() {
            self.media.set_fullscreen(false);
        }

        let duration = self.media.duration();
        let target = if duration > 0.0 {
            seconds.clamp(0.0, duration)
        } else {
            seconds.max(0.0)
        };
        self.media.set_current_time(target);
    }

    /// Seek to the position under a pointer click on the progress bar.
    pub fn click_seek(&mut self, x: f64, bar: &ProgressBar, now: Instant) {
        let target = bar.fraction_at(x) * self.media.duration();
        self.seek_to(target, now);
    }

    /// Begin a scrub drag: remember the playing state and pause.
    pub fn start_drag(&mut self, x: f64, bar: &ProgressBar, now: Instant) {
        self.dragging = true;
        self.was_playing = !self.media.is_paused();
        if self.was_playing {
            self.media.pause();
        }
        self.click_seek(x, bar, now);
    }

    /// Follow the pointer during a scrub drag.
    pub fn drag_to(&mut self, x: f64, bar: &ProgressBar, now: Instant) {
        if self.dragging {
            self.click_seek(x, bar, now);
        }
    }

    /// End a scrub drag, restoring the prior playing state.
    pub fn end_drag(&mut self) {
        if self.dragging {
            self.dragging = false;
            if self.was_playing {
                self.media.play();
            }
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Set the volume from the slider and persist it.
    pub fn set_volume(&mut self, volume: f64) {
        let volume = volume.clamp(0.0, 1.0);
        self.media.set_volume(volume);

        let mut stored = self.settings.load();
        stored.volume = volume;
        if let Err(err) = self.settings.save(&stored) {
            warn!(error = %err, "failed to persist player volume");
        }
    }

    /// Nudge the volume without persisting (keyboard arrows).
    fn bump_volume(&mut self, delta: f64) {
        let volume = (self.media.volume() + delta).clamp(0.0, 1.0);
        self.media.set_volume(volume);
    }

    pub fn toggle_mute(&mut self) {
        let muted = !self.media.is_muted();
        self.media.set_muted(muted);
    }

    pub fn toggle_fullscreen(&mut self) {
        let fullscreen = !self.media.is_fullscreen();
        self.media.set_fullscreen(fullscreen);
    }

    /// Reset to the start when playback finishes.
    pub fn on_ended(&mut self) {
        self.media.pause();
        self.media.set_current_time(0.0);
    }

    /// Dispatch a keyboard shortcut.
    ///
    /// `input_focused` suppresses everything so typing into a form never
    /// drives the player.
    pub fn handle_key(&mut self, key: Key, input_focused: bool, now: Instant) {
        if input_focused {
            return;
        }

        match key {
            Key::Space | Key::K => self.toggle_play(),
            Key::F => self.toggle_fullscreen(),
            Key::M => self.toggle_mute(),
            Key::ArrowLeft => self.seek_to(self.media.current_time() - KEY_SEEK_STEP, now),
            Key::ArrowRight => self.seek_to(self.media.current_time() + KEY_SEEK_STEP, now),
            Key::ArrowUp => self.bump_volume(KEY_VOLUME_STEP),
            Key::ArrowDown => self.bump_volume(-KEY_VOLUME_STEP),
        }
    }

    fn fire_lock_hook(&mut self, now: Instant) {
        let Some(hook) = self.lock_hook.as_mut() else {
            return;
        };
        let ready = match self.last_hook_fire {
            None => true,
            Some(last) => now.duration_since(last) >= SEEK_HOOK_COOLDOWN,
        };
        if ready {
            hook();
            self.last_hook_fire = Some(now);
        }
    }
}

/// Format a position for the control bar: `m:ss`, or `h:mm:ss` past an hour.
pub fn format_timestamp(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds as u64
    } else {
        0
    };
    let h = total / 3600;
    let m = (total % 3600) / 60;
    let s = total % 60;
    if h > 0 {
        format!("{}:{:02}:{:02}", h, m, s)
    } else {
        format!("{}:{:02}", m, s)
    }
}
