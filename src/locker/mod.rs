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


//! Content locker: unlock session, overlay rendering, page metadata
//!
//! A [`LockerSession`] is constructed per page view and owns every piece of
//! state the locker needs: the offer list display state, the lock state
//! machine, the completed-offer set and the unlock hook. The view layer is
//! pure (`&data -> String`) and the page-metadata lookups are an ordered
//! strategy list, so all of it is unit-testable without a browser.

pub mod page;
pub mod session;
pub mod view;

pub use page::PageContext;
pub use session::{DisplayState, LeadRound, LockState, LockerSession};
