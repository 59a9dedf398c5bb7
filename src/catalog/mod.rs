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


//! Persisted content catalog
//!
//! The site config is a JSON document with top-level `Movies` and `Series`
//! arrays of content records (plus whatever other deployment keys the file
//! carries; those round-trip untouched). Every save is preceded by a
//! timestamp-suffixed full-file backup copy. The importer merges freshly
//! fetched records in, skipping ids already present.

pub mod importer;
pub mod records;
pub mod store;

pub use importer::{import_content, ContentKind, ImportOutcome, MetadataSource, REQUEST_DELAY};
pub use records::{Catalog, ContentRecord};
pub use store::CatalogStore;
