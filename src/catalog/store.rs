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


//! Catalog file I/O
//!
//! Loading is fatal on a missing or unparsable file (the importer refuses
//! to run against a config it cannot read). Saving first copies the current
//! file to `<name>.backup.<millis>` and then overwrites in place with
//! tab-indented JSON, the format the deployment's other tooling expects.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;
use tracing::info;

use crate::catalog::records::Catalog;
use crate::error::{PlaygateError, Result};

/// Catalog document store at a fixed path.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    path: PathBuf,
}

impl CatalogStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the catalog document.
    pub fn load(&self) -> Result<Catalog> {
        let content = fs::read_to_string(&self.path).map_err(|err| self.file_error(err))?;
        serde_json::from_str(&content).map_err(|err| self.file_error(err))
    }

    /// Save the catalog, backing up the previous file first.
    ///
    /// Returns the backup path when one was written (none on first save).
    pub fn save(&self, catalog: &Catalog) -> Result<Option<PathBuf>> {
        let backup = if self.path.exists() {
            let backup = self.backup_path();
            fs::copy(&self.path, &backup)?;
            info!(backup = %backup.display(), "catalog backup created");
            Some(backup)
        } else {
            None
        };

        fs::write(&self.path, to_tab_indented_json(catalog)?)?;
        info!(path = %self.path.display(), "catalog saved");
        Ok(backup)
    }

    fn backup_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(format!(".backup.{}", Utc::now().timestamp_millis()));
        PathBuf::from(name)
    }

    fn file_error<E: std::fmt::Display>(&self, err: E) -> PlaygateError {
        PlaygateError::CatalogFile {
            path: self.path.display().to_string(),
            message: err.to_string(),
        }
    }
}

/// Serialize with tab indentation, matching the file's existing format.
fn to_tab_indented_json<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    value.serialize(&mut serializer)?;
    Ok(out)
}
