// NetLab: Offline Network Topology Simulator
// Copyright (C) 2021  Tibor Schneider
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! Module containing all error types

use thiserror::Error;

/// Main error type
///
/// The simulation and validation routines themselves are total: malformed
/// topologies degrade to empty results instead of failing. Errors only occur
/// at the persistence boundary, when reading or writing topology documents.
#[derive(Debug, Error)]
pub enum Error {
    /// The topology file could not be read or written
    #[error("File Error: {0}")]
    Io(#[from] std::io::Error),
    /// The topology document is not valid JSON, or does not match the schema
    #[error("Document Error: {0}")]
    Json(#[from] serde_json::Error),
}
