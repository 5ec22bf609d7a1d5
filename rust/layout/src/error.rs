// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::room::RoomId;
use thiserror::Error;

/// Result type for layout operations
pub type Result<T> = std::result::Result<T, LayoutError>;

/// Errors that can occur while building or deriving layouts
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("Invalid approach {0}: expected 1, 2 or 3")]
    InvalidApproach(u8),

    #[error("Room name collision: {0}")]
    NameCollision(RoomId),

    #[error("Unknown room: {0}")]
    UnknownRoom(RoomId),

    #[error("Invalid rectangle for {room}: {width} x {height}")]
    InvalidRect { room: RoomId, width: f64, height: f64 },

    #[error("Invalid balcony thickness: {0}")]
    InvalidThickness(f64),

    #[error("Invalid floor bounds: {width} x {height}")]
    InvalidBounds { width: f64, height: f64 },

    #[error("Could not place {room} after {attempts} plan attempts")]
    PlacementFailed { room: RoomId, attempts: usize },
}
