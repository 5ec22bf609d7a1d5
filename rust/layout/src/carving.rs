// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Balcony carving along the outer floor boundary

use crate::error::{LayoutError, Result};
use crate::layout::Layout;
use crate::room::{RoomId, RoomKind};
use crate::types::{FloorBounds, Rect, Side};
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Balcony carving parameters
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CarveConfig {
    /// Width of the strip taken off the room, in floor units
    pub thickness: f64,
}

impl Default for CarveConfig {
    fn default() -> Self {
        Self { thickness: 5.0 }
    }
}

impl CarveConfig {
    pub fn new(thickness: f64) -> Result<Self> {
        let config = Self { thickness };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.thickness > 0.0 && self.thickness.is_finite() {
            Ok(())
        } else {
            Err(LayoutError::InvalidThickness(self.thickness))
        }
    }
}

/// Result of a successful carve
#[derive(Debug, Clone, PartialEq)]
pub struct Carved {
    pub side: Side,
    pub balcony: RoomId,
    pub balcony_rect: Rect,
    pub remaining: Rect,
}

/// Split a `thickness`-wide strip off one side of `rect`
///
/// Returns `(remaining, strip)`, or `None` when the dimension being shortened
/// is not larger than the thickness.
pub fn split_strip(rect: &Rect, side: Side, thickness: f64) -> Option<(Rect, Rect)> {
    match side {
        Side::Left | Side::Right if rect.width <= thickness => None,
        Side::Top | Side::Bottom if rect.height <= thickness => None,
        Side::Left => Some((
            Rect::new(rect.x + thickness, rect.y, rect.width - thickness, rect.height),
            Rect::new(rect.x, rect.y, thickness, rect.height),
        )),
        Side::Right => Some((
            Rect::new(rect.x, rect.y, rect.width - thickness, rect.height),
            Rect::new(rect.right() - thickness, rect.y, thickness, rect.height),
        )),
        Side::Top => Some((
            Rect::new(rect.x, rect.y + thickness, rect.width, rect.height - thickness),
            Rect::new(rect.x, rect.y, rect.width, thickness),
        )),
        Side::Bottom => Some((
            Rect::new(rect.x, rect.y, rect.width, rect.height - thickness),
            Rect::new(rect.x, rect.bottom() - thickness, rect.width, thickness),
        )),
    }
}

/// Carve a balcony off `room` if it touches the outer boundary
///
/// One touched side is chosen at random. The room is shrunk in place and the
/// balcony is appended as `Balcony` carrying the room's index. Returns `None`
/// when the room touches no side or is too thin to split.
pub fn carve_balcony<R: Rng + ?Sized>(
    layout: &mut Layout,
    room: &RoomId,
    bounds: FloorBounds,
    config: &CarveConfig,
    rng: &mut R,
) -> Result<Option<Carved>> {
    let rect = *layout
        .get(room)
        .ok_or_else(|| LayoutError::UnknownRoom(room.clone()))?;

    let sides = bounds.touched_sides(&rect);
    let Some(&side) = sides.choose(rng) else {
        tracing::debug!(room = %room, "Room is interior, no balcony");
        return Ok(None);
    };

    let Some((remaining, strip)) = split_strip(&rect, side, config.thickness) else {
        tracing::debug!(
            room = %room,
            %side,
            thickness = config.thickness,
            "Room too thin for balcony"
        );
        return Ok(None);
    };

    layout.set_rect(room, remaining)?;
    let balcony = layout.insert_unique(room.with_kind(RoomKind::Balcony), strip, room)?;
    tracing::debug!(room = %room, balcony = %balcony, %side, "Carved balcony");

    Ok(Some(Carved {
        side,
        balcony,
        balcony_rect: strip,
        remaining,
    }))
}
