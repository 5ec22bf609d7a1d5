// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Randomized ground-floor layout generation
//!
//! Rooms are dropped one at a time at random integer positions on the floor
//! grid. A position is rejected when it overlaps an already placed room, when
//! it puts two bedrooms wall to wall, or when a larger room (garage, kitchen)
//! crowds a neighbour closer than the minimum gap. With attached washrooms
//! enabled, each washroom is placed flush against a bedroom instead.

use crate::error::{LayoutError, Result};
use crate::layout::Layout;
use crate::room::{RoomId, RoomKind};
use crate::types::{FloorBounds, Rect};
use rand::Rng;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Which rooms a generated layout must contain
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoomProgram {
    pub bedrooms: u8,
    pub washrooms: u8,
    pub garage: bool,
    /// Place every washroom flush against its own bedroom
    pub attached_washroom: bool,
}

impl Default for RoomProgram {
    fn default() -> Self {
        Self {
            bedrooms: 1,
            washrooms: 1,
            garage: true,
            attached_washroom: false,
        }
    }
}

impl RoomProgram {
    /// Room ids in placement order: bedrooms, washrooms, kitchen, garage
    pub fn rooms(&self) -> Vec<RoomId> {
        let mut rooms = Vec::new();
        for b in 1..=self.bedrooms {
            rooms.push(RoomId::indexed(RoomKind::Bedroom, b.to_string()));
        }
        for w in 1..=self.washrooms {
            rooms.push(RoomId::indexed(RoomKind::Washroom, w.to_string()));
        }
        rooms.push(RoomId::new(RoomKind::Kitchen));
        if self.garage {
            rooms.push(RoomId::new(RoomKind::Garage));
        }
        rooms
    }
}

/// Configuration for the base layout generator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub floor_width: f64,
    pub floor_height: f64,
    pub program: RoomProgram,
    /// Random positions tried per room before the plan is abandoned
    pub placement_attempts: usize,
    /// Whole plans tried before giving up
    pub max_plan_attempts: usize,
    /// Clearance required around rooms other than bedrooms and washrooms
    pub min_gap: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            floor_width: 20.0,
            floor_height: 20.0,
            program: RoomProgram::default(),
            placement_attempts: 50,
            max_plan_attempts: 200,
            min_gap: 3.0,
        }
    }
}

impl GeneratorConfig {
    pub fn bounds(&self) -> Result<FloorBounds> {
        FloorBounds::new(self.floor_width, self.floor_height)
    }
}

/// Side length range (inclusive, floor units) for a room kind
fn size_range(kind: &RoomKind) -> RangeInclusive<u32> {
    match kind {
        RoomKind::Bedroom => 4..=5,
        RoomKind::Kitchen => 3..=4,
        RoomKind::Washroom => 2..=3,
        _ => 4..=6,
    }
}

/// Generate a ground-floor layout satisfying the room program
pub fn generate_base_layout<R: Rng + ?Sized>(
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<Layout> {
    let bounds = config.bounds()?;
    let rooms = config.program.rooms();

    let mut last_failed = rooms[0].clone();
    for attempt in 0..config.max_plan_attempts {
        match try_place_all(&rooms, bounds, config, rng) {
            Ok(layout) => {
                tracing::debug!(attempt, rooms = layout.len(), "Generated base layout");
                return Ok(layout);
            }
            Err(room) => last_failed = room,
        }
    }

    Err(LayoutError::PlacementFailed {
        room: last_failed,
        attempts: config.max_plan_attempts,
    })
}

/// One attempt at placing every room; returns the room that could not be placed
fn try_place_all<R: Rng + ?Sized>(
    rooms: &[RoomId],
    bounds: FloorBounds,
    config: &GeneratorConfig,
    rng: &mut R,
) -> std::result::Result<Layout, RoomId> {
    let mut layout = Layout::new();
    let mut washroom_attached: FxHashSet<RoomId> = FxHashSet::default();

    for room in rooms {
        let range = size_range(&room.kind);
        let width = rng.random_range(range.clone()) as f64;
        let height = rng.random_range(range) as f64;

        let max_x = (bounds.width - width).floor();
        let max_y = (bounds.height - height).floor();
        if max_x < 0.0 || max_y < 0.0 {
            return Err(room.clone());
        }

        let mut placed = None;
        for _ in 0..config.placement_attempts {
            let x = rng.random_range(0..=max_x as u32) as f64;
            let y = rng.random_range(0..=max_y as u32) as f64;
            let mut candidate = Rect::new(x, y, width, height);

            if layout.iter().any(|(_, r)| candidate.overlaps(r)) {
                continue;
            }

            if room.is(&RoomKind::Bedroom)
                && layout
                    .iter()
                    .any(|(id, r)| id.is(&RoomKind::Bedroom) && candidate.is_flush_adjacent(r))
            {
                continue;
            }

            if config.program.attached_washroom && room.is(&RoomKind::Washroom) {
                match attach_to_bedroom(&layout, &washroom_attached, width, height, bounds) {
                    Some((bedroom, rect)) => {
                        washroom_attached.insert(bedroom);
                        candidate = rect;
                    }
                    None => continue,
                }
            } else if !room.is(&RoomKind::Bedroom)
                && !room.is(&RoomKind::Washroom)
                && layout
                    .iter()
                    .any(|(_, r)| !candidate.has_min_gap(r, config.min_gap))
            {
                continue;
            }

            placed = Some(candidate);
            break;
        }

        let rect = placed.ok_or_else(|| room.clone())?;
        layout.try_insert(room.clone(), rect).map_err(|_| room.clone())?;
    }

    Ok(layout)
}

/// Find a free spot flush against a bedroom that has no washroom yet
fn attach_to_bedroom(
    layout: &Layout,
    washroom_attached: &FxHashSet<RoomId>,
    width: f64,
    height: f64,
    bounds: FloorBounds,
) -> Option<(RoomId, Rect)> {
    for (id, bedroom) in layout.iter() {
        if !id.is(&RoomKind::Bedroom) || washroom_attached.contains(id) {
            continue;
        }

        let options = [
            Rect::new(bedroom.x - width, bedroom.y, width, height),
            Rect::new(bedroom.right(), bedroom.y, width, height),
            Rect::new(bedroom.x, bedroom.y - height, width, height),
            Rect::new(bedroom.x, bedroom.bottom(), width, height),
        ];

        let free = options.into_iter().find(|option| {
            option.fits_within(bounds) && !layout.iter().any(|(_, r)| option.overlaps(r))
        });
        if let Some(rect) = free {
            return Some((id.clone(), rect));
        }
    }
    None
}
