// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ordered room layout with unique identifiers

use crate::error::{LayoutError, Result};
use crate::room::{RoomId, RoomKind};
use crate::types::Rect;
use rustc_hash::FxHashMap;

/// Ordered mapping from room identifier to rectangle
///
/// Insertion order is preserved; renames keep a room's position and new rooms
/// are appended. Derivations clone the base, so a base layout handed out by
/// reference is never modified.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    rooms: Vec<(RoomId, Rect)>,
    index: FxHashMap<RoomId, usize>,
}

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a layout from `(id, rect)` pairs, rejecting duplicate ids
    pub fn from_rooms<I>(rooms: I) -> Result<Self>
    where
        I: IntoIterator<Item = (RoomId, Rect)>,
    {
        let mut layout = Self::new();
        for (id, rect) in rooms {
            layout.try_insert(id, rect)?;
        }
        Ok(layout)
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn get(&self, id: &RoomId) -> Option<&Rect> {
        self.index.get(id).map(|&i| &self.rooms[i].1)
    }

    pub fn contains(&self, id: &RoomId) -> bool {
        self.index.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RoomId, &Rect)> {
        self.rooms.iter().map(|(id, rect)| (id, rect))
    }

    pub fn ids(&self) -> impl Iterator<Item = &RoomId> {
        self.rooms.iter().map(|(id, _)| id)
    }

    /// Identifiers of every room of the given kind, in layout order
    pub fn ids_of_kind(&self, kind: &RoomKind) -> Vec<RoomId> {
        self.ids().filter(|id| id.is(kind)).cloned().collect()
    }

    pub fn count_kind(&self, kind: &RoomKind) -> usize {
        self.ids().filter(|id| id.is(kind)).count()
    }

    /// Insert a new room, failing with `NameCollision` if the id is taken
    /// or `InvalidRect` for a degenerate rectangle
    pub fn try_insert(&mut self, id: RoomId, rect: Rect) -> Result<()> {
        check_rect(&id, &rect)?;
        if self.index.contains_key(&id) {
            return Err(LayoutError::NameCollision(id));
        }
        self.push(id, rect);
        Ok(())
    }

    /// Insert a new room, resolving a name collision instead of failing
    ///
    /// `origin` is the room the new one was derived from; a colliding
    /// `Balcony_1` derived from `Study_1` becomes `Balcony_Study_1`.
    /// Returns the id actually used. Degenerate rectangles are rejected.
    pub fn insert_unique(&mut self, id: RoomId, rect: Rect, origin: &RoomId) -> Result<RoomId> {
        match self.try_insert(id.clone(), rect) {
            Ok(()) => Ok(id),
            Err(err @ LayoutError::NameCollision(_)) => {
                let resolved = self.resolve_collision(&id, origin);
                tracing::debug!(%err, room = %resolved, "Resolved room name collision");
                self.push(resolved.clone(), rect);
                Ok(resolved)
            }
            Err(err) => Err(err),
        }
    }

    /// Replace the rectangle of an existing room in place
    pub fn set_rect(&mut self, id: &RoomId, rect: Rect) -> Result<()> {
        check_rect(id, &rect)?;
        let i = *self
            .index
            .get(id)
            .ok_or_else(|| LayoutError::UnknownRoom(id.clone()))?;
        self.rooms[i].1 = rect;
        Ok(())
    }

    /// Change the base kind of a room, keeping its index and position
    ///
    /// Returns the new id; collisions resolve the same way as `insert_unique`.
    pub fn rename(&mut self, id: &RoomId, kind: RoomKind) -> Result<RoomId> {
        let i = self
            .index
            .remove(id)
            .ok_or_else(|| LayoutError::UnknownRoom(id.clone()))?;

        let mut new_id = id.with_kind(kind);
        if self.index.contains_key(&new_id) {
            new_id = self.resolve_collision(&new_id, id);
            tracing::debug!(from = %id, to = %new_id, "Resolved rename collision");
        }

        self.index.insert(new_id.clone(), i);
        self.rooms[i].0 = new_id.clone();
        Ok(new_id)
    }

    fn push(&mut self, id: RoomId, rect: Rect) {
        self.index.insert(id.clone(), self.rooms.len());
        self.rooms.push((id, rect));
    }

    /// First free id of the form `Kind_<origin>`, then `Kind_<origin>_<n>`
    fn resolve_collision(&self, taken: &RoomId, origin: &RoomId) -> RoomId {
        let stem = origin.to_string();
        let candidate = RoomId::indexed(taken.kind.clone(), stem.clone());
        if !self.index.contains_key(&candidate) {
            return candidate;
        }

        (2usize..)
            .map(|n| RoomId::indexed(taken.kind.clone(), format!("{}_{}", stem, n)))
            .find(|id| !self.index.contains_key(id))
            .unwrap_or(candidate)
    }
}

fn check_rect(id: &RoomId, rect: &Rect) -> Result<()> {
    if rect.is_valid() {
        Ok(())
    } else {
        Err(LayoutError::InvalidRect {
            room: id.clone(),
            width: rect.width,
            height: rect.height,
        })
    }
}

impl PartialEq for Layout {
    fn eq(&self, other: &Self) -> bool {
        self.rooms == other.rooms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect() -> Rect {
        Rect::new(0.0, 0.0, 4.0, 4.0)
    }

    #[test]
    fn test_try_insert_rejects_duplicates() {
        let mut layout = Layout::new();
        layout.try_insert(RoomId::parse("Kitchen"), rect()).unwrap();

        let err = layout.try_insert(RoomId::parse("Kitchen"), rect()).unwrap_err();
        assert_eq!(err, LayoutError::NameCollision(RoomId::parse("Kitchen")));
        assert_eq!(layout.len(), 1);
    }

    #[test]
    fn test_insert_unique_resolves_collision() {
        let mut layout = Layout::new();
        layout.try_insert(RoomId::parse("Balcony"), rect()).unwrap();

        let origin = RoomId::parse("Study");
        let id = layout
            .insert_unique(RoomId::parse("Balcony"), rect(), &origin)
            .unwrap();
        assert_eq!(id.to_string(), "Balcony_Study");

        let again = layout
            .insert_unique(RoomId::parse("Balcony"), rect(), &origin)
            .unwrap();
        assert_eq!(again.to_string(), "Balcony_Study_2");
        assert_eq!(layout.len(), 3);
    }

    #[test]
    fn test_rename_keeps_position() {
        let layout = Layout::from_rooms([
            (RoomId::parse("Bedroom_1"), rect()),
            (RoomId::parse("Garage"), rect()),
            (RoomId::parse("Kitchen"), rect()),
        ])
        .unwrap();

        let mut derived = layout.clone();
        let new_id = derived.rename(&RoomId::parse("Garage"), RoomKind::Storage).unwrap();

        assert_eq!(new_id.to_string(), "Storage");
        let names: Vec<String> = derived.ids().map(|id| id.to_string()).collect();
        assert_eq!(names, vec!["Bedroom_1", "Storage", "Kitchen"]);

        // The original is untouched
        assert!(layout.contains(&RoomId::parse("Garage")));
    }

    #[test]
    fn test_degenerate_rects_are_rejected() {
        let kitchen = RoomId::parse("Kitchen");
        for bad in [
            Rect::new(0.0, 0.0, 0.0, 4.0),
            Rect::new(0.0, 0.0, 4.0, -1.0),
            Rect::new(f64::NAN, 0.0, 4.0, 4.0),
        ] {
            assert!(matches!(
                Layout::from_rooms([(kitchen.clone(), bad)]),
                Err(LayoutError::InvalidRect { .. })
            ));
        }

        let mut layout = Layout::from_rooms([(kitchen.clone(), rect())]).unwrap();
        let err = layout
            .insert_unique(kitchen.clone(), Rect::new(0.0, 0.0, 0.0, 0.0), &kitchen)
            .unwrap_err();
        assert!(matches!(err, LayoutError::InvalidRect { .. }));
        assert_eq!(layout.len(), 1);

        let err = layout
            .set_rect(&kitchen, Rect::new(0.0, 0.0, 4.0, 0.0))
            .unwrap_err();
        assert!(matches!(err, LayoutError::InvalidRect { .. }));
        assert_eq!(layout.get(&kitchen), Some(&rect()));
    }

    #[test]
    fn test_rename_unknown_room() {
        let mut layout = Layout::new();
        assert!(matches!(
            layout.rename(&RoomId::parse("Garage"), RoomKind::Study),
            Err(LayoutError::UnknownRoom(_))
        ));
    }

    #[test]
    fn test_set_rect() {
        let mut layout = Layout::from_rooms([(RoomId::parse("Study_1"), rect())]).unwrap();
        let shrunk = Rect::new(1.0, 0.0, 3.0, 4.0);
        layout.set_rect(&RoomId::parse("Study_1"), shrunk).unwrap();
        assert_eq!(layout.get(&RoomId::parse("Study_1")), Some(&shrunk));
    }
}
