// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Structured room identifiers
//!
//! A room name such as `Bedroom_2` is a base kind plus an optional index.
//! All conversion between the display string and the structured form lives here.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Base type of a room, independent of its disambiguating index
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RoomKind {
    Garage,
    Kitchen,
    Bedroom,
    Washroom,
    Storage,
    Study,
    Balcony,
    Other(String),
}

impl RoomKind {
    pub fn as_str(&self) -> &str {
        match self {
            RoomKind::Garage => "Garage",
            RoomKind::Kitchen => "Kitchen",
            RoomKind::Bedroom => "Bedroom",
            RoomKind::Washroom => "Washroom",
            RoomKind::Storage => "Storage",
            RoomKind::Study => "Study",
            RoomKind::Balcony => "Balcony",
            RoomKind::Other(name) => name,
        }
    }

    fn from_name(name: &str) -> Self {
        match name {
            "Garage" => RoomKind::Garage,
            "Kitchen" => RoomKind::Kitchen,
            "Bedroom" => RoomKind::Bedroom,
            "Washroom" => RoomKind::Washroom,
            "Storage" => RoomKind::Storage,
            "Study" => RoomKind::Study,
            "Balcony" => RoomKind::Balcony,
            other => RoomKind::Other(other.to_string()),
        }
    }
}

impl fmt::Display for RoomKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Room identifier: base kind plus optional index (`Bedroom_3`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomId {
    pub kind: RoomKind,
    pub index: Option<String>,
}

impl RoomId {
    pub fn new(kind: RoomKind) -> Self {
        Self { kind, index: None }
    }

    pub fn indexed(kind: RoomKind, index: impl Into<String>) -> Self {
        Self {
            kind,
            index: Some(index.into()),
        }
    }

    /// Same index, different base kind (`Bedroom_3` -> `Study_3`)
    pub fn with_kind(&self, kind: RoomKind) -> Self {
        Self {
            kind,
            index: self.index.clone(),
        }
    }

    pub fn is(&self, kind: &RoomKind) -> bool {
        &self.kind == kind
    }

    /// Parse a display name, splitting at the first underscore
    pub fn parse(name: &str) -> Self {
        match name.split_once('_') {
            Some((base, index)) => Self::indexed(RoomKind::from_name(base), index),
            None => Self::new(RoomKind::from_name(name)),
        }
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.index {
            Some(index) => write!(f, "{}_{}", self.kind, index),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl FromStr for RoomId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl Serialize for RoomId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RoomId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::parse(&name))
    }
}
