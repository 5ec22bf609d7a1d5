// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Rectangular floor layouts and rule-based first-floor derivation
//!
//! This crate provides:
//! 1. A structured room identifier (`Bedroom_2` = kind + index)
//! 2. An ordered, uniqueness-enforcing `Layout` value type
//! 3. A randomized ground-floor generator
//! 4. Three first-floor derivation approaches, including boundary-aware
//!    balcony carving
//!
//! All random decisions take an explicit `rand::Rng`, so seeded generators
//! reproduce the same layouts.
//!
//! # Usage
//!
//! ```rust,ignore
//! use floorgen_layout::{generate_base_layout, generate_first_floor, CarveConfig, GeneratorConfig};
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//! let config = GeneratorConfig::default();
//! let ground = generate_base_layout(&config, &mut rng)?;
//! let first = generate_first_floor(&ground, config.bounds()?, Some(3), &CarveConfig::default(), &mut rng)?;
//! ```

pub mod carving;
pub mod error;
pub mod first_floor;
pub mod generator;
pub mod layout;
pub mod room;
pub mod types;

pub use carving::{carve_balcony, split_strip, CarveConfig, Carved};
pub use error::{LayoutError, Result};
pub use first_floor::{apply_approach, generate_first_floor, Approach};
pub use generator::{generate_base_layout, GeneratorConfig, RoomProgram};
pub use layout::Layout;
pub use room::{RoomId, RoomKind};
pub use types::{FloorBounds, Rect, Side};
