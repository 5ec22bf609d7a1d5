// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! First-floor derivation from a ground-floor layout
//!
//! Three rule sets rewrite a base layout:
//! 1. Storage conversion: Garage -> Storage, one Bedroom -> Study, no balconies.
//! 2. Single balcony: Garage -> Study, one Bedroom gets a balcony.
//! 3. Full balconies: Garage -> Study, every Study and Bedroom gets a balcony.
//!
//! Balconies only appear on rooms touching the outer floor boundary.

use crate::carving::{carve_balcony, CarveConfig};
use crate::error::{LayoutError, Result};
use crate::layout::Layout;
use crate::room::RoomKind;
use crate::types::FloorBounds;
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rule set used to derive the first floor
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Approach {
    StorageConversion,
    SingleBalcony,
    FullBalconies,
}

impl Approach {
    pub const ALL: [Approach; 3] = [
        Approach::StorageConversion,
        Approach::SingleBalcony,
        Approach::FullBalconies,
    ];

    pub fn number(self) -> u8 {
        match self {
            Approach::StorageConversion => 1,
            Approach::SingleBalcony => 2,
            Approach::FullBalconies => 3,
        }
    }

    /// Uniform choice among the three approaches
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

impl TryFrom<u8> for Approach {
    type Error = LayoutError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(Approach::StorageConversion),
            2 => Ok(Approach::SingleBalcony),
            3 => Ok(Approach::FullBalconies),
            other => Err(LayoutError::InvalidApproach(other)),
        }
    }
}

impl fmt::Display for Approach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "approach {}", self.number())
    }
}

/// Derive a first-floor layout from `base`
///
/// `approach` selects the rule set by number; `None` picks one uniformly at
/// random. Numbers outside 1..=3 are rejected with `InvalidApproach`.
pub fn generate_first_floor<R: Rng + ?Sized>(
    base: &Layout,
    bounds: FloorBounds,
    approach: Option<u8>,
    config: &CarveConfig,
    rng: &mut R,
) -> Result<Layout> {
    let approach = match approach {
        Some(number) => Approach::try_from(number)?,
        None => Approach::random(rng),
    };
    apply_approach(base, bounds, approach, config, rng)
}

/// Apply one specific approach to `base`, returning a new layout
pub fn apply_approach<R: Rng + ?Sized>(
    base: &Layout,
    bounds: FloorBounds,
    approach: Approach,
    config: &CarveConfig,
    rng: &mut R,
) -> Result<Layout> {
    config.validate()?;

    let mut plan = base.clone();
    match approach {
        Approach::StorageConversion => {
            rename_all(&mut plan, &RoomKind::Garage, RoomKind::Storage)?;

            let bedrooms = plan.ids_of_kind(&RoomKind::Bedroom);
            if let Some(chosen) = bedrooms.choose(rng) {
                let study = plan.rename(chosen, RoomKind::Study)?;
                tracing::debug!(from = %chosen, to = %study, "Converted bedroom to study");
            }
        }
        Approach::SingleBalcony => {
            rename_all(&mut plan, &RoomKind::Garage, RoomKind::Study)?;

            let bedrooms = plan.ids_of_kind(&RoomKind::Bedroom);
            if let Some(chosen) = bedrooms.choose(rng) {
                carve_balcony(&mut plan, chosen, bounds, config, rng)?;
            }
        }
        Approach::FullBalconies => {
            rename_all(&mut plan, &RoomKind::Garage, RoomKind::Study)?;

            let candidates: Vec<_> = plan
                .ids()
                .filter(|id| id.is(&RoomKind::Study) || id.is(&RoomKind::Bedroom))
                .cloned()
                .collect();
            for room in &candidates {
                carve_balcony(&mut plan, room, bounds, config, rng)?;
            }
        }
    }

    tracing::info!(
        approach = approach.number(),
        rooms = plan.len(),
        balconies = plan.count_kind(&RoomKind::Balcony),
        "Derived first-floor layout"
    );
    Ok(plan)
}

fn rename_all(plan: &mut Layout, from: &RoomKind, to: RoomKind) -> Result<()> {
    for id in plan.ids_of_kind(from) {
        plan.rename(&id, to.clone())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approach_numbers_roundtrip() {
        for approach in Approach::ALL {
            assert_eq!(Approach::try_from(approach.number()).unwrap(), approach);
        }
    }

    #[test]
    fn test_out_of_range_approach() {
        assert_eq!(Approach::try_from(0), Err(LayoutError::InvalidApproach(0)));
        assert_eq!(Approach::try_from(4), Err(LayoutError::InvalidApproach(4)));
    }
}
