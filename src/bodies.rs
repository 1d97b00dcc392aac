/*
 * Almagest Toolkit
 * Copyright (C) 2022-onward Almagest contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Target bodies and their static physical properties.

use serde_derive::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{equatorial_radii_km, reciprocal_masses};

/// A body the pipeline can point at.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    Sun,
    Moon,
    Mercury,
    Venus,
    Earth,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    /// Earth-Moon barycenter
    Emb,
    /// Solar System barycenter
    Ssb,
    /// An asteroid or comet identified by its index in the caller's element
    /// supplier.
    MinorBody(usize),
    /// The nutation angles pseudo-target (DE files carry them)
    Nutation,
    /// The lunar libration pseudo-target
    Libration,
}

impl Target {
    /// The eight major planets, nearest first.
    pub const PLANETS: [Target; 8] = [
        Target::Mercury,
        Target::Venus,
        Target::Earth,
        Target::Mars,
        Target::Jupiter,
        Target::Saturn,
        Target::Uranus,
        Target::Neptune,
    ];

    /// Sun/body reciprocal mass, `None` for massless or pseudo targets.
    pub const fn reciprocal_mass(&self) -> Option<f64> {
        match self {
            Target::Sun => Some(1.0),
            Target::Mercury => Some(reciprocal_masses::MERCURY),
            Target::Venus => Some(reciprocal_masses::VENUS),
            Target::Earth => Some(reciprocal_masses::EARTH),
            Target::Emb => Some(reciprocal_masses::EARTH_MOON),
            Target::Mars => Some(reciprocal_masses::MARS),
            Target::Jupiter => Some(reciprocal_masses::JUPITER),
            Target::Saturn => Some(reciprocal_masses::SATURN),
            Target::Uranus => Some(reciprocal_masses::URANUS),
            Target::Neptune => Some(reciprocal_masses::NEPTUNE),
            Target::Pluto => Some(reciprocal_masses::PLUTO),
            Target::Moon => Some(reciprocal_masses::MOON),
            _ => None,
        }
    }

    /// Equatorial radius in kilometers, `None` for barycenters and pseudo
    /// targets (minor bodies get theirs from the orbital-element record).
    pub const fn equatorial_radius_km(&self) -> Option<f64> {
        match self {
            Target::Sun => Some(equatorial_radii_km::SUN),
            Target::Moon => Some(equatorial_radii_km::MOON),
            Target::Mercury => Some(equatorial_radii_km::MERCURY),
            Target::Venus => Some(equatorial_radii_km::VENUS),
            Target::Earth => Some(equatorial_radii_km::EARTH),
            Target::Mars => Some(equatorial_radii_km::MARS),
            Target::Jupiter => Some(equatorial_radii_km::JUPITER),
            Target::Saturn => Some(equatorial_radii_km::SATURN),
            Target::Uranus => Some(equatorial_radii_km::URANUS),
            Target::Neptune => Some(equatorial_radii_km::NEPTUNE),
            Target::Pluto => Some(equatorial_radii_km::PLUTO),
            _ => None,
        }
    }

    /// Whether this is a real body with a surface and a disc (rather than a
    /// barycenter or a pseudo target).
    pub const fn is_physical(&self) -> bool {
        !matches!(
            self,
            Target::Emb | Target::Ssb | Target::Nutation | Target::Libration
        )
    }

    pub fn name(&self) -> String {
        match self {
            Target::MinorBody(idx) => format!("minor body #{idx}"),
            other => format!("{other:?}"),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod bodies_ut {
    use super::*;

    #[test]
    fn masses_order_of_magnitude() {
        assert_eq!(Target::Sun.reciprocal_mass(), Some(1.0));
        assert!(Target::Jupiter.reciprocal_mass().unwrap() < 1100.0);
        assert!(Target::Mercury.reciprocal_mass().unwrap() > 6e6);
        assert!(Target::Ssb.reciprocal_mass().is_none());
    }

    #[test]
    fn pseudo_targets_are_not_physical() {
        assert!(!Target::Nutation.is_physical());
        assert!(!Target::Ssb.is_physical());
        assert!(Target::MinorBody(1).is_physical());
        assert!(Target::Moon.is_physical());
    }
}
